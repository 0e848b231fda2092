//! Rendering finished documents and writing them to disk.
use std::{
  fs,
  path::{Path, PathBuf},
  rc::Rc,
};

use log::info;
use ltdoc_config::Config;
use ltdoc_html::{OutputDocument, PageRenderer, template::PAGE_TEMPLATE_NAME};
use ltdoc_templates::{DEFAULT_CSS, PAGE_TEMPLATE, STYLESHEET_NAME};

use crate::error::BuildError;

/// A page rendered to its final HTML, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
  pub filename: String,
  pub html:     String,
}

/// Read `name` from the configured template directory, if it is there.
fn custom_template(
  config: &Config,
  name: &str,
) -> Result<Option<String>, BuildError> {
  let Some(path) = config.get_template_file(name) else {
    return Ok(None);
  };
  if !path.is_file() {
    return Ok(None);
  }

  info!("Using custom template: {}", path.display());
  fs::read_to_string(&path)
    .map(Some)
    .map_err(|e| BuildError::io(path, e))
}

/// Build the page renderer, preferring `page.html` from `template_dir`.
///
/// # Errors
///
/// Returns an error if the custom template cannot be read or does not
/// compile.
pub fn load_page_renderer(config: &Config) -> Result<PageRenderer, BuildError> {
  let template = custom_template(config, PAGE_TEMPLATE_NAME)?;
  Ok(PageRenderer::new(
    template.as_deref().unwrap_or(PAGE_TEMPLATE),
    config.site_title.as_str(),
  )?)
}

/// The stylesheet to write next to the pages, preferring `style.css` from
/// `template_dir`.
///
/// # Errors
///
/// Returns an error if the custom stylesheet cannot be read.
pub fn load_stylesheet(config: &Config) -> Result<String, BuildError> {
  Ok(
    custom_template(config, STYLESHEET_NAME)?
      .unwrap_or_else(|| DEFAULT_CSS.to_string()),
  )
}

/// Render every page in order.
///
/// # Errors
///
/// Returns the first rendering failure.
pub fn render_pages(
  pages: &[Rc<OutputDocument>],
  renderer: &PageRenderer,
) -> Result<Vec<RenderedPage>, BuildError> {
  pages
    .iter()
    .map(|page| {
      Ok(RenderedPage {
        filename: page.filename(),
        html:     renderer.render(page)?,
      })
    })
    .collect()
}

/// Write rendered pages (and optionally the stylesheet) into `output_dir`.
///
/// Returns the paths written, in order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// written.
pub fn write_pages(
  output_dir: &Path,
  pages: &[RenderedPage],
  stylesheet: Option<&str>,
) -> Result<Vec<PathBuf>, BuildError> {
  fs::create_dir_all(output_dir).map_err(|e| BuildError::io(output_dir, e))?;

  let files = pages
    .iter()
    .map(|page| (page.filename.as_str(), page.html.as_str()))
    .chain(stylesheet.map(|css| (STYLESHEET_NAME, css)));

  let mut written = Vec::new();
  for (filename, content) in files {
    info!("Writing {}: {filename}", output_dir.display());
    let path = output_dir.join(filename);
    fs::write(&path, content).map_err(|e| BuildError::io(&path, e))?;
    written.push(path);
  }

  Ok(written)
}
