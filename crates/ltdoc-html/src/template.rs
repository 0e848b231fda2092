//! Wrapping finished documents into complete HTML pages.
use tera::Tera;

use crate::{
  builder::HtmlBuilder,
  document::{OutputDocument, TocNode},
  error::RenderError,
  merge::MERGED_BASENAME,
  navigation::NAVIGATION_BASENAME,
};

/// Name the page shell is registered under.
pub const PAGE_TEMPLATE_NAME: &str = "page.html";

fn toc_level(out: &mut HtmlBuilder, nodes: &[TocNode]) {
  for node in nodes {
    out.open("li", &[("class", node.css_class.as_deref().unwrap_or_default())]);
    match &node.anchor {
      Some(anchor) => {
        out.link(&format!("#{anchor}"), &node.title);
      },
      None => {
        out.element("span", &[], &node.title);
      },
    }
    if !node.children.is_empty() {
      out.open("ul", &[("class", "nav")]);
      toc_level(out, &node.children);
      out.close("ul");
    }
    out.close("li");
  }
}

/// Render the sidebar navigation for `page`.
///
/// Every page except the navigation and merged pages starts with a link
/// back to the navigation page. A page without TOC entries has no sidebar.
#[must_use]
pub fn render_toc(page: &OutputDocument) -> String {
  if page.toc.is_empty() {
    return String::new();
  }

  let mut out = HtmlBuilder::new();
  out.open("ul", &[("class", "nav bs-sidenav")]);
  if page.basename != NAVIGATION_BASENAME && page.basename != MERGED_BASENAME {
    out
      .open("li", &[("class", "index")])
      .link(&format!("{NAVIGATION_BASENAME}.html"), "Index")
      .close("li");
  }
  toc_level(&mut out, &page.toc);
  out.close("ul");
  out.finish()
}

/// Full `<title>` text for a page.
#[must_use]
pub fn page_title(site_title: &str, page_title: &str) -> String {
  if page_title.is_empty() {
    site_title.to_string()
  } else {
    format!("{site_title} - {page_title}")
  }
}

/// Renders [`OutputDocument`]s through a tera page shell.
#[derive(Debug)]
pub struct PageRenderer {
  tera:       Tera,
  site_title: String,
}

impl PageRenderer {
  /// Compile `template` as the page shell.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::Template`] if the template does not parse.
  pub fn new(
    template: &str,
    site_title: impl Into<String>,
  ) -> Result<Self, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE_NAME, template)?;
    Ok(Self {
      tera,
      site_title: site_title.into(),
    })
  }

  /// Produce the complete HTML page for `page`.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::Template`] if rendering fails.
  pub fn render(&self, page: &OutputDocument) -> Result<String, RenderError> {
    let mut context = tera::Context::new();
    context.insert("title", &page_title(&self.site_title, &page.title));
    context.insert("site_title", &self.site_title);
    context.insert("page_title", &page.title);
    context.insert("basename", &page.basename);
    context.insert("kind", &page.kind);
    context.insert("toc", &render_toc(page));
    context.insert("content", &page.content);

    Ok(self.tera.render(PAGE_TEMPLATE_NAME, &context)?)
  }
}
