//! Discovers sources, compiles them and assembles the full page set.
use std::{
  path::{Path, PathBuf},
  rc::Rc,
};

use log::{debug, error, info, warn};
use ltdoc_config::Config;
use ltdoc_html::{
  CommonMarkRenderer,
  DocumentKind,
  Grammar,
  MarkupRenderer,
  OutputDocument,
  build_document,
  build_module_index,
  build_navigation,
  merge_documents,
  sort_documents,
};
use walkdir::WalkDir;

use crate::{
  error::BuildError,
  output::{load_page_renderer, load_stylesheet, render_pages, write_pages},
  validate::SchemaValidator,
};

/// All `*.xml` files directly inside `input_dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`BuildError::Discover`] if the directory cannot be listed.
pub fn discover_sources(input_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let mut sources = Vec::new();
  for entry in WalkDir::new(input_dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
  {
    let entry = entry.map_err(|source| {
      BuildError::Discover {
        path: input_dir.to_path_buf(),
        source,
      }
    })?;
    let path = entry.path();
    if entry.file_type().is_file()
      && path.extension().is_some_and(|ext| ext == "xml")
    {
      sources.push(path.to_path_buf());
    }
  }
  Ok(sources)
}

/// Compile one source file.
///
/// Returns `None` for documents whose root element names no known grammar.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or violates its grammar.
pub fn compile_source(
  path: &Path,
  renderer: &dyn MarkupRenderer,
) -> Result<Option<OutputDocument>, BuildError> {
  let root = ltdoc_xml::load_file(path).map_err(|source| {
    BuildError::Xml {
      path: path.to_path_buf(),
      source,
    }
  })?;

  let Some(grammar) = Grammar::from_root(&root.name) else {
    info!("Skipping {}: unknown root <{}>", path.display(), root.name);
    return Ok(None);
  };

  let basename = path
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_default();

  build_document(grammar, &basename, &root, renderer)
    .map(Some)
    .map_err(|source| {
      BuildError::Structure {
        path: path.to_path_buf(),
        source,
      }
    })
}

/// Add the synthetic pages to the compiled `documents` and put everything
/// in emission order.
///
/// The module index lists every module and becomes their parent in
/// navigation. The merged and navigation pages cover all other pages in
/// emission order, followed by the module index.
///
/// # Errors
///
/// Returns an error if a synthetic page cannot be built.
pub fn assemble(
  mut documents: Vec<Rc<OutputDocument>>,
) -> Result<Vec<Rc<OutputDocument>>, BuildError> {
  sort_documents(&mut documents);

  let module_index = build_module_index(&documents)
    .map_err(|source| {
      BuildError::Assemble {
        page: "module index",
        source,
      }
    })?
    .map(Rc::new);

  // `documents` is sorted; the module index always comes after it.
  let top_level: Vec<_> = documents
    .iter()
    .filter(|doc| doc.kind != DocumentKind::Module)
    .cloned()
    .chain(module_index.iter().cloned())
    .collect();

  let merged = merge_documents(&top_level)?;
  let navigation = build_navigation(&top_level).map_err(|source| {
    BuildError::Assemble {
      page: "navigation",
      source,
    }
  })?;

  documents.extend(module_index);
  documents.push(Rc::new(merged));
  documents.push(Rc::new(navigation));
  sort_documents(&mut documents);
  Ok(documents)
}

/// Run a complete build as described by `config`.
///
/// Nothing is written unless every stage succeeds. Returns the paths of
/// the written files.
///
/// # Errors
///
/// Returns the first failure of any stage.
pub fn build(
  config: &Config,
  validator: Option<&dyn SchemaValidator>,
) -> Result<Vec<PathBuf>, BuildError> {
  let sources = discover_sources(&config.input_dir)?;
  if sources.is_empty() {
    warn!("No XML sources found in {}", config.input_dir.display());
  }

  if let Some(validator) = validator {
    validator.validate(&sources).map_err(|problems| {
      for problem in &problems {
        error!("{problem}");
      }
      BuildError::Validation(problems)
    })?;
    info!("Validated {} sources", sources.len());
  }

  let page_renderer = load_page_renderer(config)?;
  let markup = CommonMarkRenderer::default();

  let mut documents = Vec::with_capacity(sources.len());
  for path in &sources {
    info!("Compiling {}", path.display());
    if let Some(document) = compile_source(path, &markup)? {
      documents.push(Rc::new(document));
    }
  }

  let pages = assemble(documents)?;
  debug!("Rendering {} pages", pages.len());
  let rendered = render_pages(&pages, &page_renderer)?;

  let stylesheet = if config.copy_stylesheet {
    Some(load_stylesheet(config)?)
  } else {
    None
  };

  write_pages(&config.output_dir, &rendered, stylesheet.as_deref())
}
