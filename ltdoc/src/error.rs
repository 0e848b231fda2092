use std::{io, path::PathBuf};

use ltdoc_config::ConfigError;
use ltdoc_html::{RenderError, StructuralError};
use ltdoc_xml::XmlError;
use thiserror::Error;

/// Top-level error type for a documentation build.
///
/// Every variant is fatal; a failed build writes no pages.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Failed to list sources in {path}: {source}")]
  Discover {
    path:   PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error(
    "Schema {} not found. Pass --no-validate to build without validation",
    .0.display()
  )]
  MissingSchema(PathBuf),

  /// The schema validator rejected the sources.
  #[error("Couldn't validate XML files ({} problems)", .0.len())]
  Validation(Vec<String>),

  #[error("Failed to parse {path}: {source}")]
  Xml {
    path:   PathBuf,
    #[source]
    source: XmlError,
  },

  #[error("Invalid document {path}: {source}")]
  Structure {
    path:   PathBuf,
    #[source]
    source: StructuralError,
  },

  /// Structural failures while assembling the synthetic pages.
  #[error("Failed to assemble {page}: {source}")]
  Assemble {
    page:   &'static str,
    #[source]
    source: StructuralError,
  },

  #[error("Rendering error: {0}")]
  Render(#[from] RenderError),

  #[error("I/O error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}

impl BuildError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
