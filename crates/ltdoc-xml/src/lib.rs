//! `ltdoc-xml`.
//!
//! Reads ltdoc source documents into an owned [`Element`] tree. Namespaces
//! are resolved away: every element and attribute is addressed by its local
//! name, since all source documents share a single namespace.
//!
//! # Example
//!
//! ```
//! let root = ltdoc_xml::parse_document(
//!   r#"<chapter title="Intro"><description>hello</description></chapter>"#,
//! )
//! .unwrap();
//! assert_eq!(root.name, "chapter");
//! assert_eq!(root.attr("title"), Some("Intro"));
//! ```

pub mod error;
mod tree;

use std::path::Path;

pub use error::XmlError;
pub use tree::{Element, Node, parse_document};

/// Read and parse a single source file.
///
/// # Errors
///
/// Returns [`XmlError::ReadFile`] if the file cannot be read, or any parse
/// error from [`parse_document`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Element, XmlError> {
  let path = path.as_ref();
  let source = std::fs::read_to_string(path).map_err(|source| {
    XmlError::ReadFile {
      path: path.to_path_buf(),
      source,
    }
  })?;

  log::debug!("Parsing {}", path.display());
  parse_document(&source)
}
