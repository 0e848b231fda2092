use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a source document into a tree.
#[derive(Debug, Error)]
pub enum XmlError {
  /// The source file could not be read from disk.
  #[error("failed to read XML file `{path}`: {source}")]
  ReadFile {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The underlying reader rejected the input.
  #[error("malformed XML at byte {position}: {source}")]
  Syntax {
    position: u64,
    #[source]
    source:   quick_xml::Error,
  },

  /// An attribute could not be parsed.
  #[error("malformed attribute on <{element}>: {message}")]
  Attribute { element: String, message: String },

  /// Text, attribute values or names that are not valid UTF-8.
  #[error("invalid UTF-8 in XML input: {0}")]
  Utf8(#[from] std::str::Utf8Error),

  /// Entity reference that is neither predefined nor a character reference.
  #[error("unknown entity reference `&{0};`")]
  UnknownEntity(String),

  /// A closing tag that does not match the open element.
  #[error("mismatched closing tag </{found}>, expected </{expected}>")]
  MismatchedTag { expected: String, found: String },

  /// The document has no root element, or more than one.
  #[error("document must contain exactly one root element")]
  NoRoot,
}
