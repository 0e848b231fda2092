use thiserror::Error;

/// Malformed source structure. Always fatal for the whole run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
  /// The root element does not match the grammar it was dispatched to.
  #[error("unexpected root node <{found}>, expected <{expected}>")]
  UnexpectedRoot {
    expected: &'static str,
    found:    String,
  },

  /// A required attribute is absent.
  #[error("{element} requires a {attribute}")]
  MissingAttribute {
    element:   String,
    attribute: &'static str,
  },

  /// A required child element is absent.
  #[error("{element} requires a <{child}> element")]
  MissingElement {
    element: String,
    child:   &'static str,
  },

  /// A child element that the enclosing context does not allow.
  #[error("invalid {context} element {element}")]
  InvalidElement {
    context: &'static str,
    element: String,
  },

  /// Two headings in one document resolved to the same anchor.
  #[error("duplicate anchor `{0}`")]
  DuplicateAnchor(String),
}

impl StructuralError {
  pub(crate) fn missing_attribute(
    element: impl Into<String>,
    attribute: &'static str,
  ) -> Self {
    Self::MissingAttribute {
      element: element.into(),
      attribute,
    }
  }

  pub(crate) fn invalid_element(
    context: &'static str,
    element: impl Into<String>,
  ) -> Self {
    Self::InvalidElement {
      context,
      element: element.into(),
    }
  }
}

/// Failures while producing final HTML from finished documents.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("Template error: {0}")]
  Template(#[from] tera::Error),

  #[error("Failed to serialize merged HTML: {0}")]
  Serialize(#[from] std::io::Error),

  #[error("Merged HTML is not valid UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}
