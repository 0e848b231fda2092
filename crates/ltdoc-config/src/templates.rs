use std::fmt;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration template in TOML, with every field explained.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# ltdoc Configuration File

# Directory containing the XML documentation sources
input_dir = "."

# Directory the HTML pages are written to
output_dir = "."

# Site title, prefixed to every page title
site_title = "lighttpd2"

# Schema the sources are validated against, relative to input_dir
schema = "doc_schema.xsd"

# Whether to validate sources before compiling them
validate = true

# Program used for schema validation
xmllint = "xmllint"

# Directory containing a custom page.html shell
# template_dir = "templates"

# Whether to write the bundled style.css next to the pages
copy_stylesheet = true
"#;

/// Default configuration template in JSON format.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input_dir": ".",
  "output_dir": ".",
  "site_title": "lighttpd2",
  "schema": "doc_schema.xsd",
  "validate": true,
  "xmllint": "xmllint",
  "copy_stylesheet": true
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
