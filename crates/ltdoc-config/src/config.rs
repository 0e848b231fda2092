use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File names searched for in the working directory, in order.
pub const CONFIG_FILENAMES: [&str; 4] =
  ["ltdoc.toml", "ltdoc.json", ".ltdoc.toml", ".ltdoc.json"];

/// Configuration for the ltdoc documentation compiler.
///
/// Fields are typically loaded from a TOML or JSON config file and can be
/// overridden from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory containing the XML sources.
  pub input_dir: PathBuf,

  /// Directory the pages are written to.
  pub output_dir: PathBuf,

  /// Prefix of every page's `<title>`.
  pub site_title: String,

  /// Schema the sources are validated against. Relative paths are resolved
  /// against `input_dir`.
  pub schema: PathBuf,

  /// Whether to validate sources before compiling.
  pub validate: bool,

  /// Program used for schema validation.
  pub xmllint: String,

  /// Directory containing a custom `page.html`.
  pub template_dir: Option<PathBuf>,

  /// Whether to write the bundled stylesheet next to the pages.
  pub copy_stylesheet: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:       PathBuf::from("."),
      output_dir:      PathBuf::from("."),
      site_title:      "lighttpd2".to_string(),
      schema:          PathBuf::from("doc_schema.xsd"),
      validate:        true,
      xmllint:         "xmllint".to_string(),
      template_dir:    None,
      copy_stylesheet: true,
    }
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}

impl Config {
  /// Load configuration from a TOML or JSON file, picked by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format
  /// is unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from explicit files (merged in order) or a
  /// discovered one, then apply `KEY=VALUE` overrides.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first)?;
      for config_path in rest {
        merged_config.merge(Self::from_file(config_path)?);
      }
      if !rest.is_empty() {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged_config
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` form, names an
  /// unknown key or carries a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Set a single field by key.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys or unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "input_dir" => self.input_dir = PathBuf::from(value),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "site_title" => self.site_title = value.to_string(),
      "schema" => self.schema = PathBuf::from(value),
      "validate" => self.validate = parse_bool(key, value)?,
      "xmllint" => self.xmllint = value.to_string(),
      "template_dir" => {
        self.template_dir =
          (!value.is_empty()).then(|| PathBuf::from(value));
      },
      "copy_stylesheet" => self.copy_stylesheet = parse_bool(key, value)?,
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'. See documentation for \
           supported keys."
        )));
      },
    }
    Ok(())
  }

  /// Merge another config into this one, with the other config's values
  /// taking precedence.
  ///
  /// Plain fields are always replaced; an optional field is only replaced
  /// when the other config sets it.
  pub fn merge(&mut self, other: Self) {
    self.input_dir = other.input_dir;
    self.output_dir = other.output_dir;
    self.site_title = other.site_title;
    self.schema = other.schema;
    self.validate = other.validate;
    self.xmllint = other.xmllint;
    if other.template_dir.is_some() {
      self.template_dir = other.template_dir;
    }
    self.copy_stylesheet = other.copy_stylesheet;
  }

  /// The schema file, resolved against the input directory.
  #[must_use]
  pub fn schema_path(&self) -> PathBuf {
    if self.schema.is_absolute() {
      self.schema.clone()
    } else {
      self.input_dir.join(&self.schema)
    }
  }

  /// Path of a template file inside `template_dir`, if one is configured.
  ///
  /// This method does not check if the returned path exists.
  #[must_use]
  pub fn get_template_file(&self, name: &str) -> Option<PathBuf> {
    self.template_dir.as_ref().map(|dir| dir.join(name))
  }

  /// Search `dir` for one of the [`CONFIG_FILENAMES`].
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Search the working directory for a config file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Validate all paths specified in the configuration.
  ///
  /// # Errors
  ///
  /// Returns an error listing every configured path that does not exist or
  /// has the wrong type.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if !self.input_dir.is_dir() {
      errors.push(format!(
        "Input directory does not exist: {}",
        self.input_dir.display()
      ));
    }

    if let Some(ref template_dir) = self.template_dir {
      if !template_dir.exists() {
        errors.push(format!(
          "Template directory does not exist: {}",
          template_dir.display()
        ));
      } else if !template_dir.is_dir() {
        errors.push(format!(
          "Template directory path is not a directory: {}",
          template_dir.display()
        ));
      }
    }

    if self.output_dir.exists() && !self.output_dir.is_dir() {
      errors.push(format!(
        "Output path is not a directory: {}",
        self.output_dir.display()
      ));
    }

    if !errors.is_empty() {
      let error_message = errors.join("\n");
      return Err(ConfigError::Config(format!(
        "Configuration path validation errors:\n{error_message}"
      )));
    }

    Ok(())
  }

  /// Write a default configuration file with commented explanations.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export the embedded page shell and stylesheet for customization.
  ///
  /// Existing files are kept unless `force` is set.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory cannot be created or a file cannot
  /// be written.
  pub fn export_templates(
    output_dir: &Path,
    force: bool,
  ) -> Result<(), ConfigError> {
    fs::create_dir_all(output_dir).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to create template directory: {}: {}",
        output_dir.display(),
        e
      ))
    })?;

    let mut templates: Vec<_> =
      Self::get_template_sources().into_iter().collect();
    templates.sort_unstable();

    for (filename, content) in templates {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to write template file: {}: {}",
          file_path.display(),
          e
        ))
      })?;
      log::info!("Exported template: {}", file_path.display());
    }

    Ok(())
  }

  /// Mapping of template filenames to their embedded content.
  fn get_template_sources() -> HashMap<&'static str, &'static str> {
    ltdoc_templates::all_templates()
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.site_title, "lighttpd2");
    assert_eq!(config.schema_path(), PathBuf::from("./doc_schema.xsd"));
    assert!(config.validate);
    assert!(config.copy_stylesheet);
    assert_eq!(config.get_template_file("page.html"), None);
  }

  #[test]
  fn test_schema_path_is_resolved_against_input_dir() {
    let mut config = Config::default();
    config.input_dir = PathBuf::from("/src/doc");
    assert_eq!(config.schema_path(), PathBuf::from("/src/doc/doc_schema.xsd"));

    config.schema = PathBuf::from("/etc/schema.xsd");
    assert_eq!(config.schema_path(), PathBuf::from("/etc/schema.xsd"));
  }

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config::default();
    base.template_dir = Some(PathBuf::from("base-templates"));

    let mut override_config = Config::default();
    override_config.site_title = "Other".to_string();
    override_config.template_dir = None;

    base.merge(override_config);

    assert_eq!(base.template_dir, Some(PathBuf::from("base-templates")));
    assert_eq!(base.site_title, "Other");
  }

  #[test]
  fn test_config_merge_boolean_fields() {
    let mut base = Config::default();
    let mut override_config = Config::default();
    override_config.validate = false;
    override_config.copy_stylesheet = false;

    base.merge(override_config);

    assert!(!base.validate);
    assert!(!base.copy_stylesheet);
  }

  #[test]
  fn test_apply_overrides_string_and_path() {
    let mut config = Config::default();

    config
      .apply_overrides(&[
        "site_title = My Docs".to_string(),
        "output_dir=/tmp/output".to_string(),
        "template_dir=tpl".to_string(),
      ])
      .unwrap();

    assert_eq!(config.site_title, "My Docs");
    assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
    assert_eq!(config.template_dir, Some(PathBuf::from("tpl")));

    config.apply_override("template_dir", "").unwrap();
    assert_eq!(config.template_dir, None);
  }

  #[test]
  fn test_apply_override_bool_field() {
    let mut config = Config::default();

    config.apply_override("validate", "no").unwrap();
    assert!(!config.validate);

    config.apply_override("validate", "1").unwrap();
    assert!(config.validate);

    config.apply_override("copy_stylesheet", "FALSE").unwrap();
    assert!(!config.copy_stylesheet);
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();

    let result = config.apply_overrides(&["no_equals_sign".to_string()]);

    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Expected KEY=VALUE")
    );
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = Config::default();

    let result = config.apply_overrides(&["unknown_key=value".to_string()]);

    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Unknown configuration key")
    );
  }

  #[test]
  fn test_apply_overrides_invalid_boolean() {
    let mut config = Config::default();

    let result = config.apply_overrides(&["validate=maybe".to_string()]);

    assert!(result.unwrap_err().to_string().contains("Invalid boolean"));
  }
}
