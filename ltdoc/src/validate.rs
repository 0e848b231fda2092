//! Schema validation of the XML sources before any document is compiled.
use std::{
  path::{Path, PathBuf},
  process::Command,
};

use log::{debug, error, info};
use ltdoc_config::Config;

use crate::error::BuildError;

/// Checks source files against the documentation schema.
pub trait SchemaValidator {
  /// Validate `files` as one batch.
  ///
  /// # Errors
  ///
  /// Returns every diagnostic the validator produced if any file fails.
  fn validate(&self, files: &[PathBuf]) -> Result<(), Vec<String>>;
}

/// Runs `xmllint --noout --schema <schema> <files>...`.
#[derive(Debug, Clone)]
pub struct XmllintValidator {
  program: String,
  schema:  PathBuf,
}

impl XmllintValidator {
  #[must_use]
  pub fn new(program: impl Into<String>, schema: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      schema:  schema.into(),
    }
  }

  /// The validator the configuration asks for, or `None` when validation
  /// is disabled.
  ///
  /// # Errors
  ///
  /// Returns [`BuildError::MissingSchema`] if validation is enabled but the
  /// schema file does not exist.
  pub fn from_config(config: &Config) -> Result<Option<Self>, BuildError> {
    if !config.validate {
      info!("Schema validation disabled");
      return Ok(None);
    }

    let schema = config.schema_path();
    if !schema.is_file() {
      error!("Schema {} not found", schema.display());
      return Err(BuildError::MissingSchema(schema));
    }

    Ok(Some(Self::new(config.xmllint.clone(), schema)))
  }

  #[must_use]
  pub fn schema(&self) -> &Path {
    &self.schema
  }
}

/// Problem lines from xmllint output. Lines reporting success are dropped.
fn diagnostics(output: &str) -> Vec<String> {
  output
    .lines()
    .map(str::trim_end)
    .filter(|line| !line.is_empty() && !line.ends_with(" validates"))
    .map(str::to_string)
    .collect()
}

impl SchemaValidator for XmllintValidator {
  fn validate(&self, files: &[PathBuf]) -> Result<(), Vec<String>> {
    if files.is_empty() {
      return Ok(());
    }

    let output = Command::new(&self.program)
      .arg("--noout")
      .arg("--schema")
      .arg(&self.schema)
      .args(files)
      .output()
      .map_err(|e| vec![format!("Failed to execute `{}`: {e}", self.program)])?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
      for line in stderr.lines() {
        debug!("{line}");
      }
      return Ok(());
    }

    let mut problems = diagnostics(&stderr);
    problems.extend(diagnostics(&String::from_utf8_lossy(&output.stdout)));
    if problems.is_empty() {
      problems.push(format!("`{}` exited with {}", self.program, output.status));
    }
    Err(problems)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn diagnostics_skip_success_lines() {
    let output = "\
mod_a.xml validates
mod_b.xml:3: element foo: Schemas validity error : Element 'foo': This element is not expected.
mod_b.xml fails to validate
";
    assert_eq!(diagnostics(output), [
      "mod_b.xml:3: element foo: Schemas validity error : Element 'foo': This \
       element is not expected.",
      "mod_b.xml fails to validate",
    ]);
  }

  #[test]
  fn missing_schema_is_fatal_unless_validation_is_off() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir in test");
    let mut config = Config {
      input_dir: dir.path().to_path_buf(),
      ..Default::default()
    };
    let err = XmllintValidator::from_config(&config)
      .expect_err("schema is missing");
    assert!(matches!(
      err,
      BuildError::MissingSchema(ref path) if path == &dir.path().join("doc_schema.xsd")
    ));

    config.validate = false;
    assert!(
      XmllintValidator::from_config(&config)
        .expect("validation is off")
        .is_none()
    );
  }

  #[test]
  fn existing_schema_yields_a_validator() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir in test");
    std::fs::write(dir.path().join("doc_schema.xsd"), "")
      .expect("Failed to write schema in test");
    let config = Config {
      input_dir: dir.path().to_path_buf(),
      ..Default::default()
    };

    let validator = XmllintValidator::from_config(&config)
      .expect("schema exists")
      .expect("validation is on");
    assert_eq!(validator.schema(), dir.path().join("doc_schema.xsd"));
  }

  #[test]
  fn empty_batch_never_runs_the_program() {
    let validator = XmllintValidator::new("ltdoc-no-such-program", "x.xsd");
    assert_eq!(validator.validate(&[]), Ok(()));
  }

  #[test]
  fn missing_program_is_reported() {
    let validator = XmllintValidator::new("ltdoc-no-such-program", "x.xsd");
    let problems = validator
      .validate(&[PathBuf::from("a.xml")])
      .expect_err("program does not exist");
    assert!(problems[0].starts_with("Failed to execute `ltdoc-no-such-program`"));
  }

  #[cfg(unix)]
  #[test]
  fn exit_status_decides_the_outcome() {
    let files = [PathBuf::from("a.xml")];
    assert_eq!(XmllintValidator::new("true", "x.xsd").validate(&files), Ok(()));

    let problems = XmllintValidator::new("false", "x.xsd")
      .validate(&files)
      .expect_err("false always fails");
    assert_eq!(problems.len(), 1);
    assert!(problems[0].starts_with("`false` exited with"));
  }
}
