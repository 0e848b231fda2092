use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for ltdoc
#[derive(Parser, Debug)]
#[command(
  name = "ltdoc",
  author,
  version,
  about = "Compile the lighttpd2 XML reference into HTML pages"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Directory the HTML pages are written to. Overrides `output_dir` from
  /// the configuration.
  #[arg(value_name = "OUTPUT_DIR")]
  pub output_dir: Option<PathBuf>,

  /// Directory containing the XML sources.
  #[arg(short, long)]
  pub input_dir: Option<PathBuf>,

  /// Skip schema validation of the sources.
  #[arg(long)]
  pub no_validate: bool,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the ltdoc CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new ltdoc configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "ltdoc.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the page template and stylesheet for customization.
  Export {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Configuration overrides implied by plain flags, in `KEY=VALUE` form.
  ///
  /// These are applied after `--config` overrides so the dedicated flags
  /// always win.
  #[must_use]
  pub fn flag_overrides(&self) -> Vec<String> {
    let mut overrides = self.config_overrides.clone();
    if let Some(input_dir) = &self.input_dir {
      overrides.push(format!("input_dir={}", input_dir.display()));
    }
    if let Some(output_dir) = &self.output_dir {
      overrides.push(format!("output_dir={}", output_dir.display()));
    }
    if self.no_validate {
      overrides.push("validate=false".to_string());
    }
    overrides
  }
}
