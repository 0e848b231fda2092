use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use ltdoc::{
  cli::{Cli, Commands},
  driver,
  validate::{SchemaValidator, XmllintValidator},
};
use ltdoc_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  if let Some(command) = &cli.command {
    match command {
      Commands::Init {
        output,
        format,
        force,
      } => {
        // Check if file already exists and that we're not forcing overwrite
        if output.exists() && !force {
          bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output.display()
          );
        }

        if let Some(parent) = output.parent()
          && !parent.as_os_str().is_empty()
          && !parent.exists()
        {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }

        Config::generate_default_config(format, output).wrap_err_with(
          || {
            format!(
              "Failed to generate configuration file: {}",
              output.display()
            )
          },
        )?;

        info!(
          "Configuration file created successfully. Edit it to customize your \
           documentation build."
        );
      },

      Commands::Export { output_dir, force } => {
        Config::export_templates(output_dir, *force).wrap_err_with(|| {
          format!("Failed to export templates to {}", output_dir.display())
        })?;
      },
    }
    return Ok(());
  }

  let config = Config::load(&cli.config_files, &cli.flag_overrides())
    .wrap_err("Failed to load configuration")?;
  config.validate_paths()?;

  generate_documentation(&config)
}

/// Main documentation build process
fn generate_documentation(config: &Config) -> Result<()> {
  info!(
    "Compiling documentation from {} into {}",
    config.input_dir.display(),
    config.output_dir.display()
  );

  let validator = XmllintValidator::from_config(config)?;
  let written = driver::build(
    config,
    validator.as_ref().map(|v| v as &dyn SchemaValidator),
  )?;

  info!(
    "Documentation generated successfully: {} files in {}",
    written.len(),
    config.output_dir.display()
  );

  Ok(())
}
