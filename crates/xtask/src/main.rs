use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

const BIN_NAME: &str = "ltdoc";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build distribution artifacts for the ltdoc CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist", value_parser = clap::value_parser!(std::path::PathBuf))]
    output_dir: PathBuf,

    /// Only generate shell completions.
    #[arg(long, conflicts_with = "manpage_only")]
    completions_only: bool,

    /// Only generate manpages.
    #[arg(long, conflicts_with = "completions_only")]
    manpage_only: bool,
  },
}

fn main() -> Result<()> {
  let xtask = Xtask::parse();

  match xtask.command {
    Commands::Dist {
      output_dir,
      completions_only,
      manpage_only,
    } => {
      if !manpage_only {
        generate_completions(&output_dir)?;
      }
      if !completions_only {
        generate_manpages(&output_dir)?;
      }
    },
  }

  Ok(())
}

/// Generate shell completions for various shells.
fn generate_completions(output_dir: &Path) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir)?;
  let mut cmd = ltdoc::cli::Cli::command();
  for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
    generate_to(shell, &mut cmd, BIN_NAME, &completions_dir)
      .with_context(|| format!("Failed to generate {shell} completions"))?;
  }
  println!(
    "Shell completions generated in {}",
    completions_dir.display()
  );
  Ok(())
}

fn render_manpage(cmd: Command, title: &str, path: &Path) -> Result<()> {
  let mut file = fs::File::create(path).with_context(|| {
    format!("Failed to create manpage file at {}", path.display())
  })?;
  Man::new(cmd)
    .title(title)
    .render(&mut file)
    .with_context(|| format!("Failed to render {}", path.display()))
}

/// Generate manpages for the ltdoc CLI and each of its subcommands.
fn generate_manpages(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;

  let cmd = ltdoc::cli::Cli::command();
  for sub in cmd.get_subcommands() {
    let title = format!("{BIN_NAME}-{}", sub.get_name());
    render_manpage(
      sub.clone(),
      &title,
      &man_dir.join(format!("{title}.1")),
    )?;
  }
  render_manpage(cmd, BIN_NAME, &man_dir.join(format!("{BIN_NAME}.1")))?;

  println!("Manpages generated in {}", man_dir.display());
  Ok(())
}
