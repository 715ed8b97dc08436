//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing, with one subcommand per operation.

mod check;
mod modify;

use std::path::PathBuf;

use anyhow::{Context, Result};
pub use check::{CheckArgs, run_check};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use modify::{FixArgs, ModifyArgs, run_fix, run_modify};
use tracing::debug;

use crate::auditor::{Auditor, AuditorConfig};
use crate::config::load_config;
use crate::header::SentinelMode;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), " ", env!("GIT_DATE"), ")");

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Report files whose license header is missing or stale
  license-header check --license-file LICENSE_HEADER.txt 'app/**/*.rb' 'public/**/*.js'

  # Insert or refresh the header in every Ruby file outside vendor/
  license-header update --license-file LICENSE_HEADER.txt --exception '^vendor/' 'app/**/*.rb'

  # Preview the change without writing
  license-header update --dry-run --show-diff --license-file LICENSE_HEADER.txt app/models/user.rb

  # Strip header blocks
  license-header remove 'lib/**/*.rb'

  # Select the action by name
  license-header fix --action remove 'lib/**/*.rb'
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Report each file's header state without modifying anything
  Check(CheckArgs),
  /// Insert the canonical header, replacing any existing header block
  Update(ModifyArgs),
  /// Remove the header block from files that have one
  Remove(ModifyArgs),
  /// Apply an action chosen by name ("update" or "remove")
  Fix(FixArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Arguments shared by every subcommand
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
  /// Glob patterns of files to process. A directory is processed recursively.
  #[arg(required = false)]
  pub patterns: Vec<String>,

  /// Individual files to process, bypassing glob expansion (repeatable)
  #[arg(long = "file", value_name = "FILE")]
  pub files: Vec<PathBuf>,

  /// File holding the raw license text
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Regular expression for paths to skip (repeatable)
  #[arg(long, short = 'e', value_name = "REGEX")]
  pub exception: Vec<String>,

  /// Sentinel lines to emit: "begin-and-end" or "end-only"
  #[arg(long, value_name = "MODE")]
  pub sentinel: Option<SentinelMode>,

  /// Path to config file (default: .license-header.toml in the current
  /// directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl CommonArgs {
  fn validate(&self) -> Result<()> {
    if self.patterns.is_empty() && self.files.is_empty() {
      anyhow::bail!("Missing required argument: <PATTERNS>... or --file <FILE>");
    }
    Ok(())
  }

  /// Sets up logging and builds the auditor from the config file and flags.
  ///
  /// Flags take precedence over the config file; exceptions from both are
  /// combined.
  fn init(&self) -> Result<Auditor> {
    init_tracing(self.quiet, self.verbose);
    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();

    self.validate()?;

    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(self.config.as_deref(), &current_dir, self.no_config)?.unwrap_or_default();

    let mut exceptions = config.exceptions.clone();
    exceptions.extend(self.exception.iter().cloned());

    let auditor_config = AuditorConfig {
      license_file: self.license_file.clone().or_else(|| config.license_file.clone()),
      exceptions,
      syntax: Some(config.syntax_table()),
      sentinel: self.sentinel.or(config.sentinel).unwrap_or_default(),
    };

    match &auditor_config.license_file {
      Some(path) => debug!("Using license file {}", path.display()),
      None => debug!("No license file configured, headers hold only sentinels"),
    }

    Auditor::new(auditor_config).context("Failed to initialize auditor")
  }
}
