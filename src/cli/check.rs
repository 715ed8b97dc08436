//! # Check Command
//!
//! Reports the header state of each file without modifying anything.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use super::CommonArgs;
use crate::output::print_audit_report;
use crate::report::AuditJson;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Write a JSON report of the audit to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Run the check command.
///
/// Returns `Ok(false)` when any file is missing its header, has a stale one,
/// or could not be read.
pub fn run_check(args: CheckArgs) -> Result<bool> {
  let auditor = args.common.init()?;

  let start = Instant::now();
  let report = auditor
    .audit(&args.common.patterns, &args.common.files)
    .context("Failed to audit files")?;
  debug!("Audit completed in {}ms", start.elapsed().as_millis());

  print_audit_report(&report);

  if let Some(ref path) = args.report_json {
    AuditJson::from_report(&report).write(path)?;
    debug!("JSON report written to {}", path.display());
  }

  Ok(report.is_clean())
}
