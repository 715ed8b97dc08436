//! # Output Module
//!
//! This module centralizes all user-facing output for the license-header
//! tool. It provides consistent formatting, colors, and symbols for terminal
//! output.
//!
//! - In quiet mode only the paths that need attention are printed, one per
//!   line, for scripting
//! - In verbose mode every list is printed in full

use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};

use crate::auditor::{Action, AuditFailure, AuditReport, ProcessSummary};
use crate::header::HeaderState;
use crate::info_log;
use crate::logging::{is_quiet, is_verbose};

/// Symbols used in output
pub mod symbols {
  /// Valid header
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header / failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Stale header
  pub const STALE: &str = "\u{21bb}"; // ↻
  /// Not applicable
  pub const IGNORED: &str = "-";
}

/// Maximum number of files to show per list before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print a list of paths under a heading, truncated unless verbose.
fn print_file_list(heading: &str, files: &[PathBuf]) {
  if files.is_empty() {
    return;
  }

  println!("{heading}");

  let limit = if is_verbose() { files.len() } else { DEFAULT_FILE_LIST_LIMIT };
  for path in files.iter().take(limit) {
    println!("  {}", path.display());
  }

  if files.len() > limit {
    println!(
      "  {} (use -v to see all)",
      format!("... and {} more", files.len() - limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

fn print_failures(failures: &[AuditFailure]) {
  for failure in failures {
    eprintln!(
      "{} {}",
      "error:".if_supports_color(Stream::Stderr, |s| s.red()),
      failure.error
    );
  }
}

/// Print the result of an audit.
pub fn print_audit_report(report: &AuditReport) {
  print_failures(&report.failures);

  if is_quiet() {
    for state in [HeaderState::Stale, HeaderState::Missing] {
      for path in report.paths(state) {
        println!("{}", path.display());
      }
    }
    return;
  }

  let stale = report.paths(HeaderState::Stale);
  print_file_list(
    &format!(
      "{} {} {} with a stale license header:",
      symbols::STALE.if_supports_color(Stream::Stdout, |s| s.yellow()),
      stale.len(),
      plural(stale.len())
    ),
    stale,
  );

  let missing = report.paths(HeaderState::Missing);
  print_file_list(
    &format!(
      "{} {} {} missing a license header:",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      missing.len(),
      plural(missing.len())
    ),
    missing,
  );

  if is_verbose() {
    let not_applicable = report.paths(HeaderState::NotApplicable);
    print_file_list(
      &format!(
        "{} {} {} with no comment syntax rule:",
        symbols::IGNORED,
        not_applicable.len(),
        plural(not_applicable.len())
      ),
      not_applicable,
    );
  }

  print_audit_summary(report);
}

/// Print the one-line audit summary.
pub fn print_audit_summary(report: &AuditReport) {
  if is_quiet() {
    return;
  }

  let counts: Vec<String> = HeaderState::ALL
    .iter()
    .map(|state| format!("{} {}", report.paths(*state).len(), state))
    .collect();

  if report.is_clean() {
    println!(
      "{} {} {} checked: {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      report.total(),
      plural(report.total()),
      counts.join(", ")
    );
  } else {
    println!(
      "{} {} {} checked: {}",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      report.total(),
      plural(report.total()),
      counts.join(", ")
    );
    println!(
      "{}",
      "hint: run `license-header update` to fix".if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the result of applying an action.
pub fn print_process_summary(action: Action, summary: &ProcessSummary, dry_run: bool) {
  print_failures(&summary.failures);

  if is_quiet() {
    return;
  }

  let verb = match (action, dry_run) {
    (Action::Update, false) => "updated in",
    (Action::Remove, false) => "removed from",
    (Action::Update, true) => "would be updated in",
    (Action::Remove, true) => "would be removed from",
  };

  print_file_list(
    &format!(
      "{} Header {} {} {}:",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      verb,
      summary.changed.len(),
      plural(summary.changed.len())
    ),
    &summary.changed,
  );

  if summary.changed.is_empty() && summary.failures.is_empty() {
    info_log!("No files changed.");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plural() {
    assert_eq!(plural(0), "files");
    assert_eq!(plural(1), "file");
    assert_eq!(plural(2), "files");
  }
}
