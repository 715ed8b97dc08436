//! # Modify Commands
//!
//! The `update`, `remove` and `fix` commands, which rewrite header blocks in
//! place.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use super::CommonArgs;
use crate::auditor::{Action, AuditFailure, Auditor, ProcessSummary, expand_patterns};
use crate::diff::DiffManager;
use crate::output::print_process_summary;

/// Arguments for the update and remove commands
#[derive(Args, Debug, Default)]
pub struct ModifyArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Show which files would change without writing anything
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of each change (dry run only)
  #[arg(long, requires = "dry_run")]
  pub show_diff: bool,

  /// Append a diff of each change to a file (dry run only)
  #[arg(long, value_name = "FILE", requires = "dry_run")]
  pub save_diff: Option<PathBuf>,

  /// Ask for confirmation before changing each file
  #[arg(long, conflicts_with = "dry_run")]
  pub interactive: bool,
}

/// Arguments for the fix command
#[derive(Args, Debug, Default)]
pub struct FixArgs {
  /// Action to apply: "update" or "remove"
  #[arg(long, value_name = "ACTION")]
  pub action: String,

  #[command(flatten)]
  pub modify: ModifyArgs,
}

/// Run the fix command, resolving the action by name.
pub fn run_fix(args: FixArgs) -> Result<bool> {
  let action = args.action.parse::<Action>()?;
  run_modify(action, args.modify)
}

/// Run the update or remove command.
///
/// Returns `Ok(false)` when any file could not be processed.
pub fn run_modify(action: Action, args: ModifyArgs) -> Result<bool> {
  let auditor = args.common.init()?;

  let mut targets = expand_patterns(&args.common.patterns).context("Failed to expand patterns")?;
  targets.extend(args.common.files.iter().cloned());
  debug!("{} candidate files for {}", targets.len(), action);

  let summary = if args.dry_run {
    let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
    dry_run(&auditor, action, &targets, &diff_manager)
  } else if args.interactive {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    auditor.process_files(action, &targets, |path| confirm(action, path, &mut input))
  } else {
    auditor.process_files(action, &targets, |_| true)
  };

  print_process_summary(action, &summary, args.dry_run);

  Ok(summary.failures.is_empty())
}

/// Computes what `action` would change, showing diffs but writing nothing.
fn dry_run(auditor: &Auditor, action: Action, targets: &[PathBuf], diff_manager: &DiffManager) -> ProcessSummary {
  let mut summary = ProcessSummary::default();

  for path in targets {
    match auditor.preview(action, path) {
      Ok(Some((before, after))) => {
        if diff_manager.is_enabled()
          && let Err(e) = diff_manager.display_diff(path, &before, &after)
        {
          eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
        }
        summary.changed.push(path.clone());
      }
      Ok(None) => summary.unchanged.push(path.clone()),
      Err(error) => summary.failures.push(AuditFailure {
        path: path.clone(),
        error,
      }),
    }
  }

  summary
}

/// Prompts on stderr and reads a yes/no answer from `input`.
fn confirm(action: Action, path: &Path, input: &mut impl BufRead) -> bool {
  eprint!("{} header in {}? [y/N] ", action, path.display());
  let _ = std::io::stderr().flush();

  let mut answer = String::new();
  if input.read_line(&mut answer).is_err() {
    return false;
  }
  matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
