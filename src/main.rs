//! # license-header
//!
//! A tool that audits and rewrites license header blocks at the top of
//! source files.

use std::process::ExitCode;

use anyhow::Result;
use license_header::auditor::Action;
use license_header::cli::{Cli, Command, run_check, run_fix, run_modify};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();

  let success = match cli.command {
    Command::Check(args) => run_check(args)?,
    Command::Update(args) => run_modify(Action::Update, args)?,
    Command::Remove(args) => run_modify(Action::Remove, args)?,
    Command::Fix(args) => run_fix(args)?,
  };

  Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
