//! # Report Module
//!
//! Machine-readable JSON report of an audit, for CI tooling.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::auditor::AuditReport;
use crate::header::HeaderState;

/// Count of files per state.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct AuditSummary {
  pub total: usize,
  pub valid: usize,
  pub present_but_stale: usize,
  pub missing: usize,
  pub not_applicable: usize,
  pub failed: usize,
}

impl AuditSummary {
  pub fn from_report(report: &AuditReport) -> Self {
    Self {
      total: report.total(),
      valid: report.paths(HeaderState::Valid).len(),
      present_but_stale: report.paths(HeaderState::Stale).len(),
      missing: report.paths(HeaderState::Missing).len(),
      not_applicable: report.paths(HeaderState::NotApplicable).len(),
      failed: report.failures.len(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct FailureEntry {
  pub path: String,
  pub error: String,
}

/// Serializable form of an [`AuditReport`].
#[derive(Debug, Serialize)]
pub struct AuditJson {
  /// RFC 3339 timestamp
  pub generated_at: String,
  pub summary: AuditSummary,
  pub files: BTreeMap<HeaderState, Vec<String>>,
  pub failures: Vec<FailureEntry>,
}

impl AuditJson {
  pub fn from_report(report: &AuditReport) -> Self {
    let files = report
      .groups()
      .map(|(state, paths)| {
        let paths = paths.iter().map(|path| path.to_string_lossy().into_owned()).collect();
        (state, paths)
      })
      .collect();

    let failures = report
      .failures
      .iter()
      .map(|failure| FailureEntry {
        path: failure.path.to_string_lossy().into_owned(),
        error: failure.error.to_string(),
      })
      .collect();

    Self {
      generated_at: Local::now().to_rfc3339(),
      summary: AuditSummary::from_report(report),
      files,
      failures,
    }
  }

  pub fn to_json(&self) -> Result<String> {
    serde_json::to_string_pretty(self).context("Failed to serialize audit report")
  }

  /// Writes the report to `output_path`.
  pub fn write(&self, output_path: &Path) -> Result<()> {
    fs::write(output_path, self.to_json()?)
      .with_context(|| format!("Failed to write report to {}", output_path.display()))
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::auditor::Auditor;
  use crate::header::SentinelMode;
  use crate::syntax::SyntaxTable;

  #[test]
  fn test_json_groups_use_state_names() {
    let auditor = Auditor::from_license_text(Some("Copyright"), SyntaxTable::builtin(), SentinelMode::EndOnly);
    let report = auditor
      .audit(&[], &[PathBuf::from("main.rs"), PathBuf::from("/nonexistent/app.rb")])
      .unwrap();

    let json = AuditJson::from_report(&report);
    let value: serde_json::Value = serde_json::from_str(&json.to_json().unwrap()).unwrap();

    assert_eq!(value["files"]["not-applicable"][0], "main.rs");
    assert_eq!(value["summary"]["not-applicable"], 1);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["failures"][0]["path"], "/nonexistent/app.rb");
    assert!(value["generated_at"].is_string());
  }
}
