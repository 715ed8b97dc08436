//! # Error Module
//!
//! Error type shared by the header auditor and its collaborators.

use std::path::PathBuf;

/// Errors raised while auditing or rewriting header blocks.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
  /// Reading or writing a single file failed.
  #[error("I/O failure on '{path}': {source}")]
  Io { path: PathBuf, source: std::io::Error },

  /// The requested action or setting is not valid.
  #[error("Configuration error: {0}")]
  Configuration(String),

  /// A glob or exception pattern could not be compiled.
  #[error("Invalid pattern '{pattern}': {message}")]
  Pattern { pattern: String, message: String },
}

impl AuditError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  /// The file this error concerns, if it is a per-file I/O failure.
  pub fn path(&self) -> Option<&std::path::Path> {
    match self {
      Self::Io { path, .. } => Some(path),
      _ => None,
    }
  }
}
