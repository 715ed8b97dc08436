//! # Source Module
//!
//! Reading a file into an editable sequence of lines and writing it back.
//!
//! Writes go to a temporary file in the target's directory which is then
//! renamed over the original, so a failed write never leaves a truncated
//! file behind.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::AuditError;

/// Line terminator used when writing a file back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
  #[default]
  Lf,
  CrLf,
}

impl LineEnding {
  /// Detects the terminator from the first line break in `content`.
  pub fn detect(content: &str) -> Self {
    match content.find('\n') {
      Some(index) if index > 0 && content.as_bytes()[index - 1] == b'\r' => LineEnding::CrLf,
      _ => LineEnding::Lf,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      LineEnding::Lf => "\n",
      LineEnding::CrLf => "\r\n",
    }
  }
}

/// A file's content as an ordered, editable sequence of lines.
///
/// Lines carry no terminator. One trailing terminator is dropped on read and
/// restored on write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
  pub lines: Vec<String>,
  pub line_ending: LineEnding,
}

impl SourceFile {
  /// Splits `content` into lines.
  pub fn parse(content: &str) -> Self {
    Self {
      lines: content.lines().map(str::to_string).collect(),
      line_ending: LineEnding::detect(content),
    }
  }

  /// Reads `path`, replacing invalid UTF-8 sequences.
  pub fn read(path: &Path) -> Result<Self, AuditError> {
    let bytes = fs::read(path).map_err(|e| AuditError::io(path, e))?;
    let content = String::from_utf8_lossy(&bytes);
    let source = Self::parse(&content);
    trace!("Read {} lines from {}", source.lines.len(), path.display());
    Ok(source)
  }

  /// Joins the lines back into file content.
  pub fn render(&self) -> String {
    if self.lines.is_empty() {
      return String::new();
    }
    let eol = self.line_ending.as_str();
    let mut content = self.lines.join(eol);
    content.push_str(eol);
    content
  }

  /// Replaces `path` with the rendered content.
  ///
  /// The new content is written to a temporary file next to `path` and then
  /// renamed over it. The original's permissions are carried over.
  pub fn write(&self, path: &Path) -> Result<(), AuditError> {
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AuditError::io(path, e))?;
    tmp
      .write_all(self.render().as_bytes())
      .and_then(|()| tmp.as_file().sync_all())
      .map_err(|e| AuditError::io(path, e))?;

    if let Ok(metadata) = fs::metadata(path) {
      fs::set_permissions(tmp.path(), metadata.permissions()).map_err(|e| AuditError::io(path, e))?;
    }

    tmp.persist(path).map_err(|e| AuditError::io(path, e.error))?;
    trace!("Wrote {} lines to {}", self.lines.len(), path.display());
    Ok(())
  }
}
