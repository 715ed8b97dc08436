//! # Diff Module
//!
//! Rendering the difference between a file and what an update or removal
//! would turn it into. Used by dry runs of the mutating commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

use crate::error::AuditError;

/// Shows and/or saves diffs of header changes.
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Print diffs to stderr
  pub show_diff: bool,

  /// Append diffs to this file
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Returns `true` if diffs are printed or saved.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Displays and/or saves the diff between `original` and `new`.
  ///
  /// Diffs of several files saved to the same path are appended, giving one
  /// consolidated diff file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<(), AuditError> {
    let diff_content = render_diff(path, original, new);

    if self.show_diff {
      for line in diff_content.lines() {
        if line.starts_with('+') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
        } else if line.starts_with('-') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
        } else {
          eprintln!("{line}");
        }
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .map_err(|e| AuditError::io(diff_path, e))?;
      file
        .write_all(diff_content.as_bytes())
        .map_err(|e| AuditError::io(diff_path, e))?;
    }

    Ok(())
  }
}

/// Renders a line diff, prefixed with a `Diff for <path>:` heading.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);
  let mut content = format!("Diff for {}:\n", path.display());

  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    content.push_str(sign);
    content.push_str(change.value());
    if change.missing_newline() {
      content.push('\n');
    }
  }

  content.push('\n');
  content
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_render_diff_marks_inserted_header() {
    let rendered = render_diff(Path::new("app.rb"), "puts 1\n", "# Copyright\n\nputs 1\n");

    assert!(rendered.starts_with("Diff for app.rb:\n"));
    assert!(rendered.contains("+# Copyright\n"));
    assert!(rendered.contains(" puts 1\n"));
    assert!(!rendered.contains("-puts 1"));
  }

  #[test]
  fn test_render_diff_marks_removed_header() {
    let rendered = render_diff(Path::new("app.rb"), "# Copyright\nputs 1\n", "puts 1\n");
    assert!(rendered.contains("-# Copyright\n"));
  }

  #[test]
  fn test_save_diff_appends() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("changes.diff");
    let manager = DiffManager::new(false, Some(out.clone()));

    manager.display_diff(Path::new("a.rb"), "x\n", "# h\nx\n").unwrap();
    manager.display_diff(Path::new("b.rb"), "y\n", "# h\ny\n").unwrap();

    let saved = std::fs::read_to_string(&out).unwrap();
    assert!(saved.contains("Diff for a.rb:"));
    assert!(saved.contains("Diff for b.rb:"));
  }
}
