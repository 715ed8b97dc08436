#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

pub const LICENSE_TEXT: &str = "Copyright 2024 Example Corp\nAll rights reserved\n";

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// Creates a scratch directory holding `LICENSE_HEADER.txt`.
pub fn setup_workspace() -> Result<(TempDir, PathBuf)> {
  let temp_dir = TempDir::new()?;
  let license = write_file(temp_dir.path(), "LICENSE_HEADER.txt", LICENSE_TEXT)?;
  Ok((temp_dir, license))
}

/// The canonical Ruby header for [`LICENSE_TEXT`] in end-only mode.
pub fn ruby_header_end_only() -> &'static str {
  "# Copyright 2024 Example Corp\n# All rights reserved\n# ---  END LICENSE_HEADER BLOCK  ---\n\n"
}
