//! # Auditor Module
//!
//! This module ties the syntax table, the header templates and file I/O
//! together. It classifies files by [`HeaderState`] and applies header
//! mutations to them.
//!
//! The module includes:
//! - [`Auditor`], built once from the license text and the syntax table
//! - [`AuditorConfig`] describing where the license comes from and what to skip
//! - [`Action`], the mutation to apply
//! - [`AuditReport`] and [`ProcessSummary`], the results of a batch
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use license_header::auditor::{Action, Auditor, AuditorConfig};
//! use license_header::header::HeaderState;
//!
//! # fn main() -> anyhow::Result<()> {
//! let auditor = Auditor::new(AuditorConfig {
//!   license_file: Some(PathBuf::from("LICENSE_HEADER.txt")),
//!   ..AuditorConfig::default()
//! })?;
//!
//! let report = auditor.audit(&["app/**/*.rb".to_string()], &[])?;
//! let stale = report.paths(HeaderState::Stale).to_vec();
//! auditor.process_files(Action::Update, &stale, |_| true);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::AuditError;
pub use crate::header::HeaderState;
use crate::header::{HeaderTemplate, SentinelMode, build_templates, evaluate, remove_header, update_header};
use crate::source::SourceFile;
use crate::syntax::SyntaxTable;
use crate::verbose_log;

/// A header mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// Replace any existing header block with the canonical one
  Update,
  /// Remove the header block, if any
  Remove,
}

impl FromStr for Action {
  type Err = AuditError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "update" => Ok(Action::Update),
      "remove" => Ok(Action::Remove),
      _ => Err(AuditError::Configuration(format!(
        "unknown action '{s}' (expected 'update' or 'remove')"
      ))),
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Action::Update => write!(f, "update"),
      Action::Remove => write!(f, "remove"),
    }
  }
}

/// Settings for building an [`Auditor`].
#[derive(Debug, Clone, Default)]
pub struct AuditorConfig {
  /// File holding the raw license text. Unset or unreadable means no license
  /// text; the header then holds only the comment wrapper and sentinels.
  pub license_file: Option<PathBuf>,

  /// Regular expressions; matching paths are skipped entirely
  pub exceptions: Vec<String>,

  /// Comment syntax per language. Defaults to [`SyntaxTable::builtin`] when
  /// `None`.
  pub syntax: Option<SyntaxTable>,

  /// Which sentinel lines the header carries
  pub sentinel: SentinelMode,
}

/// A file that could not be audited.
#[derive(Debug)]
pub struct AuditFailure {
  pub path: PathBuf,
  pub error: AuditError,
}

/// Files grouped by header state.
#[derive(Debug, Default)]
pub struct AuditReport {
  groups: BTreeMap<HeaderState, Vec<PathBuf>>,
  /// Files whose content could not be read
  pub failures: Vec<AuditFailure>,
}

impl AuditReport {
  fn record(&mut self, state: HeaderState, path: PathBuf) {
    self.groups.entry(state).or_default().push(path);
  }

  /// Paths classified as `state`, in discovery order.
  pub fn paths(&self, state: HeaderState) -> &[PathBuf] {
    self.groups.get(&state).map(Vec::as_slice).unwrap_or_default()
  }

  /// Non-empty groups in [`HeaderState`] order.
  pub fn groups(&self) -> impl Iterator<Item = (HeaderState, &[PathBuf])> {
    self.groups.iter().map(|(state, paths)| (*state, paths.as_slice()))
  }

  /// Number of files classified, failures excluded.
  pub fn total(&self) -> usize {
    self.groups.values().map(Vec::len).sum()
  }

  /// `true` when nothing is missing or stale and every file could be read.
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
      && self
        .groups
        .iter()
        .all(|(state, paths)| !state.needs_attention() || paths.is_empty())
  }
}

/// Outcome of applying an [`Action`] to a batch of files.
#[derive(Debug, Default)]
pub struct ProcessSummary {
  /// Files that were rewritten
  pub changed: Vec<PathBuf>,
  /// Files left untouched (no block to remove, declined, excepted or no rule)
  pub unchanged: Vec<PathBuf>,
  pub failures: Vec<AuditFailure>,
}

/// Audits and rewrites header blocks against per-language templates.
pub struct Auditor {
  table: SyntaxTable,
  templates: HashMap<String, HeaderTemplate>,
  exceptions: Vec<Regex>,
}

impl Auditor {
  /// Creates an auditor from `config`.
  ///
  /// An unreadable license file is not an error: templates are built from an
  /// empty license so that classification keeps working.
  ///
  /// # Errors
  ///
  /// Returns [`AuditError::Pattern`] if an exception is not a valid regex.
  pub fn new(config: AuditorConfig) -> Result<Self, AuditError> {
    let license = config.license_file.as_deref().and_then(|path| match std::fs::read_to_string(path) {
      Ok(text) => {
        debug!("Loaded license text from {}", path.display());
        Some(text)
      }
      Err(e) => {
        warn!("Could not read license file {}: {}", path.display(), e);
        None
      }
    });

    let table = config.syntax.unwrap_or_else(SyntaxTable::builtin);
    let mut auditor = Self::from_license_text(license.as_deref(), table, config.sentinel);
    auditor.exceptions = compile_exceptions(&config.exceptions)?;
    Ok(auditor)
  }

  /// Creates an auditor from license text already in memory, with no
  /// exceptions.
  pub fn from_license_text(license: Option<&str>, table: SyntaxTable, sentinel: SentinelMode) -> Self {
    let templates = build_templates(license, &table, sentinel);
    Self {
      table,
      templates,
      exceptions: Vec::new(),
    }
  }

  /// Adds exception patterns.
  pub fn with_exceptions(mut self, patterns: &[String]) -> Result<Self, AuditError> {
    self.exceptions.extend(compile_exceptions(patterns)?);
    Ok(self)
  }

  /// The template for `path`'s language, if any rule matches its extension.
  pub fn template_for(&self, path: &Path) -> Option<&HeaderTemplate> {
    let (lang, _) = self.table.lookup(path)?;
    self.templates.get(lang)
  }

  /// Returns `true` if `path` matches any exception pattern.
  pub fn is_excepted(&self, path: &Path) -> bool {
    let path = path.to_string_lossy();
    self.exceptions.iter().any(|re| re.is_match(&path))
  }

  /// Classifies a single file.
  ///
  /// Files with no matching rule are [`HeaderState::NotApplicable`] and are
  /// not read.
  pub fn evaluate_path(&self, path: &Path) -> Result<HeaderState, AuditError> {
    let Some(template) = self.template_for(path) else {
      trace!("No syntax rule for {}", path.display());
      return Ok(HeaderState::NotApplicable);
    };

    let source = SourceFile::read(path)?;
    Ok(evaluate(&source.lines, Some(template)))
  }

  /// Groups files by header state.
  ///
  /// `patterns` are glob patterns; a pattern naming a directory is walked
  /// recursively. `files` are taken as given. Both are subject to the
  /// exception patterns. Nothing is written.
  ///
  /// # Errors
  ///
  /// Returns [`AuditError::Pattern`] for an invalid glob. Per-file read
  /// failures are collected in [`AuditReport::failures`] instead.
  pub fn audit(&self, patterns: &[String], files: &[PathBuf]) -> Result<AuditReport, AuditError> {
    let mut report = AuditReport::default();

    let mut candidates = expand_patterns(patterns)?;
    candidates.extend(files.iter().cloned());

    for path in candidates {
      if self.is_excepted(&path) {
        verbose_log!("Skipping {}", path.display());
        continue;
      }

      match self.evaluate_path(&path) {
        Ok(state) => {
          trace!("{}: {}", path.display(), state);
          report.record(state, path);
        }
        Err(error) => {
          debug!("Failed to audit {}: {}", path.display(), error);
          report.failures.push(AuditFailure { path, error });
        }
      }
    }

    debug!("Audited {} files, {} failures", report.total(), report.failures.len());
    Ok(report)
  }

  /// Applies `action` to a file's lines, returning whether they changed.
  fn apply(&self, action: Action, source: &mut SourceFile, template: &HeaderTemplate) -> bool {
    match action {
      Action::Update => update_header(&mut source.lines, template),
      Action::Remove => remove_header(&mut source.lines, template),
    }
  }

  /// Computes the content `action` would produce, without writing.
  ///
  /// Returns `None` when the file would be left untouched.
  pub fn preview(&self, action: Action, path: &Path) -> Result<Option<(String, String)>, AuditError> {
    if self.is_excepted(path) {
      verbose_log!("Skipping {}", path.display());
      return Ok(None);
    }
    let Some(template) = self.template_for(path) else {
      return Ok(None);
    };

    let original = SourceFile::read(path)?;
    let mut modified = original.clone();
    if !self.apply(action, &mut modified, template) {
      return Ok(None);
    }

    let (before, after) = (original.render(), modified.render());
    Ok((before != after).then_some((before, after)))
  }

  /// Applies `action` to one file and writes it back if it changed.
  ///
  /// Excepted files and files with no matching rule are never read or
  /// written. Update always writes; remove writes only when a block was
  /// found. Returns whether the file was rewritten.
  pub fn process_file(&self, action: Action, path: &Path) -> Result<bool, AuditError> {
    if self.is_excepted(path) {
      verbose_log!("Skipping {}", path.display());
      return Ok(false);
    }
    let Some(template) = self.template_for(path) else {
      trace!("No syntax rule for {}, leaving untouched", path.display());
      return Ok(false);
    };

    let mut source = SourceFile::read(path)?;
    if !self.apply(action, &mut source, template) {
      trace!("No header block to {} in {}", action, path.display());
      return Ok(false);
    }

    source.write(path)?;
    debug!("Applied {} to {}", action, path.display());
    Ok(true)
  }

  /// Applies `action` to each file for which `confirm` returns `true`.
  ///
  /// A failure on one file does not stop the others.
  pub fn process_files<F>(&self, action: Action, paths: &[PathBuf], mut confirm: F) -> ProcessSummary
  where
    F: FnMut(&Path) -> bool,
  {
    let mut summary = ProcessSummary::default();

    for path in paths {
      if self.is_excepted(path) {
        verbose_log!("Skipping {}", path.display());
        summary.unchanged.push(path.clone());
        continue;
      }
      if self.template_for(path).is_none() || !confirm(path) {
        summary.unchanged.push(path.clone());
        continue;
      }

      match self.process_file(action, path) {
        Ok(true) => summary.changed.push(path.clone()),
        Ok(false) => summary.unchanged.push(path.clone()),
        Err(error) => summary.failures.push(AuditFailure {
          path: path.clone(),
          error,
        }),
      }
    }

    summary
  }
}

fn compile_exceptions(patterns: &[String]) -> Result<Vec<Regex>, AuditError> {
  patterns
    .iter()
    .map(|pattern| {
      Regex::new(pattern).map_err(|e| AuditError::Pattern {
        pattern: pattern.clone(),
        message: e.to_string(),
      })
    })
    .collect()
}

/// Expands glob patterns into file paths, in pattern order.
///
/// Directories matched by a glob are skipped, but a pattern that is itself a
/// directory is walked recursively.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, AuditError> {
  let mut files = Vec::new();

  for pattern in patterns {
    let as_path = Path::new(pattern);
    if as_path.is_dir() {
      files.extend(
        WalkDir::new(as_path)
          .sort_by_file_name()
          .into_iter()
          .filter_map(Result::ok)
          .filter(|entry| entry.file_type().is_file())
          .map(walkdir::DirEntry::into_path),
      );
      continue;
    }

    let entries = glob::glob(pattern).map_err(|e| AuditError::Pattern {
      pattern: pattern.clone(),
      message: e.to_string(),
    })?;

    for entry in entries {
      match entry {
        Ok(path) if path.is_dir() => trace!("Skipping directory {}", path.display()),
        Ok(path) => files.push(path),
        Err(e) => warn!("Error with glob pattern {}: {}", pattern, e),
      }
    }
  }

  Ok(files)
}
