//! # Header Module
//!
//! This module builds the canonical header block for each language and
//! evaluates or rewrites the header block at the top of a file's lines.
//!
//! A header block is the license text wrapped in the language's comment
//! syntax and terminated by a sentinel line:
//!
//! ```text
//! /*
//!  * ---  BEGIN LICENSE_HEADER BLOCK  ---
//!  * Copyright 2024
//!  * ---  END LICENSE_HEADER BLOCK  ---
//! */
//!
//! ```
//!
//! Detection only ever looks for the END sentinel. It is a literal line
//! match, not comment parsing.
//!
//! ## Example
//!
//! ```rust
//! use license_header::header::{HeaderState, SentinelMode, build_templates, evaluate, update_header};
//! use license_header::syntax::SyntaxTable;
//!
//! let templates = build_templates(Some("Copyright 2024"), &SyntaxTable::builtin(), SentinelMode::EndOnly);
//! let ruby = templates.get("ruby").expect("ruby is builtin");
//!
//! let mut lines = vec!["puts 1".to_string()];
//! assert_eq!(evaluate(&lines, Some(ruby)), HeaderState::Missing);
//!
//! update_header(&mut lines, ruby);
//! assert_eq!(evaluate(&lines, Some(ruby)), HeaderState::Valid);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::AuditError;
use crate::syntax::{LanguageRule, SyntaxTable};

/// Text of the END sentinel, without the language's line prefix.
pub const END_SENTINEL: &str = "---  END LICENSE_HEADER BLOCK  ---";

/// Text of the BEGIN sentinel, without the language's line prefix.
pub const BEGIN_SENTINEL: &str = "---  BEGIN LICENSE_HEADER BLOCK  ---";

/// Matches the END sentinel once the line prefix has been stripped. Only the
/// word END is case-insensitive.
static END_SENTINEL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^---  (?i:END) LICENSE_HEADER BLOCK  ---$").expect("sentinel regex must compile"));

/// Which sentinel lines a header block carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentinelMode {
  /// Emit a BEGIN sentinel before the license text and an END sentinel after it
  #[default]
  BeginAndEnd,
  /// Emit only the END sentinel
  EndOnly,
}

impl FromStr for SentinelMode {
  type Err = AuditError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "begin-and-end" => Ok(SentinelMode::BeginAndEnd),
      "end-only" => Ok(SentinelMode::EndOnly),
      _ => Err(AuditError::Configuration(format!(
        "unknown sentinel mode '{s}' (expected 'begin-and-end' or 'end-only')"
      ))),
    }
  }
}

/// Classification of a file's header against its language's template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderState {
  /// The file starts with the exact canonical header block
  Valid,
  /// An END sentinel exists but the block differs from the canonical one
  #[serde(rename = "present-but-stale")]
  Stale,
  /// No END sentinel anywhere in the file
  Missing,
  /// No rule applies to the file's extension
  NotApplicable,
}

impl HeaderState {
  /// All states, in reporting order.
  pub const ALL: [HeaderState; 4] = [
    HeaderState::Valid,
    HeaderState::Stale,
    HeaderState::Missing,
    HeaderState::NotApplicable,
  ];

  /// Returns `true` for states that should fail a check.
  pub const fn needs_attention(self) -> bool {
    matches!(self, HeaderState::Stale | HeaderState::Missing)
  }
}

impl fmt::Display for HeaderState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HeaderState::Valid => write!(f, "valid"),
      HeaderState::Stale => write!(f, "present-but-stale"),
      HeaderState::Missing => write!(f, "missing"),
      HeaderState::NotApplicable => write!(f, "not-applicable"),
    }
  }
}

/// The fully materialized header block for one language.
///
/// Built once from a [`LanguageRule`] and the license text; immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  lines: Vec<String>,
  line_prefix: String,
  trailer_len: usize,
}

impl HeaderTemplate {
  /// Wraps `license_terms` according to `rule`.
  pub fn build(rule: &LanguageRule, license_terms: &[&str], mode: SentinelMode) -> Self {
    let mut lines = Vec::with_capacity(license_terms.len() + 5);

    if let Some(prefix_line) = &rule.prefix_line {
      lines.push(prefix_line.clone());
    }
    if mode == SentinelMode::BeginAndEnd {
      lines.push(format!("{}{}", rule.line_prefix, BEGIN_SENTINEL));
    }
    for term in license_terms {
      lines.push(format!("{}{}", rule.line_prefix, term).trim_end().to_string());
    }
    lines.push(format!("{}{}", rule.line_prefix, END_SENTINEL));

    let mut trailer_len = 0;
    if let Some(suffix_line) = &rule.suffix_line {
      lines.push(suffix_line.clone());
      trailer_len += 1;
    }
    if rule.separator_after {
      lines.push(String::new());
      trailer_len += 1;
    }

    Self {
      lines,
      line_prefix: rule.line_prefix.clone(),
      trailer_len,
    }
  }

  /// The literal lines of the header block, in order.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Number of lines the block carries after its END sentinel (suffix line
  /// and separator).
  pub const fn trailer_len(&self) -> usize {
    self.trailer_len
  }

  /// Returns `true` if `line` is this language's END sentinel.
  pub fn is_end_sentinel(&self, line: &str) -> bool {
    line
      .strip_prefix(self.line_prefix.as_str())
      .is_some_and(|rest| END_SENTINEL_REGEX.is_match(rest))
  }

  /// Index of the first END sentinel line in `lines`.
  pub fn find_end(&self, lines: &[String]) -> Option<usize> {
    lines.iter().position(|line| self.is_end_sentinel(line))
  }
}

/// Splits raw license text into lines. Trailing empty lines are dropped and
/// absent text yields no lines.
pub fn license_terms(raw: Option<&str>) -> Vec<&str> {
  let mut terms: Vec<&str> = raw.map(|text| text.lines().collect()).unwrap_or_default();
  while terms.last().is_some_and(|line| line.is_empty()) {
    terms.pop();
  }
  terms
}

/// Builds one [`HeaderTemplate`] per language in `table`.
///
/// Absent license text still produces a template per rule, containing only
/// the comment wrapper and sentinel lines.
pub fn build_templates(raw_license: Option<&str>, table: &SyntaxTable, mode: SentinelMode) -> HashMap<String, HeaderTemplate> {
  let terms = license_terms(raw_license);
  table
    .iter()
    .map(|(lang, rule)| {
      let template = HeaderTemplate::build(rule, &terms, mode);
      trace!("Built {} line header for {}", template.len(), lang);
      (lang.to_string(), template)
    })
    .collect()
}

/// Classifies `lines` against `template`.
///
/// `None` means no rule applies and always yields
/// [`HeaderState::NotApplicable`].
pub fn evaluate(lines: &[String], template: Option<&HeaderTemplate>) -> HeaderState {
  let Some(template) = template else {
    return HeaderState::NotApplicable;
  };

  if template.find_end(lines).is_none() {
    return HeaderState::Missing;
  }

  if lines.len() >= template.len() && lines[..template.len()] == template.lines[..] {
    HeaderState::Valid
  } else {
    HeaderState::Stale
  }
}

/// Removes the header block ending at the first END sentinel.
///
/// Everything up to and including the sentinel is dropped, followed by the
/// template's trailer lines. Returns `false` and leaves `lines` untouched
/// when there is no sentinel.
pub fn remove_header(lines: &mut Vec<String>, template: &HeaderTemplate) -> bool {
  let Some(end) = template.find_end(lines) else {
    return false;
  };

  let window = (end + 1 + template.trailer_len).min(lines.len());
  lines.drain(..window);
  true
}

/// Replaces any existing header block with the canonical one.
///
/// Always returns `true`; applying it twice is the same as applying it once.
pub fn update_header(lines: &mut Vec<String>, template: &HeaderTemplate) -> bool {
  remove_header(lines, template);
  lines.splice(0..0, template.lines.iter().cloned());
  true
}

#[cfg(test)]
mod tests {
  use super::*;

  fn to_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
  }

  fn ruby_template(mode: SentinelMode) -> HeaderTemplate {
    let rule = LanguageRule::line("# ", true, &[".rb"]);
    HeaderTemplate::build(&rule, &license_terms(Some("Copyright 2024\nAll rights reserved")), mode)
  }

  fn java_template() -> HeaderTemplate {
    let rule = LanguageRule::block("/* ", " * ", "*/", true, &[".java"]);
    HeaderTemplate::build(&rule, &["Copyright 2024"], SentinelMode::BeginAndEnd)
  }

  #[test]
  fn test_build_end_only_ruby() {
    let template = ruby_template(SentinelMode::EndOnly);

    assert_eq!(
      template.lines(),
      to_lines(&[
        "# Copyright 2024",
        "# All rights reserved",
        "# ---  END LICENSE_HEADER BLOCK  ---",
        "",
      ])
    );
    assert_eq!(template.trailer_len(), 1);
  }

  #[test]
  fn test_build_begin_and_end_block() {
    let template = java_template();

    assert_eq!(
      template.lines(),
      to_lines(&[
        "/* ",
        " * ---  BEGIN LICENSE_HEADER BLOCK  ---",
        " * Copyright 2024",
        " * ---  END LICENSE_HEADER BLOCK  ---",
        "*/",
        "",
      ])
    );
    assert_eq!(template.trailer_len(), 2);
  }

  #[test]
  fn test_build_strips_trailing_whitespace_of_terms() {
    let rule = LanguageRule::block("/* ", " * ", "*/", true, &[".css"]);
    let template = HeaderTemplate::build(&rule, &["Line one   ", "", "Line three"], SentinelMode::EndOnly);

    assert_eq!(template.lines()[1], " * Line one");
    assert_eq!(template.lines()[2], " *");
    assert_eq!(template.lines()[3], " * Line three");
  }

  #[test]
  fn test_build_without_license_text() {
    let table = SyntaxTable::builtin();
    let templates = build_templates(None, &table, SentinelMode::EndOnly);

    assert_eq!(templates.len(), table.len());
    assert_eq!(
      templates["ruby"].lines(),
      to_lines(&["# ---  END LICENSE_HEADER BLOCK  ---", ""])
    );
    assert_eq!(
      templates["html"].lines(),
      to_lines(&["<!--", "---  END LICENSE_HEADER BLOCK  ---", "-->"])
    );
  }

  #[test]
  fn test_license_terms_drops_trailing_blank_lines() {
    assert_eq!(license_terms(Some("a\n\nb\n\n\n")), vec!["a", "", "b"]);
    assert_eq!(license_terms(Some("a\r\nb\r\n")), vec!["a", "b"]);
    assert!(license_terms(None).is_empty());
    assert!(license_terms(Some("")).is_empty());
  }

  #[test]
  fn test_sentinel_detection_is_case_insensitive_on_end_only() {
    let template = ruby_template(SentinelMode::EndOnly);

    assert!(template.is_end_sentinel("# ---  END LICENSE_HEADER BLOCK  ---"));
    assert!(template.is_end_sentinel("# ---  end LICENSE_HEADER BLOCK  ---"));
    assert!(!template.is_end_sentinel("# ---  END license_header block  ---"));
    assert!(!template.is_end_sentinel("# --- END LICENSE_HEADER BLOCK ---"));
    assert!(!template.is_end_sentinel("// ---  END LICENSE_HEADER BLOCK  ---"));
    assert!(!template.is_end_sentinel("# ---  BEGIN LICENSE_HEADER BLOCK  ---"));
  }

  #[test]
  fn test_evaluate_not_applicable() {
    let lines = to_lines(&["# ---  END LICENSE_HEADER BLOCK  ---"]);
    assert_eq!(evaluate(&lines, None), HeaderState::NotApplicable);
  }

  #[test]
  fn test_evaluate_missing() {
    let template = ruby_template(SentinelMode::EndOnly);
    assert_eq!(evaluate(&to_lines(&["puts 1"]), Some(&template)), HeaderState::Missing);
    assert_eq!(evaluate(&[], Some(&template)), HeaderState::Missing);
  }

  #[test]
  fn test_evaluate_stale() {
    let template = ruby_template(SentinelMode::EndOnly);
    let lines = to_lines(&[
      "# Copyright 2019",
      "# All rights reserved",
      "# ---  END LICENSE_HEADER BLOCK  ---",
      "",
      "puts 1",
    ]);

    assert_eq!(evaluate(&lines, Some(&template)), HeaderState::Stale);
  }

  #[test]
  fn test_evaluate_stale_when_file_shorter_than_template() {
    let template = ruby_template(SentinelMode::EndOnly);
    let lines = to_lines(&["# ---  END LICENSE_HEADER BLOCK  ---"]);

    assert_eq!(evaluate(&lines, Some(&template)), HeaderState::Stale);
  }

  #[test]
  fn test_concrete_update_evaluate_remove() {
    let template = ruby_template(SentinelMode::EndOnly);
    let mut lines = to_lines(&["puts 1"]);

    assert!(update_header(&mut lines, &template));
    assert_eq!(
      lines,
      to_lines(&[
        "# Copyright 2024",
        "# All rights reserved",
        "# ---  END LICENSE_HEADER BLOCK  ---",
        "",
        "puts 1",
      ])
    );
    assert_eq!(evaluate(&lines, Some(&template)), HeaderState::Valid);

    assert!(remove_header(&mut lines, &template));
    assert_eq!(lines, to_lines(&["puts 1"]));
  }

  #[test]
  fn test_update_is_idempotent() {
    let template = java_template();
    let mut once = to_lines(&["class A {}", ""]);
    update_header(&mut once, &template);
    let mut twice = once.clone();
    update_header(&mut twice, &template);

    assert_eq!(once, twice);
  }

  #[test]
  fn test_update_replaces_stale_header() {
    let template = java_template();
    let mut lines = to_lines(&[
      "/* ",
      " * Copyright 1999",
      " * ---  END LICENSE_HEADER BLOCK  ---",
      "*/",
      "",
      "class A {}",
    ]);

    update_header(&mut lines, &template);

    assert_eq!(evaluate(&lines, Some(&template)), HeaderState::Valid);
    assert_eq!(lines[template.len()..], to_lines(&["class A {}"])[..]);
  }

  #[test]
  fn test_remove_without_sentinel_is_noop() {
    let template = ruby_template(SentinelMode::BeginAndEnd);
    let mut lines = to_lines(&["# just a comment", "puts 1"]);

    assert!(!remove_header(&mut lines, &template));
    assert_eq!(lines, to_lines(&["# just a comment", "puts 1"]));
  }

  #[test]
  fn test_remove_clamps_trailer_to_file_length() {
    let template = java_template();
    let mut lines = to_lines(&[" * ---  END LICENSE_HEADER BLOCK  ---"]);

    assert!(remove_header(&mut lines, &template));
    assert!(lines.is_empty());
  }

  #[test]
  fn test_round_trip_preserves_body() {
    let templates = build_templates(Some("Copyright 2024\n\nLicensed under MIT"), &SyntaxTable::builtin(), SentinelMode::BeginAndEnd);
    let body = to_lines(&["", "  indented  ", "", "last"]);

    for template in templates.values() {
      let mut lines = body.clone();
      update_header(&mut lines, template);
      assert_eq!(evaluate(&lines, Some(template)), HeaderState::Valid);
      remove_header(&mut lines, template);
      assert_eq!(lines, body);
    }
  }

  #[test]
  fn test_every_template_on_empty_file_is_valid() {
    let templates = build_templates(Some("Copyright 2024"), &SyntaxTable::builtin(), SentinelMode::EndOnly);

    for template in templates.values() {
      let lines = template.lines().to_vec();
      assert_eq!(evaluate(&lines, Some(template)), HeaderState::Valid);
    }
  }

  #[test]
  fn test_sentinel_mode_from_str() {
    assert_eq!("end-only".parse::<SentinelMode>().unwrap(), SentinelMode::EndOnly);
    assert_eq!("Begin-And-End".parse::<SentinelMode>().unwrap(), SentinelMode::BeginAndEnd);
    assert!(matches!("both".parse::<SentinelMode>(), Err(AuditError::Configuration(_))));
  }

  #[test]
  fn test_header_state_display() {
    assert_eq!(HeaderState::Stale.to_string(), "present-but-stale");
    assert_eq!(HeaderState::NotApplicable.to_string(), "not-applicable");
    assert!(HeaderState::Missing.needs_attention());
    assert!(!HeaderState::Valid.needs_attention());
  }
}
