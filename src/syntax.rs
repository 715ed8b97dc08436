//! # Syntax Module
//!
//! This module defines how a license header is wrapped in comment syntax for
//! each supported language.
//!
//! The module includes:
//! - [`LanguageRule`] describing the comment wrapping of one language
//! - [`SyntaxTable`], an ordered table of rules keyed by language identifier
//!
//! Extension lookup walks the table in order and the first rule listing the
//! extension wins. Extensions include the leading dot and are matched
//! case-sensitively.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use license_header::syntax::SyntaxTable;
//!
//! let table = SyntaxTable::builtin();
//! let (lang, rule) = table.lookup(Path::new("app/models/user.rb")).expect("ruby is builtin");
//! assert_eq!(lang, "ruby");
//! assert_eq!(rule.line_prefix, "# ");
//! ```

use std::path::Path;

use serde::Deserialize;

/// Comment wrapping rule for one language.
///
/// Only `line_prefix` is required; `prefix_line` and `suffix_line` are
/// independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageRule {
  /// Emitted once before the wrapped license text (e.g. "/* ")
  #[serde(default, rename = "pre")]
  pub prefix_line: Option<String>,

  /// Prepended to every license line and to the sentinel lines
  #[serde(rename = "each")]
  pub line_prefix: String,

  /// Emitted once after the END sentinel (e.g. "*/")
  #[serde(default, rename = "post")]
  pub suffix_line: Option<String>,

  /// Whether an empty line separates the header from the body
  #[serde(default, rename = "sep")]
  pub separator_after: bool,

  /// File extensions this rule applies to, including the leading dot
  #[serde(rename = "exts")]
  pub extensions: Vec<String>,
}

impl LanguageRule {
  /// Create a line-comment rule with no prefix or suffix line.
  pub fn line(line_prefix: &str, separator_after: bool, extensions: &[&str]) -> Self {
    Self {
      prefix_line: None,
      line_prefix: line_prefix.to_string(),
      suffix_line: None,
      separator_after,
      extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
    }
  }

  /// Create a block-comment rule with both prefix and suffix lines.
  pub fn block(prefix_line: &str, line_prefix: &str, suffix_line: &str, separator_after: bool, extensions: &[&str]) -> Self {
    Self {
      prefix_line: Some(prefix_line.to_string()),
      line_prefix: line_prefix.to_string(),
      suffix_line: Some(suffix_line.to_string()),
      separator_after,
      extensions: extensions.iter().map(|ext| (*ext).to_string()).collect(),
    }
  }

  /// Returns `true` if this rule lists `extension` (leading dot included).
  pub fn matches_extension(&self, extension: &str) -> bool {
    self.extensions.iter().any(|ext| ext == extension)
  }
}

/// Ordered mapping from language identifier to [`LanguageRule`].
///
/// Order is significant: [`lookup`](Self::lookup) returns the first rule that
/// lists a path's extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTable {
  entries: Vec<(String, LanguageRule)>,
}

impl SyntaxTable {
  /// Creates an empty table.
  pub const fn new() -> Self {
    Self { entries: Vec::new() }
  }

  /// The builtin table of supported languages.
  pub fn builtin() -> Self {
    let mut table = Self::new();
    table.insert("css", LanguageRule::block("/* ", " * ", "*/", true, &[".css", ".scss"]));
    table.insert("erb", LanguageRule::block("<%#", "", "%>", false, &[".erb"]));
    table.insert(
      "haml",
      LanguageRule {
        prefix_line: Some("-#".to_string()),
        line_prefix: "  ".to_string(),
        suffix_line: None,
        separator_after: true,
        extensions: vec![".haml".to_string()],
      },
    );
    table.insert("as", LanguageRule::block("/* ", " * ", "*/", true, &[".as"]));
    table.insert("html", LanguageRule::block("<!--", "", "-->", false, &[".html"]));
    table.insert("htm", LanguageRule::block("<!--", "", "-->", false, &[".htm"]));
    table.insert("java", LanguageRule::block("/* ", " * ", "*/", true, &[".java"]));
    table.insert("javascript", LanguageRule::block("/* ", " * ", "*/", true, &[".js", ".json"]));
    table.insert("ruby", LanguageRule::line("# ", true, &[".rb", ".rake", ".coffee", ".pp"]));
    table
  }

  /// Inserts a rule. A rule for an existing language replaces it in place,
  /// keeping its position; a new language is appended.
  pub fn insert(&mut self, lang: impl Into<String>, rule: LanguageRule) {
    let lang = lang.into();
    match self.entries.iter_mut().find(|(id, _)| *id == lang) {
      Some(entry) => entry.1 = rule,
      None => self.entries.push((lang, rule)),
    }
  }

  /// Returns the rule registered for `lang`, if any.
  pub fn get(&self, lang: &str) -> Option<&LanguageRule> {
    self.entries.iter().find(|(id, _)| id == lang).map(|(_, rule)| rule)
  }

  /// Finds the first rule whose extensions include the extension of `path`.
  pub fn lookup(&self, path: &Path) -> Option<(&str, &LanguageRule)> {
    let extension = extension_of(path)?;
    self
      .entries
      .iter()
      .find(|(_, rule)| rule.matches_extension(&extension))
      .map(|(id, rule)| (id.as_str(), rule))
  }

  /// Iterates over `(language, rule)` pairs in table order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageRule)> {
    self.entries.iter().map(|(id, rule)| (id.as_str(), rule))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// The extension of `path` with its leading dot, e.g. `".rb"`.
///
/// Dotfiles such as `.rb` have no extension, mirroring [`Path::extension`].
pub fn extension_of(path: &Path) -> Option<String> {
  path.extension().and_then(|ext| ext.to_str()).map(|ext| format!(".{ext}"))
}
