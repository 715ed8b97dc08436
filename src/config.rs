//! # Configuration Module
//!
//! This module provides configuration support for license-header, allowing
//! users to set the license file, exception patterns and sentinel mode, and
//! to add or override comment syntax per language.
//!
//! Configuration can be specified in a `.license-header.toml` file or via the
//! `LICENSE_HEADER_CONFIG` environment variable.
//!
//! ```toml
//! license-file = "LICENSE_HEADER.txt"
//! exceptions = ["^vendor/", "\\.min\\.js$"]
//! sentinel = "end-only"
//!
//! [[languages]]
//! id = "python"
//! each = "# "
//! sep = true
//! exts = [".py"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::header::SentinelMode;
use crate::syntax::{LanguageRule, SyntaxTable};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".license-header.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSE_HEADER_CONFIG";

/// A language entry in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LanguageConfig {
  /// Language identifier. Reusing a builtin identifier replaces that rule.
  pub id: String,

  #[serde(flatten)]
  pub rule: LanguageRule,
}

/// Main configuration struct for license-header.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// File holding the raw license text
  #[serde(default)]
  pub license_file: Option<PathBuf>,

  /// Regular expressions for paths to skip
  #[serde(default)]
  pub exceptions: Vec<String>,

  /// Which sentinel lines header blocks carry
  #[serde(default)]
  pub sentinel: Option<SentinelMode>,

  /// Additional or replacement language rules, in table order
  #[serde(default)]
  pub languages: Vec<LanguageConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A language rule is invalid.
  #[error("Invalid language '{id}': {message}")]
  InvalidLanguage { id: String, message: String },

  /// An exception pattern is not a valid regex.
  #[error("Invalid exception pattern '{pattern}': {message}")]
  InvalidException { pattern: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or fails
  /// validation.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    // A relative license file is relative to the config file
    if let Some(license_file) = &config.license_file
      && license_file.is_relative()
      && let Some(parent) = path.parent()
    {
      config.license_file = Some(parent.join(license_file));
    }

    verbose_log!("Loaded {} language rules", config.languages.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Every language lists at least one extension
  /// - Every extension includes the leading dot
  /// - Every exception compiles as a regex
  fn validate(&self) -> Result<(), ConfigError> {
    for language in &self.languages {
      if language.rule.extensions.is_empty() {
        return Err(ConfigError::InvalidLanguage {
          id: language.id.clone(),
          message: "exts cannot be empty".to_string(),
        });
      }

      if let Some(ext) = language.rule.extensions.iter().find(|ext| !ext.starts_with('.')) {
        return Err(ConfigError::InvalidLanguage {
          id: language.id.clone(),
          message: format!("extension '{ext}' must include the leading dot"),
        });
      }
    }

    for pattern in &self.exceptions {
      if let Err(e) = regex::Regex::new(pattern) {
        return Err(ConfigError::InvalidException {
          pattern: pattern.clone(),
          message: e.to_string(),
        });
      }
    }

    Ok(())
  }

  /// The builtin syntax table with this config's languages applied.
  pub fn syntax_table(&self) -> SyntaxTable {
    let mut table = SyntaxTable::builtin();
    for language in &self.languages {
      table.insert(language.id.clone(), language.rule.clone());
    }
    table
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSE_HEADER_CONFIG` environment variable
/// 3. `.license-header.toml` in `root`
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = root.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `Ok(None)` when `no_config` is set or no file is found.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
