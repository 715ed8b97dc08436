//! # license-header
//!
//! Audits and rewrites license header blocks at the top of source files.
//!
//! A header block is the license text wrapped in the comment syntax of the
//! file's language and closed by a sentinel line
//! (`---  END LICENSE_HEADER BLOCK  ---`). Each file is classified as
//! valid, present-but-stale, missing or not-applicable, and the block can be
//! inserted, refreshed or removed while the rest of the file is kept as is.
//!
//! ## Features
//!
//! * Per-language comment syntax with first-match-wins extension lookup
//! * One canonical header per language, built once from the license text
//! * Idempotent update: updating twice is the same as updating once
//! * Exact removal: removing an inserted header restores the original lines
//! * Atomic writes through a temporary file
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use license_header::auditor::{Action, Auditor, AuditorConfig};
//! use license_header::header::HeaderState;
//!
//! fn main() -> anyhow::Result<()> {
//!     let auditor = Auditor::new(AuditorConfig {
//!         license_file: Some(PathBuf::from("LICENSE_HEADER.txt")),
//!         exceptions: vec!["^vendor/".to_string()],
//!         ..AuditorConfig::default()
//!     })?;
//!
//!     let report = auditor.audit(&["app/**/*.rb".to_string()], &[])?;
//!     for path in report.paths(HeaderState::Missing) {
//!         println!("missing: {}", path.display());
//!     }
//!
//!     let summary = auditor.process_files(Action::Update, report.paths(HeaderState::Stale), |_| true);
//!     println!("{} files updated", summary.changed.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`syntax`] - Comment syntax per language
//! * [`header`] - Header templates, evaluation and mutation
//! * [`auditor`] - Classifying and rewriting files
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`syntax`]: crate::syntax
//! [`header`]: crate::header
//! [`auditor`]: crate::auditor
//! [`logging`]: crate::logging

pub mod auditor;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod header;
pub mod logging;
pub mod output;
pub mod report;
pub mod source;
pub mod syntax;

pub use auditor::{Action, Auditor, AuditorConfig};
pub use error::AuditError;
pub use header::HeaderState;
