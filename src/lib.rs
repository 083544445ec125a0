// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CG - Commit compliance checker
//!
//! Checks the files changed by a commit (or pull request) and the commit
//! message against a fixed coding-standard policy. The same rule engine
//! runs behind local git hooks (pre-commit, commit-msg, pre-merge-commit)
//! and behind CI, with identical semantics.
//!
//! # Example
//!
//! ```no_run
//! use cg::config::CgConfig;
//! use cg::git::{self, CommitMessage};
//! use cg::rules::RuleEngine;
//!
//! let config = CgConfig::load().unwrap();
//! let changes = git::staged_changes().unwrap();
//! let message = CommitMessage::new("ABC-42 Fix the frobnicator");
//!
//! let report = RuleEngine::new(config)
//!     .evaluate(&changes, Some(&message))
//!     .unwrap();
//! for violation in &report.violations {
//!     println!("{}", violation.format());
//! }
//! std::process::exit(report.exit_code());
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod rules;

// Re-exports for convenience
pub use config::CgConfig;
pub use error::{CgError, Result};
pub use rules::{EvaluationReport, RuleEngine, Severity, Violation};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cg.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
