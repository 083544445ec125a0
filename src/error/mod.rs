// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the cg application.
//!
//! The taxonomy mirrors how the checker behaves: an [`AccessError`] means the
//! change-source could not be queried at all, a [`RuleExecutionError`] means a
//! rule's own logic failed on valid input. Both are fatal and abort the run;
//! policy failures are never errors, they are `Violation` values in the report.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cg operations.
#[derive(Error, Debug)]
pub enum CgError {
    // Change-source errors
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    // Rule-internal errors
    #[error("Rule execution error: {0}")]
    Rule(#[from] RuleExecutionError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Hook errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Change-source errors: the list of changed files or the commit message
/// could not be obtained. Always fatal; no partial report is produced.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Failed to get diff: {message}")]
    DiffFailed { message: String },

    #[error("Invalid reference: {reference}")]
    InvalidReference { reference: String },

    #[error("No merge base between '{base}' and '{head}'")]
    NoMergeBase { base: String, head: String },

    #[error("Failed to read commit message from {path}: {message}")]
    MessageUnreadable { path: PathBuf, message: String },
}

impl From<git2::Error> for AccessError {
    fn from(err: git2::Error) -> Self {
        AccessError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// A rule's internal logic failed on valid input. Never downgraded to a
/// violation: a check that cannot complete must not be mistaken for a pass.
#[derive(Error, Debug)]
pub enum RuleExecutionError {
    #[error("Rule '{rule}' failed on {path}: {message}")]
    FileRuleFailed {
        rule: String,
        path: PathBuf,
        message: String,
    },

    #[error("Rule '{rule}' failed on commit message: {message}")]
    MessageRuleFailed { rule: String, message: String },

    #[error("Invalid pattern for rule '{rule}': {pattern}")]
    InvalidPattern { rule: String, pattern: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook}")]
    AlreadyExists { hook: String },

    #[error("Hook not found: {hook}")]
    NotFound { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },
}

/// Result type alias for cg operations.
pub type Result<T> = std::result::Result<T, CgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_display() {
        let err = AccessError::NoMergeBase {
            base: "main".to_string(),
            head: "HEAD".to_string(),
        };
        assert!(err.to_string().contains("main"));
        assert!(err.to_string().contains("HEAD"));
    }

    #[test]
    fn test_rule_error_display() {
        let err = RuleExecutionError::FileRuleFailed {
            rule: "tab-character".to_string(),
            path: PathBuf::from("src/a.c"),
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("tab-character"));
        assert!(err.to_string().contains("src/a.c"));
    }

    #[test]
    fn test_cg_error_from_access_error() {
        let cg_err: CgError = AccessError::NotARepository.into();
        assert!(cg_err.to_string().contains("Not a git repository"));
    }

    #[test]
    fn test_cg_error_from_config_error() {
        let cg_err: CgError = ConfigError::NotFound {
            path: PathBuf::from("/path/to/cg.toml"),
        }
        .into();
        assert!(cg_err.to_string().contains("/path/to/cg.toml"));
    }
}
