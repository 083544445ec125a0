// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from cg.toml.
//! The rule catalog itself is fixed; what is configurable is policy — which
//! extensions are tracked, size thresholds, forbidden patterns and markers.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main configuration structure for cg.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CgConfig {
    /// Rule policy configuration.
    pub rules: RulesConfig,

    /// Hook configuration.
    pub hooks: HooksConfig,
}

impl CgConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Rule policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Total changed bytes above which the commit-message-size warning fires.
    pub size_threshold_bytes: usize,

    /// Maximum allowed path length (Windows-safe budget).
    pub max_path_length: usize,

    /// Extensions whose content is checked for tabs and forbidden markers.
    pub tracked_extensions: Vec<String>,

    /// Extensions that must end with a terminating newline.
    pub newline_extensions: Vec<String>,

    /// C/C++-family extensions subject to include and exception checks.
    pub cpp_extensions: Vec<String>,

    /// Extensions exempt from the CRLF line-ending check.
    pub crlf_exempt_extensions: Vec<String>,

    /// Regex patterns an added `#include` line must not match.
    pub forbidden_includes: Vec<String>,

    /// Markers that must not appear in added lines (case-insensitive).
    pub forbidden_markers: Vec<String>,

    /// Token that suppresses the Jira-id requirement in a commit message.
    pub jira_override_token: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            size_threshold_bytes: 256 * 1024,
            max_path_length: 208,
            tracked_extensions: vec![
                ".bat".to_string(),
                ".c".to_string(),
                ".cgi".to_string(),
                ".cmake".to_string(),
                ".cpp".to_string(),
                ".cs".to_string(),
                ".css".to_string(),
                ".F".to_string(),
                ".f".to_string(),
                ".h".to_string(),
                ".inc".to_string(),
                ".inl".to_string(),
                ".java".to_string(),
                ".js".to_string(),
                ".php".to_string(),
                ".pri".to_string(),
                ".pro".to_string(),
                ".ps1".to_string(),
                ".py".to_string(),
                ".sed".to_string(),
                ".sh".to_string(),
                ".svc".to_string(),
                ".tpl".to_string(),
            ],
            newline_extensions: vec![
                ".c".to_string(),
                ".cpp".to_string(),
                ".h".to_string(),
                ".inl".to_string(),
            ],
            cpp_extensions: vec![
                ".c".to_string(),
                ".cc".to_string(),
                ".cpp".to_string(),
                ".cxx".to_string(),
                ".h".to_string(),
                ".hpp".to_string(),
                ".inl".to_string(),
            ],
            crlf_exempt_extensions: vec![
                ".bat".to_string(),
                ".cmd".to_string(),
                ".sln".to_string(),
                ".vcxproj".to_string(),
            ],
            forbidden_includes: vec![r"\\".to_string()],
            forbidden_markers: vec![
                "DO NOT COMMIT".to_string(),
                "DO NOT MERGE".to_string(),
                "NO NOT MERGE".to_string(),
            ],
            jira_override_token: "NO_JIRA".to_string(),
        }
    }
}

impl RulesConfig {
    /// Check whether a path carries one of the given extensions.
    ///
    /// Suffix-based on purpose: the tracked sets include compound
    /// extensions and case-significant Fortran suffixes.
    fn path_has_extension(path: &Path, extensions: &[String]) -> bool {
        let name = path.to_string_lossy();
        extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Whether the file's content is checked for tabs and markers.
    pub fn is_tracked(&self, path: &Path) -> bool {
        Self::path_has_extension(path, &self.tracked_extensions)
    }

    /// Whether the file must end with a newline.
    pub fn needs_trailing_newline(&self, path: &Path) -> bool {
        Self::path_has_extension(path, &self.newline_extensions)
    }

    /// Whether the file is C/C++-family source.
    pub fn is_cpp_family(&self, path: &Path) -> bool {
        Self::path_has_extension(path, &self.cpp_extensions)
    }

    /// Whether the file is exempt from the CRLF check.
    pub fn is_crlf_exempt(&self, path: &Path) -> bool {
        Self::path_has_extension(path, &self.crlf_exempt_extensions)
    }
}

/// Hooks configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Whether hook installation is enabled.
    pub enabled: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
