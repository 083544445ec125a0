// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The fixed rule catalog.
//!
//! The catalog is closed and known at build time, so each category is a
//! plain enum with an `evaluate` match rather than trait objects. File rules
//! check one [`ChangedFile`]; message rules check the commit message (with
//! the aggregate change statistics, which the size rule needs).
//!
//! Content rules are diff-scoped: they look only at `added_lines`, never at
//! regions the commit did not touch. The filename and trailing-newline rules
//! are the exception and inspect the file's final state unconditionally.

use crate::config::RulesConfig;
use crate::error::RuleExecutionError;
use crate::git::{ChangeStats, ChangedFile, CommitMessage};
use lazy_static::lazy_static;
use regex::Regex;

use super::report::{Severity, Violation};

/// Filename characters illegal on Windows filesystems.
const ILLEGAL_FILENAME_CHARS: &str = "\\/:*?\"<>|";

/// Device names reserved on Windows, compared case-insensitively against
/// the file stem.
const RESERVED_DEVICE_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

lazy_static! {
    static ref INCLUDE_LINE: Regex = Regex::new(r#"^\s*#\s*include\s*["<]"#).unwrap();
    static ref STD_EXCEPTION: Regex = Regex::new(r"\bstd\s*::\s*exception\b").unwrap();
    static ref JIRA_KEY: Regex = Regex::new(r"\b[A-Z][A-Z0-9]+-[0-9]+\b").unwrap();
}

/// Rules evaluated once per changed file, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRule {
    InvalidWindowsFilename,
    CrlfLineEnding,
    ForbiddenMarker,
    TabCharacter,
    MissingTrailingNewline,
    CppIncludePattern,
    StdExceptionUsage,
}

impl FileRule {
    /// All file rules, in the fixed evaluation order.
    pub const ALL: [FileRule; 7] = [
        FileRule::InvalidWindowsFilename,
        FileRule::CrlfLineEnding,
        FileRule::ForbiddenMarker,
        FileRule::TabCharacter,
        FileRule::MissingTrailingNewline,
        FileRule::CppIncludePattern,
        FileRule::StdExceptionUsage,
    ];

    /// Stable rule identifier.
    pub fn id(&self) -> &'static str {
        match self {
            FileRule::InvalidWindowsFilename => "invalid-windows-filename",
            FileRule::CrlfLineEnding => "crlf-line-ending",
            FileRule::ForbiddenMarker => "forbidden-marker",
            FileRule::TabCharacter => "tab-character",
            FileRule::MissingTrailingNewline => "missing-trailing-newline",
            FileRule::CppIncludePattern => "cpp-include-pattern",
            FileRule::StdExceptionUsage => "std-exception-usage",
        }
    }

    /// Whether the rule applies to this file at all.
    ///
    /// Binary files short-circuit every content rule; only the filename
    /// rule sees them.
    pub fn applies_to(&self, file: &ChangedFile, rules: &RulesConfig) -> bool {
        match self {
            FileRule::InvalidWindowsFilename => true,
            FileRule::CrlfLineEnding => !file.is_binary && !rules.is_crlf_exempt(&file.path),
            FileRule::ForbiddenMarker => !file.is_binary,
            FileRule::TabCharacter => !file.is_binary && rules.is_tracked(&file.path),
            FileRule::MissingTrailingNewline => {
                !file.is_binary && rules.needs_trailing_newline(&file.path)
            }
            FileRule::CppIncludePattern | FileRule::StdExceptionUsage => {
                !file.is_binary && rules.is_cpp_family(&file.path)
            }
        }
    }

    /// Evaluate the rule against one file.
    pub fn evaluate(
        &self,
        file: &ChangedFile,
        rules: &RulesConfig,
    ) -> Result<Vec<Violation>, RuleExecutionError> {
        match self {
            FileRule::InvalidWindowsFilename => Ok(self.check_filename(file, rules)),
            FileRule::CrlfLineEnding => Ok(self.check_crlf(file)),
            FileRule::ForbiddenMarker => Ok(self.check_markers(file, rules)),
            FileRule::TabCharacter => Ok(self.check_tabs(file)),
            FileRule::MissingTrailingNewline => Ok(self.check_trailing_newline(file)),
            FileRule::CppIncludePattern => self.check_includes(file, rules),
            FileRule::StdExceptionUsage => Ok(self.check_std_exception(file)),
        }
    }

    fn violation(&self, file: &ChangedFile, line: Option<u32>, message: String) -> Violation {
        Violation {
            rule: self.id(),
            severity: Severity::Blocking,
            file: Some(file.path.clone()),
            line,
            message,
        }
    }

    /// Windows filename policy, evaluated against the final path even for
    /// binary files and content-unchanged renames.
    fn check_filename(&self, file: &ChangedFile, rules: &RulesConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        let path_str = file.path.to_string_lossy();
        let filename = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(ch) = filename
            .chars()
            .find(|c| ILLEGAL_FILENAME_CHARS.contains(*c) || (*c as u32) <= 31)
        {
            violations.push(self.violation(
                file,
                None,
                format!("illegal character {:?} in filename \"{}\"", ch, filename),
            ));
        }

        let stem = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if RESERVED_DEVICE_NAMES.contains(&stem.as_str()) {
            violations.push(self.violation(
                file,
                None,
                format!("\"{}\" is a reserved device name on Windows", filename),
            ));
        }

        if path_str.ends_with('.') || path_str.ends_with(char::is_whitespace) {
            violations.push(self.violation(
                file,
                None,
                "names must not end with \".\" or whitespace".to_string(),
            ));
        }

        if !path_str.is_ascii() {
            violations.push(self.violation(
                file,
                None,
                "only ASCII characters are permitted in paths".to_string(),
            ));
        }

        if path_str.chars().count() > rules.max_path_length {
            violations.push(self.violation(
                file,
                None,
                format!(
                    "path is too long, it must be {} characters or less",
                    rules.max_path_length
                ),
            ));
        }

        violations
    }

    /// One violation per added line that ends with CRLF.
    fn check_crlf(&self, file: &ChangedFile) -> Vec<Violation> {
        file.added_lines
            .iter()
            .filter(|line| line.bytes.ends_with(b"\r\n"))
            .map(|line| {
                self.violation(
                    file,
                    Some(line.number),
                    "line ends with CRLF, use LF line endings".to_string(),
                )
            })
            .collect()
    }

    /// Case-insensitive marker scan over added lines.
    fn check_markers(&self, file: &ChangedFile, rules: &RulesConfig) -> Vec<Violation> {
        let markers: Vec<String> = rules
            .forbidden_markers
            .iter()
            .map(|m| m.to_lowercase())
            .collect();

        let mut violations = Vec::new();
        for line in &file.added_lines {
            let text = String::from_utf8_lossy(&line.bytes).to_lowercase();
            if let Some(marker) = markers.iter().find(|m| text.contains(m.as_str())) {
                violations.push(self.violation(
                    file,
                    Some(line.number),
                    format!("found \"{}\" marker", marker.to_uppercase()),
                ));
            }
        }
        violations
    }

    fn check_tabs(&self, file: &ChangedFile) -> Vec<Violation> {
        file.added_lines
            .iter()
            .filter(|line| line.bytes.contains(&b'\t'))
            .map(|line| {
                self.violation(
                    file,
                    Some(line.number),
                    "tab character found, replace with spaces".to_string(),
                )
            })
            .collect()
    }

    /// Final-state check: the file must end with a newline. Empty files are
    /// fine.
    fn check_trailing_newline(&self, file: &ChangedFile) -> Vec<Violation> {
        if file.content.is_empty() || file.content.ends_with(b"\n") {
            Vec::new()
        } else {
            vec![self.violation(file, None, "missing terminating newline".to_string())]
        }
    }

    /// Added `#include` lines must not match any forbidden pattern.
    ///
    /// The patterns come from configuration; an unparseable pattern is a
    /// rule execution failure, not a pass.
    fn check_includes(
        &self,
        file: &ChangedFile,
        rules: &RulesConfig,
    ) -> Result<Vec<Violation>, RuleExecutionError> {
        let mut patterns = Vec::with_capacity(rules.forbidden_includes.len());
        for pattern in &rules.forbidden_includes {
            let compiled =
                Regex::new(pattern).map_err(|_| RuleExecutionError::InvalidPattern {
                    rule: self.id().to_string(),
                    pattern: pattern.clone(),
                })?;
            patterns.push(compiled);
        }

        let mut violations = Vec::new();
        for line in &file.added_lines {
            let text = String::from_utf8_lossy(&line.bytes);
            if !INCLUDE_LINE.is_match(&text) {
                continue;
            }
            if let Some(pattern) = patterns.iter().find(|p| p.is_match(&text)) {
                violations.push(self.violation(
                    file,
                    Some(line.number),
                    format!("#include matches forbidden pattern \"{}\"", pattern.as_str()),
                ));
            }
        }
        Ok(violations)
    }

    fn check_std_exception(&self, file: &ChangedFile) -> Vec<Violation> {
        file.added_lines
            .iter()
            .filter(|line| STD_EXCEPTION.is_match(&String::from_utf8_lossy(&line.bytes)))
            .map(|line| {
                self.violation(
                    file,
                    Some(line.number),
                    "bare std::exception used, throw or catch a derived type".to_string(),
                )
            })
            .collect()
    }
}

/// Rules evaluated once per commit message, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRule {
    CommitMessageSize,
    JiraIdRequired,
}

impl MessageRule {
    /// All message rules, in the fixed evaluation order.
    pub const ALL: [MessageRule; 2] = [MessageRule::CommitMessageSize, MessageRule::JiraIdRequired];

    /// Stable rule identifier.
    pub fn id(&self) -> &'static str {
        match self {
            MessageRule::CommitMessageSize => "commit-message-size",
            MessageRule::JiraIdRequired => "jira-id-required",
        }
    }

    /// Evaluate the rule against the commit message and the aggregate
    /// change statistics.
    pub fn evaluate(
        &self,
        message: &CommitMessage,
        stats: &ChangeStats,
        rules: &RulesConfig,
    ) -> Result<Vec<Violation>, RuleExecutionError> {
        match self {
            MessageRule::CommitMessageSize => {
                if stats.total_bytes_changed > rules.size_threshold_bytes {
                    Ok(vec![Violation {
                        rule: self.id(),
                        severity: Severity::Warning,
                        file: None,
                        line: None,
                        message: format!(
                            "commit changes {} bytes, above the {} byte threshold",
                            stats.total_bytes_changed, rules.size_threshold_bytes
                        ),
                    }])
                } else {
                    Ok(Vec::new())
                }
            }
            MessageRule::JiraIdRequired => {
                if message.raw.contains(&rules.jira_override_token)
                    || JIRA_KEY.is_match(&message.raw)
                {
                    Ok(Vec::new())
                } else {
                    Ok(vec![Violation {
                        rule: self.id(),
                        severity: Severity::Blocking,
                        file: None,
                        line: None,
                        message: format!(
                            "commit message has no Jira issue key (add one or use {})",
                            rules.jira_override_token
                        ),
                    }])
                }
            }
        }
    }
}
