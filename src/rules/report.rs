// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Violation and report types, and the verdict mapping.

use crate::cli::args::OutputFormat;
use console::style;
use std::path::PathBuf;

/// Process exit code for a clean or warnings-only run.
pub const EXIT_PASS: i32 = 0;
/// Process exit code when blocking violations were found.
pub const EXIT_BLOCKING: i32 = 1;
/// Process exit code when the checks could not run at all.
pub const EXIT_FATAL: i32 = 2;

/// How bad a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported but does not fail the commit.
    Warning,
    /// Fails the commit.
    Blocking,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Blocking => "BLOCKING",
        }
    }
}

/// A single policy failure. Value type, never mutated after creation.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Stable rule identifier, e.g. `crlf-line-ending`.
    pub rule: &'static str,
    /// Severity of the violation.
    pub severity: Severity,
    /// File the violation was found in; None for message-level violations.
    pub file: Option<PathBuf>,
    /// 1-based line number when the violation is line-scoped.
    pub line: Option<u32>,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    /// Format as one report line:
    /// `<severity>: <file>[:<line>]: <rule>: <message>`.
    pub fn format(&self) -> String {
        let severity = match self.severity {
            Severity::Blocking => style(self.severity.as_str()).red().bold(),
            Severity::Warning => style(self.severity.as_str()).yellow().bold(),
        };

        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!(
                "{}: {}:{}: {}: {}",
                severity,
                file.display(),
                line,
                self.rule,
                self.message
            ),
            (Some(file), None) => format!(
                "{}: {}: {}: {}",
                severity,
                file.display(),
                self.rule,
                self.message
            ),
            _ => format!("{}: {}: {}", severity, self.rule, self.message),
        }
    }
}

/// The sole output of an evaluation pass.
///
/// Violation order is deterministic: file order as given by the change
/// source, rule order within each file, then message-level violations.
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    /// All violations, in insertion order.
    pub violations: Vec<Violation>,
}

impl EvaluationReport {
    /// True iff no violation is blocking.
    pub fn passed(&self) -> bool {
        self.violations
            .iter()
            .all(|v| v.severity != Severity::Blocking)
    }

    /// Map the verdict to a process exit code.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            EXIT_PASS
        } else {
            EXIT_BLOCKING
        }
    }

    pub fn blocking_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Blocking)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    /// Print in text format, file violations first (already grouped by
    /// file through insertion order), then message-level violations.
    fn print_text(&self) {
        for violation in self.violations.iter().filter(|v| v.file.is_some()) {
            println!("{}", violation.format());
        }
        for violation in self.violations.iter().filter(|v| v.file.is_none()) {
            println!("{}", violation.format());
        }

        if !self.violations.is_empty() {
            println!("{}", self.summary());
        }
    }

    /// Print in JSON format.
    fn print_json(&self) {
        let json = serde_json::json!({
            "passed": self.passed(),
            "violations": self.violations.iter().map(|v| {
                serde_json::json!({
                    "rule": v.rule,
                    "severity": v.severity.as_str(),
                    "file": v.file.as_ref().map(|p| p.display().to_string()),
                    "line": v.line,
                    "message": v.message,
                })
            }).collect::<Vec<_>>(),
        });

        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.passed() {
            if self.violations.is_empty() {
                "All checks passed".to_string()
            } else {
                format!("Passed with {} warning(s)", self.warning_count())
            }
        } else {
            format!(
                "Failed: {} blocking violation(s), {} warning(s)",
                self.blocking_count(),
                self.warning_count()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocking(rule: &'static str, file: Option<&str>, line: Option<u32>) -> Violation {
        Violation {
            rule,
            severity: Severity::Blocking,
            file: file.map(PathBuf::from),
            line,
            message: "test".to_string(),
        }
    }

    #[test]
    fn test_empty_report_passes() {
        let report = EvaluationReport::default();
        assert!(report.passed());
        assert_eq!(report.exit_code(), EXIT_PASS);
        assert_eq!(report.summary(), "All checks passed");
    }

    #[test]
    fn test_warnings_only_passes() {
        let report = EvaluationReport {
            violations: vec![Violation {
                rule: "commit-message-size",
                severity: Severity::Warning,
                file: None,
                line: None,
                message: "large commit".to_string(),
            }],
        };
        assert!(report.passed());
        assert_eq!(report.exit_code(), EXIT_PASS);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_blocking_fails() {
        let report = EvaluationReport {
            violations: vec![blocking("tab-character", Some("a.c"), Some(3))],
        };
        assert!(!report.passed());
        assert_eq!(report.exit_code(), EXIT_BLOCKING);
        assert!(report.summary().contains("1 blocking"));
    }

    #[test]
    fn test_violation_format_with_location() {
        let formatted = blocking("tab-character", Some("src/a.c"), Some(3)).format();
        assert!(formatted.contains("BLOCKING"));
        assert!(formatted.contains("src/a.c:3"));
        assert!(formatted.contains("tab-character"));
    }

    #[test]
    fn test_violation_format_message_level() {
        let formatted = blocking("jira-id-required", None, None).format();
        assert!(formatted.contains("BLOCKING"));
        assert!(formatted.contains("jira-id-required"));
        assert!(!formatted.contains("::"));
    }
}
