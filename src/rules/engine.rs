// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine: drives the catalog over a change-set.

use crate::config::CgConfig;
use crate::error::Result;
use crate::git::{ChangeSet, CommitMessage};

use super::catalog::{FileRule, MessageRule};
use super::report::EvaluationReport;

/// Rule engine for evaluating a change-set against the fixed catalog.
///
/// One synchronous pass: every file in change-source order, every file rule
/// in catalog order, then every message rule. The caller decides the
/// invocation context; the engine never does.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: CgConfig,
}

impl RuleEngine {
    /// Create a new rule engine with the given configuration.
    pub fn new(config: CgConfig) -> Self {
        Self { config }
    }

    /// Evaluate a change-set and, when present, the commit message.
    ///
    /// The pre-commit hooks run before a message exists and pass `None`;
    /// commit-msg, `check` and CI supply one. A rule-internal failure
    /// aborts the whole evaluation; there is never a partial report.
    pub fn evaluate(
        &self,
        changes: &ChangeSet,
        message: Option<&CommitMessage>,
    ) -> Result<EvaluationReport> {
        let rules = &self.config.rules;
        let mut report = EvaluationReport::default();

        for file in &changes.files {
            for rule in FileRule::ALL {
                if !rule.applies_to(file, rules) {
                    continue;
                }
                tracing::trace!(rule = rule.id(), path = %file.path.display(), "evaluating");
                report.violations.extend(rule.evaluate(file, rules)?);
            }
        }

        if let Some(message) = message {
            for rule in MessageRule::ALL {
                report
                    .violations
                    .extend(rule.evaluate(message, &changes.stats, rules)?);
            }
        }

        tracing::debug!(
            files = changes.files.len(),
            violations = report.violations.len(),
            passed = report.passed(),
            "evaluation complete"
        );

        Ok(report)
    }
}
