// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module.
//!
//! The fixed catalog of compliance checks, the evaluator that drives them
//! over a change-set, and the report types that carry the verdict.

mod catalog;
mod engine;
mod report;

pub use catalog::{FileRule, MessageRule};
pub use engine::RuleEngine;
pub use report::{
    EvaluationReport, Severity, Violation, EXIT_BLOCKING, EXIT_FATAL, EXIT_PASS,
};
