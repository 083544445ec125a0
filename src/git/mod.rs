// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! The change-source for the rule engine: everything that touches the
//! repository lives here, behind adapters that produce plain data.

pub mod changes;
mod repo;

pub use changes::{
    read_message_file, range_changes, staged_changes, AddedLine, ChangeKind, ChangeSet,
    ChangeStats, ChangedFile, CommitMessage,
};
pub use repo::{open_repo, Repository};
