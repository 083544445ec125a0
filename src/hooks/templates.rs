// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

use std::str::FromStr;

/// Marker written into generated hooks so we can recognize our own.
pub const HOOK_MARKER: &str = "CG Git Hook";

/// The hooks cg knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    PreCommit,
    CommitMsg,
    PreMergeCommit,
}

impl HookTemplate {
    /// All installable hooks.
    pub fn all() -> &'static [HookTemplate] {
        &[
            HookTemplate::PreCommit,
            HookTemplate::CommitMsg,
            HookTemplate::PreMergeCommit,
        ]
    }

    /// Filename under .git/hooks.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::PreCommit => "pre-commit",
            HookTemplate::CommitMsg => "commit-msg",
            HookTemplate::PreMergeCommit => "pre-merge-commit",
        }
    }

    /// The cg invocation the hook script runs. commit-msg is the only hook
    /// git passes an argument to (the message file path).
    fn command(&self) -> &'static str {
        match self {
            HookTemplate::PreCommit => "cg pre-commit",
            HookTemplate::CommitMsg => "cg commit-msg \"$1\"",
            HookTemplate::PreMergeCommit => "cg pre-merge-commit",
        }
    }

    /// Generate the hook script body.
    pub fn generate(&self) -> String {
        format!(
            "#!/bin/sh\n# {}\n# Generated by cg v{} - do not edit\nexec {}\n",
            HOOK_MARKER,
            env!("CARGO_PKG_VERSION"),
            self.command()
        )
    }
}

impl FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre-commit" => Ok(HookTemplate::PreCommit),
            "commit-msg" => Ok(HookTemplate::CommitMsg),
            "pre-merge-commit" => Ok(HookTemplate::PreMergeCommit),
            _ => Err(()),
        }
    }
}
