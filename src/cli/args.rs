// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CG - Commit compliance checker
///
/// Checks the files changed by a commit (or pull request) and the commit
/// message against a fixed coding-standard policy, from git hooks or CI.
#[derive(Parser, Debug)]
#[command(name = "cg")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit compliance checker", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run as the pre-commit hook: check staged files
    PreCommit,

    /// Run as the commit-msg hook: check staged files and the message
    CommitMsg(CommitMsgArgs),

    /// Run as the pre-merge-commit hook: check staged files
    PreMergeCommit,

    /// Run in CI against a pull-request diff
    Ci(CiArgs),

    /// Check staged changes manually
    Check(CheckArgs),

    /// Manage git hooks
    Hooks(HooksArgs),

    /// Initialize cg configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the commit-msg hook.
#[derive(Parser, Debug, Clone)]
pub struct CommitMsgArgs {
    /// Path to the file holding the commit message (supplied by git)
    pub message_file: PathBuf,
}

/// Arguments for the ci command.
#[derive(Parser, Debug, Clone)]
pub struct CiArgs {
    /// The commit (or pull request) message to check
    #[arg(long)]
    pub commit_message: String,

    /// Base reference of the pull request; requires full history, not a
    /// shallow clone
    #[arg(long, env = "GITHUB_BASE_REF")]
    pub base: Option<String>,

    /// Head reference to check
    #[arg(long, default_value = "HEAD")]
    pub head: String,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Also check this commit message
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install git hooks
    Install {
        /// Specific hook to install
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Force overwrite existing hooks
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall git hooks
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pre_commit() {
        let args = Cli::parse_from(["cg", "pre-commit"]);
        assert!(matches!(args.command, Commands::PreCommit));
    }

    #[test]
    fn test_parse_commit_msg() {
        let args = Cli::parse_from(["cg", "commit-msg", ".git/COMMIT_EDITMSG"]);
        if let Commands::CommitMsg(msg_args) = args.command {
            assert_eq!(msg_args.message_file, PathBuf::from(".git/COMMIT_EDITMSG"));
        } else {
            panic!("Expected CommitMsg command");
        }
    }

    #[test]
    fn test_parse_ci() {
        let args = Cli::parse_from([
            "cg",
            "ci",
            "--commit-message",
            "ABC-1 fix",
            "--base",
            "main",
        ]);
        if let Commands::Ci(ci_args) = args.command {
            assert_eq!(ci_args.commit_message, "ABC-1 fix");
            assert_eq!(ci_args.base.as_deref(), Some("main"));
            assert_eq!(ci_args.head, "HEAD");
        } else {
            panic!("Expected Ci command");
        }
    }

    #[test]
    fn test_parse_hooks() {
        let args = Cli::parse_from(["cg", "hooks", "install", "--force"]);
        assert!(matches!(args.command, Commands::Hooks(_)));
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["cg", "--debug", "--format", "json", "check"]);
        assert!(args.debug);
        assert_eq!(args.format, Some(OutputFormat::Json));
    }
}
