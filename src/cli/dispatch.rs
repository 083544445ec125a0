// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.
//!
//! Every invocation mode is a thin adapter: build a ChangeSet and maybe a
//! CommitMessage, hand both to the engine, print the report and map the
//! verdict to an exit code. The engine itself never knows whether it is
//! running in a hook or in CI.

use crate::config::CgConfig;
use crate::error::{CgError, Result};
use crate::git::{self, CommitMessage};
use crate::rules::RuleEngine;

use super::args::{
    CheckArgs, CiArgs, Cli, Commands, CommitMsgArgs, HooksAction, HooksArgs, InitArgs,
};

/// Run the CLI with the given arguments, returning the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let config = if let Some(config_path) = &cli.config {
        CgConfig::load_from(config_path)?
    } else {
        CgConfig::load()?
    };

    match cli.command.clone() {
        Commands::PreCommit => run_pre_commit(&cli, &config),
        Commands::CommitMsg(args) => run_commit_msg(&cli, &config, args),
        Commands::PreMergeCommit => run_pre_commit(&cli, &config),
        Commands::Ci(args) => run_ci(&cli, &config, args),
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Hooks(args) => run_hooks(&config, args),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

/// Run the pre-commit / pre-merge-commit hooks: staged files, no message
/// exists yet.
fn run_pre_commit(cli: &Cli, config: &CgConfig) -> Result<i32> {
    tracing::debug!("Checking staged files");

    let changes = git::staged_changes()?;
    let report = RuleEngine::new(config.clone()).evaluate(&changes, None)?;
    report.print(cli.format);
    Ok(report.exit_code())
}

/// Run the commit-msg hook: staged files plus the message git wrote to a
/// temp file.
fn run_commit_msg(cli: &Cli, config: &CgConfig, args: CommitMsgArgs) -> Result<i32> {
    tracing::debug!("Checking commit message from {:?}", args.message_file);

    let message = git::read_message_file(&args.message_file)?;
    let changes = git::staged_changes()?;
    let report = RuleEngine::new(config.clone()).evaluate(&changes, Some(&message))?;
    report.print(cli.format);
    Ok(report.exit_code())
}

/// Run in CI: the pull-request diff against the target branch.
fn run_ci(cli: &Cli, config: &CgConfig, args: CiArgs) -> Result<i32> {
    let base = args.base.ok_or_else(|| CgError::WithContext {
        context: "ci".to_string(),
        message: "no base reference; pass --base or set GITHUB_BASE_REF".to_string(),
    })?;
    tracing::debug!("Checking {}..{}", base, args.head);

    let message = CommitMessage::new(args.commit_message);
    let changes = git::range_changes(&base, &args.head)?;
    let report = RuleEngine::new(config.clone()).evaluate(&changes, Some(&message))?;
    report.print(cli.format);
    Ok(report.exit_code())
}

/// Run the check command: staged files, optional message from the
/// command line.
fn run_check(cli: &Cli, config: &CgConfig, args: CheckArgs) -> Result<i32> {
    let message = args.message.map(CommitMessage::new);
    let changes = git::staged_changes()?;
    let report = RuleEngine::new(config.clone()).evaluate(&changes, message.as_ref())?;
    report.print(cli.format);
    Ok(report.exit_code())
}

/// Run the hooks command.
fn run_hooks(config: &CgConfig, args: HooksArgs) -> Result<i32> {
    use crate::hooks::HookManager;

    if !config.hooks.enabled {
        return Err(CgError::WithContext {
            context: "hooks".to_string(),
            message: "hook management is disabled in configuration".to_string(),
        });
    }

    let manager = HookManager::new()?;

    match args.action {
        HooksAction::Install { hook, force } => {
            if let Some(hook_name) = hook {
                manager.install_hook(&hook_name, force)?;
                println!("Installed {} hook", hook_name);
            } else {
                manager.install_all(force)?;
                println!("Installed all hooks");
            }
        }
        HooksAction::Uninstall { hook } => {
            if let Some(hook_name) = hook {
                manager.uninstall_hook(&hook_name)?;
                println!("Uninstalled {} hook", hook_name);
            } else {
                manager.uninstall_all()?;
                println!("Uninstalled all hooks");
            }
        }
        HooksAction::Status => {
            let status = manager.status()?;
            for (hook, installed) in status {
                let icon = if installed { "installed" } else { "missing" };
                println!("{:<18} {}", hook, icon);
            }
        }
    }

    Ok(crate::rules::EXIT_PASS)
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<i32> {
    use crate::config::default::example_config;

    let config_path = std::path::Path::new("cg.toml");

    if config_path.exists() && !args.force {
        return Err(CgError::WithContext {
            context: "init".to_string(),
            message: "Configuration file already exists. Use --force to overwrite.".to_string(),
        });
    }

    std::fs::write(config_path, example_config()).map_err(|e| CgError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("Created cg.toml");
    Ok(crate::rules::EXIT_PASS)
}

/// Run the version command.
fn run_version() -> Result<i32> {
    println!("cg {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(crate::rules::EXIT_PASS)
}
