// src/commands/mod.rs
//! Command handlers for the acc CLI

mod backups;
mod install;
mod status;
mod upgrade;

pub use backups::cmd_backups;
pub use install::{cmd_hook, cmd_install};
pub use status::cmd_status;
pub use upgrade::cmd_upgrade;

use crate::cli::{Cli, Commands, GlobalArgs};
use acc::config::{Overrides, Settings};
use acc::report::ExitStatus;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Run the parsed command line to an exit status
pub fn dispatch(cli: Cli) -> Result<ExitStatus> {
    let Cli { global, command } = cli;

    match command {
        Commands::Upgrade {
            no_backup,
            component,
            dry_run,
        } => {
            let settings = resolve_settings(&global, no_backup)?;
            cmd_upgrade(&settings, component, dry_run, global.quiet)
        }
        Commands::Install { dry_run } => {
            let settings = resolve_settings(&global, false)?;
            cmd_install(&settings, dry_run, global.quiet)
        }
        Commands::Hook { event, package_root } => Ok(cmd_hook(event, &package_root, &global)),
        Commands::Status { component } => {
            let settings = resolve_settings(&global, false)?;
            cmd_status(&settings, component)
        }
        Commands::Backups => {
            let settings = resolve_settings(&global, false)?;
            cmd_backups(&settings)
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(ExitStatus::Success)
        }
    }
}

/// Layer defaults, acc.toml, and flags for this invocation
pub(crate) fn resolve_settings(global: &GlobalArgs, no_backup: bool) -> Result<Settings> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let overrides = Overrides {
        project_root: global.project.clone(),
        source_root: global.source.clone(),
        backup_dir: global.backup_dir.clone(),
        no_backup,
    };
    Ok(Settings::resolve(&overrides, &cwd)?)
}

fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "acc", &mut io::stdout());
}
