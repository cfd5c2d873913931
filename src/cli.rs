// src/cli.rs
//! CLI definitions for acc
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use acc::catalog::UpgradeSelector;
use acc::trigger::PackageEvent;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acc")]
#[command(author = "ACC Contributors")]
#[command(version)]
#[command(
    about = "Install and upgrade Claude Code commands, agents, and skills",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Project root holding .claude/ (default: current directory)
    #[arg(long, global = true, env = "ACC_PROJECT_ROOT", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Package root shipping the components
    #[arg(long, global = true, env = "ACC_SOURCE_ROOT", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Where upgrade backups are written (default: .claude-backups)
    #[arg(long, global = true, env = "ACC_BACKUP_DIR", value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-file status lines
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace installed components with the packaged versions
    ///
    /// Takes a timestamped backup of the affected directories first unless
    /// --no-backup is given.
    Upgrade {
        /// Skip the backup step
        #[arg(long)]
        no_backup: bool,

        /// Restrict the upgrade to one category: commands, agents, skills, or all
        #[arg(long, value_name = "CATEGORY", default_value = "all")]
        component: UpgradeSelector,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Copy components the project does not have yet (never overwrites)
    Install {
        /// Show what would be copied without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Lifecycle hook for the host package manager (always exits 0)
    Hook {
        /// Lifecycle event: post-install or post-update
        event: PackageEvent,

        /// Root of the installed package
        package_root: PathBuf,
    },

    /// Show which components are missing, identical, or modified
    Status {
        /// Restrict to one category: commands, agents, skills, or all
        #[arg(long, value_name = "CATEGORY", default_value = "all")]
        component: UpgradeSelector,
    },

    /// List upgrade backups, newest first
    Backups,

    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}
