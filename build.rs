// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: component category selector
fn component_arg() -> Arg {
    Arg::new("component")
        .long("component")
        .value_name("CATEGORY")
        // Same names as catalog::SELECTOR_NAMES
        .value_parser([
            "all", "commands", "command", "agents", "agent", "skills", "skill",
        ])
        .default_value("all")
        .help("Restrict to one category")
}

fn dry_run_arg() -> Arg {
    Arg::new("dry_run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Show what would change without writing anything")
}

fn build_cli() -> Command {
    Command::new("acc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("ACC Contributors")
        .about("Install and upgrade Claude Code commands, agents, and skills")
        .subcommand_required(true)
        .arg(
            Arg::new("project")
                .long("project")
                .value_name("DIR")
                .env("ACC_PROJECT_ROOT")
                .global(true)
                .help("Project root holding .claude/ (default: current directory)"),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .value_name("DIR")
                .env("ACC_SOURCE_ROOT")
                .global(true)
                .help("Package root shipping the components"),
        )
        .arg(
            Arg::new("backup_dir")
                .long("backup-dir")
                .value_name("DIR")
                .env("ACC_BACKUP_DIR")
                .global(true)
                .help("Where upgrade backups are written (default: .claude-backups)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Suppress per-file status lines"),
        )
        .subcommand(
            Command::new("upgrade")
                .about("Replace installed components with the packaged versions")
                .arg(
                    Arg::new("no_backup")
                        .long("no-backup")
                        .action(ArgAction::SetTrue)
                        .help("Skip the backup step"),
                )
                .arg(component_arg())
                .arg(dry_run_arg()),
        )
        .subcommand(
            Command::new("install")
                .about("Copy components the project does not have yet (never overwrites)")
                .arg(dry_run_arg()),
        )
        .subcommand(
            Command::new("hook")
                .about("Lifecycle hook for the host package manager (always exits 0)")
                .arg(
                    Arg::new("event")
                        .required(true)
                        .value_parser(["post-install", "post-update"])
                        .help("Lifecycle event"),
                )
                .arg(
                    Arg::new("package_root")
                        .required(true)
                        .help("Root of the installed package"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Show which components are missing, identical, or modified")
                .arg(component_arg()),
        )
        .subcommand(Command::new("backups").about("List upgrade backups, newest first"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(Arg::new("shell").required(true).help("Shell type")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("acc.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
