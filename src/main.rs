// src/main.rs

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_tracing(cli: &Cli) {
    // The hook runs inside someone else's install; keep it quiet by default
    let default_level = match (cli.global.verbose, &cli.command) {
        (0, Commands::Hook { .. }) => "error",
        (0, _) => "warn",
        (1, _) => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match commands::dispatch(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            acc::report::ExitStatus::Aborted.into()
        }
    }
}
