// src/commands/upgrade.rs

//! `acc upgrade [--no-backup] [--component=<category>] [--dry-run]`

use acc::catalog::UpgradeSelector;
use acc::config::Settings;
use acc::filesystem::OsFilesystem;
use acc::report::{ConsoleReporter, ExitStatus, ReportLayer};
use acc::upgrade::{UpgradeOptions, UpgradeOrchestrator};
use anyhow::Result;
use tracing::info;

/// Force-upgrade the selected components from the package
pub fn cmd_upgrade(
    settings: &Settings,
    selector: UpgradeSelector,
    dry_run: bool,
    quiet: bool,
) -> Result<ExitStatus> {
    let layer = ReportLayer::new(&ConsoleReporter, false).quiet(quiet);
    let source_root = match settings.require_source_root() {
        Ok(root) => root,
        Err(e) => return Ok(layer.fatal(&e)),
    };

    let options = UpgradeOptions {
        skip_backup: !settings.backup,
        selector,
        dry_run,
    };
    info!(
        "Upgrade requested: component={}, backup={}, dry_run={}",
        options.selector, settings.backup, options.dry_run
    );

    let fs = OsFilesystem::new();
    let orchestrator = UpgradeOrchestrator::new(
        &fs,
        source_root,
        &settings.project_root,
        &settings.backup_dir,
    );
    let report = orchestrator.run(options, &layer);

    if let Some(error) = &report.error {
        return Ok(layer.fatal(error));
    }

    if dry_run {
        if let Some(plan) = &report.plan {
            layer.dry_run(plan);
        }
        return Ok(ExitStatus::Success);
    }

    Ok(match &report.result {
        Some(result) => layer.finish("Upgrade", result, report.backup_location()),
        None => ExitStatus::Success,
    })
}
