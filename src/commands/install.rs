// src/commands/install.rs

//! Install-only entry points: `acc install` and the package-manager hook

use super::resolve_settings;
use crate::cli::GlobalArgs;
use acc::config::Settings;
use acc::filesystem::OsFilesystem;
use acc::report::{ConsoleReporter, ExitStatus, ReportLayer};
use acc::trigger::{InstallTrigger, PackageEvent};
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Copy every component the project is missing; existing ones are left alone
pub fn cmd_install(settings: &Settings, dry_run: bool, quiet: bool) -> Result<ExitStatus> {
    let layer = ReportLayer::new(&ConsoleReporter, false).quiet(quiet);
    let source_root = match settings.require_source_root() {
        Ok(root) => root,
        Err(e) => return Ok(layer.fatal(&e)),
    };
    info!(
        "Installing components from {} into {} (dry_run={})",
        source_root.display(),
        settings.project_root.display(),
        dry_run
    );

    let fs = OsFilesystem::new();
    let trigger = InstallTrigger::new(&fs);

    if dry_run {
        return Ok(match trigger.plan(source_root, &settings.project_root) {
            Ok(plan) => {
                layer.dry_run(&plan);
                ExitStatus::Success
            }
            Err(e) => layer.fatal(&e),
        });
    }

    Ok(match trigger.install(source_root, &settings.project_root, &layer) {
        Ok(result) => layer.finish("Install", &result, None),
        Err(e) => layer.fatal(&e),
    })
}

/// Package-manager lifecycle hook
///
/// Never fails: configuration problems, a missing package, and copy errors
/// all end up as warnings and the exit status is always success.
pub fn cmd_hook(event: PackageEvent, package_root: &Path, global: &GlobalArgs) -> ExitStatus {
    let layer = ReportLayer::new(&ConsoleReporter, true).quiet(global.quiet);

    let settings = match resolve_settings(global, false) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("acc hook {}: {:#}", event, e);
            layer.status(&format!("acc: skipped component install ({:#})", e));
            return ExitStatus::Success;
        }
    };

    let package_root = if package_root.is_absolute() {
        package_root.to_path_buf()
    } else {
        settings.project_root.join(package_root)
    };

    let fs = OsFilesystem::new();
    InstallTrigger::new(&fs).on_event(event, &package_root, &settings.project_root, &layer)
}
