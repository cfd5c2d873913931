// src/commands/status.rs

//! `acc status`: which packaged components differ from the installed ones

use acc::catalog::{Catalog, UpgradeSelector};
use acc::config::Settings;
use acc::filesystem::OsFilesystem;
use acc::report::ExitStatus;
use acc::status::{self, ComponentState};
use anyhow::Result;

pub fn cmd_status(settings: &Settings, selector: UpgradeSelector) -> Result<ExitStatus> {
    let source_root = settings.require_source_root()?;
    let fs = OsFilesystem::new();

    let catalog = Catalog::enumerate(&fs, source_root)?;
    let statuses = status::compare(&fs, &catalog, &settings.project_root, selector)?;

    if statuses.is_empty() {
        println!("No components match '{}' in {}", selector, source_root.display());
        return Ok(ExitStatus::Success);
    }

    let width = statuses
        .iter()
        .map(|s| s.component.relative_path.as_os_str().len())
        .max()
        .unwrap_or(0);

    for entry in &statuses {
        println!(
            "{:<width$}  {}",
            entry.component.relative_path.display().to_string(),
            entry.state,
            width = width
        );
    }

    let count = |state: ComponentState| statuses.iter().filter(|s| s.state == state).count();
    println!();
    println!(
        "{} identical, {} modified, {} missing",
        count(ComponentState::Identical),
        count(ComponentState::Modified),
        count(ComponentState::Missing)
    );

    Ok(ExitStatus::Success)
}
