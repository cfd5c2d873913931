// src/commands/backups.rs

//! `acc backups`: list upgrade backups

use acc::backup::BackupManager;
use acc::config::Settings;
use acc::filesystem::OsFilesystem;
use acc::report::ExitStatus;
use anyhow::Result;

pub fn cmd_backups(settings: &Settings) -> Result<ExitStatus> {
    let fs = OsFilesystem::new();
    let archives = BackupManager::new(&fs, &settings.backup_dir).list()?;

    if archives.is_empty() {
        println!("No backups in {}", settings.backup_dir.display());
        return Ok(ExitStatus::Success);
    }

    println!("Backups in {}:", settings.backup_dir.display());
    for archive in &archives {
        let dirs: Vec<String> = archive
            .source_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!(
            "  {}  {:>4} file(s)  {}",
            archive.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            archive.file_count,
            dirs.join(", ")
        );
        println!("      {}", archive.location.display());
    }

    Ok(ExitStatus::Success)
}
