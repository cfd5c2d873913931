// tests/backup.rs

//! Backups on disk and project configuration through acc.toml.

mod common;

use acc::backup::{BackupArchive, BackupManager, MANIFEST_FILE};
use acc::catalog::Category;
use acc::filesystem::OsFilesystem;
use chrono::{TimeZone, Utc};
use common::Workspace;
use std::path::{Path, PathBuf};
use std::process::Command;

fn installed(ws: &Workspace) {
    ws.write_project_file(".claude/commands/acc-commit.md", "mine\n");
    ws.write_project_file(".claude/skills/tdd/SKILL.md", "my tdd\n");
}

#[test]
fn test_backup_on_disk_has_manifest() {
    let ws = Workspace::new();
    installed(&ws);
    let fs = OsFilesystem::new();
    let manager = BackupManager::new(&fs, ws.backups());

    let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let archive = manager.create_backup_at(&ws.project, Category::all(), at).unwrap();

    assert_eq!(archive.location, ws.backups().join("20260301-093000"));
    assert_eq!(
        archive.source_paths,
        vec![PathBuf::from(".claude/commands"), PathBuf::from(".claude/skills")]
    );
    assert_eq!(archive.file_count, 2);

    let manifest = std::fs::read(archive.location.join(MANIFEST_FILE)).unwrap();
    let parsed: BackupArchive = serde_json::from_slice(&manifest).unwrap();
    assert_eq!(parsed.timestamp, at);
    assert_eq!(parsed.file_count, 2);
}

#[test]
fn test_backups_listed_newest_first() {
    let ws = Workspace::new();
    installed(&ws);
    let fs = OsFilesystem::new();
    let manager = BackupManager::new(&fs, ws.backups());

    let older = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    manager.create_backup_at(&ws.project, Category::all(), older).unwrap();
    manager.create_backup_at(&ws.project, Category::all(), newer).unwrap();
    // Same second as `newer`; must not clobber it
    manager.create_backup_at(&ws.project, &[Category::Skill], newer).unwrap();

    let listed = manager.list().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].timestamp, newer);
    assert_eq!(listed[2].timestamp, older);
    assert_ne!(listed[0].location, listed[1].location);
}

#[test]
fn test_nothing_to_back_up_creates_nothing() {
    let ws = Workspace::new();
    let fs = OsFilesystem::new();
    let archive = BackupManager::new(&fs, ws.backups())
        .create_backup(&ws.project, Category::all())
        .unwrap();

    assert!(archive.is_empty());
    assert!(!ws.backups().exists());
}

#[test]
fn test_config_file_supplies_source_and_backup_dir() {
    let ws = Workspace::new();
    installed(&ws);
    std::fs::write(
        ws.project.join("acc.toml"),
        format!(
            "source_root = {:?}\nbackup_dir = \"backups/acc\"\n",
            ws.package.display().to_string()
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_acc"))
        .args(["upgrade", "--component=commands"])
        .arg("--project")
        .arg(&ws.project)
        .env_remove("ACC_SOURCE_ROOT")
        .env_remove("ACC_BACKUP_DIR")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(ws.project_file(".claude/commands/acc-commit.md"), "# acc-commit v2\n");

    let fs = OsFilesystem::new();
    let listed = BackupManager::new(&fs, ws.project.join("backups/acc")).list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(
        std::fs::read_to_string(listed[0].location.join(".claude/commands/acc-commit.md")).unwrap(),
        "mine\n"
    );
    assert!(!Path::new(&ws.backups()).exists());
}
