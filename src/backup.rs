// src/backup.rs

//! Backup manager
//!
//! Snapshots the project's component directories before a destructive
//! upgrade. Each backup is a directory named after its creation time:
//!
//! ```text
//! <project>/.claude-backups/
//!   20261017-142501/
//!     backup.json            manifest (timestamp, source paths, file count)
//!     .claude/commands/...   copied verbatim, same relative layout
//!     .claude/skills/...
//! ```
//!
//! Backups are never pruned and never restored automatically; restoring is
//! a manual copy back out of the backup directory.

use crate::catalog::{COMPONENT_ROOT, Category};
use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default backup directory, relative to the project root
pub const DEFAULT_BACKUP_DIR: &str = ".claude-backups";

/// Manifest file written into every backup
pub const MANIFEST_FILE: &str = "backup.json";

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// A snapshot taken before an upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Creation time; also the directory name
    pub timestamp: DateTime<Utc>,
    /// Component directories that existed and were copied, relative to the
    /// project root
    pub source_paths: Vec<PathBuf>,
    /// Number of files copied
    pub file_count: usize,
    /// Backup directory
    #[serde(skip)]
    pub location: PathBuf,
}

impl BackupArchive {
    /// True if there was nothing to back up (no directory was created)
    pub fn is_empty(&self) -> bool {
        self.source_paths.is_empty()
    }
}

/// Creates and lists backups below one backup root
pub struct BackupManager<'a> {
    fs: &'a dyn Filesystem,
    backup_root: PathBuf,
}

impl<'a> BackupManager<'a> {
    pub fn new(fs: &'a dyn Filesystem, backup_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            backup_root: backup_root.into(),
        }
    }

    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Back up every existing component directory of `categories`
    pub fn create_backup(
        &self,
        destination_root: &Path,
        categories: &[Category],
    ) -> Result<BackupArchive> {
        self.create_backup_at(destination_root, categories, Utc::now())
    }

    /// [`create_backup`](Self::create_backup) with an explicit timestamp
    ///
    /// If a backup with the same second already exists, a numeric suffix
    /// keeps the new one distinct.
    pub fn create_backup_at(
        &self,
        destination_root: &Path,
        categories: &[Category],
        timestamp: DateTime<Utc>,
    ) -> Result<BackupArchive> {
        let sources: Vec<PathBuf> = categories
            .iter()
            .map(|c| Path::new(COMPONENT_ROOT).join(c.dir_name()))
            .filter(|rel| self.fs.is_dir(&destination_root.join(rel)))
            .collect();

        if sources.is_empty() {
            info!("No component directories to back up in {}", destination_root.display());
            return Ok(BackupArchive {
                timestamp,
                source_paths: sources,
                file_count: 0,
                location: self.backup_root.clone(),
            });
        }

        let location = self.unique_location(timestamp);
        self.fs
            .mkdir_all(&location)
            .map_err(|e| Error::backup(&location, e))?;

        let mut file_count = 0;
        for rel in &sources {
            let source_dir = destination_root.join(rel);
            let files = self
                .fs
                .walk_files(&source_dir)
                .map_err(|e| Error::backup(&source_dir, e))?;

            let target_dir = location.join(rel);
            self.fs
                .mkdir_all(&target_dir)
                .map_err(|e| Error::backup(&target_dir, e))?;

            for file in files {
                let from = source_dir.join(&file);
                let to = target_dir.join(&file);
                if let Some(parent) = to.parent() {
                    self.fs
                        .mkdir_all(parent)
                        .map_err(|e| Error::backup(parent, e))?;
                }
                self.fs
                    .copy_file(&from, &to)
                    .map_err(|e| Error::backup(&from, e))?;
                file_count += 1;
            }
            debug!("Backed up {}", rel.display());
        }

        let archive = BackupArchive {
            timestamp,
            source_paths: sources,
            file_count,
            location,
        };

        let manifest_path = archive.location.join(MANIFEST_FILE);
        let manifest = serde_json::to_vec_pretty(&archive)?;
        self.fs
            .write(&manifest_path, &manifest)
            .map_err(|e| Error::backup(&manifest_path, e))?;

        info!(
            "Backed up {} file(s) from {} director(ies) to {}",
            archive.file_count,
            archive.source_paths.len(),
            archive.location.display()
        );
        Ok(archive)
    }

    /// Existing backups, newest first
    ///
    /// Directories without a readable manifest are ignored.
    pub fn list(&self) -> Result<Vec<BackupArchive>> {
        if !self.fs.is_dir(&self.backup_root) {
            return Ok(Vec::new());
        }

        let mut archives = Vec::new();
        for entry in self.fs.list_dir(&self.backup_root)? {
            if !entry.is_dir {
                continue;
            }
            let location = self.backup_root.join(&entry.name);
            let manifest = match self.fs.read(&location.join(MANIFEST_FILE)) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!("Skipping {}: {}", location.display(), e);
                    continue;
                }
            };
            match serde_json::from_slice::<BackupArchive>(&manifest) {
                Ok(mut archive) => {
                    archive.location = location;
                    archives.push(archive);
                }
                Err(e) => debug!("Skipping {}: bad manifest: {}", location.display(), e),
            }
        }

        archives.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.location.cmp(&a.location))
        });
        Ok(archives)
    }

    fn unique_location(&self, timestamp: DateTime<Utc>) -> PathBuf {
        let base = timestamp.format(TIMESTAMP_FORMAT).to_string();
        let mut candidate = self.backup_root.join(&base);
        let mut suffix = 1;
        while self.fs.exists(&candidate) {
            candidate = self.backup_root.join(format!("{}-{}", base, suffix));
            suffix += 1;
        }
        candidate
    }
}
