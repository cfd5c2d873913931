// src/config.rs

//! Runtime configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `acc.toml` in the project root
//! 3. command-line flags (which clap also fills from `ACC_*` environment
//!    variables)
//!
//! ```toml
//! # acc.toml
//! source_root = "vendor/acc"        # package holding .claude/
//! backup_dir = ".claude-backups"    # relative to the project root
//! backup = true                     # back up before `acc upgrade`
//! ```

use crate::backup::DEFAULT_BACKUP_DIR;
use crate::catalog::COMPONENT_ROOT;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration file name
pub const CONFIG_FILE: &str = "acc.toml";

/// Contents of `acc.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source_root: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub backup: Option<bool>,
}

impl FileConfig {
    /// Load `acc.toml` from `project_root`; a missing file yields defaults
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} in {}", CONFIG_FILE, project_root.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Config(format!("cannot read {}: {}", path.display(), e)));
            }
        };
        Self::parse(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_root: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub no_backup: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_root: PathBuf,
    pub source_root: Option<PathBuf>,
    pub backup_dir: PathBuf,
    pub backup: bool,
}

impl Settings {
    /// Resolve settings, reading `acc.toml` from the project root
    pub fn resolve(overrides: &Overrides, cwd: &Path) -> Result<Self> {
        let project_root = absolutize(cwd, overrides.project_root.as_deref().unwrap_or(cwd));
        let file = FileConfig::load(&project_root)?;
        Self::merge(overrides, file, project_root)
    }

    /// Merge already-loaded layers
    pub fn merge(overrides: &Overrides, file: FileConfig, project_root: PathBuf) -> Result<Self> {
        let source_root = overrides
            .source_root
            .clone()
            .or(file.source_root)
            .map(|p| absolutize(&project_root, &p));

        let backup_dir = overrides
            .backup_dir
            .clone()
            .or(file.backup_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR));
        let backup_dir = absolutize(&project_root, &backup_dir);

        if backup_dir.starts_with(project_root.join(COMPONENT_ROOT)) {
            return Err(Error::Config(format!(
                "backup directory {} must be outside {}",
                backup_dir.display(),
                COMPONENT_ROOT
            )));
        }

        let backup = !overrides.no_backup && file.backup.unwrap_or(true);

        Ok(Self {
            project_root,
            source_root,
            backup_dir,
            backup,
        })
    }

    /// The package root holding the components to install
    pub fn require_source_root(&self) -> Result<&Path> {
        self.source_root.as_deref().ok_or_else(|| {
            Error::Config(
                "no component source configured; pass --source, set ACC_SOURCE_ROOT, \
                 or add source_root to acc.toml"
                    .to_string(),
            )
        })
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
