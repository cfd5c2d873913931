// src/error.rs

//! Error types for the component installer
//!
//! Errors fall into two groups. Fatal errors (catalog, backup, config) stop a
//! run before the destination is touched. `ComponentCopy` is recorded per
//! component and never stops a run on its own.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Source tree missing or unreadable
    #[error("cannot read component catalog at {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backup step failed; no destination file has been modified
    #[error("backup failed at {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single component could not be copied
    #[error("failed to copy {}: {source}", path.display())]
    ComponentCopy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path traversal detected: {0}")]
    PathTraversal(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors that must halt a run before any destination write
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CatalogRead { .. } | Self::Backup { .. } | Self::Config(_)
        )
    }

    pub(crate) fn catalog(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CatalogRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn backup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Backup {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn copy(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ComponentCopy {
            path: path.into(),
            source,
        }
    }
}
