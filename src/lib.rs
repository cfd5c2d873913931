// src/lib.rs

//! acc: component installer for Claude Code projects
//!
//! Installs and upgrades the commands, agents, and skills a package ships
//! under `.claude/` into a consuming project's `.claude/` directory.
//!
//! # Architecture
//!
//! - Catalog: enumerated fresh from the package on every run
//! - Reconciler: one plan/apply engine, parameterized by policy
//! - Install trigger: package-manager hook, copies only what is missing
//! - Upgrade orchestrator: backup, then forced overwrite of a selection
//! - Filesystem trait: every write is temp-file + rename, and tests run
//!   against an in-memory tree with fault injection

pub mod backup;
pub mod catalog;
pub mod config;
mod error;
pub mod filesystem;
pub mod hash;
pub mod reconcile;
pub mod report;
pub mod status;
pub mod trigger;
pub mod upgrade;

pub use backup::{BackupArchive, BackupManager};
pub use catalog::{Catalog, Category, Component, UpgradeSelector};
pub use config::{Overrides, Settings};
pub use error::{Error, Result};
pub use filesystem::{Filesystem, MemoryFilesystem, OsFilesystem};
pub use reconcile::{Action, Policy, ReconciliationPlan, ReconciliationResult, Reconciler};
pub use report::{ExitStatus, ReportLayer, Reporter};
pub use trigger::{InstallTrigger, PackageEvent};
pub use upgrade::{UpgradeOptions, UpgradeOrchestrator, UpgradeReport, UpgradeState};
