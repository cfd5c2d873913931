// src/upgrade.rs

//! Upgrade orchestrator
//!
//! Forced replacement of installed components, optionally scoped to one
//! category and preceded by a backup.
//!
//! # Upgrade Lifecycle
//!
//! ```text
//! START -> BACKED_UP -> PLANNED -> APPLIED -> DONE
//!   |          |
//!   +----------+--> ABORTED   (backup or catalog failure, destination untouched)
//! ```
//!
//! With `skip_backup` the BACKED_UP step is skipped. A dry run stops after
//! PLANNED and goes straight to DONE without a backup.

use crate::backup::{BackupArchive, BackupManager};
use crate::catalog::{Catalog, UpgradeSelector};
use crate::error::Error;
use crate::filesystem::Filesystem;
use crate::reconcile::{ApplyObserver, Policy, ReconciliationPlan, ReconciliationResult, Reconciler};
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for one upgrade request
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeOptions {
    pub skip_backup: bool,
    pub selector: UpgradeSelector,
    /// Plan only; no backup, no writes
    pub dry_run: bool,
}

/// Upgrade state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeState {
    /// Nothing done yet
    Start,
    /// Backup written
    BackedUp,
    /// Catalog enumerated and plan computed
    Planned,
    /// Plan applied (possibly with per-component failures)
    Applied,
    /// Terminal: finished, successfully or with reported failures
    Done,
    /// Terminal: stopped before any destination write
    Aborted,
}

impl UpgradeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

/// Everything an upgrade run produced
#[derive(Debug)]
pub struct UpgradeReport {
    pub state: UpgradeState,
    /// States visited, in order, ending with the terminal state
    pub history: Vec<UpgradeState>,
    pub backup: Option<BackupArchive>,
    pub plan: Option<ReconciliationPlan>,
    pub result: Option<ReconciliationResult>,
    /// The fatal error behind an `Aborted` run
    pub error: Option<Error>,
}

impl UpgradeReport {
    fn new() -> Self {
        Self {
            state: UpgradeState::Start,
            history: vec![UpgradeState::Start],
            backup: None,
            plan: None,
            result: None,
            error: None,
        }
    }

    fn transition(&mut self, next: UpgradeState) {
        debug!("Upgrade state: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
    }

    fn abort(mut self, error: Error) -> Self {
        info!("Upgrade aborted: {}", error);
        self.error = Some(error);
        self.transition(UpgradeState::Aborted);
        self
    }

    pub fn is_aborted(&self) -> bool {
        self.state == UpgradeState::Aborted
    }

    /// Backup location worth showing the user, if one was written
    pub fn backup_location(&self) -> Option<&std::path::Path> {
        self.backup
            .as_ref()
            .filter(|archive| !archive.is_empty())
            .map(|archive| archive.location.as_path())
    }
}

/// Drives backup, planning, and forced copy for one project
pub struct UpgradeOrchestrator<'a> {
    fs: &'a dyn Filesystem,
    source_root: PathBuf,
    destination_root: PathBuf,
    backup_root: PathBuf,
}

impl<'a> UpgradeOrchestrator<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        backup_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            backup_root: backup_root.into(),
        }
    }

    /// Run the upgrade to a terminal state
    pub fn run(&self, options: UpgradeOptions, observer: &dyn ApplyObserver) -> UpgradeReport {
        let mut report = UpgradeReport::new();
        info!(
            "Upgrading {} components in {} from {}",
            options.selector,
            self.destination_root.display(),
            self.source_root.display()
        );

        if !options.skip_backup && !options.dry_run {
            let manager = BackupManager::new(self.fs, &self.backup_root);
            match manager.create_backup(&self.destination_root, &options.selector.categories()) {
                Ok(archive) => {
                    report.backup = Some(archive);
                    report.transition(UpgradeState::BackedUp);
                }
                Err(e) => return report.abort(e),
            }
        }

        let catalog = match Catalog::enumerate(self.fs, &self.source_root) {
            Ok(catalog) => catalog,
            Err(e) => return report.abort(e),
        };

        let reconciler = Reconciler::new(self.fs);
        let plan = reconciler.plan(
            &catalog,
            &self.destination_root,
            Policy::ForceOverwrite(options.selector),
        );
        report.transition(UpgradeState::Planned);

        if !options.dry_run {
            report.result = Some(reconciler.apply(&plan, observer));
            report.transition(UpgradeState::Applied);
        }

        report.plan = Some(plan);
        report.transition(UpgradeState::Done);
        report
    }
}
