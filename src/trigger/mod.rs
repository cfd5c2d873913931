// src/trigger/mod.rs

//! Install trigger for package-manager lifecycle events
//!
//! The host package manager calls `acc hook post-install` or
//! `acc hook post-update` after it installs or updates the distribution.
//! The trigger copies every component the project does not already have and
//! never touches one that exists.
//!
//! A broken package must not break the user's dependency installation, so
//! when driven by the hook every error (including an unreadable catalog) is
//! downgraded to a warning by the reporting layer and the exit status is 0.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::filesystem::Filesystem;
use crate::reconcile::{ApplyObserver, Policy, ReconciliationPlan, ReconciliationResult, Reconciler};
use crate::report::{ExitStatus, ReportLayer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Lifecycle events the trigger reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageEvent {
    /// The package was installed for the first time
    Installed,
    /// An already-installed package was updated
    Updated,
}

impl PackageEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Installed => "post-install",
            Self::Updated => "post-update",
        }
    }
}

impl fmt::Display for PackageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageEvent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "post-install" | "installed" => Ok(Self::Installed),
            "post-update" | "updated" => Ok(Self::Updated),
            other => Err(format!("unknown package event '{}'", other)),
        }
    }
}

/// Adapter from lifecycle events to an install-only reconcile
pub struct InstallTrigger<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> InstallTrigger<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Compute the install plan without applying it
    pub fn plan(&self, package_root: &Path, project_root: &Path) -> Result<ReconciliationPlan> {
        let catalog = Catalog::enumerate(self.fs, package_root)?;
        Ok(Reconciler::new(self.fs).plan(&catalog, project_root, Policy::InstallOnly))
    }

    /// Copy every missing component from `package_root` into `project_root`
    pub fn install(
        &self,
        package_root: &Path,
        project_root: &Path,
        observer: &dyn ApplyObserver,
    ) -> Result<ReconciliationResult> {
        let plan = self.plan(package_root, project_root)?;
        Ok(Reconciler::new(self.fs).apply(&plan, observer))
    }

    /// Handle a lifecycle event end to end, reporting through `layer`
    ///
    /// Both events run the same install-only reconcile: an update ships new
    /// components, which get copied, while existing ones stay untouched.
    pub fn on_event(
        &self,
        event: PackageEvent,
        package_root: &Path,
        project_root: &Path,
        layer: &ReportLayer<'_>,
    ) -> ExitStatus {
        info!(
            "Handling {} for {} (project: {})",
            event,
            package_root.display(),
            project_root.display()
        );

        match self.install(package_root, project_root, layer) {
            Ok(result) => layer.finish("Install", &result, None),
            Err(e) => layer.fatal(&e),
        }
    }
}
