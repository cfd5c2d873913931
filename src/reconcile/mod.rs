// src/reconcile/mod.rs

//! Reconciler: the copy-if-absent-or-forced engine
//!
//! Shared by the install trigger and the upgrade orchestrator. The two entry
//! points differ only in the [`Policy`] they pass:
//!
//! ```text
//! InstallOnly:     exists -> Skip       missing -> Copy
//! ForceOverwrite:  exists -> Overwrite  missing -> Copy   (out of scope -> absent)
//! ```
//!
//! Planning is pure (existence checks only) so a plan can be shown as a dry
//! run; applying writes only below the destination root.

mod apply;
mod plan;

pub use apply::{ApplyObserver, ComponentOutcome, ReconciliationResult};
pub use plan::{Action, PlannedAction, Policy, ReconciliationPlan, destination_exists};

use crate::catalog::Catalog;
use crate::filesystem::Filesystem;
use std::path::Path;
use tracing::info;

/// Plans and applies component copies against one filesystem
pub struct Reconciler<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> Reconciler<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Compute the action for every in-scope component
    pub fn plan(
        &self,
        catalog: &Catalog,
        destination_root: &Path,
        policy: Policy,
    ) -> ReconciliationPlan {
        let plan = plan::build(self.fs, catalog, destination_root, policy);
        info!(
            "Planned {} component(s) for {}: {} copy, {} overwrite, {} skip",
            plan.entries.len(),
            destination_root.display(),
            plan.count(Action::Copy),
            plan.count(Action::Overwrite),
            plan.count(Action::Skip)
        );
        plan
    }

    /// Execute a plan, collecting per-component failures
    pub fn apply(
        &self,
        plan: &ReconciliationPlan,
        observer: &dyn ApplyObserver,
    ) -> ReconciliationResult {
        let result = apply::execute(self.fs, plan, observer);
        info!(
            "Applied plan: {} copied, {} overwritten, {} skipped, {} failed",
            result.copied(),
            result.overwritten(),
            result.skipped(),
            result.failed()
        );
        result
    }
}
