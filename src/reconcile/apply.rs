// src/reconcile/apply.rs

//! Plan execution
//!
//! Entries are applied in plan order. Every file goes through
//! [`copy_atomic`], so an interrupted run leaves each destination file
//! either fully old or fully new. A failing component is recorded and the
//! run moves on; nothing already written is rolled back.

use super::plan::{Action, PlannedAction, ReconciliationPlan};
use crate::error::{Error, Result};
use crate::filesystem::path::{install_target, safe_join};
use crate::filesystem::{Filesystem, copy_atomic};
use std::path::Path;
use tracing::debug;

/// Receives per-component events while a plan is applied
pub trait ApplyObserver {
    /// Called before an entry is processed
    fn on_action(&self, _entry: &PlannedAction) {}

    /// Called when an entry failed
    fn on_error(&self, _entry: &PlannedAction, _error: &Error) {}
}

/// Observer that ignores every event
impl ApplyObserver for () {}

/// Result of applying one entry
#[derive(Debug)]
pub struct ComponentOutcome {
    pub entry: PlannedAction,
    /// Files written before success or the first failure
    pub files_written: usize,
    pub error: Option<Error>,
}

impl ComponentOutcome {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct ReconciliationResult {
    pub outcomes: Vec<ComponentOutcome>,
}

impl ReconciliationResult {
    fn succeeded_with(&self, action: Action) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.entry.action == action && !o.is_failed())
            .count()
    }

    /// Components newly copied
    pub fn copied(&self) -> usize {
        self.succeeded_with(Action::Copy)
    }

    /// Components replaced
    pub fn overwritten(&self) -> usize {
        self.succeeded_with(Action::Overwrite)
    }

    /// Components left alone because they already existed
    pub fn skipped(&self) -> usize {
        self.succeeded_with(Action::Skip)
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Failed outcomes, in plan order
    pub fn failures(&self) -> impl Iterator<Item = &ComponentOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// Total files written across all components
    pub fn files_written(&self) -> usize {
        self.outcomes.iter().map(|o| o.files_written).sum()
    }

    /// The run counts as failed if any component failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

pub(super) fn execute(
    fs: &dyn Filesystem,
    plan: &ReconciliationPlan,
    observer: &dyn ApplyObserver,
) -> ReconciliationResult {
    let mut result = ReconciliationResult::default();

    for entry in &plan.entries {
        observer.on_action(entry);

        let mut outcome = ComponentOutcome {
            entry: entry.clone(),
            files_written: 0,
            error: None,
        };

        if entry.action.writes() {
            for file in &entry.component.files {
                match copy_one(fs, &plan.source_root, &plan.destination_root, file) {
                    Ok(()) => outcome.files_written += 1,
                    Err(e) => {
                        debug!("Component {} failed: {}", entry.component.name, e);
                        observer.on_error(entry, &e);
                        outcome.error = Some(e);
                        break;
                    }
                }
            }
        } else {
            debug!("Skipping existing {}", entry.component.relative_path.display());
        }

        result.outcomes.push(outcome);
    }

    result
}

fn copy_one(
    fs: &dyn Filesystem,
    source_root: &Path,
    destination_root: &Path,
    file: &Path,
) -> Result<()> {
    let from = safe_join(source_root, file)?;
    let to = install_target(destination_root, file)?;
    copy_atomic(fs, &from, &to).map_err(|e| Error::copy(file, e))?;
    Ok(())
}
