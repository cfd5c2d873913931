// src/reconcile/plan.rs

//! Plan construction: decide Copy, Skip, or Overwrite per component

use crate::catalog::{Catalog, Component, UpgradeSelector};
use crate::filesystem::Filesystem;
use std::fmt;
use std::path::{Path, PathBuf};

/// Overwrite policy for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Copy only what is missing; never touch an existing destination
    InstallOnly,
    /// Copy everything in scope, replacing existing destinations
    ForceOverwrite(UpgradeSelector),
}

impl Policy {
    pub fn allows_overwrite(&self) -> bool {
        matches!(self, Self::ForceOverwrite(_))
    }

    /// True if the component participates in the plan at all
    fn in_scope(&self, component: &Component) -> bool {
        match self {
            Self::InstallOnly => true,
            Self::ForceOverwrite(selector) => selector.matches(component.category),
        }
    }
}

/// What the reconciler will do with one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Destination absent; copy it in
    Copy,
    /// Destination present and the policy forbids overwriting
    Skip,
    /// Destination present and the policy forces a replacement
    Overwrite,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Skip => "skip",
            Self::Overwrite => "overwrite",
        }
    }

    /// True if the action writes to the destination
    pub fn writes(&self) -> bool {
        !matches!(self, Self::Skip)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component paired with its decided action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub component: Component,
    pub action: Action,
}

/// The ordered set of actions for one run
///
/// Under [`Policy::InstallOnly`] no entry is ever `Overwrite`. Under
/// [`Policy::ForceOverwrite`] no entry is ever `Skip`; out-of-scope
/// components are simply absent.
#[derive(Debug, Clone)]
pub struct ReconciliationPlan {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub policy: Policy,
    pub entries: Vec<PlannedAction>,
}

impl ReconciliationPlan {
    /// Number of entries with the given action
    pub fn count(&self, action: Action) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if applying the plan would write nothing
    pub fn is_noop(&self) -> bool {
        self.entries.iter().all(|e| !e.action.writes())
    }
}

/// True if the component is already present in the destination
///
/// A command or agent is present if its file exists. A skill is present if
/// its root directory exists, regardless of which files it holds.
pub fn destination_exists(
    fs: &dyn Filesystem,
    destination_root: &Path,
    component: &Component,
) -> bool {
    fs.exists(&destination_root.join(&component.relative_path))
}

pub(super) fn build(
    fs: &dyn Filesystem,
    catalog: &Catalog,
    destination_root: &Path,
    policy: Policy,
) -> ReconciliationPlan {
    let entries = catalog
        .components()
        .iter()
        .filter(|component| policy.in_scope(component))
        .map(|component| {
            let exists = destination_exists(fs, destination_root, component);
            let action = match (policy, exists) {
                (_, false) => Action::Copy,
                (Policy::InstallOnly, true) => Action::Skip,
                (Policy::ForceOverwrite(_), true) => Action::Overwrite,
            };
            PlannedAction {
                component: component.clone(),
                action,
            }
        })
        .collect();

    ReconciliationPlan {
        source_root: catalog.source_root().to_path_buf(),
        destination_root: destination_root.to_path_buf(),
        policy,
        entries,
    }
}
