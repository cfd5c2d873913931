// src/status.rs

//! Read-only drift report
//!
//! Compares every in-scope component of the catalog with what the project
//! has installed. Nothing is written.

use crate::catalog::{Catalog, Component, UpgradeSelector, keep_file};
use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::hash::TreeHasher;
use crate::reconcile::destination_exists;
use std::fmt;
use std::io;
use std::path::Path;

/// How an installed component relates to the packaged one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    /// Not installed; install would copy it
    Missing,
    /// Installed and byte-identical to the package
    Identical,
    /// Installed but differs (customized or outdated)
    Modified,
}

impl ComponentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Identical => "identical",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ComponentStatus {
    pub component: Component,
    pub state: ComponentState,
}

/// Compute the state of every selected component
pub fn compare(
    fs: &dyn Filesystem,
    catalog: &Catalog,
    destination_root: &Path,
    selector: UpgradeSelector,
) -> Result<Vec<ComponentStatus>> {
    let mut statuses = Vec::new();
    for component in catalog.components() {
        if !selector.matches(component.category) {
            continue;
        }

        let state = if !destination_exists(fs, destination_root, component) {
            ComponentState::Missing
        } else {
            let source = digest(fs, catalog.source_root(), component).map_err(|e| {
                Error::catalog(catalog.source_root().join(&component.relative_path), e)
            })?;
            installed_state(fs, destination_root, component, &source)?
        };

        statuses.push(ComponentStatus {
            component: component.clone(),
            state,
        });
    }
    Ok(statuses)
}

fn installed_state(
    fs: &dyn Filesystem,
    destination_root: &Path,
    component: &Component,
    source_digest: &str,
) -> Result<ComponentState> {
    let installed = match digest(fs, destination_root, component) {
        Ok(installed) => installed,
        // A skill directory missing some of its files
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ComponentState::Modified),
        Err(e) => return Err(Error::Io(e)),
    };

    if installed != source_digest || has_extra_files(fs, destination_root, component)? {
        Ok(ComponentState::Modified)
    } else {
        Ok(ComponentState::Identical)
    }
}

/// True if an installed skill holds files the package does not ship
///
/// An upgrade never deletes such files, so only a full walk of the installed
/// directory tells the two trees apart.
fn has_extra_files(
    fs: &dyn Filesystem,
    destination_root: &Path,
    component: &Component,
) -> Result<bool> {
    if !component.is_directory_unit() {
        return Ok(false);
    }

    let installed_dir = destination_root.join(&component.relative_path);
    let installed = fs.walk_files(&installed_dir)?;
    Ok(installed
        .iter()
        .filter(|rel| keep_file(rel))
        .any(|rel| !component.files.contains(&component.relative_path.join(rel))))
}

fn digest(fs: &dyn Filesystem, root: &Path, component: &Component) -> io::Result<String> {
    let mut hasher = TreeHasher::new();
    for file in &component.files {
        let contents = fs.read(&root.join(file))?;
        hasher.add(&file.to_string_lossy(), &contents);
    }
    Ok(hasher.finalize())
}
