// src/filesystem/path.rs

//! Path rules for component files
//!
//! Component paths are relative to a package or project root. The reconciler
//! resolves every destination through [`install_target`]: the path must stay
//! below the root, live under the component root, and never name a protected
//! settings file.

use crate::catalog::COMPONENT_ROOT;
use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// File names that are project-specific configuration and never installed
pub const PROTECTED_FILES: &[&str] = &["settings.json", "settings.local.json"];

/// Reduce a path to its normal components, rejecting `..`
///
/// Root and `.` components are dropped, so an absolute path is read as
/// relative to whatever root it is later joined onto.
///
/// # Examples
///
/// ```
/// use acc::filesystem::path::sanitize_path;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     sanitize_path("/.claude/./agents/a.md").unwrap(),
///     PathBuf::from(".claude/agents/a.md")
/// );
/// assert!(sanitize_path(".claude/../../etc/passwd").is_err());
/// ```
pub fn sanitize_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let normalized = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(Ok(name)),
            Component::ParentDir => Some(Err(Error::PathTraversal(path.display().to_string()))),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Result<PathBuf>>()?;

    if normalized.as_os_str().is_empty() {
        return Err(Error::InvalidPath(format!(
            "{:?} has no file components",
            path
        )));
    }
    Ok(normalized)
}

/// Join a root with a sanitized relative path
///
/// Purely lexical: works the same on the real disk and on an in-memory
/// filesystem where nothing can be canonicalized.
pub fn safe_join(root: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<PathBuf> {
    Ok(root.as_ref().join(sanitize_path(path)?))
}

/// Resolve where a component file is written below `destination_root`
///
/// Only paths under the component root qualify, and protected settings files
/// are refused even if a catalog names them.
pub fn install_target(destination_root: &Path, relative: &Path) -> Result<PathBuf> {
    let relative = sanitize_path(relative)?;
    if !relative.starts_with(COMPONENT_ROOT) {
        return Err(Error::InvalidPath(format!(
            "{} is outside {}",
            relative.display(),
            COMPONENT_ROOT
        )));
    }
    if is_protected(&relative) {
        return Err(Error::InvalidPath(format!(
            "{} is project configuration",
            relative.display()
        )));
    }
    Ok(destination_root.join(relative))
}

/// True if the last component names a protected settings file
pub fn is_protected(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| PROTECTED_FILES.contains(&name))
}
