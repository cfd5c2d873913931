// src/filesystem/mod.rs

//! Filesystem access for the installer
//!
//! Every read and write the catalog, reconciler, and backup manager perform
//! goes through the [`Filesystem`] trait. Two implementations exist:
//! - [`OsFilesystem`]: the real disk, via `std::fs` and `walkdir`
//! - [`MemoryFilesystem`]: an in-memory tree with fault injection, for tests
//!
//! [`copy_atomic`] layers the temp-file + rename protocol on top of the trait
//! so a crash mid-copy never leaves a half-written destination file.

mod memory;
mod os;
pub mod path;

pub use memory::{Fault, MemoryFilesystem};
pub use os::OsFilesystem;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marker embedded in temporary file names
pub const TEMP_MARKER: &str = ".acc-tmp-";

/// A single directory entry as seen by [`Filesystem::list_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Injectable filesystem abstraction
///
/// Paths are used as given; implementations do not resolve symlinks or
/// relative components. Listing methods return entries sorted by name so
/// callers get a deterministic order.
pub trait Filesystem {
    /// True if a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// True if `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of a directory, sorted by name
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// All regular files below `root`, as paths relative to `root`, sorted
    fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read a whole file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate a file with the given contents
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Copy file content byte-for-byte, returning the number of bytes copied
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Create a directory and all missing parents
    fn mkdir_all(&self, path: &Path) -> io::Result<()>;

    /// Rename a file, replacing the target if it exists
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Temporary sibling path used while copying into `target`
///
/// The temp file lives in the same directory as the target so the final
/// rename never crosses a filesystem boundary.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_default());
    name.push(TEMP_MARKER);
    name.push(uuid::Uuid::new_v4().simple().to_string());
    target.with_file_name(name)
}

/// True if a file name was produced by [`temp_path_for`]
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.contains(TEMP_MARKER)
}

/// Copy `from` to `to` atomically: write a temp sibling, then rename it in
///
/// Parent directories of `to` are created first. On failure the temp file
/// is removed and `to` keeps whatever content it had before the call.
pub fn copy_atomic(fs: &dyn Filesystem, from: &Path, to: &Path) -> io::Result<u64> {
    if let Some(parent) = to.parent() {
        fs.mkdir_all(parent)?;
    }

    let temp = temp_path_for(to);
    let bytes = match fs.copy_file(from, &temp) {
        Ok(bytes) => bytes,
        Err(e) => {
            discard_temp(fs, &temp);
            return Err(e);
        }
    };

    if let Err(e) = fs.rename(&temp, to) {
        discard_temp(fs, &temp);
        return Err(e);
    }

    debug!("Copied {} -> {} ({} bytes)", from.display(), to.display(), bytes);
    Ok(bytes)
}

fn discard_temp(fs: &dyn Filesystem, temp: &Path) {
    if fs.exists(temp)
        && let Err(e) = fs.remove_file(temp)
    {
        warn!("Failed to remove temp file {}: {}", temp.display(), e);
    }
}
