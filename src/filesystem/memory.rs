// src/filesystem/memory.rs

//! In-memory filesystem with fault injection
//!
//! Holds a flat map of absolute paths to nodes. Directories are explicit
//! nodes so `exists` and `is_dir` behave like a real tree. Faults let tests
//! simulate permission errors, full disks, and a crash between temp-write
//! and rename without touching the real disk.

use super::{DirEntry, Filesystem};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A failure to inject into a [`MemoryFilesystem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Any write, copy, mkdir, or rename targeting this path (or a path
    /// below it) fails with `PermissionDenied`
    FailWrite(PathBuf),
    /// Any read or listing of this path (or below it) fails with
    /// `PermissionDenied`
    FailRead(PathBuf),
    /// Renaming onto exactly this path fails with `Interrupted`, leaving the
    /// source in place, as if the process died before the rename
    CrashBeforeRename(PathBuf),
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    faults: Vec<Fault>,
}

/// In-memory [`Filesystem`] for tests
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    state: Mutex<State>,
}

impl MemoryFilesystem {
    /// Create an empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            insert_dirs(&mut state.nodes, parent);
        }
        state
            .nodes
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
    }

    /// Seed an empty directory
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        insert_dirs(&mut self.lock().nodes, path.as_ref());
    }

    /// Register a fault; it stays active until [`clear_faults`](Self::clear_faults)
    pub fn inject(&self, fault: Fault) {
        self.lock().faults.push(fault);
    }

    pub fn clear_faults(&self) {
        self.lock().faults.clear();
    }

    /// Snapshot of every file below `root` (absolute path -> contents)
    pub fn snapshot(&self, root: impl AsRef<Path>) -> BTreeMap<PathBuf, Vec<u8>> {
        let root = root.as_ref();
        self.lock()
            .nodes
            .iter()
            .filter(|(path, _)| path.starts_with(root))
            .filter_map(|(path, node)| match node {
                Node::File(data) => Some((path.clone(), data.clone())),
                Node::Dir => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn insert_dirs(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
    }
}

fn denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl State {
    fn check_write(&self, target: &Path) -> io::Result<()> {
        let blocked = self.faults.iter().any(|fault| match fault {
            Fault::FailWrite(path) => target.starts_with(path),
            _ => false,
        });
        if blocked { Err(denied(target)) } else { Ok(()) }
    }

    fn check_read(&self, target: &Path) -> io::Result<()> {
        let blocked = self.faults.iter().any(|fault| match fault {
            Fault::FailRead(path) => target.starts_with(path),
            _ => false,
        });
        if blocked { Err(denied(target)) } else { Ok(()) }
    }

    fn crashes_on_rename(&self, target: &Path) -> bool {
        self.faults
            .iter()
            .any(|fault| matches!(fault, Fault::CrashBeforeRename(path) if path == target))
    }

    fn file(&self, path: &Path) -> io::Result<&Vec<u8>> {
        match self.nodes.get(path) {
            Some(Node::File(data)) => Ok(data),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn require_parent_dir(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => match self.nodes.get(parent) {
                Some(Node::Dir) => Ok(()),
                _ => Err(not_found(parent)),
            },
            _ => Ok(()),
        }
    }

    fn put_file(&mut self, path: &Path, data: Vec<u8>) -> io::Result<()> {
        self.check_write(path)?;
        self.require_parent_dir(path)?;
        if matches!(self.nodes.get(path), Some(Node::Dir)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", path.display()),
            ));
        }
        self.nodes.insert(path.to_path_buf(), Node::File(data));
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.lock().nodes.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().nodes.get(path), Some(Node::Dir))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let state = self.lock();
        state.check_read(path)?;
        match state.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(not_found(path)),
        }

        // BTreeMap iteration is already sorted by full path, hence by name
        Ok(state
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_string_lossy().to_string();
                Some(DirEntry {
                    name,
                    is_dir: matches!(node, Node::Dir),
                })
            })
            .collect())
    }

    fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        state.check_read(root)?;
        if !matches!(state.nodes.get(root), Some(Node::Dir)) {
            return Err(not_found(root));
        }

        let mut files = Vec::new();
        for (path, node) in &state.nodes {
            if let Node::File(_) = node
                && let Ok(relative) = path.strip_prefix(root)
            {
                state.check_read(path)?;
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.lock();
        state.check_read(path)?;
        state.file(path).cloned()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.lock().put_file(path, contents.to_vec())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let mut state = self.lock();
        state.check_read(from)?;
        let data = state.file(from)?.clone();
        let len = data.len() as u64;
        state.put_file(to, data)?;
        Ok(len)
    }

    fn mkdir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        for ancestor in path.ancestors() {
            if let Some(Node::File(_)) = state.nodes.get(ancestor) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("not a directory: {}", ancestor.display()),
                ));
            }
        }
        if !matches!(state.nodes.get(path), Some(Node::Dir)) {
            state.check_write(path)?;
        }
        insert_dirs(&mut state.nodes, path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.lock();
        state.check_write(to)?;
        if state.crashes_on_rename(to) {
            return Err(io::Error::new(
                io::ErrorKind::Interrupted,
                format!("simulated crash before rename onto {}", to.display()),
            ));
        }
        let data = state.file(from)?.clone();
        state.put_file(to, data)?;
        state.nodes.remove(from);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        state.file(path)?;
        state.nodes.remove(path);
        Ok(())
    }
}
