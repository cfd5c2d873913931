// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use acc::filesystem::MemoryFilesystem;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Files the test package ships, relative to the package root.
pub const PACKAGE_FILES: &[(&str, &str)] = &[
    (".claude/commands/acc-commit.md", "# acc-commit v2\n"),
    (".claude/commands/acc-review.md", "# acc-review v2\n"),
    (".claude/agents/code-reviewer.md", "# code-reviewer v2\n"),
    (".claude/skills/tdd/SKILL.md", "# tdd skill v2\n"),
    (".claude/skills/tdd/references/cycle.md", "red, green, refactor v2\n"),
    (".claude/skills/git-flow/SKILL.md", "# git-flow skill v2\n"),
    // Never installed
    (".claude/settings.json", "{\"package\": true}\n"),
];

/// A package directory and an empty project directory on disk.
///
/// Keep the struct alive; dropping it removes both trees.
pub struct Workspace {
    _dir: TempDir,
    pub package: PathBuf,
    pub project: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("vendor/acc");
        let project = dir.path().join("project");
        fs::create_dir_all(&project).unwrap();
        for (rel, contents) in PACKAGE_FILES {
            write_file(&package, rel, contents);
        }
        Self {
            _dir: dir,
            package,
            project,
        }
    }

    pub fn backups(&self) -> PathBuf {
        self.project.join(".claude-backups")
    }

    pub fn project_file(&self, rel: &str) -> String {
        fs::read_to_string(self.project.join(rel)).unwrap()
    }

    pub fn write_project_file(&self, rel: &str, contents: &str) {
        write_file(&self.project, rel, contents);
    }
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Every file below `root` with its contents, keyed by relative path.
pub fn tree(root: &Path) -> Vec<(String, String)> {
    let mut files: Vec<(String, String)> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_string_lossy().to_string();
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

/// In-memory package at /pkg and project at /proj with installed v1 copies
/// of every component.
pub fn memory_upgrade_fixture() -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    for (rel, contents) in PACKAGE_FILES {
        fs.add_file(Path::new("/pkg").join(rel), contents);
        if !rel.ends_with("settings.json") {
            fs.add_file(Path::new("/proj").join(rel), contents.replace("v2", "v1"));
        }
    }
    fs
}
