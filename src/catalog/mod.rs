// src/catalog/mod.rs

//! Component catalog
//!
//! Enumerates the components a package ships under `<package>/.claude/`:
//!
//! | Category | Layout | Unit |
//! |----------|--------|------|
//! | command | `.claude/commands/**/<file>` | one file |
//! | agent | `.claude/agents/**/<file>` | one file |
//! | skill | `.claude/skills/<name>/SKILL.md` + subtree | one directory |
//!
//! The catalog is built fresh on every run and sorted by relative path so
//! repeated runs produce the same plan and the same log output.
//!
//! Hidden files, leftover temp files, and the project settings files are
//! never part of the catalog.

mod category;

pub use category::{Category, SELECTOR_NAMES, UpgradeSelector};

use crate::error::{Error, Result};
use crate::filesystem::path::is_protected;
use crate::filesystem::{Filesystem, is_temp_name};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root directory holding all component categories, in package and project
pub const COMPONENT_ROOT: &str = ".claude";

/// Entry file every skill directory must contain
pub const SKILL_FILE: &str = "SKILL.md";

/// A single installable unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub category: Category,
    /// Path relative to the category directory (`acc-commit.md`, `review`)
    pub name: String,
    /// Path relative to the package/project root; identical on both sides
    pub relative_path: PathBuf,
    /// Every file of the unit, relative to the package/project root
    pub files: Vec<PathBuf>,
}

impl Component {
    /// True if this component is a skill directory rather than one file
    pub fn is_directory_unit(&self) -> bool {
        self.category.is_directory_unit()
    }
}

/// The enumerated components of one package
#[derive(Debug, Clone)]
pub struct Catalog {
    source_root: PathBuf,
    components: Vec<Component>,
}

impl Catalog {
    /// Scan `source_root` for components
    ///
    /// Fails with [`Error::CatalogRead`] if the package root or its
    /// `.claude` directory is missing or unreadable. A missing category
    /// directory is fine and simply contributes nothing.
    pub fn enumerate(fs: &dyn Filesystem, source_root: &Path) -> Result<Self> {
        let component_root = source_root.join(COMPONENT_ROOT);
        for dir in [source_root, component_root.as_path()] {
            if !fs.is_dir(dir) {
                return Err(Error::catalog(
                    dir,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
                ));
            }
        }

        let mut components = Vec::new();
        for category in Category::all() {
            let category_dir = component_root.join(category.dir_name());
            if !fs.is_dir(&category_dir) {
                debug!("No {} directory in {}", category.dir_name(), source_root.display());
                continue;
            }

            if category.is_directory_unit() {
                scan_skills(fs, &category_dir, &mut components)?;
            } else {
                scan_files(fs, *category, &category_dir, &mut components)?;
            }
        }

        components.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        debug!(
            "Catalog for {}: {} component(s)",
            source_root.display(),
            components.len()
        );

        Ok(Self {
            source_root: source_root.to_path_buf(),
            components,
        })
    }

    /// Build a catalog from already-known components
    pub fn from_components(
        source_root: impl Into<PathBuf>,
        mut components: Vec<Component>,
    ) -> Self {
        components.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Self {
            source_root: source_root.into(),
            components,
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components belonging to `category`
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.category == category)
    }
}

/// Path of `rel` below the category directory, relative to the package root
fn component_path(category: Category, rel: &Path) -> PathBuf {
    Path::new(COMPONENT_ROOT).join(category.dir_name()).join(rel)
}

fn is_hidden(rel: &Path) -> bool {
    rel.components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// True if a file below a category or skill directory belongs to a component
pub(crate) fn keep_file(rel: &Path) -> bool {
    let temp = rel
        .file_name()
        .is_some_and(|name| is_temp_name(&name.to_string_lossy()));
    !is_hidden(rel) && !temp && !is_protected(rel)
}

fn scan_files(
    fs: &dyn Filesystem,
    category: Category,
    dir: &Path,
    out: &mut Vec<Component>,
) -> Result<()> {
    let files = fs.walk_files(dir).map_err(|e| Error::catalog(dir, e))?;

    for rel in files.into_iter().filter(|rel| keep_file(rel)) {
        let relative_path = component_path(category, &rel);
        out.push(Component {
            category,
            name: rel.to_string_lossy().replace('\\', "/"),
            files: vec![relative_path.clone()],
            relative_path,
        });
    }
    Ok(())
}

fn scan_skills(fs: &dyn Filesystem, dir: &Path, out: &mut Vec<Component>) -> Result<()> {
    let entries = fs.list_dir(dir).map_err(|e| Error::catalog(dir, e))?;

    for entry in entries {
        if entry.name.starts_with('.') {
            continue;
        }
        if !entry.is_dir {
            warn!("Ignoring loose file in skills directory: {}", entry.name);
            continue;
        }

        let skill_dir = dir.join(&entry.name);
        let files = fs
            .walk_files(&skill_dir)
            .map_err(|e| Error::catalog(&skill_dir, e))?;
        let files: Vec<PathBuf> = files.into_iter().filter(|rel| keep_file(rel)).collect();

        if !files.iter().any(|rel| rel == Path::new(SKILL_FILE)) {
            warn!("Skill '{}' has no {}, skipping", entry.name, SKILL_FILE);
            continue;
        }

        let relative_path = component_path(Category::Skill, Path::new(&entry.name));
        out.push(Component {
            category: Category::Skill,
            name: entry.name.clone(),
            files: files.iter().map(|rel| relative_path.join(rel)).collect(),
            relative_path,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{Fault, MemoryFilesystem};

    fn package() -> MemoryFilesystem {
        let fs = MemoryFilesystem::new();
        fs.add_file("/pkg/.claude/commands/acc-commit.md", b"commit");
        fs.add_file("/pkg/.claude/commands/git/acc-push.md", b"push");
        fs.add_file("/pkg/.claude/agents/reviewer.md", b"agent");
        fs.add_file("/pkg/.claude/skills/review/SKILL.md", b"skill");
        fs.add_file("/pkg/.claude/skills/review/references/style.md", b"ref");
        fs.add_file("/pkg/.claude/settings.json", b"{}");
        fs
    }

    #[test]
    fn test_enumerate_groups_by_category() {
        let catalog = Catalog::enumerate(&package(), Path::new("/pkg")).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.by_category(Category::Command).count(), 2);
        assert_eq!(catalog.by_category(Category::Agent).count(), 1);
        assert_eq!(catalog.by_category(Category::Skill).count(), 1);
    }

    #[test]
    fn test_enumerate_is_sorted_by_relative_path() {
        let catalog = Catalog::enumerate(&package(), Path::new("/pkg")).unwrap();
        let paths: Vec<_> = catalog
            .components()
            .iter()
            .map(|c| c.relative_path.clone())
            .collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
        assert_eq!(paths[0], PathBuf::from(".claude/agents/reviewer.md"));
    }

    #[test]
    fn test_skill_is_directory_unit() {
        let catalog = Catalog::enumerate(&package(), Path::new("/pkg")).unwrap();
        let skill = catalog.by_category(Category::Skill).next().unwrap();
        assert_eq!(skill.name, "review");
        assert_eq!(skill.relative_path, PathBuf::from(".claude/skills/review"));
        assert_eq!(
            skill.files,
            vec![
                PathBuf::from(".claude/skills/review/SKILL.md"),
                PathBuf::from(".claude/skills/review/references/style.md"),
            ]
        );
        assert!(skill.is_directory_unit());
    }

    #[test]
    fn test_nested_command_keeps_subpath() {
        let catalog = Catalog::enumerate(&package(), Path::new("/pkg")).unwrap();
        let nested = catalog
            .by_category(Category::Command)
            .find(|c| c.name == "git/acc-push.md")
            .unwrap();
        assert_eq!(
            nested.relative_path,
            PathBuf::from(".claude/commands/git/acc-push.md")
        );
    }

    #[test]
    fn test_settings_and_hidden_files_excluded() {
        let fs = package();
        fs.add_file("/pkg/.claude/commands/.DS_Store", b"");
        fs.add_file("/pkg/.claude/commands/settings.local.json", b"{}");
        fs.add_file("/pkg/.claude/commands/.x.md.acc-tmp-abc", b"");
        let catalog = Catalog::enumerate(&fs, Path::new("/pkg")).unwrap();
        assert_eq!(catalog.by_category(Category::Command).count(), 2);
        assert!(
            catalog
                .components()
                .iter()
                .all(|c| !c.relative_path.ends_with("settings.json"))
        );
    }

    #[test]
    fn test_skill_without_entry_file_skipped() {
        let fs = package();
        fs.add_file("/pkg/.claude/skills/broken/notes.md", b"");
        fs.add_file("/pkg/.claude/skills/loose.md", b"");
        let catalog = Catalog::enumerate(&fs, Path::new("/pkg")).unwrap();
        let names: Vec<_> = catalog.by_category(Category::Skill).map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["review".to_string()]);
    }

    #[test]
    fn test_missing_source_root_fails() {
        let fs = MemoryFilesystem::new();
        let err = Catalog::enumerate(&fs, Path::new("/nowhere")).unwrap_err();
        assert!(matches!(err, Error::CatalogRead { .. }));
    }

    #[test]
    fn test_missing_component_root_fails() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/pkg/README.md", b"");
        let err = Catalog::enumerate(&fs, Path::new("/pkg")).unwrap_err();
        assert!(matches!(err, Error::CatalogRead { .. }));
    }

    #[test]
    fn test_missing_category_dir_is_empty() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/pkg/.claude/agents/a.md", b"");
        let catalog = Catalog::enumerate(&fs, Path::new("/pkg")).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unreadable_category_fails() {
        let fs = package();
        fs.inject(Fault::FailRead(PathBuf::from("/pkg/.claude/agents")));
        let err = Catalog::enumerate(&fs, Path::new("/pkg")).unwrap_err();
        assert!(err.is_fatal());
    }
}
