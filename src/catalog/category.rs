// src/catalog/category.rs

//! Component categories and category selection

use std::fmt;
use std::str::FromStr;

/// The three kinds of component a package ships
///
/// Commands and agents are single files. A skill is a directory unit:
/// `skills/<name>/SKILL.md` plus everything else below `skills/<name>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Command,
    Agent,
    Skill,
}

impl Category {
    /// Get the singular name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Agent => "agent",
            Self::Skill => "skill",
        }
    }

    /// Directory name under the component root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Command => "commands",
            Self::Agent => "agents",
            Self::Skill => "skills",
        }
    }

    /// Parse a category from its singular or directory name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "command" | "commands" => Some(Self::Command),
            "agent" | "agents" => Some(Self::Agent),
            "skill" | "skills" => Some(Self::Skill),
            _ => None,
        }
    }

    /// Return all categories
    pub fn all() -> &'static [Category] {
        &[Self::Command, Self::Agent, Self::Skill]
    }

    /// True if components of this category are whole directories
    pub fn is_directory_unit(&self) -> bool {
        matches!(self, Self::Skill)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "unknown component category '{}' (expected commands, agents, or skills)",
                s
            )
        })
    }
}

/// Every spelling `--component` accepts
pub const SELECTOR_NAMES: &[&str] = &[
    "all", "commands", "command", "agents", "agent", "skills", "skill",
];

/// Scope of an upgrade request
///
/// `None` means every category participates. Components outside the
/// selected category are excluded from the plan entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpgradeSelector {
    pub category: Option<Category>,
}

impl UpgradeSelector {
    /// Select every category
    pub fn all() -> Self {
        Self { category: None }
    }

    /// Select a single category
    pub fn only(category: Category) -> Self {
        Self {
            category: Some(category),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        self.category.is_none_or(|selected| selected == category)
    }

    /// Categories this selector lets through, in catalog order
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| self.matches(*c))
            .collect()
    }
}

impl fmt::Display for UpgradeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => f.write_str(category.dir_name()),
            None => f.write_str("all"),
        }
    }
}

impl FromStr for UpgradeSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::all());
        }
        s.parse::<Category>().map(Self::only)
    }
}
