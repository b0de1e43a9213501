//! Group models

use serde::{Deserialize, Serialize};

use super::Project;

/// Group or subgroup resource.
///
/// `subgroups` and `projects` are not part of the API payload; they start
/// empty and are filled in by hierarchy population. A group owns its children
/// by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID
    pub id: u64,

    /// Parent group ID (None for top-level groups)
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Full path, e.g. `platform/infra`
    pub full_path: String,

    /// Display name
    pub name: String,

    /// Direct subgroups, sorted by case-folded name after population
    #[serde(skip)]
    pub subgroups: Vec<Group>,

    /// Direct projects, sorted by case-folded name after population
    #[serde(skip)]
    pub projects: Vec<Project>,
}

impl Group {
    /// Sort children by case-folded name. The sort is stable, so names that
    /// only differ in case keep their relative order.
    pub fn sort_children(&mut self) {
        self.subgroups.sort_by_key(|g| g.name.to_lowercase());
        self.projects.sort_by_key(|p| p.name.to_lowercase());
    }
}
