//! Test fixtures for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules. Display names
//! default to the last path segment, the way GitLab derives them.

#![allow(dead_code)]

use super::models::{Group, Project};

fn last_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Top-level group with a name taken from the last path segment.
pub fn group(id: u64, full_path: &str) -> Group {
    Group {
        id,
        parent_id: None,
        full_path: full_path.to_string(),
        name: last_segment(full_path),
        subgroups: Vec::new(),
        projects: Vec::new(),
    }
}

/// Subgroup of `parent_id`.
pub fn subgroup(id: u64, parent_id: u64, full_path: &str) -> Group {
    Group {
        parent_id: Some(parent_id),
        ..group(id, full_path)
    }
}

/// Group with an explicit display name.
pub fn named_group(id: u64, full_path: &str, name: &str) -> Group {
    Group {
        name: name.to_string(),
        ..group(id, full_path)
    }
}

/// Project with a name taken from the last path segment.
pub fn project(id: u64, path_with_namespace: &str) -> Project {
    Project {
        id,
        path_with_namespace: path_with_namespace.to_string(),
        name: last_segment(path_with_namespace),
    }
}

/// `count` projects under `namespace`, IDs starting at 1000.
pub fn projects_under(namespace: &str, count: usize) -> Vec<Project> {
    (0..count)
        .map(|i| project(1000 + i as u64, &format!("{}/project-{:04}", namespace, i)))
        .collect()
}

/// `count` groups named `<prefix>-NNNN`, IDs starting at 5000.
pub fn groups_named(prefix: &str, count: usize) -> Vec<Group> {
    (0..count)
        .map(|i| group(5000 + i as u64, &format!("{}-{:04}", prefix, i)))
        .collect()
}
