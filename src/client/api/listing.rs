//! Listing API trait for collection operations

use async_trait::async_trait;

use crate::client::models::{Group, Project};
use crate::client::pagination::{Page, PageRequest};
use crate::error::Result;

/// Which group collection to list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupScope {
    /// Every group visible to the token (`/groups?all_available=true`),
    /// optionally narrowed by server-side search.
    All { search: Option<String> },
    /// Direct subgroups of one group (`/groups/{id}/subgroups`).
    Subgroups(u64),
}

impl GroupScope {
    /// API path relative to `/api/v4`.
    pub fn path(&self) -> String {
        match self {
            GroupScope::All { .. } => "/groups".to_string(),
            GroupScope::Subgroups(id) => format!("/groups/{}/subgroups", id),
        }
    }

    /// Query parameters fixed by the scope.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            GroupScope::All { search } => {
                let mut params = vec![("all_available", "true".to_string())];
                if let Some(term) = search {
                    params.push(("search", term.clone()));
                }
                params
            }
            GroupScope::Subgroups(_) => Vec::new(),
        }
    }
}

/// Which project collection to list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectScope {
    /// Every project visible to the token, most recently active first.
    All,
    /// Direct projects of one group, excluding its subgroups.
    InGroup(u64),
}

impl ProjectScope {
    /// API path relative to `/api/v4`.
    pub fn path(&self) -> String {
        match self {
            ProjectScope::All => "/projects".to_string(),
            ProjectScope::InGroup(id) => format!("/groups/{}/projects", id),
        }
    }

    /// Query parameters fixed by the scope.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            ProjectScope::All => vec![
                ("order_by", "last_activity_at".to_string()),
                ("sort", "desc".to_string()),
            ],
            ProjectScope::InGroup(_) => vec![("include_subgroups", "false".to_string())],
        }
    }
}

/// Paged list operations against the GitLab API.
///
/// Each call fetches exactly one page; walking pages and deciding when to
/// stop is the caller's job.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Fetch one page of groups
    async fn list_groups(&self, scope: &GroupScope, request: &PageRequest) -> Result<Page<Group>>;

    /// Fetch one page of projects
    async fn list_projects(
        &self,
        scope: &ProjectScope,
        request: &PageRequest,
    ) -> Result<Page<Project>>;
}
