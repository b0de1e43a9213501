//! Count probes and flat collection fetchers
//!
//! Every fetcher walks its list endpoint page by page until an empty page
//! comes back. With `include_all` the collection is probed first and large
//! collections go through the confirmation gate; without it every request
//! carries the recency filter instead.

use log::{debug, warn};

use super::Catalog;
use crate::client::{Group, GroupScope, ListingApi, PageRequest, Project, ProjectScope};
use crate::error::{Error, Result};

/// Top-level resource kinds that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Groups,
    Projects,
}

impl<A: ListingApi> Catalog<A> {
    /// Total number of groups or projects, from a single-item first page.
    ///
    /// The search term is only sent for groups; project search happens
    /// client-side.
    pub async fn count_resources(
        &self,
        kind: ResourceKind,
        include_all: bool,
        search: &str,
    ) -> Result<usize> {
        match kind {
            ResourceKind::Groups => {
                let scope = GroupScope::All {
                    search: non_empty(search),
                };
                self.probe_groups(&scope, include_all).await
            }
            ResourceKind::Projects => self.probe_projects(&ProjectScope::All, include_all).await,
        }
    }

    async fn probe_groups(&self, scope: &GroupScope, include_all: bool) -> Result<usize> {
        let request = PageRequest::probe().active_after(self.recency(include_all));
        let page = self.api.list_groups(scope, &request).await?;
        Ok(page.pagination.total)
    }

    async fn probe_projects(&self, scope: &ProjectScope, include_all: bool) -> Result<usize> {
        let request = PageRequest::probe().active_after(self.recency(include_all));
        let page = self.api.list_projects(scope, &request).await?;
        Ok(page.pagination.total)
    }

    /// Run the confirmation gate on a probe result.
    ///
    /// A failed probe means the size is unknown: warn and carry on.
    async fn confirm_size(&self, description: &str, probed: Result<usize>) -> Result<()> {
        match probed {
            Ok(total) => {
                if self.gate.confirm_large_fetch(description, total).await {
                    Ok(())
                } else {
                    Err(Error::Cancelled)
                }
            }
            Err(e) => {
                warn!(
                    "Could not determine count of {}: {}. Proceeding without confirmation.",
                    description, e
                );
                Ok(())
            }
        }
    }

    /// All projects, most recently active first, optionally narrowed by a
    /// case-insensitive substring of the namespaced path.
    pub async fn projects(&self, search: &str, include_all: bool) -> Result<Vec<Project>> {
        if include_all {
            let probed = self
                .count_resources(ResourceKind::Projects, include_all, search)
                .await;
            self.confirm_size("projects", probed).await?;
        }

        let projects = self.walk_projects(&ProjectScope::All, include_all).await?;
        if search.is_empty() {
            return Ok(projects);
        }

        let filtered = filter_projects(projects, search);
        debug!(
            "Filtered down to {} projects matching search term: {}",
            filtered.len(),
            search
        );
        Ok(filtered)
    }

    /// All groups, searched server-side when a term is given.
    ///
    /// Some instances do not index every path segment for search, so an
    /// empty search result falls back to listing everything and filtering
    /// full paths client-side.
    pub async fn groups(&self, search: &str, include_all: bool) -> Result<Vec<Group>> {
        let term = non_empty(search);
        let groups = self.top_level_groups(term.as_deref(), include_all).await?;

        match term {
            Some(term) if groups.is_empty() => {
                debug!(
                    "No groups found with API search for '{}', trying manual filtering",
                    term
                );
                let unfiltered = self
                    .top_level_groups(None, include_all)
                    .await
                    .map_err(|e| e.context("error fetching groups for manual filtering"))?;
                let filtered = filter_groups(unfiltered, &term);
                debug!(
                    "Manually filtered to {} groups containing '{}'",
                    filtered.len(),
                    term
                );
                Ok(filtered)
            }
            _ => Ok(groups),
        }
    }

    async fn top_level_groups(&self, search: Option<&str>, include_all: bool) -> Result<Vec<Group>> {
        let scope = GroupScope::All {
            search: search.map(str::to_string),
        };

        if include_all {
            let description = match search {
                Some(term) => format!("groups matching '{}'", term),
                None => "groups".to_string(),
            };
            let probed = self
                .count_resources(ResourceKind::Groups, include_all, search.unwrap_or(""))
                .await;
            self.confirm_size(&description, probed).await?;
        }

        self.walk_groups(&scope, include_all).await
    }

    /// Direct subgroups of one group.
    pub async fn subgroups(&self, group_id: u64, include_all: bool) -> Result<Vec<Group>> {
        let scope = GroupScope::Subgroups(group_id);

        if include_all {
            let probed = self.probe_groups(&scope, include_all).await;
            self.confirm_size(&format!("subgroups for group {}", group_id), probed)
                .await?;
        }

        self.walk_groups(&scope, include_all)
            .await
            .map_err(|e| e.context(format!("error fetching subgroups for group {}", group_id)))
    }

    /// Direct projects of one group, excluding projects of its subgroups.
    pub async fn group_projects(&self, group_id: u64, include_all: bool) -> Result<Vec<Project>> {
        let scope = ProjectScope::InGroup(group_id);

        if include_all {
            let probed = self.probe_projects(&scope, include_all).await;
            self.confirm_size(&format!("projects for group {}", group_id), probed)
                .await?;
        }

        self.walk_projects(&scope, include_all)
            .await
            .map_err(|e| e.context(format!("error fetching projects for group {}", group_id)))
    }

    async fn walk_groups(&self, scope: &GroupScope, include_all: bool) -> Result<Vec<Group>> {
        let active_after = self.recency(include_all);
        let mut groups = Vec::new();
        let mut page = 1;

        loop {
            let request = PageRequest::new(page).active_after(active_after);
            let batch = self.api.list_groups(scope, &request).await?;
            debug!(
                "Received {} groups from {} page {}",
                batch.items.len(),
                scope.path(),
                page
            );
            if batch.items.is_empty() {
                break;
            }
            groups.extend(batch.items);
            page += 1;
        }

        Ok(groups)
    }

    async fn walk_projects(&self, scope: &ProjectScope, include_all: bool) -> Result<Vec<Project>> {
        let active_after = self.recency(include_all);
        let mut projects = Vec::new();
        let mut page = 1;

        loop {
            let request = PageRequest::new(page).active_after(active_after);
            let batch = self.api.list_projects(scope, &request).await?;
            debug!(
                "Received {} projects from {} page {}",
                batch.items.len(),
                scope.path(),
                page
            );
            if batch.items.is_empty() {
                break;
            }
            projects.extend(batch.items);
            page += 1;
        }

        Ok(projects)
    }
}

fn non_empty(search: &str) -> Option<String> {
    (!search.is_empty()).then(|| search.to_string())
}

/// Keep projects whose namespaced path contains `term`, ignoring case.
pub fn filter_projects(projects: Vec<Project>, term: &str) -> Vec<Project> {
    let needle = term.to_lowercase();
    projects
        .into_iter()
        .filter(|p| p.path_with_namespace.to_lowercase().contains(&needle))
        .collect()
}

/// Keep groups whose full path contains `term`, ignoring case.
pub fn filter_groups(groups: Vec<Group>, term: &str) -> Vec<Group> {
    let needle = term.to_lowercase();
    groups
        .into_iter()
        .filter(|g| g.full_path.to_lowercase().contains(&needle))
        .collect()
}
