//! Mock GitLab API client for testing
//!
//! Serves groups and projects from in-memory tables, paged the same way the
//! real API pages them, so engine tests run without an HTTP server.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::api::{GroupScope, ListingApi, ProjectScope};
use super::models::{Group, Project};
use super::pagination::{Page, PageRequest, PaginationInfo};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockGitLab::new()
///     .with_subgroups(1, vec![group(2, "platform/infra")])
///     .await
///     .fail_path("/groups/2/projects", 500)
///     .await;
/// ```
#[derive(Default)]
pub struct MockGitLab {
    /// Groups returned by `/groups` without a search term
    groups: Arc<Mutex<Vec<Group>>>,
    /// Server-side search results keyed by search term
    search_results: Arc<Mutex<HashMap<String, Vec<Group>>>>,
    /// Projects returned by `/projects`
    projects: Arc<Mutex<Vec<Project>>>,
    /// Direct subgroups keyed by parent group ID
    subgroups: Arc<Mutex<HashMap<u64, Vec<Group>>>>,
    /// Direct projects keyed by group ID
    group_projects: Arc<Mutex<HashMap<u64, Vec<Project>>>>,
    /// Paths that answer with the given HTTP status
    failing_paths: Arc<Mutex<HashMap<String, u16>>>,
    /// Status returned for every count probe, if set
    probe_failure: Arc<Mutex<Option<u16>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// API path, e.g. `/groups/3/subgroups`
    pub path: String,
    /// Server-side search term, if any
    pub search: Option<String>,
    /// Page number
    pub page: u32,
    /// Page size
    pub per_page: u32,
    /// Recency filter, if any
    pub active_after: Option<DateTime<Utc>>,
}

impl CapturedRequest {
    /// True for single-item count probes.
    pub fn is_probe(&self) -> bool {
        self.page == 1 && self.per_page == 1
    }
}

impl MockGitLab {
    /// Create a new mock client with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure groups to return from `/groups`.
    pub async fn with_groups(self, groups: Vec<Group>) -> Self {
        *self.groups.lock().await = groups;
        self
    }

    /// Configure groups to return from `/groups?search=<term>`.
    pub async fn with_search_results(self, term: &str, groups: Vec<Group>) -> Self {
        self.search_results
            .lock()
            .await
            .insert(term.to_string(), groups);
        self
    }

    /// Configure projects to return from `/projects`.
    pub async fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.projects.lock().await = projects;
        self
    }

    /// Configure direct subgroups of a group.
    pub async fn with_subgroups(self, parent_id: u64, groups: Vec<Group>) -> Self {
        self.subgroups.lock().await.insert(parent_id, groups);
        self
    }

    /// Configure direct projects of a group.
    pub async fn with_group_projects(self, group_id: u64, projects: Vec<Project>) -> Self {
        self.group_projects.lock().await.insert(group_id, projects);
        self
    }

    /// Make every request to `path` fail with `status`.
    pub async fn fail_path(self, path: &str, status: u16) -> Self {
        self.failing_paths
            .lock()
            .await
            .insert(path.to_string(), status);
        self
    }

    /// Make every count probe fail with `status`.
    pub async fn fail_probes(self, status: u16) -> Self {
        *self.probe_failure.lock().await = Some(status);
        self
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Captured requests that walked list pages (probes excluded).
    pub async fn page_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests()
            .await
            .into_iter()
            .filter(|r| !r.is_probe())
            .collect()
    }

    /// Paths of every captured request, in order.
    pub async fn requested_paths(&self) -> Vec<String> {
        self.captured_requests()
            .await
            .into_iter()
            .map(|r| r.path)
            .collect()
    }

    async fn capture_request(&self, path: &str, search: Option<&str>, request: &PageRequest) {
        self.captured_requests.lock().await.push(CapturedRequest {
            path: path.to_string(),
            search: search.map(|s| s.to_string()),
            page: request.page,
            per_page: request.per_page,
            active_after: request.active_after,
        });
    }

    async fn check_error(&self, path: &str, request: &PageRequest) -> Result<()> {
        if request.is_probe() {
            if let Some(status) = *self.probe_failure.lock().await {
                return Err(mock_failure(status));
            }
        }
        if let Some(status) = self.failing_paths.lock().await.get(path) {
            return Err(mock_failure(*status));
        }
        Ok(())
    }
}

fn mock_failure(status: u16) -> crate::error::Error {
    ApiError::HttpStatus {
        status,
        body: "mock failure".to_string(),
    }
    .into()
}

/// Slice one page out of `items` and fill pagination the way GitLab does.
fn paginate<T: Clone>(items: &[T], request: &PageRequest) -> Page<T> {
    let per_page = request.per_page.max(1) as usize;
    let start = (request.page.max(1) as usize - 1) * per_page;
    let page_items = items.iter().skip(start).take(per_page).cloned().collect();

    Page {
        items: page_items,
        pagination: PaginationInfo {
            total: items.len(),
            per_page,
            total_pages: items.len().div_ceil(per_page),
            current_page: request.page as usize,
        },
    }
}

#[async_trait]
impl ListingApi for MockGitLab {
    async fn list_groups(&self, scope: &GroupScope, request: &PageRequest) -> Result<Page<Group>> {
        let path = scope.path();
        let search = match scope {
            GroupScope::All { search } => search.as_deref(),
            GroupScope::Subgroups(_) => None,
        };
        self.capture_request(&path, search, request).await;
        self.check_error(&path, request).await?;

        let items = match scope {
            GroupScope::All { search: None } => self.groups.lock().await.clone(),
            GroupScope::All { search: Some(term) } => self
                .search_results
                .lock()
                .await
                .get(term)
                .cloned()
                .unwrap_or_default(),
            GroupScope::Subgroups(id) => self
                .subgroups
                .lock()
                .await
                .get(id)
                .cloned()
                .unwrap_or_default(),
        };

        Ok(paginate(&items, request))
    }

    async fn list_projects(
        &self,
        scope: &ProjectScope,
        request: &PageRequest,
    ) -> Result<Page<Project>> {
        let path = scope.path();
        self.capture_request(&path, None, request).await;
        self.check_error(&path, request).await?;

        let items = match scope {
            ProjectScope::All => self.projects.lock().await.clone(),
            ProjectScope::InGroup(id) => self
                .group_projects
                .lock()
                .await
                .get(id)
                .cloned()
                .unwrap_or_default(),
        };

        Ok(paginate(&items, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{group, projects_under};

    #[tokio::test]
    async fn test_mock_pages_until_empty() {
        let mock = MockGitLab::new()
            .with_projects(projects_under("team", 3))
            .await;

        let request = PageRequest::new(1);
        let first = mock.list_projects(&ProjectScope::All, &request).await.unwrap();
        assert_eq!(first.items.len(), 3);
        assert_eq!(first.pagination.total, 3);
        assert_eq!(first.pagination.total_pages, 1);

        let second = mock
            .list_projects(&ProjectScope::All, &PageRequest::new(2))
            .await
            .unwrap();
        assert!(second.items.is_empty());
    }

    #[tokio::test]
    async fn test_mock_failing_path_and_capture() {
        let mock = MockGitLab::new()
            .with_subgroups(1, vec![group(2, "root/child")])
            .await
            .fail_path("/groups/1/subgroups", 502)
            .await;

        let err = mock
            .list_groups(&GroupScope::Subgroups(1), &PageRequest::new(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("502"));

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/groups/1/subgroups");
    }
}
