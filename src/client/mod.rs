//! GitLab API client
//!
//! [`GitLabClient`] talks HTTP; everything above it goes through the
//! [`ListingApi`] trait so the fetch engine can run against
//! [`MockGitLab`] in tests.

pub mod api;
#[cfg(test)]
pub mod fixtures;
pub mod gitlab;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use api::{GroupScope, ListingApi, ProjectScope};
pub use gitlab::GitLabClient;
#[cfg(test)]
pub use mock::MockGitLab;
pub use models::{Group, Project};
pub use pagination::PageRequest;
