//! GitLab API data models
//!
//! Only the fields glids needs are decoded; everything else in the API
//! payloads is ignored.

mod group;
mod project;

pub use group::Group;
pub use project::Project;
