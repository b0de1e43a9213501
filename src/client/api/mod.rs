//! API trait definitions
//!
//! [`ListingApi`] is the seam between the fetch engine in [`crate::catalog`]
//! and the HTTP client. Tests swap in the in-memory `MockGitLab`.

mod listing;

pub use listing::{GroupScope, ListingApi, ProjectScope};
