//! Group and project resolution engine
//!
//! [`Catalog`] sits on top of any [`ListingApi`] and provides the operations
//! the CLI needs: count probes, flat collection fetchers that walk every page,
//! and recursive hierarchy population. Large fetches pass through a
//! [`ConfirmationGate`] first.

use chrono::{DateTime, Duration, Utc};

use crate::client::ListingApi;

pub mod confirm;
pub mod fetch;
pub mod hierarchy;

pub use confirm::{ConfirmationGate, TerminalPrompt};

/// Without `--all`, only items active within this many days are listed.
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Fetch engine over a GitLab listing API.
pub struct Catalog<A> {
    api: A,
    gate: ConfirmationGate,
    /// Recency cutoff, pinned once so every request of one run agrees on it
    activity_cutoff: DateTime<Utc>,
}

impl<A: ListingApi> Catalog<A> {
    /// Create a catalog whose recency window ends now.
    pub fn new(api: A, gate: ConfirmationGate) -> Self {
        Self {
            api,
            gate,
            activity_cutoff: Utc::now() - Duration::days(ACTIVITY_WINDOW_DAYS),
        }
    }

    /// Override the recency cutoff.
    #[cfg(test)]
    pub fn with_activity_cutoff(mut self, cutoff: DateTime<Utc>) -> Self {
        self.activity_cutoff = cutoff;
        self
    }

    /// Recency filter for a request: none when listing everything.
    fn recency(&self, include_all: bool) -> Option<DateTime<Utc>> {
        if include_all {
            None
        } else {
            Some(self.activity_cutoff)
        }
    }
}
