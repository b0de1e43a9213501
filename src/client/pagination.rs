//! Pagination helpers for API requests
//!
//! GitLab paginates list endpoints with `page`/`per_page` query parameters and
//! reports totals in `X-Total`, `X-Per-Page`, `X-Total-Pages` and `X-Page`
//! response headers.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::HeaderMap;

/// Page size used when walking a list endpoint to exhaustion.
pub const PAGE_SIZE: u32 = 100;

/// Pagination metadata taken from response headers.
///
/// Missing or unparseable headers leave a field at zero. Zero means
/// "unknown", not "empty".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Total number of items across all pages
    pub total: usize,
    /// Items per page
    pub per_page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Current page number (1-indexed)
    pub current_page: usize,
}

impl PaginationInfo {
    /// Extract pagination info from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| -> usize {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0)
        };

        Self {
            total: read("x-total"),
            per_page: read("x-per-page"),
            total_pages: read("x-total-pages"),
            current_page: read("x-page"),
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Header metadata for this page
    pub pagination: PaginationInfo,
}

/// Parameters for a single page request.
///
/// # Example
/// ```ignore
/// let request = PageRequest::new(2).active_after(Some(cutoff));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
    /// Only include items with activity after this instant
    pub active_after: Option<DateTime<Utc>>,
}

impl PageRequest {
    /// Request the given page with the default page size.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            per_page: PAGE_SIZE,
            active_after: None,
        }
    }

    /// A single-item first page, used to learn the total count.
    pub fn probe() -> Self {
        Self {
            page: 1,
            per_page: 1,
            active_after: None,
        }
    }

    /// Restrict results to items active after `cutoff` (None disables the filter).
    pub fn active_after(mut self, cutoff: Option<DateTime<Utc>>) -> Self {
        self.active_after = cutoff;
        self
    }

    /// True for single-item count probes.
    #[cfg(test)]
    pub fn is_probe(&self) -> bool {
        self.per_page == 1 && self.page == 1
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ];

        if let Some(cutoff) = self.active_after {
            params.push((
                "last_activity_after",
                cutoff.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        params
    }
}
