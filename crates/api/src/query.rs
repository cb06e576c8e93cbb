//! Query-string parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for the recent-queries listing.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

/// `?search=&sort=` for the query listing. Both are optional; unknown sort
/// values fall back to newest first.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// `?email=` for the bookmarked-queries listing.
#[derive(Debug, Deserialize)]
pub struct BookmarkListParams {
    pub email: Option<String>,
}
