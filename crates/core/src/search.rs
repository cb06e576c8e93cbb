//! Search, sort and pagination helpers for query listings.
//!
//! Lives in `core` so the repository layer and handlers agree on how a raw
//! `?search=` / `?sort=` pair is interpreted.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Number of queries shown on the landing page.
pub const RECENT_QUERY_LIMIT: i64 = 6;

/// Upper bound for the recent-queries listing.
pub const MAX_RECENT_QUERY_LIMIT: i64 = 50;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Sort mode
// ---------------------------------------------------------------------------

/// Ordering applied to a query listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Fewest recommendations first.
    CountAscending,
    /// Most recommendations first.
    CountDescending,
    /// Newest first.
    #[default]
    Newest,
}

impl SortMode {
    /// Interpret the `sort` query parameter.
    ///
    /// `asc` and `desc` select ordering by recommendation count; anything
    /// else (including absence) falls back to newest first.
    ///
    /// ```
    /// use prodboard_core::search::SortMode;
    /// assert_eq!(SortMode::from_param(Some("asc")), SortMode::CountAscending);
    /// assert_eq!(SortMode::from_param(Some("popular")), SortMode::Newest);
    /// ```
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortMode::CountAscending,
            Some("desc") => SortMode::CountDescending,
            _ => SortMode::Newest,
        }
    }
}

// ---------------------------------------------------------------------------
// Product-name filter
// ---------------------------------------------------------------------------

/// Trim a raw search term. Blank input means "no filter".
pub fn normalize_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|t| !t.is_empty())
}

/// Build an `ILIKE` substring pattern for `term`.
///
/// `%`, `_` and `\` are escaped so user input always matches literally.
///
/// ```
/// use prodboard_core::search::like_pattern;
/// assert_eq!(like_pattern("phone"), "%phone%");
/// assert_eq!(like_pattern("100%"), "%100\\%%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
