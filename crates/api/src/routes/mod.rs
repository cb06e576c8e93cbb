pub mod bookmarks;
pub mod health;
pub mod queries;
pub mod recommendations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /queries                          search + sort (GET), create (POST, auth)
/// /queries/recent                   latest queries (GET)
/// /queries/mine                     caller's queries (GET, auth)
/// /queries/{id}                     detail (GET), update (PATCH, owner), delete (DELETE, owner)
/// /queries/{id}/recommendations     recommendations on a query (GET)
///
/// /recommendations                  create (POST, auth)
/// /recommendations/mine             caller's recommendations (GET, auth)
/// /recommendations/for-me           recommendations on caller's queries (GET, auth)
/// /recommendations/{id}             delete (DELETE, author)
/// /recommendations/{id}/comments    append comment (POST)
///
/// /bookmarks                        add bookmarks (POST)
/// /bookmarks/queries                bookmarked queries (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/queries", queries::router())
        .nest("/recommendations", recommendations::router())
        .nest("/bookmarks", bookmarks::router())
}
