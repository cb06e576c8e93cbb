//! Route definitions for bookmarks, mounted at `/bookmarks`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// ```text
/// POST /          -> add
/// GET  /queries   -> list_queries
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookmarks::add))
        .route("/queries", get(bookmarks::list_queries))
}
