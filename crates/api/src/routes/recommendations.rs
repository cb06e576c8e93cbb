//! Route definitions for recommendations, mounted at `/recommendations`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// ```text
/// POST   /                -> create
/// GET    /mine            -> list_mine
/// GET    /for-me          -> list_for_me
/// DELETE /{id}            -> delete
/// POST   /{id}/comments   -> append_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(recommendations::create))
        .route("/mine", get(recommendations::list_mine))
        .route("/for-me", get(recommendations::list_for_me))
        .route("/{id}", delete(recommendations::delete))
        .route("/{id}/comments", post(recommendations::append_comment))
}
