//! Route definitions for queries, mounted at `/queries`.

use axum::routing::get;
use axum::Router;

use crate::handlers::queries;
use crate::state::AppState;

/// ```text
/// GET    /                      -> search
/// POST   /                      -> create
/// GET    /recent                -> list_recent
/// GET    /mine                  -> list_mine
/// GET    /{id}                  -> get_by_id
/// PATCH  /{id}                  -> update
/// DELETE /{id}                  -> delete
/// GET    /{id}/recommendations  -> list_recommendations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(queries::search).post(queries::create))
        .route("/recent", get(queries::list_recent))
        .route("/mine", get(queries::list_mine))
        .route(
            "/{id}",
            get(queries::get_by_id)
                .patch(queries::update)
                .delete(queries::delete),
        )
        .route("/{id}/recommendations", get(queries::list_recommendations))
}
