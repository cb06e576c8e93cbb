//! Handlers for per-user bookmarks.
//!
//! Both routes are open. When the caller does present a valid credential,
//! it may only touch its own bookmark list.

use axum::extract::{Query as QueryParams, State};
use axum::response::IntoResponse;
use axum::Json;
use prodboard_core::error::CoreError;
use prodboard_core::identity::normalize_email;
use prodboard_db::models::bookmark::AddBookmarks;
use prodboard_db::repositories::BookmarkRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::BookmarkListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A caller with a verified identity may only act on its own bookmarks.
///
/// Both sides are compared in normalized form, the same key the bookmark
/// store uses.
fn ensure_same_user(caller: Option<&AuthUser>, email: &str) -> AppResult<()> {
    match caller {
        Some(user) if normalize_email(&user.email) != normalize_email(email) => {
            Err(AppError::Core(CoreError::Forbidden(
                "Cannot access another user's bookmarks".into(),
            )))
        }
        _ => Ok(()),
    }
}

/// POST /api/v1/bookmarks
///
/// Adds every id not already bookmarked, keeping order. Repeating a request
/// reports zero modifications.
pub async fn add(
    MaybeAuthUser(caller): MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<AddBookmarks>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_same_user(caller.as_ref(), &input.user_email)?;

    let write = BookmarkRepo::add(&state.pool, &input.user_email, &input.query_ids).await?;

    tracing::info!(
        user_email = %input.user_email,
        outcome = ?write.outcome,
        modified_count = write.modified_count,
        "Bookmarks added",
    );

    Ok(Json(DataResponse { data: write }))
}

/// GET /api/v1/bookmarks/queries?email=
///
/// Falls back to the caller's email when `email` is omitted. A user with no
/// bookmarks gets an empty list.
pub async fn list_queries(
    MaybeAuthUser(caller): MaybeAuthUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<BookmarkListParams>,
) -> AppResult<impl IntoResponse> {
    let email = params
        .email
        .map(|e| normalize_email(&e))
        .filter(|e| !e.is_empty())
        .or_else(|| caller.as_ref().map(|u| u.email.clone()))
        .ok_or_else(|| AppError::BadRequest("email query parameter is required".into()))?;
    ensure_same_user(caller.as_ref(), &email)?;

    let queries = BookmarkRepo::list_bookmarked_queries(&state.pool, &email).await?;
    Ok(Json(DataResponse { data: queries }))
}
