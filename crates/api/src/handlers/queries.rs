//! Handlers for the query board.
//!
//! Listing and detail routes are open. Posting requires a verified caller,
//! and edits or deletes are limited to the query's submitter.

use axum::extract::{Path, Query as QueryParams, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use prodboard_core::error::CoreError;
use prodboard_core::search::{
    clamp_limit, normalize_term, SortMode, MAX_RECENT_QUERY_LIMIT, RECENT_QUERY_LIMIT,
};
use prodboard_core::types::DocId;
use prodboard_db::models::query::{CreateQuery, Query, UpdateQuery};
use prodboard_db::repositories::{QueryRepo, RecommendationRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{RecentParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a query and confirm `user` submitted it.
///
/// A missing query is a 404; someone else's query is a 403.
async fn ensure_owned(state: &AppState, id: DocId, user: &AuthUser) -> AppResult<Query> {
    let query = QueryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id,
        }))?;

    if query.submitter_email != user.email {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the submitter can modify this query".into(),
        )));
    }
    Ok(query)
}

// ---------------------------------------------------------------------------
// Open endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/queries/recent?limit=
pub async fn list_recent(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<RecentParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, RECENT_QUERY_LIMIT, MAX_RECENT_QUERY_LIMIT);
    let queries = QueryRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: queries }))
}

/// GET /api/v1/queries?search=&sort=
///
/// Case-insensitive substring match on the product name. `sort=asc|desc`
/// orders by recommendation count; anything else lists newest first.
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let term = normalize_term(params.search.as_deref());
    let sort = SortMode::from_param(params.sort.as_deref());

    let queries = QueryRepo::search(&state.pool, term, sort).await?;

    tracing::debug!(?term, ?sort, results = queries.len(), "Query search");

    Ok(Json(DataResponse { data: queries }))
}

/// GET /api/v1/queries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let query = QueryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id,
        }))?;
    Ok(Json(DataResponse { data: query }))
}

/// GET /api/v1/queries/{id}/recommendations
pub async fn list_recommendations(
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let recommendations = RecommendationRepo::list_for_query(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: recommendations,
    }))
}

// ---------------------------------------------------------------------------
// Authenticated endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/queries
///
/// The submitter email is taken from the verified caller. When the body
/// carries no submitter name, the caller's display name is used.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateQuery>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.submitter_name.is_none() {
        input.submitter_name = user.name.clone();
    }

    let query = QueryRepo::create(&state.pool, &user.email, &input).await?;

    tracing::info!(
        query_id = %query.id,
        submitter = %user.email,
        product = %query.product_name,
        "Query created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: query })))
}

/// GET /api/v1/queries/mine
pub async fn list_mine(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let queries = QueryRepo::list_by_submitter(&state.pool, &user.email).await?;
    Ok(Json(DataResponse { data: queries }))
}

/// PATCH /api/v1/queries/{id}
///
/// Merges only the provided fields. The recommendation count and the
/// submitter can never be changed here.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateQuery>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_owned(&state, id, &user).await?;

    let query = QueryRepo::update(&state.pool, id, &user.email, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id,
        }))?;

    tracing::info!(query_id = %id, submitter = %user.email, "Query updated");

    Ok(Json(DataResponse { data: query }))
}

/// DELETE /api/v1/queries/{id}
///
/// Recommendations on the query are kept.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    ensure_owned(&state, id, &user).await?;

    let deleted = QueryRepo::delete(&state.pool, id, &user.email).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id,
        }));
    }

    tracing::info!(query_id = %id, submitter = %user.email, "Query deleted");

    Ok(StatusCode::NO_CONTENT)
}
