//! Handlers for recommendations and their comments.
//!
//! Creating and deleting a recommendation moves the parent query's counter
//! inside the repository's transaction; a failure there surfaces as a 500
//! `CONSISTENCY_ERROR` with nothing committed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use prodboard_core::error::CoreError;
use prodboard_core::types::DocId;
use prodboard_db::models::recommendation::{CreateComment, CreateRecommendation};
use prodboard_db::repositories::RecommendationRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/recommendations
///
/// Returns 404 if the target query does not exist.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateRecommendation>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.recommender_name.is_none() {
        input.recommender_name = user.name.clone();
    }

    let recommendation = RecommendationRepo::create(&state.pool, &user.email, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Query",
            id: input.query_id,
        }))?;

    tracing::info!(
        recommendation_id = %recommendation.id,
        query_id = %input.query_id,
        recommender = %user.email,
        "Recommendation created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recommendation })))
}

/// POST /api/v1/recommendations/{id}/comments
///
/// Under the `upsert` policy a comment on a missing recommendation creates
/// a parentless shell holding it; under `reject` it is a 404.
pub async fn append_comment(
    State(state): State<AppState>,
    Path(id): Path<DocId>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let policy = state.config.comment_policy;

    let recommendation =
        RecommendationRepo::append_comment(&state.pool, id, &input.into_comment(), policy)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Recommendation",
                id,
            }))?;

    tracing::debug!(
        recommendation_id = %id,
        comments = recommendation.comments.len(),
        ?policy,
        "Comment appended",
    );

    Ok(Json(DataResponse {
        data: recommendation,
    }))
}

/// GET /api/v1/recommendations/mine
pub async fn list_mine(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let recommendations = RecommendationRepo::list_by_recommender(&state.pool, &user.email).await?;
    Ok(Json(DataResponse {
        data: recommendations,
    }))
}

/// GET /api/v1/recommendations/for-me
///
/// Recommendations left on queries the caller posted.
pub async fn list_for_me(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let recommendations = RecommendationRepo::list_by_query_owner(&state.pool, &user.email).await?;
    Ok(Json(DataResponse {
        data: recommendations,
    }))
}

/// DELETE /api/v1/recommendations/{id}
///
/// Only the author may delete. A recommendation that is already gone is a
/// 404 and never decrements any counter. Someone else's recommendation is a
/// 403.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let deleted = RecommendationRepo::delete_for_author(&state.pool, id, &user.email).await?;

    if !deleted {
        let exists = RecommendationRepo::find_by_id(&state.pool, id).await?.is_some();
        return Err(if exists {
            AppError::Core(CoreError::Forbidden(
                "Only the author can delete this recommendation".into(),
            ))
        } else {
            AppError::Core(CoreError::NotFound {
                entity: "Recommendation",
                id,
            })
        });
    }

    tracing::info!(recommendation_id = %id, recommender = %user.email, "Recommendation deleted");

    Ok(StatusCode::NO_CONTENT)
}
