//! Repository for the `recommendations` table.
//!
//! Creating or deleting a recommendation also moves its parent query's
//! `recommendation_count`. Both writes run in one transaction. Each write
//! statement targets `recommendations`, so its table lock is taken before
//! any `queries` row is locked, the same order
//! [`QueryRepo::reconcile_recommendation_counts`] uses.

use prodboard_core::counters::CounterDelta;
use prodboard_core::identity::normalize_email;
use prodboard_core::types::DocId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::WriteError;
use crate::models::recommendation::{
    Comment, CommentAppendPolicy, CreateRecommendation, Recommendation,
};
use crate::repositories::QueryRepo;

/// Column list for `recommendations` queries.
const COLUMNS: &str = "id, query_id, query_title, product_name, query_owner_email, \
    query_owner_name, recommender_email, recommender_name, title, \
    recommended_product, recommended_image, reason, comments, created_at";

/// Provides CRUD operations for recommendations.
pub struct RecommendationRepo;

impl RecommendationRepo {
    /// Insert a recommendation and credit its parent query.
    ///
    /// The parent row is read `FOR UPDATE`, so a concurrent delete of the
    /// query either finishes first (and this returns `Ok(None)`) or waits
    /// until the credit has committed. Returns `Ok(None)` if the parent query
    /// does not exist; nothing is written in that case.
    pub async fn create(
        pool: &PgPool,
        recommender_email: &str,
        input: &CreateRecommendation,
    ) -> Result<Option<Recommendation>, WriteError> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO recommendations
                (query_id, query_title, product_name, query_owner_email, query_owner_name,
                 recommender_email, recommender_name, title, recommended_product,
                 recommended_image, reason)
             SELECT q.id, q.query_title, q.product_name, q.submitter_email, q.submitter_name,
                    $2, $3, $4, $5, $6, $7
             FROM queries q
             WHERE q.id = $1
             FOR UPDATE OF q
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Recommendation>(&insert)
            .bind(input.query_id)
            .bind(normalize_email(recommender_email))
            .bind(&input.recommender_name)
            .bind(&input.title)
            .bind(&input.recommended_product)
            .bind(&input.recommended_image)
            .bind(&input.reason)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(recommendation) = created else {
            return Ok(None);
        };

        let query_id = input.query_id;
        match QueryRepo::adjust_recommendation_count(&mut *tx, query_id, CounterDelta::Credit)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(
                    %query_id,
                    recommendation_id = %recommendation.id,
                    "Parent query vanished before its counter was credited; rolling back"
                );
                return Err(WriteError::Consistency {
                    query_id,
                    detail: "parent query no longer exists".into(),
                });
            }
            Err(e) => {
                tracing::error!(
                    %query_id,
                    recommendation_id = %recommendation.id,
                    error = %e,
                    "Counter credit failed after recommendation insert; rolling back"
                );
                return Err(WriteError::Consistency {
                    query_id,
                    detail: e.to_string(),
                });
            }
        }

        tx.commit().await?;
        Ok(Some(recommendation))
    }

    /// Find a recommendation by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DocId,
    ) -> Result<Option<Recommendation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recommendations WHERE id = $1");
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All recommendations on a query, in insertion order.
    pub async fn list_for_query(
        pool: &PgPool,
        query_id: DocId,
    ) -> Result<Vec<Recommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations
             WHERE query_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(query_id)
            .fetch_all(pool)
            .await
    }

    /// Recommendations written by `email`, newest first.
    pub async fn list_by_recommender(
        pool: &PgPool,
        email: &str,
    ) -> Result<Vec<Recommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations
             WHERE recommender_email = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(normalize_email(email))
            .fetch_all(pool)
            .await
    }

    /// Recommendations left on queries posted by `email`, newest first.
    pub async fn list_by_query_owner(
        pool: &PgPool,
        email: &str,
    ) -> Result<Vec<Recommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations
             WHERE query_owner_email = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(normalize_email(email))
            .fetch_all(pool)
            .await
    }

    /// Append a comment to a recommendation.
    ///
    /// With [`CommentAppendPolicy::Upsert`] a missing target is created as a
    /// parentless shell holding just this comment, so the result is always
    /// `Some`. With [`CommentAppendPolicy::Reject`] a missing target yields
    /// `None`.
    pub async fn append_comment(
        pool: &PgPool,
        id: DocId,
        comment: &Comment,
        policy: CommentAppendPolicy,
    ) -> Result<Option<Recommendation>, sqlx::Error> {
        let query = match policy {
            CommentAppendPolicy::Upsert => format!(
                "INSERT INTO recommendations (id, comments)
                 VALUES ($1, jsonb_build_array($2::jsonb))
                 ON CONFLICT (id) DO UPDATE SET
                     comments = recommendations.comments || EXCLUDED.comments
                 RETURNING {COLUMNS}"
            ),
            CommentAppendPolicy::Reject => format!(
                "UPDATE recommendations
                 SET comments = comments || jsonb_build_array($2::jsonb)
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            ),
        };
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(id)
            .bind(Json(comment))
            .fetch_optional(pool)
            .await
    }

    /// Delete a recommendation written by `author_email` and debit its
    /// parent query.
    ///
    /// Returns `false` without touching any counter when nothing was deleted
    /// (already gone, or written by someone else).
    pub async fn delete_for_author(
        pool: &PgPool,
        id: DocId,
        author_email: &str,
    ) -> Result<bool, WriteError> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(Option<DocId>,)> = sqlx::query_as(
            "DELETE FROM recommendations
             WHERE id = $1 AND recommender_email = $2
             RETURNING query_id",
        )
        .bind(id)
        .bind(normalize_email(author_email))
        .fetch_optional(&mut *tx)
        .await?;

        let Some((parent,)) = deleted else {
            return Ok(false);
        };

        if let Some(query_id) = parent {
            match QueryRepo::adjust_recommendation_count(&mut *tx, query_id, CounterDelta::Debit)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(
                        %query_id,
                        recommendation_id = %id,
                        "Deleted recommendation referenced a missing query; nothing to debit"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        %query_id,
                        recommendation_id = %id,
                        error = %e,
                        "Counter debit failed after recommendation delete; rolling back"
                    );
                    return Err(WriteError::Consistency {
                        query_id,
                        detail: e.to_string(),
                    });
                }
            }
        }

        tx.commit().await?;
        Ok(true)
    }
}
