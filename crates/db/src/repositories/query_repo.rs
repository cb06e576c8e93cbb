//! Repository for the `queries` table.

use prodboard_core::counters::CounterDelta;
use prodboard_core::identity::normalize_email;
use prodboard_core::search::{like_pattern, SortMode};
use prodboard_core::types::DocId;
use sqlx::{PgConnection, PgPool};

use crate::models::query::{CounterDrift, CreateQuery, Query, UpdateQuery};

/// Column list for `queries` queries.
const COLUMNS: &str = "id, submitter_email, submitter_name, submitter_image, \
    product_name, product_brand, product_image, query_title, boycott_reason, \
    recommendation_count, created_at, updated_at";

/// Provides CRUD, search and counter maintenance for queries.
pub struct QueryRepo;

impl QueryRepo {
    /// Insert a new query owned by `submitter_email`. Returns the created row.
    ///
    /// `recommendation_count` always starts at zero and `created_at` is set
    /// by the database.
    pub async fn create(
        pool: &PgPool,
        submitter_email: &str,
        input: &CreateQuery,
    ) -> Result<Query, sqlx::Error> {
        let query = format!(
            "INSERT INTO queries
                (submitter_email, submitter_name, submitter_image, product_name,
                 product_brand, product_image, query_title, boycott_reason)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(normalize_email(submitter_email))
            .bind(&input.submitter_name)
            .bind(&input.submitter_image)
            .bind(&input.product_name)
            .bind(&input.product_brand)
            .bind(&input.product_image)
            .bind(&input.query_title)
            .bind(&input.boycott_reason)
            .fetch_one(pool)
            .await
    }

    /// Find a query by its id.
    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<Query>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM queries WHERE id = $1");
        sqlx::query_as::<_, Query>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a list of ids, preserving their order and silently dropping
    /// ids with no matching row.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DocId]) -> Result<Vec<Query>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM queries
             WHERE id = ANY($1)
             ORDER BY array_position($1, id)"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recently posted queries, newest first.
    ///
    /// The `limit` should already be clamped by the caller.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Query>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM queries
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Search queries by product name and order them by `sort`.
    ///
    /// `term` must already be trimmed; `None` returns every query. Matching is
    /// a case-insensitive substring match with wildcards escaped.
    pub async fn search(
        pool: &PgPool,
        term: Option<&str>,
        sort: SortMode,
    ) -> Result<Vec<Query>, sqlx::Error> {
        let order = order_clause(sort);
        if let Some(term) = term {
            let query = format!(
                "SELECT {COLUMNS} FROM queries
                 WHERE product_name ILIKE $1 ESCAPE '\\'
                 ORDER BY {order}"
            );
            sqlx::query_as::<_, Query>(&query)
                .bind(like_pattern(term))
                .fetch_all(pool)
                .await
        } else {
            let query = format!("SELECT {COLUMNS} FROM queries ORDER BY {order}");
            sqlx::query_as::<_, Query>(&query).fetch_all(pool).await
        }
    }

    /// All queries posted by `email`, newest first.
    pub async fn list_by_submitter(pool: &PgPool, email: &str) -> Result<Vec<Query>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM queries
             WHERE submitter_email = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(normalize_email(email))
            .fetch_all(pool)
            .await
    }

    /// Merge the provided fields into a query owned by `owner_email`.
    ///
    /// Returns `None` if no query with that id belongs to `owner_email`.
    pub async fn update(
        pool: &PgPool,
        id: DocId,
        owner_email: &str,
        input: &UpdateQuery,
    ) -> Result<Option<Query>, sqlx::Error> {
        let query = format!(
            "UPDATE queries SET
                product_name   = COALESCE($3, product_name),
                product_brand  = COALESCE($4, product_brand),
                product_image  = COALESCE($5, product_image),
                query_title    = COALESCE($6, query_title),
                boycott_reason = COALESCE($7, boycott_reason),
                updated_at     = NOW()
             WHERE id = $1 AND submitter_email = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Query>(&query)
            .bind(id)
            .bind(normalize_email(owner_email))
            .bind(&input.product_name)
            .bind(&input.product_brand)
            .bind(&input.product_image)
            .bind(&input.query_title)
            .bind(&input.boycott_reason)
            .fetch_optional(pool)
            .await
    }

    /// Delete a query owned by `owner_email`. Returns `true` if a row was
    /// deleted.
    ///
    /// Recommendations referencing the query are left in place.
    pub async fn delete(pool: &PgPool, id: DocId, owner_email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM queries WHERE id = $1 AND submitter_email = $2")
            .bind(id)
            .bind(normalize_email(owner_email))
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply `delta` to a query's recommendation count, flooring at zero.
    ///
    /// Only the recommendation repository may call this, on the connection
    /// of the transaction that inserted or deleted the recommendation.
    /// Returns `false` if the query does not exist.
    pub(crate) async fn adjust_recommendation_count(
        conn: &mut PgConnection,
        id: DocId,
        delta: CounterDelta,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE queries
             SET recommendation_count = GREATEST(recommendation_count + $2, 0)
             WHERE id = $1",
        )
        .bind(id)
        .bind(delta.amount())
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute every counter from the recommendations that reference it.
    ///
    /// Holds a `SHARE` lock on `recommendations` for the duration so no
    /// recommendation write can interleave with the recount. Recommendation
    /// writers lock `recommendations` before `queries`, and so does this, so
    /// the two never deadlock. Returns the rows that were repaired.
    pub async fn reconcile_recommendation_counts(
        pool: &PgPool,
    ) -> Result<Vec<CounterDrift>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("LOCK TABLE recommendations IN SHARE MODE")
            .execute(&mut *tx)
            .await?;

        let drifted = sqlx::query_as::<_, CounterDrift>(
            "WITH live AS (
                 SELECT q.id, q.recommendation_count AS recorded,
                        COUNT(r.id)::INTEGER AS actual
                 FROM queries q
                 LEFT JOIN recommendations r ON r.query_id = q.id
                 GROUP BY q.id
             )
             UPDATE queries q
             SET recommendation_count = live.actual
             FROM live
             WHERE q.id = live.id AND live.recorded <> live.actual
             RETURNING q.id AS query_id, live.recorded, live.actual",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(drifted)
    }
}

/// `ORDER BY` clause for a sort mode. Ties fall back to newest first.
fn order_clause(sort: SortMode) -> &'static str {
    match sort {
        SortMode::CountAscending => "recommendation_count ASC, created_at DESC",
        SortMode::CountDescending => "recommendation_count DESC, created_at DESC",
        SortMode::Newest => "created_at DESC",
    }
}
