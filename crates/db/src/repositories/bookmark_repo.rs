//! Repository for the `bookmarks` table.

use prodboard_core::bookmarks::{dedup_preserving_order, BookmarkOutcome};
use prodboard_core::identity::normalize_email;
use prodboard_core::types::DocId;
use sqlx::{FromRow, PgPool};

use crate::models::bookmark::{BookmarkRecord, BookmarkWrite};
use crate::models::query::Query;
use crate::repositories::QueryRepo;

/// Column list for `bookmarks` queries.
const COLUMNS: &str = "user_email, booked, created_at, updated_at";

/// Row returned by the add-to-set upsert.
#[derive(FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    record: BookmarkRecord,
    inserted: bool,
}

/// Provides the per-user bookmark set.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Add `query_ids` to the bookmark set of `user_email`.
    ///
    /// A single statement creates the record when absent, or appends only the
    /// ids not already present. The conflicting row is locked for the update,
    /// so concurrent adds for the same user serialize and can never introduce
    /// a duplicate or lose an id. When every id is already present nothing is
    /// written and [`BookmarkOutcome::AlreadyPresent`] is reported.
    ///
    /// `user_email` is normalized, so every casing of an address shares one
    /// record.
    pub async fn add(
        pool: &PgPool,
        user_email: &str,
        query_ids: &[DocId],
    ) -> Result<BookmarkWrite, sqlx::Error> {
        let user_email = normalize_email(user_email);
        let incoming = dedup_preserving_order(query_ids);

        let query = format!(
            "INSERT INTO bookmarks (user_email, booked)
             VALUES ($1, $2)
             ON CONFLICT (user_email) DO UPDATE SET
                 booked = bookmarks.booked || ARRAY(
                     SELECT t.id
                     FROM unnest($2::uuid[]) WITH ORDINALITY AS t(id, ord)
                     WHERE t.id <> ALL(bookmarks.booked)
                     ORDER BY t.ord
                 ),
                 updated_at = NOW()
             WHERE NOT (bookmarks.booked @> $2::uuid[])
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let written = sqlx::query_as::<_, UpsertRow>(&query)
            .bind(&user_email)
            .bind(&incoming)
            .fetch_optional(pool)
            .await?;

        match written {
            Some(row) if row.inserted => {
                tracing::debug!(%user_email, "Bookmark record created");
                Ok(BookmarkWrite::new(BookmarkOutcome::Created, row.record))
            }
            Some(row) => Ok(BookmarkWrite::new(BookmarkOutcome::Appended, row.record)),
            None => {
                let record = Self::find(pool, &user_email)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok(BookmarkWrite::new(BookmarkOutcome::AlreadyPresent, record))
            }
        }
    }

    /// Find the bookmark record of a user, under any casing of the email.
    pub async fn find(
        pool: &PgPool,
        user_email: &str,
    ) -> Result<Option<BookmarkRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE user_email = $1");
        sqlx::query_as::<_, BookmarkRecord>(&query)
            .bind(normalize_email(user_email))
            .fetch_optional(pool)
            .await
    }

    /// Resolve a user's bookmarks to queries, in bookmark order.
    ///
    /// A user with no record has no bookmarks. Ids whose query has since been
    /// deleted are dropped.
    pub async fn list_bookmarked_queries(
        pool: &PgPool,
        user_email: &str,
    ) -> Result<Vec<Query>, sqlx::Error> {
        match Self::find(pool, user_email).await? {
            Some(record) => QueryRepo::find_by_ids(pool, &record.booked).await,
            None => Ok(Vec::new()),
        }
    }
}
