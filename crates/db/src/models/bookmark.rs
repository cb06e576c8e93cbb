//! Bookmark record model and DTOs.

use prodboard_core::bookmarks::BookmarkOutcome;
use prodboard_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `bookmarks` table. `booked` never holds a duplicate id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookmarkRecord {
    pub user_email: String,
    pub booked: Vec<DocId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for bookmarking one or more queries.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddBookmarks {
    #[serde(alias = "email")]
    #[validate(email)]
    pub user_email: String,
    #[serde(alias = "ids")]
    #[validate(length(min = 1, max = 100))]
    pub query_ids: Vec<DocId>,
}

/// Acknowledgement of a bookmark write.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkWrite {
    pub outcome: BookmarkOutcome,
    pub modified_count: u64,
    pub booked: Vec<DocId>,
}

impl BookmarkWrite {
    pub fn new(outcome: BookmarkOutcome, record: BookmarkRecord) -> Self {
        Self {
            outcome,
            modified_count: outcome.modified_count(),
            booked: record.booked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let id = uuid::Uuid::new_v4();
        let body = serde_json::json!({ "email": "a@x.com", "ids": [id] });
        let input: AddBookmarks = serde_json::from_value(body).unwrap();
        assert_eq!(input.user_email, "a@x.com");
        assert_eq!(input.query_ids, vec![id]);
    }

    #[test]
    fn rejects_empty_id_list() {
        let input = AddBookmarks {
            user_email: "a@x.com".into(),
            query_ids: vec![],
        };
        assert!(input.validate().is_err());
    }
}
