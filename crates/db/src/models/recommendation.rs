//! Recommendation entity model, embedded comments and DTOs.

use std::str::FromStr;

use chrono::Utc;
use prodboard_core::identity::normalize_email;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use prodboard_core::types::{DocId, Timestamp};
use validator::Validate;

/// A row from the `recommendations` table.
///
/// The `query_*` and `product_name` columns are a snapshot of the parent
/// query taken when the recommendation was created. Rows created by a comment
/// upsert have no parent and leave every descriptive column empty.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recommendation {
    pub id: DocId,
    pub query_id: Option<DocId>,
    pub query_title: Option<String>,
    pub product_name: Option<String>,
    pub query_owner_email: Option<String>,
    pub query_owner_name: Option<String>,
    pub recommender_email: Option<String>,
    pub recommender_name: Option<String>,
    pub title: Option<String>,
    pub recommended_product: Option<String>,
    pub recommended_image: Option<String>,
    pub reason: Option<String>,
    pub comments: Json<Vec<Comment>>,
    pub created_at: Timestamp,
}

/// A comment embedded in a recommendation. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub commenter_email: String,
    pub commenter_name: Option<String>,
    pub text: String,
    pub created_at: Timestamp,
}

/// Input for recommending a product on a query.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecommendation {
    pub query_id: DocId,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub recommended_product: String,
    #[validate(url)]
    pub recommended_image: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub reason: String,
    #[validate(length(max = 200))]
    pub recommender_name: Option<String>,
}

/// Input for appending a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(email)]
    pub commenter_email: String,
    #[validate(length(max = 200))]
    pub commenter_name: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

impl CreateComment {
    /// Stamp the comment with the current server time.
    pub fn into_comment(self) -> Comment {
        Comment {
            commenter_email: normalize_email(&self.commenter_email),
            commenter_name: self.commenter_name,
            text: self.text,
            created_at: Utc::now(),
        }
    }
}

/// What to do when a comment targets a recommendation that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentAppendPolicy {
    /// Create a parentless shell recommendation holding the comment.
    #[default]
    Upsert,
    /// Report the target as not found.
    Reject,
}

impl FromStr for CommentAppendPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(CommentAppendPolicy::Upsert),
            "reject" => Ok(CommentAppendPolicy::Reject),
            other => Err(format!("unknown comment append policy '{other}'")),
        }
    }
}
