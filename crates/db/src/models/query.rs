//! Query entity model and DTOs.
//!
//! A query is a user's request for product advice. Its
//! `recommendation_count` is maintained by the recommendation repository and
//! is deliberately absent from every input DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use prodboard_core::types::{DocId, Timestamp};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `queries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Query {
    pub id: DocId,
    pub submitter_email: String,
    pub submitter_name: Option<String>,
    pub submitter_image: Option<String>,
    pub product_name: String,
    pub product_brand: String,
    pub product_image: Option<String>,
    pub query_title: String,
    pub boycott_reason: Option<String>,
    pub recommendation_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for posting a new query. The submitter's email comes from the
/// verified principal, never from the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuery {
    #[validate(length(min = 1, max = 200))]
    pub product_name: String,
    #[validate(length(min = 1, max = 200))]
    pub product_brand: String,
    #[validate(url)]
    pub product_image: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub query_title: String,
    #[validate(length(max = 5000))]
    pub boycott_reason: Option<String>,
    #[validate(length(max = 200))]
    pub submitter_name: Option<String>,
    #[validate(url)]
    pub submitter_image: Option<String>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Partial update for a query. All fields are optional; only provided fields
/// are merged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuery {
    #[validate(length(min = 1, max = 200))]
    pub product_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub product_brand: Option<String>,
    #[validate(url)]
    pub product_image: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub query_title: Option<String>,
    #[validate(length(max = 5000))]
    pub boycott_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// A query whose stored count disagreed with its live recommendations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CounterDrift {
    pub query_id: DocId,
    /// Count that was stored before the repair.
    pub recorded: i32,
    /// Number of recommendations actually referencing the query.
    pub actual: i32,
}
