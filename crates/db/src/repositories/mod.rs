//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod bookmark_repo;
pub mod query_repo;
pub mod recommendation_repo;

pub use bookmark_repo::BookmarkRepo;
pub use query_repo::QueryRepo;
pub use recommendation_repo::RecommendationRepo;
