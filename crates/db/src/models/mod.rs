//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` input DTOs used by the API layer

pub mod bookmark;
pub mod query;
pub mod recommendation;
