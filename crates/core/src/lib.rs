//! Domain types and pure helpers shared by the database and API crates.
//!
//! Nothing in here performs I/O, so every rule that can be stated without a
//! connection (sort parsing, search patterns, bookmark de-duplication,
//! counter deltas, email identity keys) lives here and is unit tested in
//! isolation.

pub mod bookmarks;
pub mod counters;
pub mod error;
pub mod identity;
pub mod search;
pub mod types;
