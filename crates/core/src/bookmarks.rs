//! Bookmark set semantics.
//!
//! A bookmark record stores query ids in an ordered array, but it is a set:
//! an id may appear at most once. The store enforces this with an atomic
//! add-to-set statement; the helpers here prepare its input and describe its
//! result.

use serde::Serialize;

use crate::types::DocId;

/// Remove repeated ids, keeping the first occurrence of each.
pub fn dedup_preserving_order(ids: &[DocId]) -> Vec<DocId> {
    let mut unique: Vec<DocId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

/// Result of adding ids to a user's bookmark set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkOutcome {
    /// No record existed; one was created holding the ids.
    Created,
    /// The record existed and at least one id was appended.
    Appended,
    /// Every id was already bookmarked. Acknowledged, nothing written.
    AlreadyPresent,
}

impl BookmarkOutcome {
    /// Number of records modified by the write (0 or 1).
    pub fn modified_count(self) -> u64 {
        match self {
            BookmarkOutcome::Created | BookmarkOutcome::Appended => 1,
            BookmarkOutcome::AlreadyPresent => 0,
        }
    }
}
