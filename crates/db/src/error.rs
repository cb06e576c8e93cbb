use prodboard_core::types::DocId;

/// Failure of a composite write that touches a recommendation and its
/// parent query's counter in one transaction.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The store rejected or could not run a statement.
    #[error(transparent)]
    Store(#[from] sqlx::Error),

    /// The recommendation write succeeded but the counter on `query_id`
    /// could not be adjusted. The transaction has been rolled back.
    #[error("recommendation count for query {query_id} could not be adjusted: {detail}")]
    Consistency { query_id: DocId, detail: String },
}
