use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger backend error: {0}")]
    Backend(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("query iterator already closed")]
    Closed,
}
