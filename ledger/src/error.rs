use ourchain_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid arguments: {0}")]
    Validation(String),

    #[error("record already exists: {0}")]
    AlreadyExists(String),

    #[error("record does not exist: {0}")]
    NotFound(String),

    #[error("malformed record at {key}: {reason}")]
    Decode { key: String, reason: String },

    #[error("failed to encode record for {key}: {reason}")]
    Encode { key: String, reason: String },

    #[error("failed to access state for {key}: {source}")]
    Host {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("query aborted: {0}")]
    Query(#[source] StoreError),
}

impl LedgerError {
    pub(crate) fn host(key: &str, source: StoreError) -> Self {
        Self::Host {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn decode(key: &str, reason: impl ToString) -> Self {
        Self::Decode {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(key: &str, reason: impl ToString) -> Self {
        Self::Encode {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
