use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed record: {0}")]
    Decode(String),

    #[error("failed to encode record: {0}")]
    Encode(String),
}
