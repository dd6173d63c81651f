use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("invalid identifier: {0}")]
    Validation(String),

    #[error("proof verifier unreachable: {0}")]
    VerifierUnreachable(String),

    #[error("malformed verifier response: {0}")]
    Decode(String),

    #[error("proof rejected: {0}")]
    AttributeMismatch(String),
}
