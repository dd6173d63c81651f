//! Contract error types.

use ourchain_ledger::LedgerError;
use ourchain_verification::ProofError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Caller-visible failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownOperation,
    Validation,
    AlreadyExists,
    NotFound,
    Decode,
    Encode,
    Host,
    Query,
    VerifierUnreachable,
    AttributeMismatch,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownOperation => "UnknownOperationError",
            Self::Validation => "ValidationError",
            Self::AlreadyExists => "AlreadyExistsError",
            Self::NotFound => "NotFoundError",
            Self::Decode => "DecodeError",
            Self::Encode => "EncodeError",
            Self::Host => "HostError",
            Self::Query => "QueryError",
            Self::VerifierUnreachable => "VerifierUnreachableError",
            Self::AttributeMismatch => "AttributeMismatchError",
            Self::Config => "ConfigError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownOperation(_) => ErrorKind::UnknownOperation,
            Self::Ledger(e) => match e {
                LedgerError::Validation(_) => ErrorKind::Validation,
                LedgerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
                LedgerError::NotFound(_) => ErrorKind::NotFound,
                LedgerError::Decode { .. } => ErrorKind::Decode,
                LedgerError::Encode { .. } => ErrorKind::Encode,
                LedgerError::Host { .. } => ErrorKind::Host,
                LedgerError::Query(_) => ErrorKind::Query,
            },
            Self::Proof(e) => match e {
                ProofError::Validation(_) => ErrorKind::Validation,
                ProofError::VerifierUnreachable(_) => ErrorKind::VerifierUnreachable,
                ProofError::Decode(_) => ErrorKind::Decode,
                ProofError::AttributeMismatch(_) => ErrorKind::AttributeMismatch,
            },
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_map_to_kinds() {
        let err: ContractError = LedgerError::NotFound("k".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "record does not exist: k");
    }

    #[test]
    fn encode_failures_are_not_reported_as_decode() {
        let err: ContractError = LedgerError::Encode {
            key: "p1v1".into(),
            reason: "bad value".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert_eq!(
            format!("{}: {err}", err.kind()),
            "EncodeError: failed to encode record for p1v1: bad value"
        );
    }

    #[test]
    fn proof_errors_map_to_kinds() {
        let err: ContractError = ProofError::AttributeMismatch("x".into()).into();
        assert_eq!(err.kind().as_str(), "AttributeMismatchError");
    }
}
