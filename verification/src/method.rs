//! Pluggable identity verification.

use crate::ProofError;
use std::future::Future;

/// Something that can decide whether an identity holds the required proof.
///
/// `Ok(true)` means access is granted. Every refusal is an `Err` carrying
/// the reason, so callers never see `Ok(false)` from a well-behaved
/// implementation.
pub trait IdentityVerifier: Send + Sync {
    fn verify_identity(&self, did: &str) -> impl Future<Output = Result<bool, ProofError>> + Send;
}
