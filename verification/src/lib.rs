//! Identity proof gate.
//!
//! Before certain operations the contract asks an external proof verifier
//! whether an identity (a 22-byte DID) holds a fixed set of signed
//! attributes. The gate issues exactly one HTTP call per check, with no
//! retry; a transport failure is terminal for that check.
//!
//! The verifier is pluggable through [`IdentityVerifier`] so callers can run
//! against a scripted verifier in tests.

pub mod config;
pub mod error;
pub mod gate;
pub mod method;

pub use config::VerifierConfig;
pub use error::ProofError;
pub use gate::{check_response, validate_did, ProofGate, VerifierResponse, DID_LENGTH};
pub use method::IdentityVerifier;
