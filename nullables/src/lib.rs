//! Nullable infrastructure for deterministic testing.
//!
//! External collaborators (the ledger host and the identity proof verifier)
//! are abstracted behind traits. This crate provides implementations that:
//! - Keep all state in memory
//! - Can be told to fail on demand
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests. The daemon also
//! runs invocations against [`NullLedger`] for local development.

pub mod identity;
pub mod selector;
pub mod store;

pub use identity::{NullIdentityVerifier, ScriptedOutcome};
pub use selector::Selector;
pub use store::NullLedger;
