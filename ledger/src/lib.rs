//! Ledger-backed record store.
//!
//! - [`keys`]: deterministic storage keys for entries and votes
//! - [`records`]: create-once / read / replace-field against the host
//! - [`query`]: selector queries serialized into one JSON array
//! - [`args`]: positional invocation arguments parsed into typed requests

pub mod args;
pub mod error;
pub mod keys;
pub mod query;
pub mod records;

pub use args::{NewEntry, NewVote, Replacement};
pub use error::LedgerError;
pub use keys::{delimited_vote_key, entry_key, vote_key, VoteKeyScheme, KEY_DELIMITER};
pub use query::QueryResultBuilder;
pub use records::RecordStore;
