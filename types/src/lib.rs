//! Record types stored in the ledger and their canonical JSON encoding.
//!
//! Every peer executing the contract must produce byte-identical state for
//! identical inputs, so the encoding here is fixed: compact JSON, fields in
//! declaration order, and the same escaping rules as the records already
//! present on existing ledgers.

pub mod codec;
pub mod error;
pub mod record;

pub use codec::{decode, encode};
pub use error::CodecError;
pub use record::{DocType, Entry, MutableRecord, Record, Vote};
