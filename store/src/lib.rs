//! Abstract ledger host interface.
//!
//! The host owns durable state and the rich-query engine. Contract code only
//! sees these traits; the in-memory host in `ourchain-nullables` implements
//! them for tests and local runs.

pub mod error;
pub mod host;
pub mod iterator;

pub use error::StoreError;
pub use host::LedgerHost;
pub use iterator::{KeyValue, ScopedIterator, StateQueryIterator};
