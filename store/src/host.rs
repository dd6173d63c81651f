//! Key-value state and rich-query capabilities supplied by the host.

use crate::iterator::StateQueryIterator;
use crate::StoreError;

/// State access for a single contract invocation.
///
/// Keys and values are opaque to the host; callers own all encoding.
/// Create-once checks built on `get_state` + `put_state` are only atomic if
/// the host isolates writes to a key for the duration of one invocation.
pub trait LedgerHost {
    /// Read the value at `key`. `Ok(None)` means the key holds nothing.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` at `key`, replacing whatever was there.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Run a selector query. The returned iterator must be closed by the
    /// caller; wrap it in [`crate::ScopedIterator`] to get that on every path.
    fn get_query_result(
        &self,
        selector: &str,
    ) -> Result<Box<dyn StateQueryIterator + '_>, StoreError>;
}

impl<H: LedgerHost + ?Sized> LedgerHost for &H {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put_state(key, value)
    }

    fn get_query_result(
        &self,
        selector: &str,
    ) -> Result<Box<dyn StateQueryIterator + '_>, StoreError> {
        (**self).get_query_result(selector)
    }
}
