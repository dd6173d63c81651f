//! Query result iteration with scoped release.

use crate::StoreError;

/// One row of a query result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Lazy, single-pass sequence of query rows backed by a host resource.
///
/// An `Err` item aborts the query; callers stop consuming after it.
pub trait StateQueryIterator: Iterator<Item = Result<KeyValue, StoreError>> {
    /// Release the host-side resource. Calling it more than once is a no-op.
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Owns a host iterator and closes it when dropped.
///
/// Use [`ScopedIterator::close`] to observe the close result; otherwise the
/// drop path closes it and logs any failure.
pub struct ScopedIterator<'a> {
    inner: Box<dyn StateQueryIterator + 'a>,
    closed: bool,
}

impl<'a> ScopedIterator<'a> {
    pub fn new(inner: Box<dyn StateQueryIterator + 'a>) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    pub fn close(mut self) -> Result<(), StoreError> {
        self.closed = true;
        self.inner.close()
    }
}

impl Iterator for ScopedIterator<'_> {
    type Item = Result<KeyValue, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.inner.next()
    }
}

impl Drop for ScopedIterator<'_> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(e) = self.inner.close() {
                tracing::warn!("failed to close query iterator: {e}");
            }
        }
    }
}
