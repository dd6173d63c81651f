//! Nullable ledger host: thread-safe in-memory state with a selector engine.

use crate::selector::Selector;
use ourchain_store::{KeyValue, LedgerHost, StateQueryIterator, StoreError};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
struct Faults {
    next_get: Option<String>,
    next_put: Option<String>,
    queries: Option<String>,
    iteration: Option<(usize, String)>,
}

#[derive(Default)]
struct Counters {
    open_iterators: AtomicUsize,
    closed_iterators: AtomicUsize,
    puts: AtomicUsize,
}

/// An in-memory ledger host.
///
/// Queries iterate a snapshot taken when the query starts, in key order.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullLedger {
    state: Mutex<BTreeMap<String, Vec<u8>>>,
    faults: Mutex<Faults>,
    counters: Arc<Counters>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BTreeMap::new()),
            faults: Mutex::new(Faults::default()),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Write bytes directly, bypassing the contract (e.g. to seed corrupt data).
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        lock(&self.state).insert(key.to_string(), value);
    }

    pub fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.state).get(key).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).is_empty()
    }

    /// Make the next `get_state` call fail.
    pub fn fail_next_get(&self, reason: &str) {
        lock(&self.faults).next_get = Some(reason.to_string());
    }

    /// Make the next `put_state` call fail.
    pub fn fail_next_put(&self, reason: &str) {
        lock(&self.faults).next_put = Some(reason.to_string());
    }

    /// Make every `get_query_result` call fail until cleared.
    pub fn fail_queries(&self, reason: &str) {
        lock(&self.faults).queries = Some(reason.to_string());
    }

    /// Make iterators of subsequent queries fail after yielding `rows` rows.
    pub fn fail_iteration_after(&self, rows: usize, reason: &str) {
        lock(&self.faults).iteration = Some((rows, reason.to_string()));
    }

    /// Iterators handed out and not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.counters.open_iterators.load(Ordering::SeqCst)
    }

    pub fn closed_iterators(&self) -> usize {
        self.counters.closed_iterators.load(Ordering::SeqCst)
    }

    /// Successful `put_state` calls.
    pub fn put_count(&self) -> usize {
        self.counters.puts.load(Ordering::SeqCst)
    }

    /// Load state from a JSON object of `key -> value` strings.
    pub fn from_snapshot(json: &[u8]) -> Result<Self, StoreError> {
        let entries: BTreeMap<String, String> = serde_json::from_slice(json)
            .map_err(|e| StoreError::Backend(format!("invalid snapshot: {e}")))?;
        let ledger = Self::new();
        *lock(&ledger.state) = entries
            .into_iter()
            .map(|(k, v)| (k, v.into_bytes()))
            .collect();
        Ok(ledger)
    }

    /// Serialize state as a JSON object of `key -> value` strings.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, StoreError> {
        let state = lock(&self.state);
        let mut entries = BTreeMap::new();
        for (key, value) in state.iter() {
            let text = std::str::from_utf8(value).map_err(|_| {
                StoreError::Backend(format!("value at {key} is not valid UTF-8"))
            })?;
            entries.insert(key.as_str(), text);
        }
        serde_json::to_vec_pretty(&entries).map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Load a snapshot file, or start empty if it does not exist.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_snapshot(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(StoreError::Backend(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = self.to_snapshot()?;
        std::fs::write(path, bytes)
            .map_err(|e| StoreError::Backend(format!("failed to write {}: {e}", path.display())))
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerHost for NullLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(reason) = lock(&self.faults).next_get.take() {
            return Err(StoreError::Backend(reason));
        }
        Ok(lock(&self.state).get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if let Some(reason) = lock(&self.faults).next_put.take() {
            return Err(StoreError::Backend(reason));
        }
        lock(&self.state).insert(key.to_string(), value.to_vec());
        self.counters.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get_query_result(
        &self,
        selector: &str,
    ) -> Result<Box<dyn StateQueryIterator + '_>, StoreError> {
        let (query_fault, iteration_fault) = {
            let faults = lock(&self.faults);
            (faults.queries.clone(), faults.iteration.clone())
        };
        if let Some(reason) = query_fault {
            return Err(StoreError::Query(reason));
        }
        let selector = Selector::parse(selector)?;
        let rows: Vec<KeyValue> = lock(&self.state)
            .iter()
            .filter(|(_, value)| selector.matches(value))
            .map(|(key, value)| KeyValue::new(key.as_str(), value.as_slice()))
            .collect();
        self.counters.open_iterators.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(NullQueryIterator {
            rows: rows.into_iter(),
            yielded: 0,
            fault: iteration_fault,
            closed: false,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct NullQueryIterator {
    rows: std::vec::IntoIter<KeyValue>,
    yielded: usize,
    fault: Option<(usize, String)>,
    closed: bool,
    counters: Arc<Counters>,
}

impl Iterator for NullQueryIterator {
    type Item = Result<KeyValue, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return Some(Err(StoreError::Closed));
        }
        if let Some((after, reason)) = &self.fault {
            if self.yielded >= *after {
                return Some(Err(StoreError::Query(reason.clone())));
            }
        }
        let row = self.rows.next()?;
        self.yielded += 1;
        Some(Ok(row))
    }
}

impl StateQueryIterator for NullQueryIterator {
    fn close(&mut self) -> Result<(), StoreError> {
        if !self.closed {
            self.closed = true;
            self.counters.open_iterators.fetch_sub(1, Ordering::SeqCst);
            self.counters.closed_iterators.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
