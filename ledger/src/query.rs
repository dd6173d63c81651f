//! Rich-query results serialized into a single JSON array.
//!
//! Stored values are spliced into the output verbatim. They are never parsed
//! and re-serialized, so field order and number formatting survive exactly as
//! the host returned them.

use crate::LedgerError;
use ourchain_store::{KeyValue, LedgerHost, ScopedIterator, StoreError};
use ourchain_types::DocType;
use serde_json::{Map, Value};

/// Incrementally writes `[{"Key":"k", "Record":<raw>},...]`.
pub struct QueryResultBuilder {
    buf: Vec<u8>,
    count: usize,
}

impl QueryResultBuilder {
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(256);
        buf.push(b'[');
        Self { buf, count: 0 }
    }

    pub fn push(&mut self, row: &KeyValue) {
        if self.count > 0 {
            self.buf.push(b',');
        }
        self.buf.extend_from_slice(b"{\"Key\":");
        write_json_string(&mut self.buf, &row.key);
        self.buf.extend_from_slice(b", \"Record\":");
        self.buf.extend_from_slice(&row.value);
        self.buf.push(b'}');
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf.push(b']');
        self.buf
    }
}

impl Default for QueryResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_json_string(buf: &mut Vec<u8>, s: &str) {
    serde_json::to_writer(&mut *buf, s).expect("writing a str into a Vec cannot fail");
}

/// Consume `rows` once, in order. The first error discards everything built
/// so far.
pub fn collect_results<I>(rows: I) -> Result<Vec<u8>, LedgerError>
where
    I: IntoIterator<Item = Result<KeyValue, StoreError>>,
{
    let mut builder = QueryResultBuilder::new();
    for row in rows {
        let row = row.map_err(LedgerError::Query)?;
        builder.push(&row);
    }
    Ok(builder.finish())
}

/// Run `selector` against the host and build the result array.
///
/// The host iterator is closed on every exit path.
pub fn execute<H: LedgerHost + ?Sized>(host: &H, selector: &str) -> Result<Vec<u8>, LedgerError> {
    tracing::debug!(selector, "running rich query");
    let iter = host
        .get_query_result(selector)
        .map_err(LedgerError::Query)?;
    let mut rows = ScopedIterator::new(iter);
    let result = collect_results(&mut rows);
    match rows.close() {
        Ok(()) => {}
        Err(e) if result.is_ok() => return Err(LedgerError::Query(e)),
        Err(e) => tracing::warn!("failed to close query iterator after error: {e}"),
    }
    let bytes = result?;
    tracing::debug!(bytes = bytes.len(), "rich query complete");
    Ok(bytes)
}

/// Lower-case one character at a time, with no word-final sigma rule.
fn lowercase_chars(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Selector matching votes whose `field` equals `value` lower-cased.
fn vote_selector(field: &str, value: &str) -> String {
    let mut fields = Map::new();
    fields.insert("docType".to_string(), Value::from(DocType::Vote.as_str()));
    fields.insert(field.to_string(), Value::from(lowercase_chars(value)));
    let mut query = Map::new();
    query.insert("selector".to_string(), Value::Object(fields));
    Value::Object(query).to_string()
}

/// `{"selector":{"docType":"vote","pollID":"<poll>"}}`
pub fn votes_by_poll_selector(poll_id: &str) -> String {
    vote_selector("pollID", poll_id)
}

/// `{"selector":{"docType":"vote","voterID":"<voter>"}}`
pub fn votes_by_voter_selector(voter_id: &str) -> String {
    vote_selector("voterID", voter_id)
}

pub fn query_votes_by_poll<H: LedgerHost + ?Sized>(
    host: &H,
    poll_id: &str,
) -> Result<Vec<u8>, LedgerError> {
    execute(host, &votes_by_poll_selector(poll_id))
}

pub fn query_votes_by_voter<H: LedgerHost + ?Sized>(
    host: &H,
    voter_id: &str,
) -> Result<Vec<u8>, LedgerError> {
    execute(host, &votes_by_voter_selector(voter_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ourchain_nullables::NullLedger;

    fn rows(items: &[(&str, &str)]) -> Vec<Result<KeyValue, StoreError>> {
        items
            .iter()
            .map(|(k, v)| Ok(KeyValue::new(*k, v.as_bytes())))
            .collect()
    }

    #[test]
    fn empty_sequence_is_empty_array() {
        let bytes = collect_results(Vec::new()).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn values_are_spliced_verbatim_in_order() {
        let bytes = collect_results(rows(&[
            ("b", r#"{"z":1.50,"a":2}"#),
            ("a", r#"{"docType":"vote"}"#),
        ]))
        .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"Key":"b", "Record":{"z":1.50,"a":2}},{"Key":"a", "Record":{"docType":"vote"}}]"#
        );
    }

    #[test]
    fn keys_are_json_escaped() {
        let bytes = collect_results(rows(&[("p\"1", "{}")])).unwrap();
        assert_eq!(bytes, br#"[{"Key":"p\"1", "Record":{}}]"#);
    }

    #[test]
    fn iteration_error_discards_partial_output() {
        let mut items = rows(&[("a", "{}")]);
        items.push(Err(StoreError::Query("cursor lost".into())));
        items.extend(rows(&[("b", "{}")]));
        let err = collect_results(items).unwrap_err();
        assert!(matches!(err, LedgerError::Query(_)));
    }

    #[test]
    fn builder_counts_rows() {
        let mut builder = QueryResultBuilder::new();
        assert!(builder.is_empty());
        builder.push(&KeyValue::new("k", "1"));
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.finish(), br#"[{"Key":"k", "Record":1}]"#);
    }

    #[test]
    fn poll_selector_lowercases_identifier() {
        assert_eq!(
            votes_by_poll_selector("Poll-A"),
            r#"{"selector":{"docType":"vote","pollID":"poll-a"}}"#
        );
    }

    #[test]
    fn poll_selector_lowercases_each_character_alone() {
        assert_eq!(
            votes_by_poll_selector("ΟΔΟΣ"),
            r#"{"selector":{"docType":"vote","pollID":"οδοσ"}}"#
        );
    }

    #[test]
    fn voter_selector_escapes_identifier() {
        assert_eq!(
            votes_by_voter_selector("V\"1"),
            r#"{"selector":{"docType":"vote","voterID":"v\"1"}}"#
        );
    }

    #[test]
    fn execute_closes_iterator_on_success() {
        let host = NullLedger::new();
        host.insert_raw("k1", br#"{"docType":"vote","pollID":"p"}"#.to_vec());
        let bytes = execute(&host, r#"{"selector":{"pollID":"p"}}"#).unwrap();
        assert_eq!(bytes, br#"[{"Key":"k1", "Record":{"docType":"vote","pollID":"p"}}]"#);
        assert_eq!(host.open_iterators(), 0);
        assert_eq!(host.closed_iterators(), 1);
    }

    #[test]
    fn execute_closes_iterator_on_empty_result() {
        let host = NullLedger::new();
        let bytes = execute(&host, r#"{"selector":{"pollID":"p"}}"#).unwrap();
        assert_eq!(bytes, b"[]");
        assert_eq!(host.open_iterators(), 0);
        assert_eq!(host.closed_iterators(), 1);
    }

    #[test]
    fn execute_closes_iterator_on_error() {
        let host = NullLedger::new();
        host.insert_raw("k1", br#"{"pollID":"p"}"#.to_vec());
        host.insert_raw("k2", br#"{"pollID":"p"}"#.to_vec());
        host.fail_iteration_after(1, "cursor expired");
        let err = execute(&host, r#"{"selector":{"pollID":"p"}}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Query(_)));
        assert_eq!(host.open_iterators(), 0);
        assert_eq!(host.closed_iterators(), 1);
    }

    #[test]
    fn execute_surfaces_query_setup_failure() {
        let host = NullLedger::new();
        host.fail_queries("index missing");
        let err = execute(&host, r#"{"selector":{}}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Query(_)));
        assert_eq!(host.open_iterators(), 0);
    }

    #[test]
    fn query_votes_by_poll_matches_lowercased_poll() {
        let host = NullLedger::new();
        host.insert_raw("poll1v1", br#"{"docType":"vote","pollID":"poll1","voterID":"v1","voteHash":"h"}"#.to_vec());
        host.insert_raw("poll2v1", br#"{"docType":"vote","pollID":"poll2","voterID":"v1","voteHash":"h"}"#.to_vec());
        let bytes = query_votes_by_poll(&host, "POLL1").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["Key"], "poll1v1");
    }

    #[test]
    fn query_votes_by_voter_spans_polls() {
        let host = NullLedger::new();
        host.insert_raw("poll1v1", br#"{"docType":"vote","pollID":"poll1","voterID":"v1","voteHash":"h"}"#.to_vec());
        host.insert_raw("poll2v1", br#"{"docType":"vote","pollID":"poll2","voterID":"v1","voteHash":"h"}"#.to_vec());
        host.insert_raw("e1", br#"{"docType":"entry","voterID":"v1"}"#.to_vec());
        let bytes = query_votes_by_voter(&host, "v1").unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        let keys: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["Key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["poll1v1", "poll2v1"]);
    }
}
