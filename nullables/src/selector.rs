//! Minimal rich-query selector engine.
//!
//! Supports `{"selector": {field: value, field: {"$eq": value}, ...}}` on
//! top-level fields, all conditions ANDed. Other top-level query options are
//! ignored; other operators are rejected.

use ourchain_store::StoreError;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    conditions: Vec<(String, Value)>,
}

impl Selector {
    pub fn parse(query: &str) -> Result<Self, StoreError> {
        let parsed: Value = serde_json::from_str(query)
            .map_err(|e| StoreError::Query(format!("invalid query string: {e}")))?;
        let selector = parsed
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| StoreError::Query("query has no \"selector\" object".into()))?;

        let mut conditions = Vec::with_capacity(selector.len());
        for (field, condition) in selector {
            if field.starts_with('$') {
                return Err(StoreError::Query(format!("unsupported operator {field}")));
            }
            let expected = match condition {
                Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                    match (ops.len(), ops.get("$eq")) {
                        (1, Some(v)) => v.clone(),
                        _ => {
                            return Err(StoreError::Query(format!(
                                "unsupported condition on {field}"
                            )))
                        }
                    }
                }
                other => other.clone(),
            };
            conditions.push((field.clone(), expected));
        }
        Ok(Self { conditions })
    }

    /// Whether a stored value satisfies every condition. Values that are not
    /// JSON objects never match.
    pub fn matches(&self, raw: &[u8]) -> bool {
        let Ok(Value::Object(doc)) = serde_json::from_slice::<Value>(raw) else {
            return false;
        };
        self.conditions
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_equality() {
        let s = Selector::parse(r#"{"selector":{"docType":"vote","pollID":"p1"}}"#).unwrap();
        assert!(s.matches(br#"{"docType":"vote","pollID":"p1","voterID":"v"}"#));
        assert!(!s.matches(br#"{"docType":"vote","pollID":"p2"}"#));
        assert!(!s.matches(br#"{"docType":"vote"}"#));
    }

    #[test]
    fn eq_operator() {
        let s = Selector::parse(r#"{"selector":{"updated":{"$eq":1}}}"#).unwrap();
        assert!(s.matches(br#"{"updated":1}"#));
        assert!(!s.matches(br#"{"updated":0}"#));
    }

    #[test]
    fn empty_selector_matches_every_object() {
        let s = Selector::parse(r#"{"selector":{}}"#).unwrap();
        assert!(s.matches(br#"{"a":1}"#));
        assert!(!s.matches(b"not json"));
        assert!(!s.matches(b"[1,2]"));
    }

    #[test]
    fn other_options_are_ignored() {
        let s = Selector::parse(r#"{"selector":{"a":1},"use_index":["_design/x"]}"#).unwrap();
        assert!(s.matches(br#"{"a":1}"#));
    }

    #[test]
    fn rejects_malformed_queries() {
        assert!(Selector::parse("nope").is_err());
        assert!(Selector::parse(r#"{"fields":["a"]}"#).is_err());
        assert!(Selector::parse(r#"{"selector":{"a":{"$gt":1}}}"#).is_err());
        assert!(Selector::parse(r#"{"selector":{"$or":[]}}"#).is_err());
    }
}
