//! Canonical JSON encoding for ledger records.

use crate::error::CodecError;
use crate::record::Record;
use serde_json::ser::Formatter;
use std::io;

/// Compact formatter that additionally escapes `<`, `>`, `&`, U+2028 and
/// U+2029, matching the bytes already written to existing ledgers.
struct LedgerFormatter;

impl Formatter for LedgerFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escape = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Encode a record to its on-ledger bytes.
///
/// Output is stable: the same logical record always yields the same bytes.
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, LedgerFormatter);
    record
        .serialize(&mut ser)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Decode on-ledger bytes into a record.
///
/// Fails if the bytes are not JSON, a required field is missing, or the
/// `docType` tag belongs to another record type. Unknown fields are ignored.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, CodecError> {
    let record: R =
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
    if record.doc_type() != R::DOC_TYPE {
        return Err(CodecError::Decode(format!(
            "expected docType \"{}\", found \"{}\"",
            R::DOC_TYPE,
            record.doc_type()
        )));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Entry, Vote};

    #[test]
    fn entry_encodes_in_fixed_field_order() {
        let entry = Entry::new("id1", "h1", "app1", "10.0.0.1", "alice", 1);
        let bytes = encode(&entry).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"docType":"entry","id":"id1","hash":"h1","application":"app1","nodeIP":"10.0.0.1","owner":"alice","updated":1}"#
        );
    }

    #[test]
    fn vote_encodes_in_fixed_field_order() {
        let vote = Vote::new("poll1", "voter1", "abc123");
        let bytes = encode(&vote).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"docType":"vote","pollID":"poll1","voterID":"voter1","voteHash":"abc123"}"#
        );
    }

    #[test]
    fn encoding_is_stable_across_calls() {
        let vote = Vote::new("p", "v", "h");
        assert_eq!(encode(&vote).unwrap(), encode(&vote.clone()).unwrap());
    }

    #[test]
    fn html_sensitive_characters_are_escaped() {
        let entry = Entry::new("<a&b>", "h", "app", "node", "o\u{2028}x\u{2029}", 0);
        let text = String::from_utf8(encode(&entry).unwrap()).unwrap();
        assert!(text.contains(r#""id":"\u003ca\u0026b\u003e""#));
        assert!(text.contains(r#""owner":"o\u2028x\u2029""#));
        let back: Entry = decode(text.as_bytes()).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn standard_escapes_still_apply() {
        let vote = Vote::new("p\"1", "v\\1", "line\nbreak");
        let text = String::from_utf8(encode(&vote).unwrap()).unwrap();
        assert_eq!(
            text,
            r#"{"docType":"vote","pollID":"p\"1","voterID":"v\\1","voteHash":"line\nbreak"}"#
        );
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = decode::<Vote>(b"not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode::<Vote>(br#"{"docType":"vote","pollID":"p","voterID":"v"}"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn decode_rejects_foreign_doc_type() {
        let err = decode::<Vote>(
            br#"{"docType":"entry","pollID":"p","voterID":"v","voteHash":"h"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Decode(ref m) if m.contains("expected docType")));
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let vote: Vote = decode(
            br#"{"docType":"vote","pollID":"p","voterID":"v","voteHash":"h","extra":true}"#,
        )
        .unwrap();
        assert_eq!(vote, Vote::new("p", "v", "h"));
    }

    #[test]
    fn decode_rejects_non_numeric_update_flag() {
        let err = decode::<Entry>(
            br#"{"docType":"entry","id":"i","hash":"h","application":"a","nodeIP":"n","owner":"o","updated":"1"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
