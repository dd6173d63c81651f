//! Deterministic storage keys.
//!
//! Entry keys are the entry identifier as given. Vote keys are derived from
//! the poll and voter identifiers. The default scheme concatenates them with
//! no separator, which is what existing ledgers contain; it is ambiguous
//! (`"p" + "1v"` and `"p1" + "v"` collide). New deployments can opt into the
//! delimited scheme, which changes the key format and is not readable by
//! code expecting concatenated keys.

use crate::LedgerError;
use serde::{Deserialize, Serialize};

/// Separator used by [`VoteKeyScheme::Delimited`]. Not permitted inside
/// either identifier under that scheme.
pub const KEY_DELIMITER: char = '\u{0}';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKeyScheme {
    /// `poll_id + voter_id`.
    #[default]
    Concatenated,
    /// `poll_id + U+0000 + voter_id`.
    Delimited,
}

impl VoteKeyScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concatenated => "concatenated",
            Self::Delimited => "delimited",
        }
    }

    /// Derive the vote key for `(poll_id, voter_id)` under this scheme.
    pub fn vote_key(&self, poll_id: &str, voter_id: &str) -> Result<String, LedgerError> {
        match self {
            Self::Concatenated => Ok(vote_key(poll_id, voter_id)),
            Self::Delimited => delimited_vote_key(poll_id, voter_id),
        }
    }
}

/// Storage key of an entry.
pub fn entry_key(id: &str) -> &str {
    id
}

/// Concatenated vote key. Total over any pair of strings.
pub fn vote_key(poll_id: &str, voter_id: &str) -> String {
    let mut key = String::with_capacity(poll_id.len() + voter_id.len());
    key.push_str(poll_id);
    key.push_str(voter_id);
    key
}

/// Delimited vote key. Rejects identifiers containing [`KEY_DELIMITER`].
pub fn delimited_vote_key(poll_id: &str, voter_id: &str) -> Result<String, LedgerError> {
    for (name, part) in [("poll ID", poll_id), ("voter ID", voter_id)] {
        if part.contains(KEY_DELIMITER) {
            return Err(LedgerError::Validation(format!(
                "{name} must not contain U+0000"
            )));
        }
    }
    let mut key = String::with_capacity(poll_id.len() + voter_id.len() + 1);
    key.push_str(poll_id);
    key.push(KEY_DELIMITER);
    key.push_str(voter_id);
    Ok(key)
}
