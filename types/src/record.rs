//! Entry and vote records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Object type tag written into the `docType` field of every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Entry,
    Vote,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Vote => "vote",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type with a fixed `docType` tag.
pub trait Record: Serialize + DeserializeOwned {
    const DOC_TYPE: DocType;

    /// The tag carried by this value (may differ from `DOC_TYPE` after a
    /// lenient deserialization; the codec rejects that case).
    fn doc_type(&self) -> DocType;
}

/// A record with exactly one field that may change after creation.
pub trait MutableRecord: Record {
    fn replace_mutable_field(&mut self, value: String);
}

/// Metadata entry registered by an application node.
///
/// Entries are write-once: there is no path that modifies a stored entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "docType")]
    pub doc_type: DocType,
    /// Globally unique identifier, also the storage key.
    pub id: String,
    /// Content hash of the registered artifact.
    pub hash: String,
    /// Name of the participating application.
    pub application: String,
    /// Address of the node that created the entry.
    #[serde(rename = "nodeIP")]
    pub node_ip: String,
    /// Owner identity (username).
    pub owner: String,
    /// 0 = stale, 1 = current.
    pub updated: i64,
}

impl Entry {
    pub fn new(
        id: impl Into<String>,
        hash: impl Into<String>,
        application: impl Into<String>,
        node_ip: impl Into<String>,
        owner: impl Into<String>,
        updated: i64,
    ) -> Self {
        Self {
            doc_type: DocType::Entry,
            id: id.into(),
            hash: hash.into(),
            application: application.into(),
            node_ip: node_ip.into(),
            owner: owner.into(),
            updated,
        }
    }
}

impl Record for Entry {
    const DOC_TYPE: DocType = DocType::Entry;

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}

/// A single voter's ballot reference in a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "docType")]
    pub doc_type: DocType,
    #[serde(rename = "pollID")]
    pub poll_id: String,
    #[serde(rename = "voterID")]
    pub voter_id: String,
    /// Opaque digest of the off-ledger ballot reference plus salt.
    #[serde(rename = "voteHash")]
    pub vote_hash: String,
}

impl Vote {
    pub fn new(
        poll_id: impl Into<String>,
        voter_id: impl Into<String>,
        vote_hash: impl Into<String>,
    ) -> Self {
        Self {
            doc_type: DocType::Vote,
            poll_id: poll_id.into(),
            voter_id: voter_id.into(),
            vote_hash: vote_hash.into(),
        }
    }
}

impl Record for Vote {
    const DOC_TYPE: DocType = DocType::Vote;

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}

impl MutableRecord for Vote {
    fn replace_mutable_field(&mut self, value: String) {
        self.vote_hash = value;
    }
}
