//! Create-once record store over the ledger host.

use crate::args::{NewEntry, NewVote};
use crate::keys::{entry_key, VoteKeyScheme};
use crate::LedgerError;
use ourchain_store::LedgerHost;
use ourchain_types::{codec, Entry, MutableRecord, Vote};

/// Record operations for one invocation.
///
/// Holds configuration only; every call reads and writes through the host
/// handle it is given. On any error path nothing is written.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordStore {
    scheme: VoteKeyScheme,
}

impl RecordStore {
    pub fn new(scheme: VoteKeyScheme) -> Self {
        Self { scheme }
    }

    /// Store a new entry under its identifier. Returns the key.
    pub fn create_entry<H: LedgerHost + ?Sized>(
        &self,
        host: &H,
        new: &NewEntry,
    ) -> Result<String, LedgerError> {
        let key = entry_key(&new.id).to_string();
        let entry = Entry::new(
            new.id.as_str(),
            new.hash.as_str(),
            new.application.as_str(),
            new.node_ip.as_str(),
            new.owner.as_str(),
            new.updated,
        );
        let bytes = codec::encode(&entry).map_err(|e| LedgerError::encode(&key, e))?;
        create_once(host, &key, &bytes)?;
        tracing::info!(key = %key, owner = %entry.owner, "entry created");
        Ok(key)
    }

    /// Store a new vote under its derived key. Returns the key.
    pub fn create_vote<H: LedgerHost + ?Sized>(
        &self,
        host: &H,
        new: &NewVote,
    ) -> Result<String, LedgerError> {
        let key = self.scheme.vote_key(&new.poll_id, &new.voter_id)?;
        let vote = Vote::new(
            new.poll_id.as_str(),
            new.voter_id.as_str(),
            new.vote_hash.as_str(),
        );
        let bytes = codec::encode(&vote).map_err(|e| LedgerError::encode(&key, e))?;
        create_once(host, &key, &bytes)?;
        tracing::info!(key = %key, poll = %vote.poll_id, "vote created");
        Ok(key)
    }

    /// Return the stored bytes at `key` exactly as the host holds them.
    pub fn read<H: LedgerHost + ?Sized>(&self, host: &H, key: &str) -> Result<Vec<u8>, LedgerError> {
        host.get_state(key)
            .map_err(|e| LedgerError::host(key, e))?
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))
    }

    /// Decode the record at `key`, replace its mutable field, write it back.
    /// Returns the newly stored bytes.
    pub fn replace_mutable_field<R, H>(
        &self,
        host: &H,
        key: &str,
        value: &str,
    ) -> Result<Vec<u8>, LedgerError>
    where
        R: MutableRecord,
        H: LedgerHost + ?Sized,
    {
        let current = self.read(host, key)?;
        let mut record: R = codec::decode(&current).map_err(|e| LedgerError::decode(key, e))?;
        record.replace_mutable_field(value.to_string());
        let bytes = codec::encode(&record).map_err(|e| LedgerError::encode(key, e))?;
        host.put_state(key, &bytes)
            .map_err(|e| LedgerError::host(key, e))?;
        tracing::info!(key = %key, doc_type = %R::DOC_TYPE, "record updated");
        Ok(bytes)
    }

    pub fn replace_vote_hash<H: LedgerHost + ?Sized>(
        &self,
        host: &H,
        key: &str,
        new_hash: &str,
    ) -> Result<Vec<u8>, LedgerError> {
        self.replace_mutable_field::<Vote, H>(host, key, new_hash)
    }
}

fn create_once<H: LedgerHost + ?Sized>(
    host: &H,
    key: &str,
    bytes: &[u8],
) -> Result<(), LedgerError> {
    let existing = host.get_state(key).map_err(|e| LedgerError::host(key, e))?;
    if existing.is_some() {
        return Err(LedgerError::AlreadyExists(key.to_string()));
    }
    host.put_state(key, bytes)
        .map_err(|e| LedgerError::host(key, e))
}
