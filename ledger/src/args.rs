//! Positional invocation arguments parsed into typed requests.

use crate::LedgerError;

/// Fail unless exactly `expected` arguments were supplied.
pub fn expect_count(args: &[String], expected: usize, what: &str) -> Result<(), LedgerError> {
    if args.len() != expected {
        return Err(LedgerError::Validation(format!(
            "incorrect number of arguments, expecting {expected}: {what}"
        )));
    }
    Ok(())
}

fn non_empty<'a>(value: &'a str, name: &str) -> Result<&'a str, LedgerError> {
    if value.is_empty() {
        return Err(LedgerError::Validation(format!(
            "{name} must be a non-empty string"
        )));
    }
    Ok(value)
}

/// Arguments of `create-entry`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub id: String,
    pub hash: String,
    pub application: String,
    pub node_ip: String,
    pub owner: String,
    pub updated: i64,
}

impl NewEntry {
    /// `id, hash, application, nodeIP, owner, updatedFlag`
    pub fn from_args(args: &[String]) -> Result<Self, LedgerError> {
        expect_count(args, 6, "id, hash, application, nodeIP, owner, updated")?;
        let id = non_empty(&args[0], "id")?;
        let hash = non_empty(&args[1], "hash")?;
        let application = non_empty(&args[2], "application")?;
        let node_ip = non_empty(&args[3], "nodeIP")?;
        let owner = non_empty(&args[4], "owner")?;
        let updated = non_empty(&args[5], "updated")?;
        let updated = updated.parse::<i64>().map_err(|_| {
            LedgerError::Validation(format!("updated must be an integer, got {updated:?}"))
        })?;
        Ok(Self {
            id: id.to_string(),
            hash: hash.to_string(),
            application: application.to_string(),
            node_ip: node_ip.to_string(),
            owner: owner.to_string(),
            updated,
        })
    }
}

/// Arguments of `create-vote`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewVote {
    pub poll_id: String,
    pub voter_id: String,
    pub vote_hash: String,
}

impl NewVote {
    /// `pollID, voterID, voteHash`
    pub fn from_args(args: &[String]) -> Result<Self, LedgerError> {
        expect_count(args, 3, "pollID, voterID, voteHash")?;
        Ok(Self {
            poll_id: non_empty(&args[0], "pollID")?.to_string(),
            voter_id: non_empty(&args[1], "voterID")?.to_string(),
            vote_hash: non_empty(&args[2], "voteHash")?.to_string(),
        })
    }
}

/// The single key argument of a read.
pub fn key_arg<'a>(args: &'a [String], what: &str) -> Result<&'a str, LedgerError> {
    expect_count(args, 1, what)?;
    Ok(&args[0])
}

/// Arguments of `replace-vote-hash`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub key: String,
    pub value: String,
}

impl Replacement {
    /// `voteKey, newHash`
    pub fn from_args(args: &[String]) -> Result<Self, LedgerError> {
        expect_count(args, 2, "vote key and new vote hash")?;
        Ok(Self {
            key: args[0].clone(),
            value: args[1].clone(),
        })
    }
}
