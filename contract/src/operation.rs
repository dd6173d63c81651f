//! The closed set of invocable operations.

use crate::ContractError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Init,
    CreateEntry,
    ReadEntry,
    CreateVote,
    ReadVote,
    ReplaceVoteHash,
    QueryVotesByPoll,
    QueryVotesByVoter,
    QueryVotes,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Self::Init,
        Self::CreateEntry,
        Self::ReadEntry,
        Self::CreateVote,
        Self::ReadVote,
        Self::ReplaceVoteHash,
        Self::QueryVotesByPoll,
        Self::QueryVotesByVoter,
        Self::QueryVotes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateEntry => "create-entry",
            Self::ReadEntry => "read-entry",
            Self::CreateVote => "create-vote",
            Self::ReadVote => "read-vote",
            Self::ReplaceVoteHash => "replace-vote-hash",
            Self::QueryVotesByPoll => "query-votes-by-poll",
            Self::QueryVotesByVoter => "query-votes-by-voter",
            Self::QueryVotes => "query-votes",
        }
    }

    /// Function name used by clients of the earlier deployment.
    pub fn legacy_name(&self) -> Option<&'static str> {
        match self {
            Self::Init => None,
            Self::CreateEntry => Some("initentry"),
            Self::ReadEntry => Some("readentry"),
            Self::CreateVote => Some("initVote"),
            Self::ReadVote => Some("getVote"),
            Self::ReplaceVoteHash => Some("changeVote"),
            Self::QueryVotesByPoll => Some("queryVotesByPoll"),
            Self::QueryVotesByVoter => Some("queryVotesByVoter"),
            Self::QueryVotes => Some("queryVotes"),
        }
    }

    /// Whether the operation writes ledger state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::CreateEntry | Self::CreateVote | Self::ReplaceVoteHash
        )
    }
}

impl FromStr for Operation {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s || op.legacy_name() == Some(s))
            .ok_or_else(|| ContractError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
