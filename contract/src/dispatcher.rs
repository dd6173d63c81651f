//! Operation routing.

use ourchain_ledger::args::{key_arg, NewEntry, NewVote, Replacement};
use ourchain_ledger::{query, LedgerError, RecordStore};
use ourchain_store::LedgerHost;
use ourchain_verification::{IdentityVerifier, ProofError};

use crate::{ContractConfig, ContractError, Operation, Response};

/// The contract: stateless apart from its configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Contract {
    records: RecordStore,
    require_voter_proof: bool,
}

impl Contract {
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            records: RecordStore::new(config.vote_key_scheme),
            require_voter_proof: config.require_voter_proof,
        }
    }

    /// Run one invocation without a proof gate.
    ///
    /// When the contract requires voter proofs, `create-vote` fails here;
    /// use [`Contract::invoke_gated`] instead.
    pub fn invoke<H: LedgerHost + ?Sized>(&self, host: &H, function: &str, args: &[String]) -> Response {
        let result = function.parse::<Operation>().and_then(|op| {
            if op == Operation::CreateVote && self.require_voter_proof {
                return Err(ProofError::VerifierUnreachable(
                    "no identity verifier configured for this invocation".to_string(),
                )
                .into());
            }
            self.execute(host, op, args)
        });
        respond(function, result)
    }

    /// Run one invocation, consulting `verifier` first where the
    /// configuration requires a proof.
    pub async fn invoke_gated<H, V>(
        &self,
        host: &H,
        verifier: &V,
        function: &str,
        args: &[String],
    ) -> Response
    where
        H: LedgerHost + ?Sized,
        V: IdentityVerifier,
    {
        let result = match function.parse::<Operation>() {
            Ok(op) => self.execute_gated(host, verifier, op, args).await,
            Err(e) => Err(e),
        };
        respond(function, result)
    }

    pub async fn execute_gated<H, V>(
        &self,
        host: &H,
        verifier: &V,
        op: Operation,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError>
    where
        H: LedgerHost + ?Sized,
        V: IdentityVerifier,
    {
        if op == Operation::CreateVote && self.require_voter_proof {
            let new = NewVote::from_args(args)?;
            if !verifier.verify_identity(&new.voter_id).await? {
                return Err(ProofError::AttributeMismatch(format!(
                    "voter {} holds no valid proof",
                    new.voter_id
                ))
                .into());
            }
        }
        self.execute(host, op, args)
    }

    /// Run an already-resolved operation against the host.
    pub fn execute<H: LedgerHost + ?Sized>(
        &self,
        host: &H,
        op: Operation,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        let payload = match op {
            Operation::Init => Vec::new(),
            Operation::CreateEntry => {
                let new = NewEntry::from_args(args)?;
                self.records.create_entry(host, &new)?;
                Vec::new()
            }
            Operation::ReadEntry => {
                let key = key_arg(args, "entry id")?;
                self.records.read(host, key)?
            }
            Operation::CreateVote => {
                let new = NewVote::from_args(args)?;
                self.records.create_vote(host, &new)?;
                Vec::new()
            }
            Operation::ReadVote => {
                let key = key_arg(args, "vote key")?;
                self.records.read(host, key)?
            }
            Operation::ReplaceVoteHash => {
                let replacement = Replacement::from_args(args)?;
                self.records
                    .replace_vote_hash(host, &replacement.key, &replacement.value)?
            }
            Operation::QueryVotesByPoll => {
                let poll_id = key_arg(args, "poll id")?;
                query::query_votes_by_poll(host, poll_id)?
            }
            Operation::QueryVotesByVoter => {
                let voter_id = key_arg(args, "voter id")?;
                query::query_votes_by_voter(host, voter_id)?
            }
            Operation::QueryVotes => {
                let selector = args.first().ok_or_else(|| {
                    LedgerError::Validation(
                        "incorrect number of arguments, expecting at least 1: query string"
                            .to_string(),
                    )
                })?;
                query::execute(host, selector)?
            }
        };
        Ok(payload)
    }
}

fn respond(function: &str, result: Result<Vec<u8>, ContractError>) -> Response {
    match &result {
        Ok(payload) => {
            tracing::debug!(operation = function, bytes = payload.len(), "invocation succeeded")
        }
        Err(e @ ContractError::Proof(_)) => {
            tracing::warn!(operation = function, kind = %e.kind(), "proof rejected: {e}")
        }
        Err(e) => tracing::debug!(operation = function, kind = %e.kind(), "invocation failed: {e}"),
    }
    Response::from(result)
}
