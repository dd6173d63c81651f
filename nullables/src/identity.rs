//! Nullable identity verifier: scripted outcomes, no network.

use ourchain_verification::{validate_did, IdentityVerifier, ProofError};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

/// What the scripted verifier answers for an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptedOutcome {
    Granted,
    Mismatch,
    Unreachable,
}

/// Identity verifier answering from a script instead of a remote service.
///
/// Identifiers are validated exactly like the real gate; unscripted
/// identifiers get the default outcome.
pub struct NullIdentityVerifier {
    outcomes: HashMap<String, ScriptedOutcome>,
    default: ScriptedOutcome,
    calls: Mutex<Vec<String>>,
}

impl NullIdentityVerifier {
    /// Refuses every identifier unless scripted otherwise.
    pub fn new() -> Self {
        Self::with_default(ScriptedOutcome::Mismatch)
    }

    pub fn with_default(default: ScriptedOutcome) -> Self {
        Self {
            outcomes: HashMap::new(),
            default,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(mut self, did: &str, outcome: ScriptedOutcome) -> Self {
        self.outcomes.insert(did.to_string(), outcome);
        self
    }

    /// Identifiers checked so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn answer(&self, did: &str) -> Result<bool, ProofError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(did.to_string());
        validate_did(did)?;
        match self.outcomes.get(did).copied().unwrap_or(self.default) {
            ScriptedOutcome::Granted => Ok(true),
            ScriptedOutcome::Mismatch => Err(ProofError::AttributeMismatch(format!(
                "scripted refusal for {did}"
            ))),
            ScriptedOutcome::Unreachable => Err(ProofError::VerifierUnreachable(
                "scripted outage".into(),
            )),
        }
    }
}

impl Default for NullIdentityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityVerifier for NullIdentityVerifier {
    fn verify_identity(&self, did: &str) -> impl Future<Output = Result<bool, ProofError>> + Send {
        std::future::ready(self.answer(did))
    }
}
