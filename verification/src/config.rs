//! Proof verifier settings.

use serde::{Deserialize, Serialize};

/// Where the proof verifier lives and what it must attest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Endpoint receiving the proof request.
    #[serde(default = "default_url")]
    pub url: String,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Comma-separated attribute names requested from the verifier.
    #[serde(default = "default_proof_attributes")]
    pub proof_attributes: String,

    /// Value `app_name` must have.
    #[serde(default = "default_app_name")]
    pub required_app_name: String,

    /// Value `app_id` must have.
    #[serde(default = "default_app_id")]
    pub required_app_id: String,
}

fn default_url() -> String {
    "http://10.0.1.14:7997/verify_proof".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_proof_attributes() -> String {
    "app_name,app_id".to_string()
}

fn default_app_name() -> String {
    "voter".to_string()
}

fn default_app_id() -> String {
    "101".to_string()
}

impl VerifierConfig {
    /// Default settings pointed at another endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            proof_attributes: default_proof_attributes(),
            required_app_name: default_app_name(),
            required_app_id: default_app_id(),
        }
    }
}
