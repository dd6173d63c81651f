//! HTTP client for the external proof verifier.

use crate::config::VerifierConfig;
use crate::error::ProofError;
use crate::method::IdentityVerifier;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Required identifier length, in bytes.
pub const DID_LENGTH: usize = 22;

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Request body: `{"proof_attr": "...", "their_did": "..."}`.
#[derive(Serialize)]
struct ProofRequest<'a> {
    proof_attr: &'a str,
    their_did: &'a str,
}

/// Raw JSON response from the verifier.
///
/// The API contract: `{"status": "true"|..., "attributes": {"app_name": ..., "app_id": ...}}`.
/// Missing fields read as empty strings and so fail the attribute check
/// rather than the decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VerifierResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub attributes: ProofAttributes,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProofAttributes {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub app_id: String,
}

/// Reject identifiers that are empty or not exactly [`DID_LENGTH`] bytes.
pub fn validate_did(did: &str) -> Result<(), ProofError> {
    if did.is_empty() {
        return Err(ProofError::Validation("empty DID received".into()));
    }
    let len = did.len();
    if len != DID_LENGTH {
        return Err(ProofError::Validation(format!(
            "DID must be {DID_LENGTH} bytes, got {len}"
        )));
    }
    Ok(())
}

/// Accept only an affirmative status with both required attribute values.
pub fn check_response(
    response: &VerifierResponse,
    config: &VerifierConfig,
) -> Result<(), ProofError> {
    if response.status != "true" {
        return Err(ProofError::AttributeMismatch(format!(
            "verifier status {:?}, attributes missing",
            response.status
        )));
    }
    let attrs = &response.attributes;
    if attrs.app_name != config.required_app_name || attrs.app_id != config.required_app_id {
        return Err(ProofError::AttributeMismatch(format!(
            "attribute values didn't match (app_name={:?}, app_id={:?})",
            attrs.app_name, attrs.app_id
        )));
    }
    Ok(())
}

/// Gate that consults the proof verifier over HTTP.
pub struct ProofGate {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    config: VerifierConfig,
}

impl ProofGate {
    pub fn new(config: VerifierConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            config,
        }
    }

    /// Check that `did` holds the required attributes.
    ///
    /// `POST {url}` with a `text/plain` JSON body. Returns `Ok(true)` only
    /// when the call succeeds with 200, the body decodes, the status is
    /// `"true"` and both attributes match.
    pub async fn verify_identity_proof(&self, did: &str) -> Result<bool, ProofError> {
        validate_did(did)?;

        let body = serde_json::to_vec(&ProofRequest {
            proof_attr: &self.config.proof_attributes,
            their_did: did,
        })
        .expect("proof request is always serializable");

        let response = self
            .http_client
            .post(&self.config.url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProofError::VerifierUnreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    ProofError::VerifierUnreachable(format!("connection failed: {e}"))
                } else {
                    ProofError::VerifierUnreachable(e.to_string())
                }
            })?;

        if response.status() != StatusCode::OK {
            return Err(ProofError::VerifierUnreachable(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ProofError::VerifierUnreachable(format!("failed to read response body: {e}"))
        })?;
        let parsed: VerifierResponse =
            serde_json::from_slice(&bytes).map_err(|e| ProofError::Decode(e.to_string()))?;

        check_response(&parsed, &self.config)?;
        tracing::debug!(did, "identity proof accepted");
        Ok(true)
    }

    /// Like [`Self::verify_identity_proof`] but folds every failure into `false`.
    pub async fn is_granted(&self, did: &str) -> bool {
        match self.verify_identity_proof(did).await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::warn!(did, "identity proof refused: {e}");
                false
            }
        }
    }
}

impl Default for ProofGate {
    fn default() -> Self {
        Self::new(VerifierConfig::default())
    }
}

impl IdentityVerifier for ProofGate {
    fn verify_identity(&self, did: &str) -> impl Future<Output = Result<bool, ProofError>> + Send {
        self.verify_identity_proof(did)
    }
}
