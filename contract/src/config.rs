//! Contract configuration with TOML file support.

use ourchain_ledger::VoteKeyScheme;
use ourchain_verification::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ContractError;

/// Configuration for the contract and its collaborators.
///
/// Can be loaded from a TOML file via [`ContractConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Vote key format. Only switch to `delimited` on a fresh ledger.
    #[serde(default)]
    pub vote_key_scheme: VoteKeyScheme,

    /// Require a verified identity proof for the voter before `create-vote`.
    #[serde(default)]
    pub require_voter_proof: bool,

    /// Proof verifier endpoint and required attributes.
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ContractConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ContractError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ContractError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ContractError> {
        toml::from_str(s).map_err(|e| ContractError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ContractConfig is always serializable to TOML")
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            vote_key_scheme: VoteKeyScheme::default(),
            require_voter_proof: false,
            verifier: VerifierConfig::default(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ContractConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = ContractConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.vote_key_scheme, config.vote_key_scheme);
        assert_eq!(parsed.verifier, config.verifier);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ContractConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.vote_key_scheme, VoteKeyScheme::Concatenated);
        assert!(!config.require_voter_proof);
        assert_eq!(config.verifier.required_app_name, "voter");
        assert_eq!(config.verifier.required_app_id, "101");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            vote_key_scheme = "delimited"
            require_voter_proof = true

            [verifier]
            url = "http://127.0.0.1:7997/verify_proof"
        "#;
        let config = ContractConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.vote_key_scheme, VoteKeyScheme::Delimited);
        assert!(config.require_voter_proof);
        assert_eq!(config.verifier.url, "http://127.0.0.1:7997/verify_proof");
        assert_eq!(config.verifier.timeout_secs, 10); // default
    }

    #[test]
    fn unknown_scheme_is_config_error() {
        let err = ContractConfig::from_toml_str(r#"vote_key_scheme = "hashed""#).unwrap_err();
        assert!(matches!(err, ContractError::Config(_)));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ContractConfig::from_toml_file(Path::new("/nonexistent/ourchain.toml"));
        assert!(matches!(result, Err(ContractError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ourchain.toml");
        std::fs::write(&path, "require_voter_proof = true\n").unwrap();
        let config = ContractConfig::from_toml_file(&path).unwrap();
        assert!(config.require_voter_proof);
    }
}
