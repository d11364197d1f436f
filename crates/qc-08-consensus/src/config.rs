//! # Validator Configuration
//!
//! Process-wide, read-only settings loaded once at startup: which hash
//! function and signature schemes the chain uses, the quantum proof key,
//! and the pipeline limits.

use crate::domain::{BlockValidationConfig, ConsensusError, ConsensusResult};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_crypto::{HashAlgorithm, SignatureAlgorithm};
use shared_types::ValidationLevel;
use std::env;
use std::str::FromStr;

/// Consensus validator configuration.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Hash for block hashes, transaction ids and Merkle nodes.
    pub hash_algorithm: HashAlgorithm,

    /// Scheme transactions are signed with.
    pub transaction_signature_algorithm: SignatureAlgorithm,

    /// Scheme quantum security proofs are signed with.
    pub quantum_signature_algorithm: SignatureAlgorithm,

    /// Chain-level proof key. Without it, quantum level validation fails.
    #[serde_as(as = "Option<Hex>")]
    pub quantum_public_key: Option<Vec<u8>>,

    /// Refuse a classical `quantum_signature_algorithm`.
    pub require_post_quantum_proofs: bool,

    /// Level used when a caller does not pick one.
    pub default_validation_level: ValidationLevel,

    /// Maximum timestamp drift allowed into the future (seconds).
    pub max_future_drift_secs: u64,

    pub max_transactions_per_block: usize,

    /// Minimum share of valid transactions (percent).
    pub transaction_warning_threshold_percent: u8,

    pub parallel_transaction_validation: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let block = BlockValidationConfig::default();
        Self {
            hash_algorithm: HashAlgorithm::Sha256,
            transaction_signature_algorithm: SignatureAlgorithm::Ed25519,
            quantum_signature_algorithm: SignatureAlgorithm::MlDsa44,
            quantum_public_key: None,
            require_post_quantum_proofs: true,
            default_validation_level: ValidationLevel::Standard,
            max_future_drift_secs: block.max_future_drift_secs,
            max_transactions_per_block: block.max_transactions_per_block,
            transaction_warning_threshold_percent: block.transaction_warning_threshold_percent,
            parallel_transaction_validation: block.parallel_transaction_validation,
        }
    }
}

impl ValidatorConfig {
    /// Create a config for testing (sequential, small blocks).
    pub fn for_testing() -> Self {
        Self {
            max_transactions_per_block: 100,
            parallel_transaction_validation: false,
            ..Self::default()
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConsensusResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_HASH_ALGORITHM`: sha256, sha3-256 or blake3 (default: sha256)
    /// - `QC_TX_SIGNATURE_SCHEME`: transaction scheme (default: ed25519)
    /// - `QC_QUANTUM_SIGNATURE_SCHEME`: proof scheme (default: ml-dsa-44)
    /// - `QC_QUANTUM_PUBLIC_KEY`: hex proof public key (default: none)
    /// - `QC_REQUIRE_PQ_PROOFS`: refuse classical proof schemes (default: true)
    /// - `QC_VALIDATION_LEVEL`: standard, enhanced or quantum (default: standard)
    /// - `QC_MAX_FUTURE_DRIFT_SECS`: (default: 15)
    /// - `QC_MAX_TXS_PER_BLOCK`: (default: 10000)
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|v| v.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            hash_algorithm: parsed(lookup("QC_HASH_ALGORITHM")).unwrap_or(defaults.hash_algorithm),
            transaction_signature_algorithm: parsed(lookup("QC_TX_SIGNATURE_SCHEME"))
                .unwrap_or(defaults.transaction_signature_algorithm),
            quantum_signature_algorithm: parsed(lookup("QC_QUANTUM_SIGNATURE_SCHEME"))
                .unwrap_or(defaults.quantum_signature_algorithm),
            quantum_public_key: lookup("QC_QUANTUM_PUBLIC_KEY")
                .and_then(|v| hex::decode(v.trim().trim_start_matches("0x")).ok())
                .filter(|key| !key.is_empty()),
            require_post_quantum_proofs: lookup("QC_REQUIRE_PQ_PROOFS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.require_post_quantum_proofs),
            default_validation_level: parsed(lookup("QC_VALIDATION_LEVEL"))
                .unwrap_or(defaults.default_validation_level),
            max_future_drift_secs: parsed(lookup("QC_MAX_FUTURE_DRIFT_SECS"))
                .unwrap_or(defaults.max_future_drift_secs),
            max_transactions_per_block: parsed(lookup("QC_MAX_TXS_PER_BLOCK"))
                .unwrap_or(defaults.max_transactions_per_block),
            ..defaults
        }
    }

    /// Reject settings the validator cannot run with.
    pub fn validate(&self) -> ConsensusResult<()> {
        if self.transaction_warning_threshold_percent > 100 {
            return Err(ConsensusError::InvalidConfig(format!(
                "transactionWarningThresholdPercent must be at most 100, got {}",
                self.transaction_warning_threshold_percent
            )));
        }
        if self.max_transactions_per_block == 0 {
            return Err(ConsensusError::InvalidConfig(
                "maxTransactionsPerBlock must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The pipeline limits, as the domain layer takes them.
    pub fn block_validation(&self) -> BlockValidationConfig {
        BlockValidationConfig {
            max_future_drift_secs: self.max_future_drift_secs,
            max_transactions_per_block: self.max_transactions_per_block,
            transaction_warning_threshold_percent: self.transaction_warning_threshold_percent,
            parallel_transaction_validation: self.parallel_transaction_validation,
        }
    }
}
