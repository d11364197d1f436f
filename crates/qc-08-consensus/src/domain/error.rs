//! Error types for the Consensus subsystem
//!
//! Validation itself never fails with an error: every rejection reason ends
//! up as a string in the `ValidationResult`. These types cover the narrower
//! places where a `Result` is the right shape: building the validator from
//! configuration, and the fail-fast single-item checks.

use shared_crypto::{CryptoError, SignatureAlgorithm};

/// Configuration and construction errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("Quantum proofs require a post-quantum scheme, got {0}")]
    ClassicalProofScheme(SignatureAlgorithm),

    #[error("Quantum proof public key is invalid: {0}")]
    InvalidQuantumKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for consensus construction
pub type ConsensusResult<T> = Result<T, ConsensusError>;

/// Why a single transaction is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error("Transaction id is missing")]
    MissingId,

    #[error("Transaction sender is missing")]
    MissingSender,

    #[error("Transaction recipient is missing")]
    MissingRecipient,

    #[error("Transaction amount is missing")]
    MissingAmount,

    #[error("Transaction signature is missing")]
    MissingSignature,

    #[error("Transaction id does not match its contents")]
    IdMismatch,

    #[error("Transaction signature is invalid: {0}")]
    InvalidSignature(#[source] CryptoError),
}

/// Why a quantum security proof was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantumProofError {
    #[error("Block is missing quantum security proof")]
    Missing,

    #[error("Quantum security proof is invalid: {0}")]
    Invalid(#[source] CryptoError),
}
