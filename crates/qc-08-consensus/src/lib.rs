//! # qc-08-consensus
//!
//! Consensus validation subsystem for Quantum-Chain.
//!
//! ## Architecture
//!
//! Given a candidate block, its parent and the current time, decide whether
//! the block is valid, score it, and list every reason it is not. Nothing is
//! stored between calls.
//!
//! ```text
//! Block ─→ [hash, linkage, timestamp] ─→ [Merkle root] ─→ [transactions]
//!                                                              │
//!                         ValidationResult ←─ [quantum proof] ←┘
//! ```
//!
//! ### Pluggable cryptography
//!
//! The hash function and both signature schemes are `shared-crypto`
//! capability objects picked by [`ValidatorConfig`]. Quantum security proofs
//! default to ML-DSA-44 (FIPS 204) signatures; a classical scheme is
//! refused unless explicitly allowed.
//!
//! ### Fail-soft reports
//!
//! `validate_block` never returns an error and never stops at the first
//! failure. The [`ValidationResult`](shared_types::ValidationResult) lists
//! every error and warning, and `is_valid` is exactly "no errors".
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_08_consensus::{ConsensusApi, ConsensusService, ValidatorConfig};
//! use shared_types::ValidationLevel;
//!
//! let service = ConsensusService::from_config(ValidatorConfig::from_env())?;
//!
//! let result = service.validate_block(&block, Some(&parent), now, ValidationLevel::Enhanced);
//! if !result.is_valid() {
//!     for error in result.errors() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use config::ValidatorConfig;
pub use domain::{
    quantum_proof_message, sign_quantum_proof, BlockValidationConfig, BlockValidator,
    ConsensusError, ConsensusResult, MerkleEngine, MerkleProof, QuantumProofError,
    QuantumProofVerifier, TransactionError, TransactionValidator,
};
pub use ports::{ConsensusApi, FixedTimeSource, SystemTimeSource, TimeSource};
pub use service::{BlockCandidate, ConsensusService};
