//! Block Validation Service - Pure Domain Logic
//!
//! This module contains the consensus rules for a single block. All logic is
//! pure (no I/O, no clock, no shared mutable state); the caller supplies the
//! previous block and the current time.
//!
//! Validation is fail-soft: every check runs, every failure is collected,
//! and a [`ValidationResult`] is always returned.
//!
//! # Point table
//!
//! | Check | Points | Runs at |
//! |---|---|---|
//! | Hash integrity | 20 | all levels |
//! | Chain linkage | 15 | non-genesis |
//! | Timestamp order | 5 | non-genesis |
//! | Genesis identity | 20 | no previous block |
//! | Merkle root | 15 | all levels |
//! | Transaction validity | 15 (10 above the warning threshold) | enhanced, quantum |
//! | Quantum proof | 25 | quantum |
//!
//! Height continuity, future drift and the transaction limit award nothing;
//! they can only add errors.

use crate::domain::merkle::MerkleEngine;
use crate::domain::quantum_proof::QuantumProofVerifier;
use crate::domain::transaction_validation::TransactionValidator;
use rayon::prelude::*;
use shared_crypto::HashFunction;
use shared_types::{
    hash_hex, Block, CheckOutcome, ConsensusCheck, Transaction, ValidationLevel, ValidationResult,
    ZERO_HASH,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// Configuration for block validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockValidationConfig {
    /// Maximum timestamp drift allowed into the future (seconds).
    pub max_future_drift_secs: u64,
    /// Blocks with more transactions are rejected.
    pub max_transactions_per_block: usize,
    /// Minimum share of valid transactions (percent) for the block to pass.
    pub transaction_warning_threshold_percent: u8,
    /// Run the transaction pass on the rayon pool.
    pub parallel_transaction_validation: bool,
}

impl Default for BlockValidationConfig {
    fn default() -> Self {
        Self {
            max_future_drift_secs: 15,
            max_transactions_per_block: 10_000,
            transaction_warning_threshold_percent: 90,
            parallel_transaction_validation: true,
        }
    }
}

/// Error and warning texts shared with callers that match on them.
pub mod messages {
    pub const INVALID_HASH: &str = "Block hash is invalid";
    pub const PREVIOUS_HASH_MISMATCH: &str = "Previous hash does not match previous block hash";
    pub const TIMESTAMP_NOT_AFTER_PREVIOUS: &str =
        "Block timestamp is invalid (not after previous block)";
    pub const MISSING_PREVIOUS_BLOCK: &str =
        "Non-genesis block is missing previous block reference";
    pub const INVALID_MERKLE_ROOT: &str = "Merkle root is invalid";
    pub const NO_QUANTUM_VERIFIER: &str =
        "Quantum validation requested but no quantum proof verifier is configured";
}

/// Accumulates outcomes while the pipeline runs.
#[derive(Default)]
struct Findings {
    checks: Vec<CheckOutcome>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn pass(&mut self, check: ConsensusCheck) {
        debug!(check = check.label(), "check passed");
        self.checks.push(CheckOutcome::pass(check));
    }

    fn fail(&mut self, check: ConsensusCheck, error: impl Into<String>) {
        let error = error.into();
        debug!(check = check.label(), %error, "check failed");
        self.checks.push(CheckOutcome::fail(check));
        self.errors.push(error);
    }

    fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        debug!(%warning, "validation warning");
        self.warnings.push(warning);
    }
}

/// Pure domain service for block validation.
///
/// Holds only read-only collaborators; one instance can be shared across
/// threads and used for any number of concurrent validations.
#[derive(Clone, Debug)]
pub struct BlockValidator {
    hasher: Arc<dyn HashFunction>,
    merkle: MerkleEngine,
    transactions: TransactionValidator,
    quantum: Option<QuantumProofVerifier>,
    config: BlockValidationConfig,
}

impl BlockValidator {
    /// Create a block validator.
    ///
    /// Without a quantum verifier, `quantum` level validation reports an
    /// error for every block.
    pub fn new(
        hasher: Arc<dyn HashFunction>,
        transactions: TransactionValidator,
        quantum: Option<QuantumProofVerifier>,
        config: BlockValidationConfig,
    ) -> Self {
        Self {
            merkle: MerkleEngine::new(hasher.clone()),
            hasher,
            transactions,
            quantum,
            config,
        }
    }

    pub fn merkle(&self) -> &MerkleEngine {
        &self.merkle
    }

    pub fn transactions(&self) -> &TransactionValidator {
        &self.transactions
    }

    pub fn config(&self) -> &BlockValidationConfig {
        &self.config
    }

    /// Validate `block` against its parent.
    ///
    /// # Arguments
    /// * `previous` - Parent block; `None` only for genesis
    /// * `current_timestamp` - Unix seconds the block is judged against
    /// * `level` - Which optional checks run
    pub fn validate_block(
        &self,
        block: &Block,
        previous: Option<&Block>,
        current_timestamp: u64,
        level: ValidationLevel,
    ) -> ValidationResult {
        let mut findings = Findings::default();

        self.check_hash(block, &mut findings);
        match previous {
            Some(previous) => self.check_parent(block, previous, &mut findings),
            None => self.check_genesis(block, &mut findings),
        }
        self.check_drift(block, current_timestamp, &mut findings);
        self.check_merkle_root(block, &mut findings);
        self.check_transaction_limit(block, &mut findings);
        self.check_declared_totals(block, &mut findings);

        if level.checks_transactions() {
            self.check_transaction_validity(block, &mut findings);
        }
        if level.checks_quantum_proof() {
            self.check_quantum_proof(block, &mut findings);
        }

        ValidationResult::new(
            level,
            current_timestamp,
            block.header.height,
            block.hash,
            findings.checks,
            findings.errors,
            findings.warnings,
        )
    }

    fn check_hash(&self, block: &Block, findings: &mut Findings) {
        let computed = block.header.compute_hash(self.hasher.as_ref());
        if computed == block.hash {
            findings.pass(ConsensusCheck::HashIntegrity);
        } else {
            findings.fail(ConsensusCheck::HashIntegrity, messages::INVALID_HASH);
        }
    }

    fn check_parent(&self, block: &Block, previous: &Block, findings: &mut Findings) {
        if block.header.previous_hash == previous.hash {
            findings.pass(ConsensusCheck::ChainLinkage);
        } else {
            findings.fail(
                ConsensusCheck::ChainLinkage,
                messages::PREVIOUS_HASH_MISMATCH,
            );
        }

        if block.header.timestamp > previous.header.timestamp {
            findings.pass(ConsensusCheck::TimestampOrder);
        } else {
            findings.fail(
                ConsensusCheck::TimestampOrder,
                messages::TIMESTAMP_NOT_AFTER_PREVIOUS,
            );
        }

        let expected = previous.header.height.checked_add(1);
        if expected == Some(block.header.height) {
            findings.pass(ConsensusCheck::HeightContinuity);
        } else {
            findings.fail(
                ConsensusCheck::HeightContinuity,
                format!(
                    "Non-sequential block height: expected {}, got {}",
                    previous.header.height.saturating_add(1),
                    block.header.height
                ),
            );
        }
    }

    fn check_genesis(&self, block: &Block, findings: &mut Findings) {
        if !block.is_genesis() {
            findings.fail(
                ConsensusCheck::GenesisIdentity,
                messages::MISSING_PREVIOUS_BLOCK,
            );
            return;
        }

        findings.pass(ConsensusCheck::GenesisIdentity);
        if block.header.previous_hash != ZERO_HASH {
            findings.warn(format!(
                "Genesis block has non-zero previous hash {}",
                hash_hex(&block.header.previous_hash)
            ));
        }
    }

    fn check_drift(&self, block: &Block, current_timestamp: u64, findings: &mut Findings) {
        let max_allowed = current_timestamp.saturating_add(self.config.max_future_drift_secs);
        if block.header.timestamp <= max_allowed {
            findings.pass(ConsensusCheck::TimestampDrift);
        } else {
            findings.fail(
                ConsensusCheck::TimestampDrift,
                format!(
                    "Block timestamp {} is {} seconds in the future (max allowed: {})",
                    block.header.timestamp,
                    block.header.timestamp - current_timestamp,
                    self.config.max_future_drift_secs
                ),
            );
        }
    }

    fn check_merkle_root(&self, block: &Block, findings: &mut Findings) {
        if self.merkle.calculate_block_root(block) == block.header.merkle_root {
            findings.pass(ConsensusCheck::MerkleRoot);
        } else {
            findings.fail(ConsensusCheck::MerkleRoot, messages::INVALID_MERKLE_ROOT);
        }
    }

    fn check_transaction_limit(&self, block: &Block, findings: &mut Findings) {
        let count = block.transactions.len();
        if count <= self.config.max_transactions_per_block {
            findings.pass(ConsensusCheck::TransactionLimit);
        } else {
            findings.fail(
                ConsensusCheck::TransactionLimit,
                format!(
                    "Block has {} transactions (max allowed: {})",
                    count, self.config.max_transactions_per_block
                ),
            );
        }
    }

    /// Producer-declared values that are not committed to by the hash.
    fn check_declared_totals(&self, block: &Block, findings: &mut Findings) {
        if block.has_duplicate_transaction_ids() {
            findings.warn("Block contains duplicate transaction ids");
        }

        let fees = block.fee_sum();
        if block.total_fees != fees {
            findings.warn(format!(
                "Declared total fees {} do not match transaction fees {}",
                block.total_fees, fees
            ));
        }

        let size = block.encoded_size();
        if block.size_bytes != size {
            findings.warn(format!(
                "Declared size {} bytes does not match encoded size {} bytes",
                block.size_bytes, size
            ));
        }
    }

    /// Count of transactions passing the transaction validator.
    pub fn count_valid_transactions(&self, block: &Block) -> usize {
        let is_valid = |tx: &Transaction| match self.transactions.check(tx) {
            Ok(()) => true,
            Err(error) => {
                trace!(tx_id = %hash_hex(&tx.id), %error, "transaction failed validation");
                false
            }
        };

        let transactions = &block.transactions;
        if self.config.parallel_transaction_validation {
            transactions.par_iter().filter(|tx| is_valid(tx)).count()
        } else {
            transactions.iter().filter(|tx| is_valid(tx)).count()
        }
    }

    fn check_transaction_validity(&self, block: &Block, findings: &mut Findings) {
        let total = block.transactions.len();
        let valid = self.count_valid_transactions(block);
        let check = ConsensusCheck::TransactionValidity;

        if valid == total {
            findings.pass(check);
            return;
        }

        let valid_percent = valid as f64 * 100.0 / total as f64;
        let threshold = self.config.transaction_warning_threshold_percent as u64;
        // Integer comparison; no rounding at the boundary
        if (valid as u64).saturating_mul(100) >= (total as u64).saturating_mul(threshold) {
            debug!(check = check.label(), valid, total, "partial credit");
            findings.checks.push(CheckOutcome::partial(check, 10));
            findings.warn(format!(
                "{:.1}% of transactions are invalid ({} of {})",
                100.0 - valid_percent,
                total - valid,
                total
            ));
        } else {
            findings.fail(
                check,
                format!(
                    "Only {:.1}% of transactions are valid ({} of {}, minimum {}%)",
                    valid_percent, valid, total, threshold
                ),
            );
        }
    }

    fn check_quantum_proof(&self, block: &Block, findings: &mut Findings) {
        let check = ConsensusCheck::QuantumProof;
        let Some(verifier) = &self.quantum else {
            findings.fail(check, messages::NO_QUANTUM_VERIFIER);
            return;
        };

        match verifier.check(&block.hash, block.quantum_security_proof.as_deref()) {
            Ok(()) => findings.pass(check),
            Err(error) => findings.fail(check, error.to_string()),
        }
    }
}
