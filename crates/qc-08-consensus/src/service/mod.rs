//! Consensus Service - Application facade
//!
//! Wires the configured hash function and signature schemes into the
//! domain validators once, then serves every [`ConsensusApi`] call from that
//! read-only state.
//!
//! # Architecture
//! - Crypto chosen by [`ValidatorConfig`], injected as capability objects
//! - No interior mutability: share one `Arc<ConsensusService>` across threads
//! - Logging and metrics live here, the domain layer only emits `debug!`

use crate::config::ValidatorConfig;
use crate::domain::{
    BlockValidator, ConsensusError, ConsensusResult, MerkleProof, QuantumProofVerifier,
    TransactionValidator,
};
use crate::ports::{ConsensusApi, SystemTimeSource, TimeSource};
use rayon::prelude::*;
use shared_crypto::{hash_function, signature_scheme};
use shared_types::{
    hash_hex, Block, Hash, Transaction, TransactionValidationResult, ValidationLevel,
    ValidationResult,
};
use std::time::Instant;
use tracing::{info, warn};

/// A block paired with the parent it must extend.
#[derive(Clone, Copy, Debug)]
pub struct BlockCandidate<'a> {
    pub block: &'a Block,
    pub previous: Option<&'a Block>,
}

/// Consensus Service
pub struct ConsensusService {
    validator: BlockValidator,
    config: ValidatorConfig,
    time_source: Box<dyn TimeSource>,
}

impl ConsensusService {
    /// Build the service from configuration.
    ///
    /// Fails on invalid limits, and on a classical proof scheme when
    /// post-quantum proofs are required, whether or not a key is set.
    pub fn from_config(config: ValidatorConfig) -> ConsensusResult<Self> {
        config.validate()?;

        let proof_algorithm = config.quantum_signature_algorithm;
        if config.require_post_quantum_proofs && !proof_algorithm.is_post_quantum() {
            return Err(ConsensusError::ClassicalProofScheme(proof_algorithm));
        }

        let hasher = hash_function(config.hash_algorithm);
        let transactions = TransactionValidator::new(
            hasher.clone(),
            signature_scheme(config.transaction_signature_algorithm),
        );
        let quantum = config
            .quantum_public_key
            .as_ref()
            .map(|key| {
                QuantumProofVerifier::new(
                    signature_scheme(proof_algorithm),
                    key.clone(),
                    config.require_post_quantum_proofs,
                )
            })
            .transpose()?;
        if quantum.is_none() {
            warn!("No quantum proof key configured; quantum level rejects every block");
        }

        let validator =
            BlockValidator::new(hasher, transactions, quantum, config.block_validation());

        info!(
            hash = %config.hash_algorithm,
            tx_scheme = %config.transaction_signature_algorithm,
            proof_scheme = %proof_algorithm,
            level = %config.default_validation_level,
            "Consensus validator ready"
        );

        Ok(Self {
            validator,
            config,
            time_source: Box::new(SystemTimeSource),
        })
    }

    /// Set custom time source (for testing)
    pub fn with_time_source(mut self, time_source: Box<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validator(&self) -> &BlockValidator {
        &self.validator
    }

    /// Validate against the service clock at the configured default level.
    pub fn validate_block_now(&self, block: &Block, previous: Option<&Block>) -> ValidationResult {
        self.validate_block(
            block,
            previous,
            self.time_source.now(),
            self.config.default_validation_level,
        )
    }

    /// Validate independent blocks in parallel. Results keep input order.
    pub fn validate_batch(
        &self,
        candidates: &[BlockCandidate<'_>],
        current_timestamp: u64,
        level: ValidationLevel,
    ) -> Vec<ValidationResult> {
        candidates
            .par_iter()
            .map(|c| self.validate_block(c.block, c.previous, current_timestamp, level))
            .collect()
    }

    fn record(&self, result: &ValidationResult, elapsed: f64) {
        crate::metrics::record_validation_latency(elapsed);
        crate::metrics::record_security_score(result.security_score());

        if result.is_valid() {
            crate::metrics::record_block_validated();
            info!(
                height = result.block_height(),
                hash = %hash_hex(result.block_hash()),
                score = result.security_score(),
                level = %result.validation_level(),
                warnings = result.warnings().len(),
                "Block accepted"
            );
        } else {
            let reason = result
                .checks()
                .iter()
                .find(|c| !c.passed)
                .map_or("unknown", |c| c.check.label());
            crate::metrics::record_block_rejected(reason);
            warn!(
                height = result.block_height(),
                hash = %hash_hex(result.block_hash()),
                score = result.security_score(),
                level = %result.validation_level(),
                errors = result.errors().len(),
                reason,
                "Block rejected"
            );
        }
    }
}

impl ConsensusApi for ConsensusService {
    fn validate_block(
        &self,
        block: &Block,
        previous: Option<&Block>,
        current_timestamp: u64,
        level: ValidationLevel,
    ) -> ValidationResult {
        let start_time = Instant::now();
        let result = self
            .validator
            .validate_block(block, previous, current_timestamp, level);
        self.record(&result, start_time.elapsed().as_secs_f64());
        result
    }

    fn generate_merkle_proof(
        &self,
        transactions: &[Transaction],
        tx_id: &Hash,
    ) -> Option<MerkleProof> {
        self.validator.merkle().generate_proof(transactions, tx_id)
    }

    fn verify_merkle_proof(&self, tx_id: &Hash, root: &Hash, proof: &[Hash], index: usize) -> bool {
        self.validator
            .merkle()
            .verify_proof(tx_id, root, proof, index)
    }

    fn validate_transaction(&self, tx: &Transaction) -> bool {
        self.validator.transactions().validate(tx)
    }

    fn validate_transaction_detailed(&self, tx: &Transaction) -> TransactionValidationResult {
        self.validator.transactions().validate_detailed(tx)
    }
}
