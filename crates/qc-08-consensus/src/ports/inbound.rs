//! Driving ports (Inbound API)

use crate::domain::MerkleProof;
use shared_types::{
    Block, Hash, Transaction, TransactionValidationResult, ValidationLevel, ValidationResult,
};

/// Primary Consensus API
///
/// Used by block producers, the chain-state manager, light clients and the
/// mempool. Every call is synchronous and free of I/O; an implementation is
/// shared across threads without locking.
pub trait ConsensusApi: Send + Sync {
    /// Validate a block against its parent.
    ///
    /// Never fails: every problem is reported inside the result.
    fn validate_block(
        &self,
        block: &Block,
        previous: Option<&Block>,
        current_timestamp: u64,
        level: ValidationLevel,
    ) -> ValidationResult;

    /// Inclusion proof for `tx_id`, or `None` if it is not in `transactions`.
    fn generate_merkle_proof(&self, transactions: &[Transaction], tx_id: &Hash)
        -> Option<MerkleProof>;

    /// Check an inclusion proof against a Merkle root.
    fn verify_merkle_proof(&self, tx_id: &Hash, root: &Hash, proof: &[Hash], index: usize) -> bool;

    /// Standalone transaction check, for ingestion before block inclusion.
    fn validate_transaction(&self, tx: &Transaction) -> bool;

    /// Like `validate_transaction`, with every error and warning.
    fn validate_transaction_detailed(&self, tx: &Transaction) -> TransactionValidationResult;
}
