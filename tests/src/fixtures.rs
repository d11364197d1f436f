//! # Test Fixtures
//!
//! Builds well-formed chains the way a block producer would: signed
//! transactions, correct Merkle roots, sealed headers and post-quantum
//! block proofs.

use qc_08_consensus::{sign_quantum_proof, MerkleEngine, ValidatorConfig};
use shared_crypto::{
    Ed25519KeyPair, HashAlgorithm, HashFunction, MlDsa44KeyPair, Sha256Hash, Signer,
};
use shared_types::{Block, BlockHeader, Hash, Transaction, TransactionData, ZERO_HASH};
use std::sync::Arc;

/// Timestamp of every fixture genesis block.
pub const GENESIS_TIME: u64 = 1_700_000_000;

/// Seconds between consecutive fixture blocks.
pub const BLOCK_INTERVAL: u64 = 12;

/// Producer-side state for building test chains.
pub struct ChainBuilder {
    hasher: Arc<dyn HashFunction>,
    merkle: MerkleEngine,
    sender: Ed25519KeyPair,
    proof_key: MlDsa44KeyPair,
    blocks: Vec<Block>,
    next_amount: u128,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainBuilder {
    /// A SHA-256 chain with an ML-DSA-44 proof key.
    pub fn new() -> Self {
        Self::with_hasher(Arc::new(Sha256Hash))
    }

    pub fn with_hasher(hasher: Arc<dyn HashFunction>) -> Self {
        Self {
            merkle: MerkleEngine::new(hasher.clone()),
            hasher,
            sender: Ed25519KeyPair::from_seed([0x52; 32]),
            proof_key: MlDsa44KeyPair::from_seed([0x51; 32]),
            blocks: Vec::new(),
            next_amount: 1,
        }
    }

    /// Validator configuration that trusts this builder's proof key.
    pub fn config(&self) -> ValidatorConfig {
        ValidatorConfig {
            hash_algorithm: self.hasher.algorithm(),
            quantum_public_key: Some(self.proof_key.public_key()),
            ..ValidatorConfig::for_testing()
        }
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hasher.algorithm()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// A freshly signed transfer with a unique amount.
    pub fn transfer(&mut self) -> Transaction {
        let amount = self.next_amount;
        self.next_amount += 1;
        Transaction::sign(
            &self.sender,
            vec![0xC0; 32],
            amount,
            1,
            GENESIS_TIME,
            Some(TransactionData::Transfer { memo: None }),
            self.hasher.as_ref(),
        )
        .expect("ed25519 signing cannot fail")
    }

    pub fn transfers(&mut self, count: usize) -> Vec<Transaction> {
        (0..count).map(|_| self.transfer()).collect()
    }

    /// A transfer whose signature no longer matches, with a consistent id.
    pub fn forged_transfer(&mut self) -> Transaction {
        let mut tx = self.transfer();
        tx.signature[0] ^= 0xFF;
        tx.id = tx.compute_id(self.hasher.as_ref());
        tx
    }

    /// Build, prove and append the next block.
    pub fn push(&mut self, transactions: Vec<Transaction>) -> Block {
        let block = self.build(transactions);
        self.blocks.push(block.clone());
        block
    }

    /// Build and prove the next block without appending it.
    pub fn build(&self, transactions: Vec<Transaction>) -> Block {
        let block = self.seal(self.next_header(&transactions), transactions);
        self.prove(block)
    }

    /// Header for the block after the current tip.
    pub fn next_header(&self, transactions: &[Transaction]) -> BlockHeader {
        let ids: Vec<Hash> = transactions.iter().map(|tx| tx.id).collect();
        let tip = self.tip();
        BlockHeader {
            version: 1,
            previous_hash: tip.map_or(ZERO_HASH, |b| b.hash),
            merkle_root: self.merkle.calculate_root(&ids),
            timestamp: tip.map_or(GENESIS_TIME, |b| b.header.timestamp + BLOCK_INTERVAL),
            difficulty: 1,
            nonce: 0,
            height: tip.map_or(0, |b| b.header.height + 1),
        }
    }

    pub fn seal(&self, header: BlockHeader, transactions: Vec<Transaction>) -> Block {
        Block::seal(header, transactions, self.hasher.as_ref())
    }

    /// Attach a quantum security proof for the block's hash.
    pub fn prove(&self, block: Block) -> Block {
        let proof = sign_quantum_proof(&self.proof_key, &block.hash)
            .expect("fixture proof key has leaves left");
        block.with_quantum_proof(proof)
    }

    /// A clock reading just after the tip.
    pub fn now(&self) -> u64 {
        self.tip().map_or(GENESIS_TIME, |b| b.header.timestamp + 1)
    }
}
