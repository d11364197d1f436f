//! # Merkle Engine
//!
//! Binary Merkle tree over ordered transaction ids.
//!
//! # Algorithm
//!
//! 1. Empty input has the all-zero root.
//! 2. A level with an odd number of nodes (more than one) duplicates its
//!    last node before pairing.
//! 3. Each pair is combined as `H(left || right)` with the chain's hash
//!    function, until a single node remains.
//!
//! Inclusion proofs list the sibling of the target at every level, leaf to
//! root. The verifier uses the parity of the running index to decide the
//! side: even means the sibling is on the right. Generation and verification
//! must agree on that rule and on the odd-level padding, or every proof
//! silently fails.
//!
//! Duplicate ids are separate leaves, addressed by position.
//!
//! # Complexity
//!
//! Root: O(n). Proof generation: O(n). Verification: O(log n), bounded by
//! [`MAX_PROOF_DEPTH`].

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_crypto::HashFunction;
use shared_types::{Block, Hash, Transaction, ZERO_HASH};
use std::sync::Arc;

/// Deepest proof accepted: one level per bit of a `usize` index.
pub const MAX_PROOF_DEPTH: usize = usize::BITS as usize;

/// Inclusion proof for one leaf.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Sibling hashes, leaf level first.
    #[serde_as(as = "Vec<Hex>")]
    pub proof: Vec<Hash>,
    /// Position of the leaf in the original list.
    pub index: usize,
}

/// Merkle root and proof computation over a pluggable hash function.
#[derive(Clone, Debug)]
pub struct MerkleEngine {
    hasher: Arc<dyn HashFunction>,
}

impl MerkleEngine {
    pub fn new(hasher: Arc<dyn HashFunction>) -> Self {
        Self { hasher }
    }

    /// Merkle root over ordered ids. Order matters.
    pub fn calculate_root(&self, tx_ids: &[Hash]) -> Hash {
        if tx_ids.is_empty() {
            return ZERO_HASH;
        }

        let mut level: Vec<Hash> = tx_ids.to_vec();
        while level.len() > 1 {
            level = self.next_level(&level);
        }
        level[0]
    }

    /// Root over a block's transactions, in block order.
    pub fn calculate_block_root(&self, block: &Block) -> Hash {
        self.calculate_root(&block.transaction_ids())
    }

    /// Proof for the first transaction whose id is `target_id`.
    pub fn generate_proof(&self, txs: &[Transaction], target_id: &Hash) -> Option<MerkleProof> {
        let ids: Vec<Hash> = txs.iter().map(|tx| tx.id).collect();
        self.generate_proof_for_ids(&ids, target_id)
    }

    /// Proof for the first occurrence of `target_id` in `tx_ids`.
    pub fn generate_proof_for_ids(&self, tx_ids: &[Hash], target_id: &Hash) -> Option<MerkleProof> {
        let index = tx_ids.iter().position(|id| id == target_id)?;
        Some(self.generate_proof_at(tx_ids, index))
    }

    fn generate_proof_at(&self, tx_ids: &[Hash], leaf_index: usize) -> MerkleProof {
        let mut proof = Vec::new();
        let mut level: Vec<Hash> = tx_ids.to_vec();
        let mut index = leaf_index;

        while level.len() > 1 {
            let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
            // Odd level: the last node is paired with itself
            let sibling = level.get(sibling_index).unwrap_or(&level[index]);
            proof.push(*sibling);

            level = self.next_level(&level);
            index /= 2;
        }

        MerkleProof {
            proof,
            index: leaf_index,
        }
    }

    /// Recompute the root from a leaf and its proof and compare.
    ///
    /// The proof does not carry the leaf count. A node padded by
    /// duplication hashes the same from either side, so the proof for the
    /// last leaf of an odd-sized tree also verifies at the next index (leaf
    /// 2 of 3 verifies at 3). Callers that rely on the position must bound
    /// `index` by the number of transactions they hold.
    pub fn verify_proof(&self, tx_id: &Hash, root: &Hash, proof: &[Hash], index: usize) -> bool {
        if proof.len() > MAX_PROOF_DEPTH {
            return false;
        }
        // An index needing more levels than the proof has cannot come from a real tree
        if proof.len() < MAX_PROOF_DEPTH && index >> proof.len() != 0 {
            return false;
        }

        let mut current = *tx_id;
        let mut index = index;
        for sibling in proof {
            current = if index % 2 == 0 {
                self.hasher.hash_pair(&current, sibling)
            } else {
                self.hasher.hash_pair(sibling, &current)
            };
            index /= 2;
        }

        current == *root
    }

    fn next_level(&self, level: &[Hash]) -> Vec<Hash> {
        level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                self.hasher.hash_pair(left, right)
            })
            .collect()
    }
}
