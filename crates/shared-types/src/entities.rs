//! # Core Domain Entities
//!
//! Blocks and transactions as handed to the validator by a producer.
//!
//! ## Canonical encodings
//!
//! Hashes and ids are computed over explicit little-endian encodings, never
//! over the JSON form, so the wire format can evolve without changing any
//! commitment:
//!
//! ```text
//! header      = version u32 || previous_hash || merkle_root || timestamp u64
//!            || difficulty u64 || nonce u64 || height u64
//! tx message  = "QC-TX-v1" || len(from) || from || len(to) || to
//!            || amount u128 || fee u128 || timestamp u64 || data?
//! tx id       = H(tx message || signature)
//! ```
//!
//! ## Wire format
//!
//! JSON with camelCase fields; hashes, keys, signatures and proofs are
//! lowercase hex; amounts are decimal strings.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as, DisplayFromStr};
use shared_crypto::{CryptoError, HashFunction, Signer};
use std::collections::{BTreeMap, HashSet};

pub use shared_crypto::Hash;

/// Sender / recipient identity: the public key bytes of the chain's
/// transaction signature scheme.
pub type Address = Vec<u8>;

/// Token amount in base units.
pub type Amount = u128;

/// The all-zero hash. Root of an empty transaction list and the previous
/// hash of a genesis block.
pub const ZERO_HASH: Hash = [0u8; 32];

const TX_DOMAIN: &[u8] = b"QC-TX-v1";

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

/// Lowercase hex rendering of a hash, for messages and logs.
pub fn hash_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

// =============================================================================
// BLOCKS
// =============================================================================

/// Block header. Everything the block hash commits to.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Protocol version.
    pub version: u32,
    /// Hash of the parent block (all zero for genesis).
    #[serde_as(as = "Hex")]
    pub previous_hash: Hash,
    /// Merkle root over the ordered transaction ids.
    #[serde_as(as = "Hex")]
    pub merkle_root: Hash,
    /// Unix timestamp (seconds).
    pub timestamp: u64,
    /// Mining difficulty.
    pub difficulty: u64,
    /// Mining nonce.
    pub nonce: u64,
    /// Block height; genesis is 0.
    pub height: u64,
}

impl BlockHeader {
    /// Length of [`BlockHeader::canonical_bytes`].
    pub const ENCODED_LEN: usize = 4 + 32 + 32 + 8 + 8 + 8 + 8;

    /// Fixed-layout encoding hashed into the block hash.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::ENCODED_LEN);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.previous_hash);
        buf.extend_from_slice(&self.merkle_root);
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(&self.difficulty.to_le_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
        buf.extend_from_slice(&self.height.to_le_bytes());
        buf
    }

    /// Compute the hash of this block header.
    pub fn compute_hash(&self, hasher: &dyn HashFunction) -> Hash {
        hasher.hash(&self.canonical_bytes())
    }

    /// Check if this is a genesis header.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}

/// A block as produced upstream and handed to the validator read-only.
///
/// `hash`, `total_fees` and `size_bytes` are declared by the producer; the
/// validator recomputes and compares them rather than trusting them.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
    #[serde_as(as = "Hex")]
    pub hash: Hash,
    #[serde_as(as = "DisplayFromStr")]
    pub total_fees: Amount,
    pub size_bytes: u64,
    #[serde_as(as = "Option<Hex>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_security_proof: Option<Vec<u8>>,
}

impl Block {
    /// Build a block, deriving its hash, fee total and size.
    pub fn seal(
        header: BlockHeader,
        transactions: Vec<Transaction>,
        hasher: &dyn HashFunction,
    ) -> Self {
        let hash = header.compute_hash(hasher);
        let mut block = Self {
            header,
            transactions,
            hash,
            total_fees: 0,
            size_bytes: 0,
            quantum_security_proof: None,
        };
        block.total_fees = block.fee_sum();
        block.size_bytes = block.encoded_size();
        block
    }

    /// Attach a quantum security proof. The header, and therefore the hash,
    /// is untouched; the declared size is refreshed.
    pub fn with_quantum_proof(mut self, proof: Vec<u8>) -> Self {
        self.quantum_security_proof = Some(proof);
        self.size_bytes = self.encoded_size();
        self
    }

    /// Transaction ids in block order (the Merkle leaves).
    pub fn transaction_ids(&self) -> Vec<Hash> {
        self.transactions.iter().map(|tx| tx.id).collect()
    }

    /// Sum of all transaction fees, saturating at `u128::MAX`.
    pub fn fee_sum(&self) -> Amount {
        self.transactions
            .iter()
            .fold(0u128, |total, tx| total.saturating_add(tx.fee))
    }

    /// Size of the canonical encoding: header, transactions, proof.
    pub fn encoded_size(&self) -> u64 {
        let transactions: usize = self.transactions.iter().map(Transaction::encoded_len).sum();
        let proof = self.quantum_security_proof.as_ref().map_or(0, Vec::len);
        (BlockHeader::ENCODED_LEN + transactions + proof) as u64
    }

    /// Whether any transaction id occurs more than once.
    pub fn has_duplicate_transaction_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.transactions.len());
        !self.transactions.iter().all(|tx| seen.insert(tx.id))
    }

    /// Check if this is a genesis block.
    pub fn is_genesis(&self) -> bool {
        self.header.is_genesis()
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Typed transaction payload. The `type` field is the discriminant.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionData {
    /// Plain value transfer.
    Transfer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
    },
    /// Stake the amount for a lock period (seconds).
    #[serde(rename_all = "camelCase")]
    Stake { lock_period: u64 },
    /// Call into a contract.
    ContractCall {
        method: String,
        #[serde_as(as = "Hex")]
        payload: Vec<u8>,
    },
    /// Anything else, as string key/value pairs.
    Other { fields: BTreeMap<String, String> },
}

impl TransactionData {
    /// The `type` discriminant as it appears on the wire.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Stake { .. } => "stake",
            Self::ContractCall { .. } => "contractCall",
            Self::Other { .. } => "other",
        }
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Transfer { memo } => {
                buf.push(0);
                match memo {
                    Some(memo) => {
                        buf.push(1);
                        put_bytes(buf, memo.as_bytes());
                    }
                    None => buf.push(0),
                }
            }
            Self::Stake { lock_period } => {
                buf.push(1);
                buf.extend_from_slice(&lock_period.to_le_bytes());
            }
            Self::ContractCall { method, payload } => {
                buf.push(2);
                put_bytes(buf, method.as_bytes());
                put_bytes(buf, payload);
            }
            Self::Other { fields } => {
                buf.push(3);
                buf.extend_from_slice(&(fields.len() as u32).to_le_bytes());
                for (key, value) in fields {
                    put_bytes(buf, key.as_bytes());
                    put_bytes(buf, value.as_bytes());
                }
            }
        }
    }
}

/// A signed value transfer.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Content id; the Merkle leaf.
    #[serde_as(as = "Hex")]
    pub id: Hash,
    #[serde_as(as = "Hex")]
    pub from: Address,
    #[serde_as(as = "Hex")]
    pub to: Address,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    /// Unix timestamp (seconds).
    pub timestamp: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub fee: Amount,
    /// Signature by `from` over [`Transaction::signing_message`].
    #[serde_as(as = "Hex")]
    pub signature: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TransactionData>,
}

impl Transaction {
    /// Create and sign a transaction from the signer's key.
    pub fn sign(
        signer: &dyn Signer,
        to: Address,
        amount: Amount,
        fee: Amount,
        timestamp: u64,
        data: Option<TransactionData>,
        hasher: &dyn HashFunction,
    ) -> Result<Self, CryptoError> {
        let mut tx = Self {
            id: [0u8; 32],
            from: signer.public_key(),
            to,
            amount,
            timestamp,
            fee,
            signature: Vec::new(),
            data,
        };
        tx.signature = signer.sign(&tx.signing_message())?;
        tx.id = tx.compute_id(hasher);
        Ok(tx)
    }

    /// Domain-separated encoding of every field the sender signs.
    pub fn signing_message(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(TX_DOMAIN.len() + self.from.len() + self.to.len() + 64);
        buf.extend_from_slice(TX_DOMAIN);
        put_bytes(&mut buf, &self.from);
        put_bytes(&mut buf, &self.to);
        buf.extend_from_slice(&self.amount.to_le_bytes());
        buf.extend_from_slice(&self.fee.to_le_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        match &self.data {
            Some(data) => {
                buf.push(1);
                data.encode_into(&mut buf);
            }
            None => buf.push(0),
        }
        buf
    }

    /// Recompute the id from content and signature.
    pub fn compute_id(&self, hasher: &dyn HashFunction) -> Hash {
        let mut preimage = self.signing_message();
        preimage.extend_from_slice(&self.signature);
        hasher.hash(&preimage)
    }

    /// Length of the canonical encoding (`id || message || len(sig) || sig`).
    pub fn encoded_len(&self) -> usize {
        32 + self.signing_message().len() + 4 + self.signature.len()
    }
}
