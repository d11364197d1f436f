//! Quantum Security Proof
//!
//! A block's quantum security proof is a signature over the block hash by
//! the chain-level proof key, made with a post-quantum scheme:
//!
//! ```text
//! message = "QC-QUANTUM-PROOF-v1" || block_hash
//! proof   = Sign(proof_secret_key, message)
//! ```
//!
//! The domain tag keeps a proof from doubling as a transaction signature
//! under the same key.

use crate::domain::error::{ConsensusError, ConsensusResult, QuantumProofError};
use shared_crypto::{CryptoError, SignatureScheme, Signer};
use shared_types::Hash;
use std::sync::Arc;

const PROOF_DOMAIN: &[u8] = b"QC-QUANTUM-PROOF-v1";

/// The bytes signed by a quantum security proof for `block_hash`.
pub fn quantum_proof_message(block_hash: &Hash) -> Vec<u8> {
    let mut message = Vec::with_capacity(PROOF_DOMAIN.len() + block_hash.len());
    message.extend_from_slice(PROOF_DOMAIN);
    message.extend_from_slice(block_hash);
    message
}

/// Producer side: sign the proof for a block hash.
pub fn sign_quantum_proof(signer: &dyn Signer, block_hash: &Hash) -> Result<Vec<u8>, CryptoError> {
    signer.sign(&quantum_proof_message(block_hash))
}

/// Verifies quantum security proofs against a fixed public key.
#[derive(Clone, Debug)]
pub struct QuantumProofVerifier {
    scheme: Arc<dyn SignatureScheme>,
    public_key: Vec<u8>,
}

impl QuantumProofVerifier {
    /// Build a verifier for `public_key`.
    ///
    /// With `require_post_quantum` set, a classical scheme is refused here
    /// instead of being accepted silently at validation time.
    pub fn new(
        scheme: Arc<dyn SignatureScheme>,
        public_key: Vec<u8>,
        require_post_quantum: bool,
    ) -> ConsensusResult<Self> {
        let algorithm = scheme.algorithm();
        if require_post_quantum && !algorithm.is_post_quantum() {
            return Err(ConsensusError::ClassicalProofScheme(algorithm));
        }
        if public_key.is_empty() {
            return Err(ConsensusError::InvalidQuantumKey(
                "public key is empty".to_string(),
            ));
        }
        Ok(Self { scheme, public_key })
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn scheme(&self) -> &Arc<dyn SignatureScheme> {
        &self.scheme
    }

    /// Whether `proof` is a valid proof for `block_hash`.
    pub fn verify(&self, block_hash: &Hash, proof: &[u8]) -> bool {
        self.check(block_hash, Some(proof)).is_ok()
    }

    /// Like [`verify`](Self::verify), but tells a missing proof apart from a bad one.
    pub fn check(&self, block_hash: &Hash, proof: Option<&[u8]>) -> Result<(), QuantumProofError> {
        let proof = match proof {
            Some(proof) if !proof.is_empty() => proof,
            _ => return Err(QuantumProofError::Missing),
        };
        self.scheme
            .verify(&self.public_key, &quantum_proof_message(block_hash), proof)
            .map_err(QuantumProofError::Invalid)
    }
}
