//! # ML-DSA-44 Signatures
//!
//! Module-lattice signatures (FIPS 204, security category 2) through
//! `libcrux-ml-dsa`. Post-quantum and stateless: a key signs any number of
//! messages.
//!
//! | Item | Bytes |
//! |------|-------|
//! | Verification key | 1312 |
//! | Signing key | 2560 |
//! | Signature | 2420 |
//!
//! Signing is hedged: fresh randomness is mixed into every signature, so two
//! signatures over the same message differ but both verify. Key generation is
//! deterministic in the 32-byte seed.

use crate::scheme::{SignatureAlgorithm, SignatureScheme, Signer};
use crate::CryptoError;
use libcrux_ml_dsa::ml_dsa_44::{self, MLDSA44KeyPair, MLDSA44Signature, MLDSA44VerificationKey};
use rand::RngCore;
use std::fmt;

/// ML-DSA-44 verification key length.
pub const ML_DSA_44_PUBLIC_KEY_LEN: usize = 1312;

/// ML-DSA-44 signature length.
pub const ML_DSA_44_SIGNATURE_LEN: usize = 2420;

/// Empty FIPS 204 context string; domain separation lives in the signed message.
const CONTEXT: &[u8] = b"";

/// ML-DSA-44 key pair.
pub struct MlDsa44KeyPair {
    inner: MLDSA44KeyPair,
}

impl MlDsa44KeyPair {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Derive a key pair from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: ml_dsa_44::generate_key_pair(seed),
        }
    }

    /// Encoded verification key.
    pub fn public_key_bytes(&self) -> &[u8] {
        self.inner.verification_key.as_slice()
    }
}

impl fmt::Debug for MlDsa44KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlDsa44KeyPair")
            .field("public_key", &"<1312 bytes>")
            .finish_non_exhaustive()
    }
}

impl Signer for MlDsa44KeyPair {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::MlDsa44
    }

    fn public_key(&self) -> Vec<u8> {
        self.public_key_bytes().to_vec()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut randomness = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut randomness);

        let signature = ml_dsa_44::sign(&self.inner.signing_key, message, CONTEXT, randomness)
            .map_err(|e| CryptoError::SigningFailed(format!("{:?}", e)))?;
        Ok(signature.as_slice().to_vec())
    }
}

/// Verifier for raw ML-DSA-44 keys and signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct MlDsa44Scheme;

impl SignatureScheme for MlDsa44Scheme {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::MlDsa44
    }

    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let key_bytes: [u8; ML_DSA_44_PUBLIC_KEY_LEN] = public_key
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: ML_DSA_44_PUBLIC_KEY_LEN,
                actual: public_key.len(),
            })?;
        let signature_bytes: [u8; ML_DSA_44_SIGNATURE_LEN] = signature
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength {
                expected: ML_DSA_44_SIGNATURE_LEN,
                actual: signature.len(),
            })?;

        let verification_key = MLDSA44VerificationKey::new(key_bytes);
        let signature = MLDSA44Signature::new(signature_bytes);

        ml_dsa_44::verify(&verification_key, message, CONTEXT, &signature)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}
