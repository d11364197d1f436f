//! # Signature Scheme Capabilities
//!
//! Verification and signing are split: validators only ever hold a
//! [`SignatureScheme`] (public operation), producers hold a [`Signer`]
//! (secret material). Both are object safe so the algorithm is chosen by
//! configuration, not by type parameters.

use crate::ml_dsa::MlDsa44Scheme;
use crate::signatures::Ed25519Scheme;
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Identifier of a supported signature algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// Ed25519 (classical, not quantum resistant).
    #[serde(rename = "ed25519")]
    Ed25519,
    /// ML-DSA-44 (FIPS 204 module-lattice signatures, quantum resistant).
    #[serde(rename = "ml-dsa-44")]
    MlDsa44,
}

impl SignatureAlgorithm {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::MlDsa44 => "ml-dsa-44",
        }
    }

    /// Whether the scheme's security survives a large quantum computer.
    pub fn is_post_quantum(&self) -> bool {
        match self {
            Self::Ed25519 => false,
            Self::MlDsa44 => true,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "ml-dsa-44" | "mldsa44" | "dilithium2" => Ok(Self::MlDsa44),
            other => Err(CryptoError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Public half of a signature scheme.
pub trait SignatureScheme: Send + Sync + fmt::Debug {
    /// Which algorithm this is.
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Verify `signature` over `message` under `public_key`.
    ///
    /// Malformed keys or signatures are reported as errors, never panics.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8])
        -> Result<(), CryptoError>;
}

/// Secret half of a signature scheme.
pub trait Signer: Send + Sync {
    /// Which algorithm this signer produces signatures for.
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Encoded public key, as accepted by the matching [`SignatureScheme`].
    fn public_key(&self) -> Vec<u8>;

    /// Sign a message.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Instantiate the verifier for an algorithm identifier.
pub fn signature_scheme(algorithm: SignatureAlgorithm) -> Arc<dyn SignatureScheme> {
    match algorithm {
        SignatureAlgorithm::Ed25519 => Arc::new(Ed25519Scheme),
        SignatureAlgorithm::MlDsa44 => Arc::new(MlDsa44Scheme),
    }
}
