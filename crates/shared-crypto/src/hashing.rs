//! # Hash Functions
//!
//! The chain's hash primitive is a capability, not a hard-coded call. Block
//! hashes, transaction ids and Merkle nodes all go through a
//! [`HashFunction`] chosen once at startup.
//!
//! | Algorithm | Crate | Notes |
//! |-----------|-------|-------|
//! | `sha256` | `sha2` | Default |
//! | `sha3-256` | `sha3` | FIPS 202 |
//! | `blake3` | `blake3` | SIMD-accelerated, 5-10x faster than SHA-256 |

use crate::CryptoError;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// Identifier of a supported hash function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    /// SHA3-256
    #[serde(rename = "sha3-256")]
    Sha3_256,
    /// BLAKE3 (256-bit output)
    #[serde(rename = "blake3")]
    Blake3,
}

impl HashAlgorithm {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha3_256 => "sha3-256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha3-256" | "sha3" => Ok(Self::Sha3_256),
            "blake3" => Ok(Self::Blake3),
            other => Err(CryptoError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// A cryptographic hash function producing 32-byte digests.
///
/// Implementations are stateless and safe to share across threads.
pub trait HashFunction: Send + Sync + fmt::Debug {
    /// Which algorithm this is.
    fn algorithm(&self) -> HashAlgorithm;

    /// Hash a byte string.
    fn hash(&self, data: &[u8]) -> Hash;

    /// Hash the concatenation `left || right`.
    fn hash_pair(&self, left: &Hash, right: &Hash) -> Hash {
        let mut combined = [0u8; 64];
        combined[..32].copy_from_slice(left);
        combined[32..].copy_from_slice(right);
        self.hash(&combined)
    }
}

/// SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn hash(&self, data: &[u8]) -> Hash {
        sha256(data)
    }
}

/// SHA3-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha3Hash;

impl HashFunction for Sha3Hash {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha3_256
    }

    fn hash(&self, data: &[u8]) -> Hash {
        sha3::Sha3_256::digest(data).into()
    }
}

/// BLAKE3.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hash;

impl HashFunction for Blake3Hash {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Blake3
    }

    fn hash(&self, data: &[u8]) -> Hash {
        *blake3::hash(data).as_bytes()
    }
}

/// Instantiate the hash function for an algorithm identifier.
pub fn hash_function(algorithm: HashAlgorithm) -> Arc<dyn HashFunction> {
    match algorithm {
        HashAlgorithm::Sha256 => Arc::new(Sha256Hash),
        HashAlgorithm::Sha3_256 => Arc::new(Sha3Hash),
        HashAlgorithm::Blake3 => Arc::new(Blake3Hash),
    }
}

/// One-shot SHA-256.
pub fn sha256(data: &[u8]) -> Hash {
    sha2::Sha256::digest(data).into()
}
