//! # Shared Crypto - Pluggable Cryptographic Capabilities
//!
//! The consensus core never names a primitive directly. It receives a
//! [`HashFunction`] and one or more [`SignatureScheme`]s at construction and
//! stays unchanged when the algorithms are swapped.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, SHA3-256, BLAKE3 | Block hashes, tx ids, Merkle nodes |
//! | `signatures` | Ed25519 | Transaction signing (classical) |
//! | `ml_dsa` | ML-DSA-44 (FIPS 204) | Post-quantum block proofs |
//! | `scheme` | - | Capability traits and algorithm registry |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - **ML-DSA-44**: Module-lattice security (NIST category 2), stateless,
//!   hedged signing
//! - Ed25519 signing keys are zeroized on drop by `ed25519-dalek`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod ml_dsa;
pub mod scheme;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{
    hash_function, sha256, Blake3Hash, Hash, HashAlgorithm, HashFunction, Sha256Hash, Sha3Hash,
};
pub use ml_dsa::{MlDsa44KeyPair, MlDsa44Scheme, ML_DSA_44_PUBLIC_KEY_LEN, ML_DSA_44_SIGNATURE_LEN};
pub use scheme::{signature_scheme, SignatureAlgorithm, SignatureScheme, Signer};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Scheme, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
