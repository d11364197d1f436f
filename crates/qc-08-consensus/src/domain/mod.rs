//! Domain layer for the Consensus subsystem
//!
//! Pure validation logic. Cryptography arrives through the `shared-crypto`
//! capability traits; nothing here touches I/O or the clock.
//!
//! - merkle: transaction commitments and inclusion proofs
//! - transaction_validation: per-transaction structure and signature checks
//! - quantum_proof: post-quantum block proof verification
//! - block_validation: the scored, fail-soft block pipeline

mod block_validation;
mod error;
mod merkle;
mod quantum_proof;
mod transaction_validation;

pub use block_validation::*;
pub use error::*;
pub use merkle::*;
pub use quantum_proof::*;
pub use transaction_validation::*;
