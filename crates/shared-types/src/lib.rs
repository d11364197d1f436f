//! # Shared Types Crate
//!
//! Blocks, transactions and validation reports used by the consensus
//! validator and everything that talks to it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Block and transaction encodings live here,
//!   next to the types, so producers and validators hash the same bytes.
//! - **Reports are values**: `ValidationResult` is assembled once and read
//!   through accessors; validity and score are derived, never stored apart.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use validation::*;
