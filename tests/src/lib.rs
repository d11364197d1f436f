//! # Quantum-Chain Consensus Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Chain builder shared by tests and benches
//! └── integration/      # Cross-crate scenarios
//!     ├── chain_validation.rs
//!     ├── wire_format.rs
//!     └── concurrency.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
