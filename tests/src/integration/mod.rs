//! # Integration Scenarios
//!
//! Drive the consensus service the way its collaborators do: producers
//! build chains, the chain-state manager validates them block by block,
//! light clients check inclusion proofs and the mempool screens
//! transactions.

pub mod chain_validation;
pub mod concurrency;
pub mod wire_format;
