//! # Consensus Metrics
//!
//! Prometheus metrics for monitoring block validation.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-08-consensus = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `consensus_blocks_validated_total` - Counter of accepted blocks
//! - `consensus_blocks_rejected_total` - Counter of rejected blocks (by first failing check)
//! - `consensus_validation_latency_seconds` - Histogram of validation times
//! - `consensus_security_score` - Histogram of security scores

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, CounterVec, Histogram,
    IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total blocks accepted
    pub static ref BLOCKS_VALIDATED: IntCounter = register_int_counter!(
        "consensus_blocks_validated_total",
        "Total number of blocks that passed validation"
    )
    .expect("Failed to create BLOCKS_VALIDATED metric");

    /// Total blocks rejected, labeled by rejection reason
    pub static ref BLOCKS_REJECTED: CounterVec = register_counter_vec!(
        "consensus_blocks_rejected_total",
        "Total number of blocks rejected",
        &["reason"]
    )
    .expect("Failed to create BLOCKS_REJECTED metric");

    /// Histogram of block validation latency
    pub static ref VALIDATION_LATENCY: Histogram = register_histogram!(
        "consensus_validation_latency_seconds",
        "Time taken to validate a block in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to create VALIDATION_LATENCY metric");

    /// Distribution of security scores
    pub static ref SECURITY_SCORE: Histogram = register_histogram!(
        "consensus_security_score",
        "Security score assigned to validated blocks",
        vec![0.0, 20.0, 40.0, 55.0, 70.0, 85.0, 95.0, 100.0]
    )
    .expect("Failed to create SECURITY_SCORE metric");
}

/// Record an accepted block
#[cfg(feature = "metrics")]
pub fn record_block_validated() {
    BLOCKS_VALIDATED.inc();
}

/// Record a rejected block with reason
#[cfg(feature = "metrics")]
pub fn record_block_rejected(reason: &str) {
    BLOCKS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record validation latency
#[cfg(feature = "metrics")]
pub fn record_validation_latency(seconds: f64) {
    VALIDATION_LATENCY.observe(seconds);
}

/// Record a block's security score
#[cfg(feature = "metrics")]
pub fn record_security_score(score: u8) {
    SECURITY_SCORE.observe(f64::from(score));
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_block_validated() {}

#[cfg(not(feature = "metrics"))]
pub fn record_block_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_validation_latency(_seconds: f64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_security_score(_score: u8) {}
