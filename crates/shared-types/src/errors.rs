//! # Error Types
//!
//! Errors raised while parsing shared types from text.

use thiserror::Error;

/// Errors produced by shared type conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Validation level name not recognised.
    #[error("Unknown validation level: {0} (expected standard, enhanced or quantum)")]
    UnknownValidationLevel(String),

    /// Hex string could not be decoded into a hash.
    #[error("Invalid hash hex: {0}")]
    InvalidHashHex(String),

    /// A decoded report contradicts its own checks or errors.
    #[error("Inconsistent validation report: {0}")]
    InconsistentReport(String),
}

/// Parse a 32-byte hash from hex (an optional `0x` prefix is accepted).
pub fn parse_hash_hex(text: &str) -> Result<[u8; 32], TypesError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| TypesError::InvalidHashHex(e.to_string()))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        TypesError::InvalidHashHex(format!("expected 32 bytes, got {}", b.len()))
    })
}
