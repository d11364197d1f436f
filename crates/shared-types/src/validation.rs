//! # Validation Reports
//!
//! What the consensus validator hands back. Reports are built once and then
//! only read: fields are private, `is_valid` is derived from the error list
//! and the score from the per-check outcomes, so neither can drift.
//!
//! Decoding goes through the same constructors. A report whose stored
//! validity or score disagrees with its own contents is rejected.

use crate::entities::Hash;
use crate::errors::TypesError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fmt;
use std::str::FromStr;

/// Maximum security score.
pub const MAX_SECURITY_SCORE: u8 = 100;

/// How much of the pipeline runs. Each level is a superset of the previous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Structural checks only.
    #[default]
    Standard,
    /// Structural checks plus per-transaction validity.
    Enhanced,
    /// Enhanced plus the post-quantum block proof.
    Quantum,
}

impl ValidationLevel {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Enhanced => "enhanced",
            Self::Quantum => "quantum",
        }
    }

    /// Whether the transaction validity pass runs at this level.
    pub fn checks_transactions(&self) -> bool {
        matches!(self, Self::Enhanced | Self::Quantum)
    }

    /// Whether the quantum proof is required at this level.
    pub fn checks_quantum_proof(&self) -> bool {
        matches!(self, Self::Quantum)
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationLevel {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "enhanced" => Ok(Self::Enhanced),
            "quantum" => Ok(Self::Quantum),
            other => Err(TypesError::UnknownValidationLevel(other.to_string())),
        }
    }
}

/// Every check the block validator can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsensusCheck {
    HashIntegrity,
    ChainLinkage,
    TimestampOrder,
    GenesisIdentity,
    HeightContinuity,
    TimestampDrift,
    MerkleRoot,
    TransactionLimit,
    TransactionValidity,
    QuantumProof,
}

impl ConsensusCheck {
    /// Points awarded when the check passes in full.
    pub fn max_points(&self) -> u8 {
        match self {
            Self::HashIntegrity => 20,
            Self::ChainLinkage => 15,
            Self::TimestampOrder => 5,
            Self::GenesisIdentity => 20,
            Self::MerkleRoot => 15,
            Self::TransactionValidity => 15,
            Self::QuantumProof => 25,
            Self::HeightContinuity | Self::TimestampDrift | Self::TransactionLimit => 0,
        }
    }

    /// Short stable label, used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HashIntegrity => "hash_integrity",
            Self::ChainLinkage => "chain_linkage",
            Self::TimestampOrder => "timestamp_order",
            Self::GenesisIdentity => "genesis_identity",
            Self::HeightContinuity => "height_continuity",
            Self::TimestampDrift => "timestamp_drift",
            Self::MerkleRoot => "merkle_root",
            Self::TransactionLimit => "transaction_limit",
            Self::TransactionValidity => "transaction_validity",
            Self::QuantumProof => "quantum_proof",
        }
    }
}

/// Outcome of one check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub check: ConsensusCheck,
    pub passed: bool,
    pub points: u8,
}

impl CheckOutcome {
    /// Full credit.
    pub fn pass(check: ConsensusCheck) -> Self {
        Self {
            check,
            passed: true,
            points: check.max_points(),
        }
    }

    /// Passed with reduced credit.
    pub fn partial(check: ConsensusCheck, points: u8) -> Self {
        Self {
            check,
            passed: true,
            points: points.min(check.max_points()),
        }
    }

    /// No credit.
    pub fn fail(check: ConsensusCheck) -> Self {
        Self {
            check,
            passed: false,
            points: 0,
        }
    }

    /// Whether one of the constructors above could have produced this.
    pub fn is_consistent(&self) -> bool {
        self.points <= self.check.max_points() && (self.passed || self.points == 0)
    }
}

/// Block validation report.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    security_score: u8,
    validation_level: ValidationLevel,
    timestamp: u64,
    block_height: u64,
    #[serde_as(as = "Hex")]
    block_hash: Hash,
    errors: Vec<String>,
    warnings: Vec<String>,
    checks: Vec<CheckOutcome>,
}

impl ValidationResult {
    /// Assemble a report. Score and validity are derived here.
    pub fn new(
        validation_level: ValidationLevel,
        timestamp: u64,
        block_height: u64,
        block_hash: Hash,
        checks: Vec<CheckOutcome>,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        let score: u32 = checks.iter().map(|c| c.points as u32).sum();
        Self {
            is_valid: errors.is_empty(),
            security_score: score.min(MAX_SECURITY_SCORE as u32) as u8,
            validation_level,
            timestamp,
            block_height,
            block_hash,
            errors,
            warnings,
            checks,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Diagnostic 0..=100 score; comparable only within one level.
    pub fn security_score(&self) -> u8 {
        self.security_score
    }

    pub fn validation_level(&self) -> ValidationLevel {
        self.validation_level
    }

    /// The `current_timestamp` the block was judged against.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn block_hash(&self) -> &Hash {
        &self.block_hash
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn checks(&self) -> &[CheckOutcome] {
        &self.checks
    }

    /// Outcome of a specific check, if it ran.
    pub fn outcome(&self, check: ConsensusCheck) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check == check)
    }

    /// Whether any error message contains `needle`.
    pub fn has_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }

    /// Whether any warning message contains `needle`.
    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }

    fn from_raw(raw: RawValidationResult) -> Result<Self, TypesError> {
        if let Some(bad) = raw.checks.iter().find(|c| !c.is_consistent()) {
            return Err(TypesError::InconsistentReport(format!(
                "{} check carries {} points",
                bad.check.label(),
                bad.points
            )));
        }

        let result = Self::new(
            raw.validation_level,
            raw.timestamp,
            raw.block_height,
            raw.block_hash,
            raw.checks,
            raw.errors,
            raw.warnings,
        );
        if result.is_valid != raw.is_valid {
            return Err(TypesError::InconsistentReport(
                "isValid disagrees with the error list".to_string(),
            ));
        }
        if result.security_score != raw.security_score {
            return Err(TypesError::InconsistentReport(format!(
                "securityScore {} does not match the checks ({})",
                raw.security_score, result.security_score
            )));
        }
        Ok(result)
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidationResult {
    is_valid: bool,
    security_score: u8,
    validation_level: ValidationLevel,
    timestamp: u64,
    block_height: u64,
    #[serde_as(as = "Hex")]
    block_hash: Hash,
    errors: Vec<String>,
    warnings: Vec<String>,
    checks: Vec<CheckOutcome>,
}

impl<'de> Deserialize<'de> for ValidationResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawValidationResult::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}

/// Structured result of validating a single transaction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionValidationResult {
    #[serde_as(as = "Hex")]
    tx_id: Hash,
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl TransactionValidationResult {
    pub fn new(tx_id: Hash, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            tx_id,
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn tx_id(&self) -> &Hash {
        &self.tx_id
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransactionValidationResult {
    #[serde_as(as = "Hex")]
    tx_id: Hash,
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl<'de> Deserialize<'de> for TransactionValidationResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTransactionValidationResult::deserialize(deserializer)?;
        if raw.is_valid != raw.errors.is_empty() {
            return Err(de::Error::custom(TypesError::InconsistentReport(
                "isValid disagrees with the error list".to_string(),
            )));
        }
        Ok(Self::new(raw.tx_id, raw.errors, raw.warnings))
    }
}
