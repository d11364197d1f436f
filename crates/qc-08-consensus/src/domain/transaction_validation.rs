//! Transaction Validation - Pure Domain Logic
//!
//! Structural checks plus cryptographic verification of a single
//! transaction. The signature is re-verified here against `from`; nothing an
//! upstream component claims about the transaction is trusted.

use crate::domain::error::TransactionError;
use shared_crypto::{HashFunction, SignatureScheme};
use shared_types::{Transaction, TransactionValidationResult, ZERO_HASH};
use std::sync::Arc;

/// Validates individual transactions.
#[derive(Clone, Debug)]
pub struct TransactionValidator {
    hasher: Arc<dyn HashFunction>,
    scheme: Arc<dyn SignatureScheme>,
}

impl TransactionValidator {
    pub fn new(hasher: Arc<dyn HashFunction>, scheme: Arc<dyn SignatureScheme>) -> Self {
        Self { hasher, scheme }
    }

    /// The signature scheme transactions are verified with.
    pub fn scheme(&self) -> &Arc<dyn SignatureScheme> {
        &self.scheme
    }

    /// Whether the transaction is valid.
    pub fn validate(&self, tx: &Transaction) -> bool {
        self.check(tx).is_ok()
    }

    /// Fail-fast check, returning the first problem found.
    ///
    /// Structural checks run first so a transaction with no signature is
    /// reported as such rather than as a verification failure.
    pub fn check(&self, tx: &Transaction) -> Result<(), TransactionError> {
        if let Some(err) = Self::structural_errors(tx).into_iter().next() {
            return Err(err);
        }
        self.verify_commitments(tx)
    }

    /// Every failure and warning for the transaction.
    pub fn validate_detailed(&self, tx: &Transaction) -> TransactionValidationResult {
        let structural = Self::structural_errors(tx);
        let mut errors: Vec<String> = structural.iter().map(ToString::to_string).collect();

        // Crypto checks are meaningless without the fields they cover
        if structural.is_empty() {
            if let Err(err) = self.verify_commitments(tx) {
                errors.push(err.to_string());
            }
        }

        let mut warnings = Vec::new();
        if tx.fee == 0 {
            warnings.push("Transaction pays zero fee".to_string());
        }
        if !tx.from.is_empty() && tx.from == tx.to {
            warnings.push("Transaction sender and recipient are the same".to_string());
        }

        TransactionValidationResult::new(tx.id, errors, warnings)
    }

    fn structural_errors(tx: &Transaction) -> Vec<TransactionError> {
        let mut errors = Vec::new();
        if tx.id == ZERO_HASH {
            errors.push(TransactionError::MissingId);
        }
        if tx.from.is_empty() {
            errors.push(TransactionError::MissingSender);
        }
        if tx.to.is_empty() {
            errors.push(TransactionError::MissingRecipient);
        }
        if tx.amount == 0 {
            errors.push(TransactionError::MissingAmount);
        }
        if tx.signature.is_empty() {
            errors.push(TransactionError::MissingSignature);
        }
        errors
    }

    fn verify_commitments(&self, tx: &Transaction) -> Result<(), TransactionError> {
        if tx.compute_id(self.hasher.as_ref()) != tx.id {
            return Err(TransactionError::IdMismatch);
        }
        self.scheme
            .verify(&tx.from, &tx.signing_message(), &tx.signature)
            .map_err(TransactionError::InvalidSignature)
    }
}
