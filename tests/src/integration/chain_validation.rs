//! # Chain Validation Flows
//!
//! Multi-block chains validated end to end at every level, plus the
//! attacks a validator must catch: re-parenting, reordering, proof reuse.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ChainBuilder, GENESIS_TIME};
    use qc_08_consensus::{ConsensusApi, ConsensusService};
    use shared_crypto::{Blake3Hash, HashAlgorithm};
    use shared_types::{ConsensusCheck, ValidationLevel};
    use std::sync::Arc;

    fn service(chain: &ChainBuilder) -> ConsensusService {
        ConsensusService::from_config(chain.config()).unwrap()
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[test]
    fn test_quantum_chain_validates_block_by_block() {
        let mut chain = ChainBuilder::new();
        chain.push(vec![]);
        for size in [1, 2, 3, 5, 8] {
            let txs = chain.transfers(size);
            chain.push(txs);
        }
        let service = service(&chain);
        let now = chain.now();

        let mut previous = None;
        for block in chain.blocks() {
            let result = service.validate_block(block, previous, now, ValidationLevel::Quantum);
            assert!(
                result.is_valid(),
                "height {}: {:?}",
                block.header.height,
                result.errors()
            );
            assert_eq!(result.security_score(), 95);
            assert!(result.warnings().is_empty());
            previous = Some(block);
        }
    }

    #[test]
    fn test_tampered_merkle_root_scores() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let txs = chain.transfers(2);
        let b1 = chain.push(txs);
        let service = service(&chain);
        let now = chain.now();

        let result = service.validate_block(&b1, Some(&genesis), now, ValidationLevel::Standard);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert_eq!(result.security_score(), 55);

        let mut header = b1.header.clone();
        header.merkle_root[31] ^= 0x0F;
        let tampered = chain.seal(header, b1.transactions.clone());
        let result =
            service.validate_block(&tampered, Some(&genesis), now, ValidationLevel::Standard);
        assert!(!result.is_valid());
        assert!(result.has_error("Merkle root is invalid"));
        assert_eq!(result.security_score(), 40);
    }

    #[test]
    fn test_alternate_hash_function_chain() {
        let mut chain = ChainBuilder::with_hasher(Arc::new(Blake3Hash));
        chain.push(vec![]);
        let txs = chain.transfers(3);
        chain.push(txs);
        assert_eq!(chain.hash_algorithm(), HashAlgorithm::Blake3);

        let service = service(&chain);
        let blocks = chain.blocks();
        let now = chain.now();
        let result =
            service.validate_block(&blocks[1], Some(&blocks[0]), now, ValidationLevel::Quantum);
        assert!(result.is_valid(), "errors: {:?}", result.errors());
    }

    // =============================================================================
    // ATTACKS
    // =============================================================================

    #[test]
    fn test_reparented_block_rejected() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let b1 = chain.push(vec![]);
        let txs = chain.transfers(1);
        let b2 = chain.push(txs);
        let service = service(&chain);
        let now = chain.now();

        // b2 presented as a child of genesis
        let result = service.validate_block(&b2, Some(&genesis), now, ValidationLevel::Quantum);
        assert!(!result.is_valid());
        assert!(result.has_error("Previous hash does not match previous block hash"));
        assert!(result.has_error("Non-sequential block height"));

        let ok = service.validate_block(&b2, Some(&b1), now, ValidationLevel::Quantum);
        assert!(ok.is_valid());
    }

    #[test]
    fn test_reordered_transactions_rejected() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let txs = chain.transfers(4);
        let b1 = chain.push(txs);
        let service = service(&chain);

        let mut reordered = b1.clone();
        reordered.transactions.swap(0, 3);
        let now = chain.now();
        let result =
            service.validate_block(&reordered, Some(&genesis), now, ValidationLevel::Enhanced);

        assert!(result.has_error("Merkle root is invalid"));
        // Every transaction is still individually valid
        assert_eq!(
            result
                .outcome(ConsensusCheck::TransactionValidity)
                .map(|o| o.points),
            Some(15)
        );
    }

    #[test]
    fn test_proof_replayed_on_other_block_rejected() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let b1 = chain.push(vec![]);
        let service = service(&chain);

        let sibling = chain.seal(
            {
                let mut header = b1.header.clone();
                header.nonce = 99;
                header
            },
            vec![],
        );
        let replayed = sibling.with_quantum_proof(b1.quantum_security_proof.clone().unwrap());

        let now = chain.now();
        let result =
            service.validate_block(&replayed, Some(&genesis), now, ValidationLevel::Quantum);
        assert!(!result.is_valid());
        assert!(result.has_error("proof is invalid"));
    }

    #[test]
    fn test_forged_transactions_by_level() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let mut txs = chain.transfers(3);
        txs.push(chain.forged_transfer());
        let b1 = chain.push(txs);
        let service = service(&chain);
        let now = chain.now();

        // 75% valid: invisible at standard, fatal above it
        let standard = service.validate_block(&b1, Some(&genesis), now, ValidationLevel::Standard);
        assert!(standard.is_valid());

        let enhanced = service.validate_block(&b1, Some(&genesis), now, ValidationLevel::Enhanced);
        assert!(!enhanced.is_valid());
        assert!(enhanced.has_error("Only 75.0% of transactions are valid"));
    }

    #[test]
    fn test_block_from_the_future_rejected() {
        let mut chain = ChainBuilder::new();
        chain.push(vec![]);
        let service = service(&chain);

        let genesis = &chain.blocks()[0];
        let now = GENESIS_TIME - 60;
        let result = service.validate_block(genesis, None, now, ValidationLevel::Standard);
        assert!(result.has_error("seconds in the future"));
    }

    // =============================================================================
    // LIGHT CLIENT & MEMPOOL
    // =============================================================================

    #[test]
    fn test_light_client_inclusion_proofs() {
        let mut chain = ChainBuilder::new();
        chain.push(vec![]);
        let txs = chain.transfers(11);
        let block = chain.push(txs);
        let service = service(&chain);

        for tx in &block.transactions {
            let proof = service
                .generate_merkle_proof(&block.transactions, &tx.id)
                .unwrap();
            assert!(service.verify_merkle_proof(
                &tx.id,
                &block.header.merkle_root,
                &proof.proof,
                proof.index
            ));
            assert!(!service.verify_merkle_proof(
                &tx.id,
                &chain.blocks()[0].header.merkle_root,
                &proof.proof,
                proof.index
            ));
        }
    }

    #[test]
    fn test_mempool_screening() {
        let mut chain = ChainBuilder::new();
        let service = service(&chain);
        let good = chain.transfer();
        let forged = chain.forged_transfer();

        assert!(service.validate_transaction(&good));
        assert!(!service.validate_transaction(&forged));

        let report = service.validate_transaction_detailed(&forged);
        assert!(report.errors()[0].contains("signature is invalid"));
    }
}
