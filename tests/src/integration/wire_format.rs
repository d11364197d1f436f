//! # Wire Format
//!
//! Blocks, proofs and reports survive a JSON round trip with their
//! commitments intact. Reports that contradict themselves do not decode.

#[cfg(test)]
mod tests {
    use crate::fixtures::ChainBuilder;
    use qc_08_consensus::{ConsensusApi, ConsensusService, MerkleProof};
    use shared_types::{Block, TransactionValidationResult, ValidationLevel, ValidationResult};

    #[test]
    fn test_block_json_round_trip_validates() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let txs = chain.transfers(3);
        let b1 = chain.push(txs);
        let service = ConsensusService::from_config(chain.config()).unwrap();

        let json = serde_json::to_string(&b1).unwrap();
        let decoded: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, b1);

        let now = chain.now();
        let result =
            service.validate_block(&decoded, Some(&genesis), now, ValidationLevel::Quantum);
        assert!(result.is_valid(), "errors: {:?}", result.errors());
    }

    #[test]
    fn test_block_json_field_encoding() {
        let mut chain = ChainBuilder::new();
        let txs = chain.transfers(1);
        let genesis = chain.push(txs);
        let json = serde_json::to_value(&genesis).unwrap();

        assert_eq!(json["hash"], hex::encode(genesis.hash));
        assert_eq!(json["header"]["height"], 0);
        assert_eq!(json["totalFees"], "1");
        assert!(json["quantumSecurityProof"].as_str().unwrap().len() > 64);
        assert_eq!(json["transactions"][0]["amount"], "1");
        assert_eq!(json["transactions"][0]["data"]["type"], "transfer");
    }

    #[test]
    fn test_validation_result_json() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let service = ConsensusService::from_config(chain.config()).unwrap();
        let now = chain.now();
        let result = service.validate_block(&genesis, None, now, ValidationLevel::Enhanced);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["securityScore"], 70);
        assert_eq!(json["validationLevel"], "enhanced");
        assert_eq!(json["blockHeight"], 0);
        assert_eq!(json["blockHash"], hex::encode(genesis.hash));
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_validation_result_json_round_trip() {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let mut txs = chain.transfers(3);
        txs.push(chain.forged_transfer());
        let b1 = chain.push(txs);
        let service = ConsensusService::from_config(chain.config()).unwrap();

        // One forged transfer: rejected, with partial transaction credit
        let now = chain.now();
        let result = service.validate_block(&b1, Some(&genesis), now, ValidationLevel::Quantum);
        assert!(!result.is_valid());

        let json = serde_json::to_string(&result).unwrap();
        let decoded: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, result);
        assert_eq!(decoded.security_score(), result.security_score());

        let forged = json.replacen("\"isValid\":false", "\"isValid\":true", 1);
        assert_ne!(forged, json);
        assert!(serde_json::from_str::<ValidationResult>(&forged).is_err());
    }

    #[test]
    fn test_transaction_report_json_round_trip() {
        let mut chain = ChainBuilder::new();
        let service = ConsensusService::from_config(chain.config()).unwrap();
        let forged = chain.forged_transfer();

        let report = service.validate_transaction_detailed(&forged);
        let json = serde_json::to_value(&report).unwrap();
        let decoded: TransactionValidationResult = serde_json::from_value(json).unwrap();

        assert_eq!(decoded, report);
        assert!(!decoded.is_valid());
    }

    #[test]
    fn test_merkle_proof_json_round_trip() {
        let mut chain = ChainBuilder::new();
        let txs = chain.transfers(6);
        let block = chain.push(txs);
        let service = ConsensusService::from_config(chain.config()).unwrap();

        let target = &block.transactions[4];
        let proof = service
            .generate_merkle_proof(&block.transactions, &target.id)
            .unwrap();
        let decoded: MerkleProof =
            serde_json::from_str(&serde_json::to_string(&proof).unwrap()).unwrap();

        assert_eq!(decoded, proof);
        assert!(service.verify_merkle_proof(
            &target.id,
            &block.header.merkle_root,
            &decoded.proof,
            decoded.index
        ));
    }

    #[test]
    fn test_malformed_block_json_rejected() {
        let bad_hash = r#"{
            "header": {
                "version": 1,
                "previousHash": "00",
                "merkleRoot": "00",
                "timestamp": 0,
                "difficulty": 0,
                "nonce": 0,
                "height": 0
            },
            "transactions": [],
            "hash": "zz",
            "totalFees": "0",
            "sizeBytes": 0
        }"#;
        assert!(serde_json::from_str::<Block>(bad_hash).is_err());
    }
}
