//! # Concurrency
//!
//! One service instance, many threads, no coordination: results must not
//! depend on who else is validating.

#[cfg(test)]
mod tests {
    use crate::fixtures::ChainBuilder;
    use qc_08_consensus::{BlockCandidate, ConsensusApi, ConsensusService};
    use shared_types::ValidationLevel;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_parallel_threads_agree_with_sequential() {
        let mut chain = ChainBuilder::new();
        chain.push(vec![]);
        for _ in 0..6 {
            let txs = chain.transfers(4);
            chain.push(txs);
        }
        let blocks = Arc::new(chain.blocks().to_vec());
        let service = Arc::new(ConsensusService::from_config(chain.config()).unwrap());
        let now = chain.now();

        let sequential: Vec<_> = (0..blocks.len())
            .map(|i| {
                let previous = i.checked_sub(1).map(|p| &blocks[p]);
                service.validate_block(&blocks[i], previous, now, ValidationLevel::Quantum)
            })
            .collect();

        let handles: Vec<_> = (0..blocks.len())
            .rev()
            .map(|i| {
                let blocks = Arc::clone(&blocks);
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let previous = i.checked_sub(1).map(|p| &blocks[p]);
                    (i, service.validate_block(&blocks[i], previous, now, ValidationLevel::Quantum))
                })
            })
            .collect();

        for handle in handles {
            let (i, result) = handle.join().unwrap();
            assert_eq!(result, sequential[i]);
            assert!(result.is_valid());
        }
    }

    #[test]
    fn test_batch_validation_out_of_order() {
        let mut chain = ChainBuilder::new();
        chain.push(vec![]);
        for _ in 0..4 {
            let txs = chain.transfers(2);
            chain.push(txs);
        }
        let service = ConsensusService::from_config(chain.config()).unwrap();
        let blocks = chain.blocks();

        // Children before parents; the validator imposes no sequencing
        let candidates: Vec<BlockCandidate<'_>> = (0..blocks.len())
            .rev()
            .map(|i| BlockCandidate {
                block: &blocks[i],
                previous: i.checked_sub(1).map(|p| &blocks[p]),
            })
            .collect();

        let results = service.validate_batch(&candidates, chain.now(), ValidationLevel::Quantum);
        assert_eq!(results.len(), blocks.len());
        for (candidate, result) in candidates.iter().zip(&results) {
            assert_eq!(result.block_height(), candidate.block.header.height);
            assert!(result.is_valid(), "errors: {:?}", result.errors());
        }
    }
}
