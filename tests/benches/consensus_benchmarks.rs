//! # Consensus Validator Benchmarks
//!
//! | Operation | Claim | Target |
//! |-----------|-------|--------|
//! | Merkle root | O(n) in transaction count | < 5ms for 10k ids |
//! | Merkle proof verify | O(log n) | < 10µs |
//! | Block validation (enhanced) | O(n) signature checks | < 100ms for 1k txs |
//! | Quantum proof verify | 256 hashes + path | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_08_consensus::{ConsensusApi, ConsensusService, MerkleEngine};
use qc_tests::fixtures::ChainBuilder;
use rand::Rng;
use shared_crypto::Sha256Hash;
use shared_types::{Hash, ValidationLevel};
use std::sync::Arc;
use std::time::Duration;

fn random_ids(count: usize) -> Vec<Hash> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

fn bench_merkle(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-08-merkle");
    let engine = MerkleEngine::new(Arc::new(Sha256Hash));

    for size in [16usize, 256, 4096, 10_000] {
        let ids = random_ids(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("calculate_root", size), &ids, |b, ids| {
            b.iter(|| black_box(engine.calculate_root(ids)))
        });

        let root = engine.calculate_root(&ids);
        let target = ids[size / 2];
        let proof = engine
            .generate_proof_for_ids(&ids, &target)
            .expect("target is a member");
        group.bench_with_input(BenchmarkId::new("verify_proof", size), &proof, |b, proof| {
            b.iter(|| black_box(engine.verify_proof(&target, &root, &proof.proof, proof.index)))
        });
    }

    group.finish();
}

fn bench_block_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-08-block-validation");
    group.measurement_time(Duration::from_secs(10));

    for size in [10usize, 100, 1000] {
        let mut chain = ChainBuilder::new();
        let genesis = chain.push(vec![]);
        let txs = chain.transfers(size);
        let block = chain.push(txs);
        let now = chain.now();

        for parallel in [false, true] {
            let config = qc_08_consensus::ValidatorConfig {
                parallel_transaction_validation: parallel,
                max_transactions_per_block: 10_000,
                ..chain.config()
            };
            let service = ConsensusService::from_config(config).expect("fixture config is valid");
            let label = if parallel { "parallel" } else { "sequential" };

            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(label, size), &block, |b, block| {
                b.iter(|| {
                    black_box(service.validate_block(
                        block,
                        Some(&genesis),
                        now,
                        ValidationLevel::Quantum,
                    ))
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_merkle, bench_block_validation);
criterion_main!(benches);
