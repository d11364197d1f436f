//! Subcommand implementations. Each returns the JSON to print and whether
//! the command counts as a success for the exit status.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use qc_08_consensus::{
    ConsensusApi, ConsensusService, MerkleEngine, SystemTimeSource, TimeSource, ValidatorConfig,
};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde_json::json;
use shared_crypto::{
    hash_function, Ed25519KeyPair, HashAlgorithm, MlDsa44KeyPair, SignatureAlgorithm, Signer,
};
use shared_types::{parse_hash_hex, Block, Hash, ValidationLevel};
use tracing::{debug, info};

/// What a command prints and how the process exits.
#[derive(Debug)]
pub struct Report {
    pub json: String,
    pub success: bool,
}

impl Report {
    fn new(value: &impl serde::Serialize, success: bool) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_string_pretty(value)?,
            success,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ValidatorConfig::from_json(&text).with_context(|| format!("loading {}", path.display()))
        }
        None => {
            let config = ValidatorConfig::from_env();
            config.validate()?;
            Ok(config)
        }
    }
}

/// `validate`: full consensus check of one block.
pub fn validate(
    block: &Path,
    previous: Option<&Path>,
    level: Option<ValidationLevel>,
    now: Option<u64>,
    config: Option<&Path>,
) -> Result<Report> {
    let config = load_config(config)?;
    let level = level.unwrap_or(config.default_validation_level);
    let service = ConsensusService::from_config(config)?;

    let block: Block = read_json(block)?;
    let previous = previous.map(read_json::<Block>).transpose()?;
    let now = now.unwrap_or_else(|| SystemTimeSource.now());

    debug!(height = block.header.height, %level, now, "validating block");
    let result = service.validate_block(&block, previous.as_ref(), now, level);
    Report::new(&result, result.is_valid())
}

/// `prove`: inclusion proof for a transaction in a block file.
pub fn prove(block: &Path, tx: &str, hash: HashAlgorithm) -> Result<Report> {
    let block: Block = read_json(block)?;
    let tx_id = parse_hash_hex(tx).context("transaction id")?;
    let engine = MerkleEngine::new(hash_function(hash));

    let Some(proof) = engine.generate_proof(&block.transactions, &tx_id) else {
        bail!("transaction {} is not in block {}", tx, block.header.height);
    };
    if engine.calculate_block_root(&block) != block.header.merkle_root {
        info!("block Merkle root differs from its transactions; proof uses the computed root");
    }
    Report::new(&proof, true)
}

/// `verify-proof`: check an inclusion proof against a root.
pub fn verify_proof(
    tx: &str,
    root: &str,
    proof: &[String],
    index: usize,
    hash: HashAlgorithm,
) -> Result<Report> {
    let tx_id = parse_hash_hex(tx).context("transaction id")?;
    let root = parse_hash_hex(root).context("root")?;
    let proof: Vec<Hash> = proof
        .iter()
        .filter(|p| !p.trim().is_empty())
        .enumerate()
        .map(|(level, p)| parse_hash_hex(p).with_context(|| format!("proof level {}", level)))
        .collect::<Result<_>>()?;

    let valid = MerkleEngine::new(hash_function(hash)).verify_proof(&tx_id, &root, &proof, index);
    Report::new(&json!({ "valid": valid }), valid)
}

/// `keygen`: derive a key from a seed (or a fresh one) and show its public key.
pub fn keygen(scheme: SignatureAlgorithm, seed: Option<&str>) -> Result<Report> {
    let seed: [u8; 32] = match seed {
        Some(seed) => parse_hash_hex(seed).context("seed must be 32 bytes of hex")?,
        None => {
            let mut seed = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed);
            seed
        }
    };

    let public_key = match scheme {
        SignatureAlgorithm::Ed25519 => Signer::public_key(&Ed25519KeyPair::from_seed(seed)),
        SignatureAlgorithm::MlDsa44 => MlDsa44KeyPair::from_seed(seed).public_key(),
    };
    let output = json!({
        "scheme": scheme.as_str(),
        "postQuantum": scheme.is_post_quantum(),
        "publicKey": hex::encode(public_key),
        "seed": hex::encode(seed),
    });
    Report::new(&output, true)
}
