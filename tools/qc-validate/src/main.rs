//! qc-validate: Quantum-Chain consensus validator CLI
//!
//! Results are printed to stdout as JSON; logs go to stderr (`RUST_LOG`,
//! default `info`).

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shared_crypto::{HashAlgorithm, SignatureAlgorithm};
use shared_types::ValidationLevel;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// qc-validate: validate blocks and inclusion proofs offline
#[derive(Parser, Debug)]
#[command(name = "qc-validate")]
#[command(about = "Validate Quantum-Chain blocks, Merkle proofs and keys")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a block (JSON) against its parent
    Validate {
        /// Block to validate
        #[arg(short, long)]
        block: PathBuf,

        /// Parent block; omit for genesis
        #[arg(short, long)]
        previous: Option<PathBuf>,

        /// standard, enhanced or quantum (default: from config)
        #[arg(short, long)]
        level: Option<ValidationLevel>,

        /// Unix seconds to judge the block at (default: now)
        #[arg(long)]
        now: Option<u64>,

        /// Validator config (JSON); defaults to QC_* environment variables
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the Merkle inclusion proof of a transaction in a block
    Prove {
        #[arg(short, long)]
        block: PathBuf,

        /// Transaction id (hex)
        #[arg(short, long)]
        tx: String,

        #[arg(long, default_value = "sha256")]
        hash: HashAlgorithm,
    },

    /// Check a Merkle inclusion proof
    VerifyProof {
        /// Transaction id (hex)
        #[arg(long)]
        tx: String,

        /// Merkle root (hex)
        #[arg(long)]
        root: String,

        /// Sibling hashes, comma separated, leaf level first
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,

        #[arg(long)]
        index: usize,

        #[arg(long, default_value = "sha256")]
        hash: HashAlgorithm,
    },

    /// Derive or generate a key and print its public key
    Keygen {
        #[arg(short, long, default_value = "ml-dsa-44")]
        scheme: SignatureAlgorithm,

        /// 32-byte seed (hex); random when omitted
        #[arg(long)]
        seed: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let outcome = match args.command {
        Command::Validate {
            block,
            previous,
            level,
            now,
            config,
        } => commands::validate(&block, previous.as_deref(), level, now, config.as_deref()),
        Command::Prove { block, tx, hash } => commands::prove(&block, &tx, hash),
        Command::VerifyProof {
            tx,
            root,
            proof,
            index,
            hash,
        } => commands::verify_proof(&tx, &root, &proof, index, hash),
        Command::Keygen { scheme, seed } => commands::keygen(scheme, seed.as_deref()),
    };

    match outcome {
        Ok(report) => {
            println!("{}", report.json);
            if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}
