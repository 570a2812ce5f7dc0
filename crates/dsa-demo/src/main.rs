//! DSA demo CLI
//!
//! Runs the complete DSA pipeline in one process:
//! - Domain parameter generation
//! - Key pair derivation
//! - Signing and verification
//!
//! Nothing is written to disk; every value lives for one invocation.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dsa_core::hash::Sha1;
use dsa_core::{
    generate_domain_parameters, generate_key_pair, sign, verify, verify_with_digest, DsaConfig,
    Signature, DEFAULT_MESSAGE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};

/// DSA demo - generate parameters, sign and verify
#[derive(Parser)]
#[command(name = "dsa-demo")]
#[command(about = "Digital Signature Algorithm demo")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    sizes: SizeArgs,

    /// Seed for a reproducible run (fresh entropy when omitted)
    #[arg(short, long, env = "DSA_SEED", global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SizeArgs {
    /// JSON file holding a DsaConfig; flags below override its values
    #[arg(short, long, env = "DSA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Bit length of P
    #[arg(short = 'L', long, global = true)]
    l_bits: Option<usize>,

    /// Bit length of Q
    #[arg(short = 'N', long, global = true)]
    n_bits: Option<usize>,

    /// Miller-Rabin witnesses per candidate
    #[arg(short, long, global = true)]
    witnesses: Option<usize>,

    /// Cap on candidates tried by each search loop
    #[arg(long, global = true)]
    max_attempts: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate parameters and keys, sign a message and verify it
    Run {
        /// Message to sign
        #[arg(short, long, default_value = DEFAULT_MESSAGE)]
        message: String,
    },

    /// Generate domain parameters and print them as JSON
    Params,
}

#[derive(Serialize)]
struct SignatureReport<'a> {
    message: &'a str,
    signature: &'a Signature,
    encoded: String,
    verified: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.sizes)?;
    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    match cli.command {
        Commands::Run { ref message } => run_demo(&config, message, &mut rng)?,
        Commands::Params => print_params(&config, &mut rng)?,
    }

    Ok(())
}

fn load_config(args: &SizeArgs) -> Result<DsaConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            DsaConfig::from_json(&json)?
        }
        None => DsaConfig::default(),
    };

    if let Some(l_bits) = args.l_bits {
        config.l_bits = l_bits;
    }
    if let Some(n_bits) = args.n_bits {
        config.n_bits = n_bits;
    }
    if let Some(witnesses) = args.witnesses {
        config.witness_count = witnesses;
    }
    if args.max_attempts.is_some() {
        config.max_attempts = args.max_attempts;
    }

    config.validate()?;
    Ok(config)
}

fn run_demo(config: &DsaConfig, message: &str, rng: &mut ChaCha20Rng) -> Result<()> {
    let start = Instant::now();

    info!(l_bits = config.l_bits, n_bits = config.n_bits, "Starting DSA demo");

    println!("*** DSS PARAMETERS ***");
    let params = generate_domain_parameters(config, rng)?;
    println!("P : {}", params.p);
    println!("Q : {}", params.q);
    println!("G : {}", params.g);

    let keys = generate_key_pair(&params, rng)?;
    println!("Private Key : {}", keys.private.to_biguint());
    println!("Public Key : {}", keys.public.y);

    println!();
    println!("*** SIGNING ***");
    let signature = sign(message.as_bytes(), &params, &keys.private, rng)?;
    println!("R : {}", signature.r);
    println!("S : {}", signature.s);

    println!();
    println!("*** VERIFYING ***");
    let status = verify_with_digest::<Sha1>(message.as_bytes(), &signature, &params, &keys.public);
    println!("{}", status);

    let tampered = Signature::new(signature.r.clone(), &signature.s + 1u32);
    let tampered_ok = verify(message.as_bytes(), &tampered, &params, &keys.public);
    println!("Tampered signature (s + 1) verified: {}", tampered_ok);

    let report = SignatureReport {
        message,
        signature: &signature,
        encoded: hex::encode(signature.to_bytes(&params)),
        verified: status.is_valid(),
    };
    info!(report = %serde_json::to_string(&report)?, "Demo finished");

    println!();
    println!("Time Elapsed : {:.3?}", start.elapsed());

    if !status.is_valid() || tampered_ok {
        anyhow::bail!("verification behaved unexpectedly: {}", status);
    }

    Ok(())
}

fn print_params(config: &DsaConfig, rng: &mut ChaCha20Rng) -> Result<()> {
    let params = generate_domain_parameters(config, rng)?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
