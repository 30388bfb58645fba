//! Command-line interface for `fwaes`: encrypts firmware images for the bootloader and
//! checks the cipher against known vectors.

#![forbid(unsafe_code)]

mod image;
mod selftest;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use fwaes_core::{Aes128Key, Direction, Iv, Mode};
use log::{info, LevelFilter};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::image::{ImageJob, IvPolicy};

/// AES-128 firmware image tool.
#[derive(Parser)]
#[command(
    name = "fwaes",
    version,
    author,
    about = "AES-128 ECB/CBC/CTR tool for firmware update images"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt an image file.
    Encrypt(TransformArgs),
    /// Decrypt an image file.
    Decrypt(TransformArgs),
    /// Run known-answer vectors and random round trips.
    Check {
        /// Number of random samples per mode.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key, IV and image, encrypted in transfer chunks and decrypted back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct TransformArgs {
    /// Mode of operation.
    #[arg(long, value_enum, default_value_t = ModeArg::Cbc)]
    mode: ModeArg,
    /// AES-128 key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// IV or initial counter as 32 hex characters (CBC and CTR).
    #[arg(long, value_name = "HEX")]
    iv_hex: Option<String>,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Transfer chunk size in bytes (defaults to the whole image).
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,
    /// IV handling between chunks.
    #[arg(long, value_enum, default_value_t = IvPolicyArg::Carry)]
    iv_policy: IvPolicyArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Ecb,
    Cbc,
    Ctr,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Ecb => Mode::Ecb,
            ModeArg::Cbc => Mode::Cbc,
            ModeArg::Ctr => Mode::Ctr,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum IvPolicyArg {
    /// Keep the IV/counter running across chunks.
    Carry,
    /// Restart every chunk from the initial IV.
    Reset,
}

impl From<IvPolicyArg> for IvPolicy {
    fn from(value: IvPolicyArg) -> Self {
        match value {
            IvPolicyArg::Carry => IvPolicy::Carry,
            IvPolicyArg::Reset => IvPolicy::Reset,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Encrypt(args) => cmd_transform(Direction::Encrypt, &args),
        Commands::Decrypt(args) => cmd_transform(Direction::Decrypt, &args),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn cmd_transform(direction: Direction, args: &TransformArgs) -> Result<()> {
    let job = ImageJob {
        mode: args.mode.into(),
        direction,
        key: parse_key_hex(&args.key_hex)?,
        iv: args.iv_hex.as_deref().map(parse_iv_hex).transpose()?,
        chunk_size: args.chunk_size,
        iv_policy: args.iv_policy.into(),
    };
    let mut data = read_file(&args.input)?;
    job.run(&mut data)
        .with_context(|| format!("{direction} {}", args.input.display()))?;
    fs::write(&args.output, data).with_context(|| format!("write {}", args.output.display()))?;
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let vectors = selftest::known_answers()?;
    let mut rng = seeded_rng(seed);
    selftest::random_round_trips(&mut rng, samples)?;
    println!("{vectors} known-answer vectors and {samples} round trips per mode passed");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    const DEMO_IMAGE: usize = 64;
    const DEMO_CHUNK: usize = 32;

    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    let mut iv = [0u8; 16];
    let mut plaintext = [0u8; DEMO_IMAGE];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut plaintext);

    let job = |direction| ImageJob {
        mode: Mode::Cbc,
        direction,
        key: Aes128Key::from(key_bytes),
        iv: Some(iv),
        chunk_size: Some(DEMO_CHUNK),
        iv_policy: IvPolicy::Reset,
    };

    let mut image = plaintext;
    job(Direction::Encrypt).run(&mut image)?;
    let ciphertext_hex = hex::encode(image);
    job(Direction::Decrypt).run(&mut image)?;

    println!("demo key: {}", hex::encode(key_bytes));
    println!("demo iv: {}", hex::encode(iv));
    println!("plaintext: {}", hex::encode(plaintext));
    println!("ciphertext: {}", ciphertext_hex);
    println!("decrypted: {}", hex::encode(image));
    if image != plaintext {
        bail!("demo roundtrip failed");
    }
    info!("demo round trip succeeded");
    Ok(())
}

fn parse_hex16(hex_str: &str, what: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))?;
    if bytes.len() != 16 {
        bail!(
            "{what} must be 16 bytes (32 hex characters), got {}",
            bytes.len()
        );
    }
    let mut out = [0u8; 16];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    parse_hex16(hex_str, "AES-128 key").map(Aes128Key::from)
}

fn parse_iv_hex(hex_str: &str) -> Result<Iv> {
    parse_hex16(hex_str, "IV")
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => ChaCha20Rng::from_entropy(),
    }
}
