//! `fieldcrypt`: operator utility.
//!
//! ```text
//! fieldcrypt generate-key     print a fresh ENCRYPTION_KEY value
//! fieldcrypt check            load configuration and resolve the key, fail-fast
//! fieldcrypt token [BYTES]    print a random hex token (default 32 bytes)
//! fieldcrypt hash             print the SHA-256 of stdin
//! ```
//!
//! `check` follows the same startup sequence a host application does:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Resolve the master key into a [`CryptoContext`].

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldcrypt::{telemetry, Config, CryptoContext, DEFAULT_TOKEN_BYTES};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "fieldcrypt")]
#[command(about = "Field encryption key setup and crypto utilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Print a fresh ENCRYPTION_KEY value
    GenerateKey,

    /// Load configuration and resolve the key, failing fast
    Check,

    /// Print a random hex token
    Token {
        /// Token size in bytes
        #[arg(default_value_t = DEFAULT_TOKEN_BYTES)]
        bytes: usize,
    },

    /// Print the SHA-256 of stdin
    Hash,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Setup runs before any key exists, so it never reads configuration.
        Command::GenerateKey => println!("{}", fieldcrypt::generate_key()),
        Command::Token { bytes } => println!("{}", fieldcrypt::generate_token(bytes)?),
        Command::Hash => {
            let mut input = Vec::new();
            std::io::stdin()
                .read_to_end(&mut input)
                .context("failed to read stdin")?;
            println!("{}", fieldcrypt::hash(&input));
        }
        Command::Check => check()?,
    }
    Ok(())
}

fn check() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        profile = cfg.deployment_profile.as_str(),
        "fieldcrypt check starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key material
    // -----------------------------------------------------------------------
    let ctx = CryptoContext::from_config(&cfg).context("encryption key rejected")?;
    println!("ok: key_mode={}", ctx.key_mode().as_str());
    Ok(())
}
