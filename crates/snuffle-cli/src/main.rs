//! Snuffle binary.
//!
//! # Usage
//!
//! ```bash
//! # Encrypt a file with Salsa20/20
//! snuffle encrypt --key <64 hex> --nonce <16 hex> -i plain.bin -o cipher.bin
//!
//! # Decrypt from stdin with XSalsa20, starting at block 0
//! snuffle decrypt --key <64 hex> --nonce <48 hex> < cipher.bin > plain.bin
//!
//! # Dump 64 bytes of Salsa20/12 keystream from block 7
//! RUST_LOG=debug snuffle keystream -k <64 hex> -n <16 hex> -r 12 -c 7 -l 64
//! ```

use clap::Parser;
use snuffle_cli::{Cli, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // stdout carries cipher output, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    run(&cli.command)?;

    Ok(())
}
