//! Snuffle command-line driver.
//!
//! Encrypts or decrypts a byte stream under a hex-encoded key and nonce, or
//! dumps raw keystream. An 8-byte nonce selects Salsa20 (with 8, 12 or 20
//! rounds); a 24-byte nonce selects `XSalsa20`.
//!
//! Input is processed in chunks that are a whole number of keystream blocks,
//! so the output is identical to encrypting the entire input in one call.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use snuffle_cipher::{BLOCK_SIZE, CipherError, Salsa8, Salsa12, Salsa20, XNONCE_SIZE, XSalsa20};
use thiserror::Error;
use zeroize::Zeroizing;

/// Bytes processed per read; a multiple of the keystream block size
const CHUNK_SIZE: usize = 1024 * BLOCK_SIZE;

/// Salsa20 stream cipher tool
#[derive(Parser, Debug)]
#[command(name = "snuffle")]
#[command(about = "Salsa20 / XSalsa20 stream cipher")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations supported by the tool
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt input to output
    Encrypt(TransformArgs),
    /// Decrypt input to output (the same operation as encrypt)
    Decrypt(TransformArgs),
    /// Print keystream bytes as hex
    Keystream(KeystreamArgs),
}

/// Key, nonce and position shared by every operation
#[derive(Args, Debug)]
pub struct CipherArgs {
    /// Key as 64 hex digits
    #[arg(short, long)]
    pub key: String,

    /// Nonce as 16 hex digits (Salsa20) or 48 hex digits (`XSalsa20`)
    #[arg(short, long)]
    pub nonce: String,

    /// Block counter to start from
    #[arg(short, long, default_value_t = 0)]
    pub counter: u64,

    /// Number of rounds
    #[arg(short, long, value_enum, default_value_t = RoundCount::Twenty)]
    pub rounds: RoundCount,
}

/// Arguments for `encrypt` and `decrypt`
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Cipher parameters
    #[command(flatten)]
    pub cipher: CipherArgs,

    /// Input file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `keystream`
#[derive(Args, Debug)]
pub struct KeystreamArgs {
    /// Cipher parameters
    #[command(flatten)]
    pub cipher: CipherArgs,

    /// Number of keystream bytes to print
    #[arg(short, long)]
    pub len: usize,
}

/// Supported round counts
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoundCount {
    /// Salsa20/8
    #[value(name = "8")]
    Eight,
    /// Salsa20/12
    #[value(name = "12")]
    Twelve,
    /// Salsa20/20
    #[value(name = "20")]
    Twenty,
}

impl RoundCount {
    /// Number of rounds as an integer.
    pub fn count(self) -> usize {
        match self {
            Self::Eight => 8,
            Self::Twelve => 12,
            Self::Twenty => 20,
        }
    }
}

/// Errors from the command-line driver
#[derive(Debug, Error)]
pub enum CliError {
    /// An argument was not valid hex
    #[error("invalid hex in {field}: {source}")]
    Hex {
        /// Which argument failed to decode
        field: &'static str,
        /// Decoder error
        source: hex::FromHexError,
    },

    /// `XSalsa20` is only defined with 20 rounds
    #[error("XSalsa20 requires 20 rounds, got {rounds}")]
    UnsupportedRounds {
        /// Requested round count
        rounds: usize,
    },

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The cipher rejected its parameters or ran out of keystream
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// A cipher of any variant the tool supports.
#[derive(Debug)]
pub enum StreamCipher {
    /// Salsa20/8
    Salsa8(Salsa8),
    /// Salsa20/12
    Salsa12(Salsa12),
    /// Salsa20/20
    Salsa20(Salsa20),
    /// `XSalsa20`
    XSalsa20(XSalsa20),
}

impl StreamCipher {
    /// Decode key and nonce, pick the variant and seek to the start counter.
    pub fn from_args(args: &CipherArgs) -> Result<Self, CliError> {
        let key = decode_hex("key", &args.key)?;
        let nonce = decode_hex("nonce", &args.nonce)?;

        let mut cipher = match (nonce.len(), args.rounds) {
            (XNONCE_SIZE, RoundCount::Twenty) => Self::XSalsa20(XSalsa20::new(&key, &nonce)?),
            (XNONCE_SIZE, rounds) => {
                return Err(CliError::UnsupportedRounds { rounds: rounds.count() });
            },
            (_, RoundCount::Eight) => Self::Salsa8(Salsa8::new(&key, &nonce)?),
            (_, RoundCount::Twelve) => Self::Salsa12(Salsa12::new(&key, &nonce)?),
            (_, RoundCount::Twenty) => Self::Salsa20(Salsa20::new(&key, &nonce)?),
        };
        cipher.seek(args.counter);

        tracing::info!(variant = cipher.name(), counter = args.counter, "cipher ready");
        Ok(cipher)
    }

    /// Human-readable variant name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Salsa8(_) => "Salsa20/8",
            Self::Salsa12(_) => "Salsa20/12",
            Self::Salsa20(_) => "Salsa20/20",
            Self::XSalsa20(_) => "XSalsa20",
        }
    }

    /// Index of the next keystream block.
    pub fn counter(&self) -> u64 {
        match self {
            Self::Salsa8(c) => c.counter(),
            Self::Salsa12(c) => c.counter(),
            Self::Salsa20(c) => c.counter(),
            Self::XSalsa20(c) => c.counter(),
        }
    }

    /// Move to keystream block `block`.
    pub fn seek(&mut self, block: u64) {
        match self {
            Self::Salsa8(c) => c.seek(block),
            Self::Salsa12(c) => c.seek(block),
            Self::Salsa20(c) => c.seek(block),
            Self::XSalsa20(c) => c.seek(block),
        }
    }

    /// XOR the keystream into `buf` in place.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        match self {
            Self::Salsa8(c) => c.apply_keystream(buf),
            Self::Salsa12(c) => c.apply_keystream(buf),
            Self::Salsa20(c) => c.apply_keystream(buf),
            Self::XSalsa20(c) => c.apply_keystream(buf),
        }
    }
}

/// Encrypt or decrypt everything `reader` yields into `writer`.
///
/// Returns the number of bytes processed. Output already written stays
/// written if a later chunk fails.
pub fn transform<R: Read, W: Write>(
    cipher: &mut StreamCipher,
    mut reader: R,
    mut writer: W,
) -> Result<u64, CliError> {
    let mut buf = Zeroizing::new(vec![0u8; CHUNK_SIZE]);
    let mut total = 0u64;

    loop {
        let filled = fill(&mut reader, &mut buf)?;
        if filled == 0 {
            break;
        }

        cipher.apply_keystream(&mut buf[..filled])?;
        writer.write_all(&buf[..filled])?;
        total += filled as u64;

        if filled < buf.len() {
            break;
        }
    }

    writer.flush()?;
    Ok(total)
}

/// Write `len` keystream bytes to `writer` as one line of hex.
pub fn write_keystream<W: Write>(
    cipher: &mut StreamCipher,
    len: usize,
    mut writer: W,
) -> Result<(), CliError> {
    let mut keystream = Zeroizing::new(vec![0u8; len]);
    cipher.apply_keystream(&mut keystream)?;

    let encoded = Zeroizing::new(hex::encode(keystream.as_slice()));
    writeln!(writer, "{}", encoded.as_str())?;
    writer.flush()?;

    Ok(())
}

/// Execute `command` against the given files, or stdin/stdout.
pub fn run(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Encrypt(args) | Command::Decrypt(args) => {
            let mut cipher = StreamCipher::from_args(&args.cipher)?;
            let reader = open_input(args.input.as_deref())?;
            let writer = open_output(args.output.as_deref())?;

            let bytes = transform(&mut cipher, reader, writer)?;
            tracing::info!(bytes, counter = cipher.counter(), "stream processed");
        },
        Command::Keystream(args) => {
            let mut cipher = StreamCipher::from_args(&args.cipher)?;
            write_keystream(&mut cipher, args.len, io::stdout().lock())?;
        },
    }

    Ok(())
}

fn decode_hex(field: &'static str, value: &str) -> Result<Zeroizing<Vec<u8>>, CliError> {
    hex::decode(value.trim())
        .map(Zeroizing::new)
        .map_err(|source| CliError::Hex { field, source })
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>, CliError> {
    Ok(match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading input file");
            Box::new(File::open(path)?)
        },
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    Ok(match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "writing output file");
            Box::new(BufWriter::new(File::create(path)?))
        },
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Read until `buf` is full or the reader is exhausted.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
