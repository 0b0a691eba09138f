//! Snuffle Salsa20 Stream Ciphers
//!
//! The Salsa20 family: a keystream generator driven by a 256-bit key, a
//! public nonce and a 64-bit block counter. Ciphertext is plaintext XOR
//! keystream, so encryption and decryption are the same operation. Callers
//! provide keys and nonces; nothing here draws randomness.
//!
//! # Layers
//!
//! ```text
//! words     rotl32, wrapping add, little-endian packing
//!    │
//!    ▼
//! rounds    quarter round → column/row rounds → double round × (rounds / 2)
//!    │
//!    ▼
//! block     constants ‖ key ‖ nonce ‖ counter → permute → feed-forward → 64 bytes
//!    │
//!    ▼
//! salsa     ceil(len / 64) blocks per call, counter += 1 per block, XOR
//! ```
//!
//! # Example
//!
//! ```
//! use snuffle_cipher::Salsa20;
//!
//! let mut cipher = Salsa20::new(b"an example very very secret key.", b"a nonce.")?;
//! let ciphertext = cipher.encrypt(&[1, 2, 3, 4, 5, 6, 7])?;
//! assert_eq!(ciphertext, [182, 14, 133, 113, 210, 25, 165]);
//!
//! // Rewind to the block used for encryption to decrypt.
//! cipher.seek(0);
//! assert_eq!(cipher.decrypt(&ciphertext)?, [1, 2, 3, 4, 5, 6, 7]);
//! # Ok::<(), snuffle_cipher::CipherError>(())
//! ```
//!
//! # Security
//!
//! Confidentiality only:
//! - No authentication: flipped ciphertext bits flip the same plaintext bits.
//!   Layer a MAC on top when integrity matters.
//! - A (key, nonce) pair must never be reused for different messages; the
//!   same goes for seeking backwards and encrypting new data.
//! - The block counter never wraps. Requests that would wrap it fail with
//!   `KeystreamExhausted` and leave the instance unchanged.
//!
//! Key-derived state and transient keystream buffers are zeroized on drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod block;
pub mod error;
pub mod rounds;
pub mod salsa;
pub mod words;
pub mod xsalsa;

pub use block::{BLOCK_SIZE, KEY_SIZE, Key, NONCE_SIZE, Nonce, keystream_block, salsa20_hash};
pub use error::CipherError;
pub use rounds::{R8, R12, R20, Rounds};
pub use salsa::{Salsa, Salsa8, Salsa12, Salsa20, xor_in_place};
pub use xsalsa::{XNONCE_SIZE, XNonce, XSalsa20, hsalsa20};
