//! `XSalsa20`: Salsa20 with a 192-bit nonce.
//!
//! The first 16 nonce bytes and the key go through `HSalsa20` to derive a
//! subkey; Salsa20/20 then runs under that subkey with the last 8 nonce bytes.
//! A 24-byte nonce is large enough to be drawn at random per message.
//!
//! See "Extending the Salsa20 nonce": <https://cr.yp.to/snuffle/xsalsa-20110204.pdf>

use core::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::{
    block::{KEY_SIZE, Key, Nonce, initial_state},
    error::CipherError,
    rounds::{R20, permute},
    salsa::Salsa20,
    words,
};

/// Size of an `XSalsa20` nonce in bytes
pub const XNONCE_SIZE: usize = 24;

/// 192-bit `XSalsa20` nonce
pub type XNonce = [u8; XNONCE_SIZE];

/// State words that form the `HSalsa20` output, in output order
const SUBKEY_WORDS: [usize; 8] = [0, 5, 10, 15, 6, 7, 8, 9];

/// The `HSalsa20` function.
///
/// Builds a Salsa20 state with `input` in place of nonce and counter, runs
/// the 20-round permutation without feed-forward, and returns the diagonal
/// and middle words as a 32-byte subkey.
pub fn hsalsa20(key: &Key, input: &[u8; 16]) -> [u8; KEY_SIZE] {
    let mut middle = [0u32; 4];
    words::load_le(&mut middle, input);

    let mut state = initial_state(key, middle);
    permute::<R20>(&mut state);

    let mut out = [0u8; KEY_SIZE];
    for (chunk, &position) in out.chunks_exact_mut(4).zip(&SUBKEY_WORDS) {
        chunk.copy_from_slice(&state[position].to_le_bytes());
    }

    state.zeroize();
    middle.zeroize();
    out
}

/// `XSalsa20` stream cipher.
///
/// Same streaming semantics as [`Salsa20`]: each call consumes whole blocks
/// and advances the counter past them.
pub struct XSalsa20(Salsa20);

impl XSalsa20 {
    /// Create a cipher from byte slices, validating their lengths.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` if `key` is not 32 bytes
    /// - `InvalidNonceLength` if `nonce` is not 24 bytes
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self, CipherError> {
        let Ok(key_bytes) = <&Key>::try_from(key) else {
            return Err(CipherError::InvalidKeyLength { expected: KEY_SIZE, actual: key.len() });
        };
        let Ok(nonce_bytes) = <&XNonce>::try_from(nonce) else {
            return Err(CipherError::InvalidNonceLength {
                expected: XNONCE_SIZE,
                actual: nonce.len(),
            });
        };

        Ok(Self::from_parts(key_bytes, nonce_bytes))
    }

    /// Create a cipher from fixed-size key and nonce. The counter starts at 0.
    pub fn from_parts(key: &Key, nonce: &XNonce) -> Self {
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&nonce[..16]);
        let mut suffix: Nonce = [0u8; 8];
        suffix.copy_from_slice(&nonce[16..]);

        let subkey = Zeroizing::new(hsalsa20(key, &prefix));
        Self(Salsa20::from_parts(&subkey, &suffix))
    }

    /// Index of the next keystream block.
    pub fn counter(&self) -> u64 {
        self.0.counter()
    }

    /// Move to keystream block `block`.
    pub fn seek(&mut self, block: u64) {
        self.0.seek(block);
    }

    /// Number of blocks left before the counter would wrap.
    pub fn remaining_blocks(&self) -> u64 {
        self.0.remaining_blocks()
    }

    /// XOR the keystream into `buf` in place.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        self.0.apply_keystream(buf)
    }

    /// Encrypt `plaintext`, returning a ciphertext of the same length.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.0.encrypt(plaintext)
    }

    /// Decrypt `ciphertext`. Identical to [`XSalsa20::encrypt`].
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.0.decrypt(ciphertext)
    }

    /// Return the next `len` keystream bytes.
    pub fn keystream(&mut self, len: usize) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        self.0.keystream(len)
    }
}

impl fmt::Debug for XSalsa20 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XSalsa20").field("counter", &self.counter()).finish_non_exhaustive()
    }
}
