//! Streaming Salsa20 encryption and decryption.
//!
//! Each call consumes `ceil(len / 64)` keystream blocks starting at the
//! current counter, XORs the keystream prefix into the message and advances
//! the counter past every block it touched. Unused bytes at the end of the
//! last block are discarded, so two calls of 65 bytes use blocks 0..2 and
//! 2..4. Encrypting in multiples of [`BLOCK_SIZE`] is therefore equivalent to
//! encrypting the concatenation in one call.
//!
//! Decryption is the same operation. To decrypt from the start of a stream,
//! build a new instance or [`Salsa::seek`] back to the counter that was used
//! for encryption.

use core::fmt;

use zeroize::Zeroizing;

use crate::{
    block::{BLOCK_SIZE, Core, KEY_SIZE, Key, NONCE_SIZE, Nonce},
    error::CipherError,
    rounds::{R8, R12, R20, Rounds},
};

/// Salsa20/8 stream cipher (reduced-round, not recommended)
pub type Salsa8 = Salsa<R8>;

/// Salsa20/12 stream cipher
pub type Salsa12 = Salsa<R12>;

/// Salsa20/20 stream cipher (recommended)
pub type Salsa20 = Salsa<R20>;

/// The Salsa20 family of stream ciphers, generic over the round count.
///
/// An instance owns its key, nonce and block counter. The counter is mutated
/// through `&mut self`; share an instance between threads only behind a lock,
/// or give each stream its own instance and nonce.
///
/// Key material is zeroized on drop.
pub struct Salsa<R: Rounds> {
    core: Core<R>,
    counter: u64,
}

impl<R: Rounds> Salsa<R> {
    /// Create a cipher from byte slices, validating their lengths.
    ///
    /// The counter starts at 0.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` if `key` is not 32 bytes
    /// - `InvalidNonceLength` if `nonce` is not 8 bytes
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self, CipherError> {
        let Ok(key_bytes) = <&Key>::try_from(key) else {
            return Err(CipherError::InvalidKeyLength { expected: KEY_SIZE, actual: key.len() });
        };
        let Ok(nonce_bytes) = <&Nonce>::try_from(nonce) else {
            return Err(CipherError::InvalidNonceLength {
                expected: NONCE_SIZE,
                actual: nonce.len(),
            });
        };

        Ok(Self::from_parts(key_bytes, nonce_bytes))
    }

    /// Create a cipher from fixed-size key and nonce. The counter starts at 0.
    pub fn from_parts(key: &Key, nonce: &Nonce) -> Self {
        Self { core: Core::new(key, *nonce), counter: 0 }
    }

    /// Index of the next keystream block.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Move to keystream block `block`.
    ///
    /// Seeking backwards replays keystream. Only do that to decrypt data
    /// produced from the same position, never to encrypt new data.
    pub fn seek(&mut self, block: u64) {
        tracing::debug!(from = self.counter, to = block, "seek keystream");
        self.counter = block;
    }

    /// Number of blocks that can still be generated before the counter would
    /// wrap.
    pub fn remaining_blocks(&self) -> u64 {
        u64::MAX - self.counter
    }

    /// XOR the keystream into `buf` in place.
    ///
    /// # Errors
    ///
    /// - `KeystreamExhausted` if the blocks needed would wrap the counter.
    ///   `buf` and the counter are left untouched.
    pub fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        let end = self.reserve(buf.len())?;

        let mut block = Zeroizing::new([0u8; BLOCK_SIZE]);
        let mut counter = self.counter;
        for chunk in buf.chunks_mut(BLOCK_SIZE) {
            self.core.write_block(counter, &mut block);
            xor_in_place(chunk, &block[..chunk.len()])?;
            counter += 1;
        }
        debug_assert_eq!(counter, end);

        tracing::trace!(bytes = buf.len(), from = self.counter, to = end, "applied keystream");
        self.counter = end;

        Ok(())
    }

    /// Encrypt `plaintext`, returning a ciphertext of the same length.
    ///
    /// Advances the counter by `ceil(plaintext.len() / 64)`.
    ///
    /// # Errors
    ///
    /// - `KeystreamExhausted` if the counter would wrap. Nothing is returned
    ///   and the counter is unchanged.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut out = plaintext.to_vec();
        self.apply_keystream(&mut out)?;
        Ok(out)
    }

    /// Decrypt `ciphertext`. Identical to [`Salsa::encrypt`].
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.encrypt(ciphertext)
    }

    /// Return the next `len` keystream bytes, advancing the counter as
    /// [`Salsa::encrypt`] would.
    ///
    /// The buffer is zeroized when dropped.
    pub fn keystream(&mut self, len: usize) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        let mut out = Zeroizing::new(vec![0u8; len]);
        self.apply_keystream(&mut out)?;
        Ok(out)
    }

    /// Check that `len` bytes fit before the counter wraps. Returns the
    /// counter value after they are consumed.
    fn reserve(&self, len: usize) -> Result<u64, CipherError> {
        let blocks = len.div_ceil(BLOCK_SIZE) as u64;

        self.counter.checked_add(blocks).ok_or_else(|| {
            tracing::warn!(counter = self.counter, blocks, "refusing to wrap block counter");
            CipherError::KeystreamExhausted { counter: self.counter, requested: blocks }
        })
    }
}

impl<R: Rounds> fmt::Debug for Salsa<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salsa")
            .field("rounds", &R::COUNT)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

/// XOR `src` into `dst`.
///
/// # Errors
///
/// - `LengthMismatch` if the slices differ in length. `dst` is untouched.
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) -> Result<(), CipherError> {
    if dst.len() != src.len() {
        return Err(CipherError::LengthMismatch { left: dst.len(), right: src.len() });
    }

    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }

    Ok(())
}
