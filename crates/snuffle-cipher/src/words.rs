//! 32-bit word arithmetic and little-endian packing for the 4x4 state.

/// Number of 32-bit words in the Salsa20 state.
pub const STATE_WORDS: usize = 16;

/// The 4x4 working state, stored row-major: `state[row * 4 + col]`.
pub type State = [u32; STATE_WORDS];

/// Rotate the 32-bit word `x` left by `n` bits.
#[inline]
pub(crate) fn rotl(x: u32, n: u32) -> u32 {
    x.rotate_left(n)
}

/// Addition modulo 2^32.
#[inline]
pub(crate) fn add(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// Interpret each 4-byte group of `src` as a little-endian word.
///
/// `src` must hold exactly `4 * dst.len()` bytes.
pub(crate) fn load_le(dst: &mut [u32], src: &[u8]) {
    debug_assert_eq!(src.len(), dst.len() * 4);
    for (word, chunk) in dst.iter_mut().zip(src.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

/// Serialize `src` into `dst`, four little-endian bytes per word.
///
/// `dst` must hold exactly `4 * src.len()` bytes.
pub(crate) fn store_le(dst: &mut [u8], src: &[u32]) {
    debug_assert_eq!(dst.len(), src.len() * 4);
    for (chunk, word) in dst.chunks_exact_mut(4).zip(src) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}
