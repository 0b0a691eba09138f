//! Block expansion: (key, nonce, counter) -> 64 bytes of keystream.
//!
//! The initial block is laid out as sixteen little-endian words:
//!
//! ```text
//! "expa"  key[0..4]   key[4..8]   key[8..12]
//! key[12..16]  "nd 3"  nonce[0..4]  nonce[4..8]
//! ctr_lo  ctr_hi  "2-by"  key[16..20]
//! key[20..24]  key[24..28]  key[28..32]  "te k"
//! ```
//!
//! The permuted state is added word-wise to the initial block (feed-forward)
//! and serialized little-endian, row-major.

use core::marker::PhantomData;

use zeroize::Zeroize;

use crate::{
    rounds::{Rounds, permute},
    words::{self, STATE_WORDS, State},
};

/// Size of one keystream block in bytes
pub const BLOCK_SIZE: usize = 64;

/// Size of a key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of a Salsa20 nonce in bytes
pub const NONCE_SIZE: usize = 8;

/// 256-bit cipher key
pub type Key = [u8; KEY_SIZE];

/// 64-bit Salsa20 nonce
pub type Nonce = [u8; NONCE_SIZE];

/// "expand 32-byte k" as little-endian words
pub(crate) const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Word positions of the counter within the state
const COUNTER_LO: usize = 8;
const COUNTER_HI: usize = 9;

/// Build the initial state around `middle`, the four words at positions 6..=9.
///
/// For Salsa20 those words are nonce and counter; for `HSalsa20` they are the
/// first 16 nonce bytes.
pub(crate) fn initial_state(key: &Key, middle: [u32; 4]) -> State {
    let mut state = [0u32; STATE_WORDS];

    state[0] = CONSTANTS[0];
    words::load_le(&mut state[1..5], &key[..16]);
    state[5] = CONSTANTS[1];
    state[6..10].copy_from_slice(&middle);
    state[10] = CONSTANTS[2];
    words::load_le(&mut state[11..15], &key[16..]);
    state[15] = CONSTANTS[3];

    state
}

/// Salsa20 block function bound to one (key, nonce) pair.
///
/// Holds the initial state with the counter words left at zero; each call to
/// [`Core::write_block`] fills in the counter on a copy.
pub(crate) struct Core<R: Rounds> {
    state: State,
    rounds: PhantomData<R>,
}

impl<R: Rounds> Core<R> {
    pub(crate) fn new(key: &Key, nonce: Nonce) -> Self {
        let mut middle = [0u32; 4];
        words::load_le(&mut middle[..2], &nonce);

        Self { state: initial_state(key, middle), rounds: PhantomData }
    }

    /// Write the keystream block for `counter` into `out`.
    pub(crate) fn write_block(&self, counter: u64, out: &mut [u8; BLOCK_SIZE]) {
        let mut input = self.state;
        input[COUNTER_LO] = counter as u32;
        input[COUNTER_HI] = (counter >> 32) as u32;

        let mut working = input;
        permute::<R>(&mut working);

        for (word, initial) in working.iter_mut().zip(&input) {
            *word = words::add(*word, *initial);
        }
        words::store_le(out, &working);

        input.zeroize();
        working.zeroize();
    }
}

impl<R: Rounds> Drop for Core<R> {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

/// Compute keystream block number `counter` for (key, nonce).
///
/// Pure function of its three inputs. The result is as sensitive as the key;
/// callers should zeroize it once consumed.
pub fn keystream_block<R: Rounds>(key: &Key, nonce: &Nonce, counter: u64) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    Core::<R>::new(key, *nonce).write_block(counter, &mut out);
    out
}

/// The Salsa20 hash: permute a full 64-byte input and feed it forward.
///
/// Exposed for known-answer testing of the core independent of the key,
/// nonce and counter layout.
pub fn salsa20_hash<R: Rounds>(input: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut initial = [0u32; STATE_WORDS];
    words::load_le(&mut initial, input);

    let mut working = initial;
    permute::<R>(&mut working);
    for (word, start) in working.iter_mut().zip(&initial) {
        *word = words::add(*word, *start);
    }

    let mut out = [0u8; BLOCK_SIZE];
    words::store_le(&mut out, &working);

    initial.zeroize();
    working.zeroize();
    out
}
