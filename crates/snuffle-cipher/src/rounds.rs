//! The Salsa20 permutation: quarter round, column/row rounds, double rounds.
//!
//! Every function here runs the same fixed sequence of word operations for
//! any input; there is no data-dependent branching or indexing.
//!
//! ```text
//!  0  1  2  3      column round: ( 0, 4, 8,12) ( 5, 9,13, 1) (10,14, 2, 6) (15, 3, 7,11)
//!  4  5  6  7      row round:    ( 0, 1, 2, 3) ( 5, 6, 7, 4) (10,11, 8, 9) (15,12,13,14)
//!  8  9 10 11
//! 12 13 14 15      each quarter round starts on the diagonal and walks forward
//! ```

use crate::words::{State, add, rotl};

/// Number of rounds of a Salsa20 family cipher, fixed at compile time.
pub trait Rounds: Copy + Send + Sync + 'static {
    /// Total rounds. Always even: one double round is two rounds.
    const COUNT: usize;
}

/// 8 rounds (Salsa20/8, reduced-round, not recommended).
#[derive(Debug, Clone, Copy)]
pub struct R8;

impl Rounds for R8 {
    const COUNT: usize = 8;
}

/// 12 rounds (Salsa20/12).
#[derive(Debug, Clone, Copy)]
pub struct R12;

impl Rounds for R12 {
    const COUNT: usize = 12;
}

/// 20 rounds (Salsa20/20, recommended).
#[derive(Debug, Clone, Copy)]
pub struct R20;

impl Rounds for R20 {
    const COUNT: usize = 20;
}

/// State positions fed to the quarter round by a column round.
const COLUMNS: [[usize; 4]; 4] = [[0, 4, 8, 12], [5, 9, 13, 1], [10, 14, 2, 6], [15, 3, 7, 11]];

/// State positions fed to the quarter round by a row round.
const ROWS: [[usize; 4]; 4] = [[0, 1, 2, 3], [5, 6, 7, 4], [10, 11, 8, 9], [15, 12, 13, 14]];

/// The Salsa20 quarter round.
///
/// ```text
/// b ^= (a + d) <<< 7
/// c ^= (b + a) <<< 9
/// d ^= (c + b) <<< 13
/// a ^= (d + c) <<< 18
/// ```
///
/// Additions are modulo 2^32. Returns the updated `(a, b, c, d)`.
#[inline]
pub fn quarter_round(a: u32, b: u32, c: u32, d: u32) -> (u32, u32, u32, u32) {
    let b = b ^ rotl(add(a, d), 7);
    let c = c ^ rotl(add(b, a), 9);
    let d = d ^ rotl(add(c, b), 13);
    let a = a ^ rotl(add(d, c), 18);
    (a, b, c, d)
}

#[inline]
fn quarter_round_at(state: &mut State, [a, b, c, d]: [usize; 4]) {
    let (wa, wb, wc, wd) = quarter_round(state[a], state[b], state[c], state[d]);
    state[a] = wa;
    state[b] = wb;
    state[c] = wc;
    state[d] = wd;
}

/// Apply the quarter round to each of the four columns.
pub fn column_round(state: &mut State) {
    for positions in COLUMNS {
        quarter_round_at(state, positions);
    }
}

/// Apply the quarter round to each of the four rows.
pub fn row_round(state: &mut State) {
    for positions in ROWS {
        quarter_round_at(state, positions);
    }
}

/// A column round followed by a row round.
pub fn double_round(state: &mut State) {
    column_round(state);
    row_round(state);
}

/// Run `R::COUNT / 2` double rounds over `state` in place.
///
/// This is the bare permutation; feed-forward is the caller's job.
pub fn permute<R: Rounds>(state: &mut State) {
    for _ in 0..R::COUNT / 2 {
        double_round(state);
    }
}
