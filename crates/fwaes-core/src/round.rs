//! AES round transformations over the 4x4 state.
//!
//! The state is the 16-byte block read column by column, so byte `i` sits at
//! row `i % 4`, column `i / 4`:
//!
//! ```text
//!  0  4  8 12
//!  1  5  9 13
//!  2  6 10 14
//!  3  7 11 15
//! ```

use crate::block::{xor_in_place, Block};
use crate::gf::gmul;
use crate::sbox::{inv_sbox, sbox};

const MIX: [u8; 4] = [0x02, 0x03, 0x01, 0x01];
const INV_MIX: [u8; 4] = [0x0e, 0x0b, 0x0d, 0x09];

#[inline]
const fn idx(row: usize, col: usize) -> usize {
    row + 4 * col
}

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

fn rotate_row_left(state: &mut Block, row: usize, by: usize) {
    let current = [
        state[idx(row, 0)],
        state[idx(row, 1)],
        state[idx(row, 2)],
        state[idx(row, 3)],
    ];
    for col in 0..4 {
        state[idx(row, col)] = current[(col + by) % 4];
    }
}

/// Rotates row `r` left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut Block) {
    for row in 1..4 {
        rotate_row_left(state, row, row);
    }
}

/// Rotates row `r` right by `r` positions.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    for row in 1..4 {
        rotate_row_left(state, row, 4 - row);
    }
}

// Multiplies one column by the circulant matrix whose first row is `coeffs`.
fn mix_column(state: &mut Block, col: usize, coeffs: &[u8; 4]) {
    let base = idx(0, col);
    let input = [state[base], state[base + 1], state[base + 2], state[base + 3]];
    for row in 0..4 {
        state[base + row] = (0..4).fold(0u8, |acc, k| {
            acc ^ gmul(input[k], coeffs[(k + 4 - row) % 4])
        });
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for col in 0..4 {
        mix_column(state, col, &MIX);
    }
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for col in 0..4 {
        mix_column(state, col, &INV_MIX);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}
