//! AES-128 block cipher with ECB, CBC and CTR chaining, sized for firmware-update pipelines.
//!
//! The crate follows FIPS-197 and provides:
//! - GF(2^8) arithmetic and the constant S-box tables.
//! - The AES-128 key schedule.
//! - Single-block encryption and decryption.
//! - An [`AesContext`] holding expanded round keys plus a running IV/counter, with the
//!   ECB, CBC and CTR modes operating in place on caller-owned buffers.
//!
//! Nothing here allocates. The hot-path functions never fail: ECB and CBC buffers must be a
//! multiple of [`BLOCK_LEN`] bytes, and violating that is caller misuse with meaningless
//! output. Callers that cannot guarantee the precondition go through [`Mode::apply`], which
//! checks lengths and returns an [`Error`].
//!
//! The modes provide confidentiality only. There is no authentication tag and no padding,
//! and the table-driven S-box is not side-channel hardened.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod context;
mod error;
mod gf;
mod key;
mod mode;
mod round;
mod sbox;

pub use crate::block::{iv_from_slice, xor_in_place, Block, Iv, BLOCK_LEN};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, ROUNDS};
pub use crate::context::AesContext;
pub use crate::error::Error;
pub use crate::gf::{gmul, xtime};
pub use crate::key::{Aes128Key, RoundKeys, KEY_LEN, ROUND_KEY_BYTES};
pub use crate::mode::{increment_counter, Direction, Mode};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
