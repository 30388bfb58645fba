//! Errors reported by the checked entry points.
//!
//! The block and mode functions themselves never fail; these variants only come out of
//! slice conversions and [`Mode::apply`](crate::Mode::apply).

use thiserror::Error;

use crate::mode::Mode;

/// Caller-input errors detected before any byte is transformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Key material was not exactly 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {len}")]
    InvalidKeyLength {
        /// Length that was supplied.
        len: usize,
    },
    /// IV material was not exactly 16 bytes.
    #[error("IV must be 16 bytes, got {len}")]
    InvalidIvLength {
        /// Length that was supplied.
        len: usize,
    },
    /// A block mode was handed a buffer that is not a whole number of blocks.
    #[error("{mode} input must be a multiple of 16 bytes, got {len}")]
    UnalignedBuffer {
        /// Mode that rejected the buffer.
        mode: Mode,
        /// Buffer length.
        len: usize,
    },
    /// A chaining mode was used on a context initialised without an IV.
    #[error("{mode} requires an IV but the context was initialised with a key only")]
    MissingIv {
        /// Mode that needs the IV.
        mode: Mode,
    },
}
