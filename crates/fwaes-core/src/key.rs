//! Key types for AES-128.

use crate::block::{Block, BLOCK_LEN};
use crate::error::Error;

/// Number of bytes in an AES-128 key.
pub const KEY_LEN: usize = 16;

/// Size of the expanded key schedule: 11 round keys of 16 bytes.
pub const ROUND_KEY_BYTES: usize = 11 * BLOCK_LEN;

/// AES-128 key wrapper.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; KEY_LEN]);

impl From<[u8; KEY_LEN]> for Aes128Key {
    fn from(value: [u8; KEY_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKeyLength { len: bytes.len() })?;
        Ok(Self(key))
    }
}

// Key bytes stay out of logs and panic messages.
impl core::fmt::Debug for Aes128Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Aes128Key(..)")
    }
}

/// Expanded round keys for AES-128.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; 11]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// The schedule as one contiguous 176-byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_flattened()
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}
