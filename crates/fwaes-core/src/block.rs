//! Block representation helpers.

use crate::error::Error;

/// Number of bytes in an AES block.
pub const BLOCK_LEN: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_LEN];

/// Initialization vector or counter block for CBC and CTR.
pub type Iv = [u8; BLOCK_LEN];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Copies a 16-byte IV out of a slice.
pub fn iv_from_slice(bytes: &[u8]) -> Result<Iv, Error> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidIvLength { len: bytes.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_an_involution() {
        let original: Block = core::array::from_fn(|i| i as u8);
        let mask = [0xa5u8; BLOCK_LEN];
        let mut block = original;
        xor_in_place(&mut block, &mask);
        assert_eq!(block[0], 0xa5);
        assert_eq!(block[15], 0x0f ^ 0xa5);
        xor_in_place(&mut block, &mask);
        assert_eq!(block, original);
    }

    #[test]
    fn iv_from_slice_checks_length() {
        assert_eq!(iv_from_slice(&[7u8; 16]), Ok([7u8; 16]));
        assert_eq!(
            iv_from_slice(&[0u8; 15]),
            Err(Error::InvalidIvLength { len: 15 })
        );
    }
}
