//! ECB, CBC and CTR chaining over caller-owned buffers.
//!
//! All transforms run in place. ECB and CBC take whole blocks only: a buffer whose length is
//! not a multiple of [`BLOCK_LEN`] trips a `debug_assert!`, and in release builds the trailing
//! partial block is left as it was. CTR accepts any length.

use core::fmt;

use log::debug;

use crate::block::{xor_in_place, Block, Iv, BLOCK_LEN};
use crate::cipher::{decrypt_block, encrypt_block};
use crate::context::AesContext;
use crate::error::Error;

#[inline]
fn as_block(chunk: &mut [u8]) -> &mut Block {
    chunk
        .try_into()
        .expect("chunks_exact_mut yields whole blocks")
}

/// Adds one to a 128-bit big-endian counter, wrapping to zero after all-`0xff`.
#[inline]
pub fn increment_counter(counter: &mut Iv) {
    *counter = u128::from_be_bytes(*counter).wrapping_add(1).to_be_bytes();
}

impl AesContext {
    /// Encrypts one block with no chaining.
    pub fn encrypt_ecb(&self, block: &mut Block) {
        encrypt_block(block, &self.round_keys);
    }

    /// Decrypts one block with no chaining.
    pub fn decrypt_ecb(&self, block: &mut Block) {
        decrypt_block(block, &self.round_keys);
    }

    /// Encrypts each block of `buf` independently.
    ///
    /// Equal plaintext blocks produce equal ciphertext blocks; ECB leaks repetition.
    pub fn encrypt_ecb_blocks(&self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0, "ECB buffer must be block aligned");
        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            self.encrypt_ecb(as_block(chunk));
        }
    }

    /// Decrypts each block of `buf` independently.
    pub fn decrypt_ecb_blocks(&self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0, "ECB buffer must be block aligned");
        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            self.decrypt_ecb(as_block(chunk));
        }
    }

    /// CBC-encrypts `buf`, leaving the last ciphertext block as the running IV.
    pub fn encrypt_cbc(&mut self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0, "CBC buffer must be block aligned");
        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            let block = as_block(chunk);
            xor_in_place(block, &self.iv);
            encrypt_block(block, &self.round_keys);
            self.iv = *block;
        }
    }

    /// CBC-decrypts `buf`, leaving the last ciphertext block as the running IV.
    pub fn decrypt_cbc(&mut self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0, "CBC buffer must be block aligned");
        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            let block = as_block(chunk);
            let next_iv = *block;
            decrypt_block(block, &self.round_keys);
            xor_in_place(block, &self.iv);
            self.iv = next_iv;
        }
    }

    /// XORs `buf` with the CTR keystream; the same call encrypts and decrypts.
    ///
    /// The counter advances once per 16 bytes. A final partial block still consumes a
    /// whole counter value, and its unused keystream is dropped, so a stream split across
    /// calls matches a single call only if every call but the last is block aligned.
    pub fn xcrypt_ctr(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(BLOCK_LEN) {
            let mut keystream = self.iv;
            encrypt_block(&mut keystream, &self.round_keys);
            increment_counter(&mut self.iv);
            for (byte, key) in chunk.iter_mut().zip(keystream.iter()) {
                *byte ^= *key;
            }
        }
    }
}

/// Whether a mode call encrypts or decrypts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        })
    }
}

/// Mode of operation selected at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic Codebook. No IV; equal blocks leak.
    Ecb,
    /// Cipher Block Chaining.
    Cbc,
    /// Counter mode with a 128-bit big-endian counter.
    Ctr,
}

impl Mode {
    /// Whether the buffer must be a whole number of blocks.
    pub fn requires_alignment(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }

    /// Whether the mode reads the context's running IV.
    pub fn requires_iv(self) -> bool {
        matches!(self, Mode::Cbc | Mode::Ctr)
    }

    /// Checks the caller contract, then transforms `buf` in place.
    ///
    /// Nothing is written when an error is returned.
    pub fn apply(
        self,
        ctx: &mut AesContext,
        direction: Direction,
        buf: &mut [u8],
    ) -> Result<(), Error> {
        if self.requires_alignment() && buf.len() % BLOCK_LEN != 0 {
            return Err(Error::UnalignedBuffer {
                mode: self,
                len: buf.len(),
            });
        }
        if self.requires_iv() && !ctx.has_iv() {
            return Err(Error::MissingIv { mode: self });
        }

        debug!("{self} {direction}: {} bytes", buf.len());
        match (self, direction) {
            (Mode::Ecb, Direction::Encrypt) => ctx.encrypt_ecb_blocks(buf),
            (Mode::Ecb, Direction::Decrypt) => ctx.decrypt_ecb_blocks(buf),
            (Mode::Cbc, Direction::Encrypt) => ctx.encrypt_cbc(buf),
            (Mode::Cbc, Direction::Decrypt) => ctx.decrypt_cbc(buf),
            (Mode::Ctr, _) => ctx.xcrypt_ctr(buf),
        }
        Ok(())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Ctr => "CTR",
        })
    }
}
