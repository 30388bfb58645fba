//! Chunked transforms over whole firmware images.

use anyhow::{bail, Context, Result};
use fwaes_core::{Aes128Key, AesContext, Direction, Iv, Mode, BLOCK_LEN};
use log::{info, warn};

/// What happens to the running IV between transfer chunks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IvPolicy {
    /// The IV/counter keeps running, so chunking does not change the output.
    #[default]
    Carry,
    /// Every chunk starts again from the initial IV, like a bootloader that
    /// re-initialises its context for each transfer block.
    Reset,
}

/// Parameters for one image transform.
#[derive(Clone, Debug)]
pub struct ImageJob {
    /// Mode of operation.
    pub mode: Mode,
    /// Encrypt or decrypt.
    pub direction: Direction,
    /// AES-128 key.
    pub key: Aes128Key,
    /// Initial IV or counter; required for CBC and CTR.
    pub iv: Option<Iv>,
    /// Transfer chunk size in bytes; `None` processes the image in one call.
    pub chunk_size: Option<usize>,
    /// IV handling between chunks.
    pub iv_policy: IvPolicy,
}

/// Summary of a finished transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageStats {
    /// Bytes transformed.
    pub bytes: usize,
    /// Number of chunks handed to the cipher.
    pub chunks: usize,
}

impl ImageJob {
    fn validate(&self, len: usize) -> Result<usize> {
        let chunk_size = self.chunk_size.unwrap_or(len.max(1));
        if chunk_size == 0 {
            bail!("chunk size must be non-zero");
        }
        if self.mode.requires_alignment() && len % BLOCK_LEN != 0 {
            bail!(
                "{} image length must be a multiple of {BLOCK_LEN} bytes, got {len} (no padding is applied)",
                self.mode
            );
        }
        let carries_state = self.mode == Mode::Ctr && self.iv_policy == IvPolicy::Carry;
        if self.chunk_size.is_some()
            && (self.mode.requires_alignment() || carries_state)
            && chunk_size % BLOCK_LEN != 0
        {
            bail!(
                "chunk size for {} must be a multiple of {BLOCK_LEN} bytes, got {chunk_size}",
                self.mode
            );
        }
        if self.mode.requires_iv() && self.iv.is_none() {
            bail!("{} requires an IV (--iv-hex)", self.mode);
        }
        if self.mode == Mode::Ecb && self.iv.is_some() {
            warn!("ECB ignores the supplied IV");
        }
        Ok(chunk_size)
    }

    fn context(&self) -> AesContext {
        match (&self.iv, self.mode.requires_iv()) {
            (Some(iv), true) => AesContext::with_iv(&self.key, iv),
            _ => AesContext::new(&self.key),
        }
    }

    /// Transforms `data` in place, chunk by chunk.
    pub fn run(&self, data: &mut [u8]) -> Result<ImageStats> {
        let chunk_size = self.validate(data.len())?;
        let mut ctx = self.context();
        let mut chunks = 0;

        for (index, chunk) in data.chunks_mut(chunk_size).enumerate() {
            if index > 0 && self.iv_policy == IvPolicy::Reset {
                if let Some(iv) = &self.iv {
                    ctx.set_iv(iv);
                }
            }
            self.mode
                .apply(&mut ctx, self.direction, chunk)
                .with_context(|| format!("chunk {index} at offset {}", index * chunk_size))?;
            chunks += 1;
        }

        let stats = ImageStats {
            bytes: data.len(),
            chunks,
        };
        info!(
            "{} {}: {} bytes in {} chunk(s), IV policy {:?}",
            self.mode, self.direction, stats.bytes, stats.chunks, self.iv_policy
        );
        Ok(stats)
    }
}
