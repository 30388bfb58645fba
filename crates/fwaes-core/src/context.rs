//! Cipher context: expanded key material plus the running IV/counter.

use log::trace;

use crate::block::{iv_from_slice, Iv, BLOCK_LEN};
use crate::cipher::expand_key;
use crate::error::Error;
use crate::key::{Aes128Key, RoundKeys};

/// AES-128 state owned by one stream of data.
///
/// The round keys only change when the context is re-keyed. The IV is the chain value in
/// CBC and the big-endian counter in CTR, and it is advanced by every chained call. ECB
/// never reads it. Independent streams need independent contexts.
#[derive(Clone)]
pub struct AesContext {
    pub(crate) round_keys: RoundKeys,
    pub(crate) iv: Iv,
    has_iv: bool,
}

impl AesContext {
    /// Expands `key` into a context without an IV (enough for ECB).
    pub fn new(key: &Aes128Key) -> Self {
        trace!("expanding AES-128 key schedule");
        Self {
            round_keys: expand_key(key),
            iv: [0u8; BLOCK_LEN],
            has_iv: false,
        }
    }

    /// Expands `key` and seeds the running IV/counter with `iv`.
    pub fn with_iv(key: &Aes128Key, iv: &Iv) -> Self {
        let mut ctx = Self::new(key);
        ctx.set_iv(iv);
        ctx
    }

    /// Re-keys the context, discarding the previous round keys and IV.
    pub fn init_key(&mut self, key: &Aes128Key) {
        *self = Self::new(key);
    }

    /// Re-keys the context and installs a new IV.
    pub fn init_key_iv(&mut self, key: &Aes128Key, iv: &Iv) {
        *self = Self::with_iv(key, iv);
    }

    /// Replaces only the running IV/counter, e.g. to start a new message under the same key.
    pub fn set_iv(&mut self, iv: &Iv) {
        trace!("resetting running IV");
        self.iv = *iv;
        self.has_iv = true;
    }

    /// Like [`set_iv`](Self::set_iv) but takes an unchecked slice.
    pub fn try_set_iv(&mut self, iv: &[u8]) -> Result<(), Error> {
        let iv = iv_from_slice(iv)?;
        self.set_iv(&iv);
        Ok(())
    }

    /// Current chain value or counter.
    pub fn iv(&self) -> &Iv {
        &self.iv
    }

    /// Whether an IV has been installed since the last re-key.
    pub fn has_iv(&self) -> bool {
        self.has_iv
    }

    /// Expanded round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }
}

impl core::fmt::Debug for AesContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AesContext")
            .field("has_iv", &self.has_iv)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [0x11; 16];
    const OTHER_KEY: [u8; 16] = [0x22; 16];

    #[test]
    fn new_context_has_no_iv() {
        let ctx = AesContext::new(&Aes128Key::from(KEY));
        assert!(!ctx.has_iv());
        assert_eq!(ctx.iv(), &[0u8; 16]);
        assert_eq!(ctx.round_keys(), &expand_key(&Aes128Key::from(KEY)));
    }

    #[test]
    fn set_iv_leaves_round_keys_alone() {
        let mut ctx = AesContext::new(&Aes128Key::from(KEY));
        let before = *ctx.round_keys();
        ctx.set_iv(&[0x5a; 16]);
        assert!(ctx.has_iv());
        assert_eq!(ctx.iv(), &[0x5a; 16]);
        assert_eq!(ctx.round_keys(), &before);
    }

    #[test]
    fn init_key_discards_previous_state() {
        let mut ctx = AesContext::with_iv(&Aes128Key::from(KEY), &[9; 16]);
        ctx.init_key(&Aes128Key::from(OTHER_KEY));
        assert!(!ctx.has_iv());
        assert_eq!(ctx.iv(), &[0u8; 16]);
        assert_eq!(ctx.round_keys(), &expand_key(&Aes128Key::from(OTHER_KEY)));

        ctx.init_key_iv(&Aes128Key::from(KEY), &[3; 16]);
        assert_eq!(ctx.iv(), &[3; 16]);
        assert_eq!(ctx.round_keys(), &expand_key(&Aes128Key::from(KEY)));
    }

    #[test]
    fn try_set_iv_rejects_short_slices() {
        let mut ctx = AesContext::new(&Aes128Key::from(KEY));
        assert_eq!(
            ctx.try_set_iv(&[0u8; 8]),
            Err(Error::InvalidIvLength { len: 8 })
        );
        assert!(!ctx.has_iv());
        ctx.try_set_iv(&[1u8; 16]).expect("16-byte IV");
        assert_eq!(ctx.iv(), &[1u8; 16]);
    }

    #[test]
    fn debug_output_hides_material() {
        let ctx = AesContext::with_iv(&Aes128Key::from([0xcd; 16]), &[0xef; 16]);
        let rendered = format!("{ctx:?}");
        assert!(!rendered.contains("205"));
        assert!(!rendered.contains("cd"));
        assert!(rendered.contains("has_iv: true"));
    }
}
