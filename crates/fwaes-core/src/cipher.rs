//! AES-128 key schedule and block encryption/decryption.

use crate::block::{Block, BLOCK_LEN};
use crate::key::{Aes128Key, RoundKeys, KEY_LEN};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

/// Number of rounds in AES-128.
pub const ROUNDS: usize = 10;

// Key length in 32-bit words.
const NK: usize = KEY_LEN / 4;
const SCHEDULE_WORDS: usize = 4 * (ROUNDS + 1);

// Successive powers of {02}; entry 0 is never read.
const RCON: [u8; 11] = [
    0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

fn rot_word(word: [u8; 4]) -> [u8; 4] {
    [word[1], word[2], word[3], word[0]]
}

fn sub_word(word: [u8; 4]) -> [u8; 4] {
    word.map(sbox)
}

/// Expands a 128-bit key into 11 round keys.
///
/// Round key 0 is the key itself.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut words = [[0u8; 4]; SCHEDULE_WORDS];
    for (word, chunk) in words.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in NK..SCHEDULE_WORDS {
        let mut temp = words[i - 1];
        if i % NK == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[i / NK];
        }
        let earlier = words[i - NK];
        words[i] = core::array::from_fn(|b| earlier[b] ^ temp[b]);
    }

    let mut round_keys = [[0u8; BLOCK_LEN]; ROUNDS + 1];
    for (round_key, group) in round_keys.iter_mut().zip(words.chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(group.iter()) {
            dst.copy_from_slice(word);
        }
    }

    RoundKeys(round_keys)
}

/// Encrypts a single 16-byte block in place with pre-expanded round keys.
pub fn encrypt_block(block: &mut Block, round_keys: &RoundKeys) {
    add_round_key(block, round_keys.get(0));

    for round in 1..ROUNDS {
        sub_bytes(block);
        shift_rows(block);
        mix_columns(block);
        add_round_key(block, round_keys.get(round));
    }

    sub_bytes(block);
    shift_rows(block);
    add_round_key(block, round_keys.get(ROUNDS));
}

/// Decrypts a single 16-byte block in place with pre-expanded round keys.
pub fn decrypt_block(block: &mut Block, round_keys: &RoundKeys) {
    add_round_key(block, round_keys.get(ROUNDS));

    for round in (0..ROUNDS).rev() {
        inv_shift_rows(block);
        inv_sub_bytes(block);
        add_round_key(block, round_keys.get(round));
        if round == 0 {
            break;
        }
        inv_mix_columns(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    // FIPS-197 appendix A.1.
    const A1_KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];

    #[test]
    fn schedule_matches_fips197_appendix_a() {
        let rks = expand_key(&Aes128Key::from(A1_KEY));
        assert_eq!(rks.get(0), &A1_KEY);
        assert_eq!(
            rks.get(1),
            &[
                0xa0, 0xfa, 0xfe, 0x17, 0x88, 0x54, 0x2c, 0xb1, 0x23, 0xa3, 0x39, 0x39, 0x2a, 0x6c,
                0x76, 0x05
            ]
        );
        assert_eq!(
            rks.get(10),
            &[
                0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63,
                0x0c, 0xa6
            ]
        );
    }

    #[test]
    fn schedule_is_deterministic_and_starts_with_key() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let mut key_bytes = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            let key = Aes128Key::from(key_bytes);
            let first = expand_key(&key);
            let second = expand_key(&key);
            assert_eq!(first, second);
            assert_eq!(&first.as_bytes()[..16], &key_bytes);
        }
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let round_keys = expand_key(&Aes128Key::from(NIST_KEY));
        let mut block = NIST_PLAIN;
        encrypt_block(&mut block, &round_keys);
        assert_eq!(block, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let round_keys = expand_key(&Aes128Key::from(NIST_KEY));
        let mut block = NIST_CIPHER;
        decrypt_block(&mut block, &round_keys);
        assert_eq!(block, NIST_PLAIN);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let rks = expand_key(&Aes128Key::from(key_bytes));
            let original = block;
            encrypt_block(&mut block, &rks);
            assert_ne!(block, original);
            decrypt_block(&mut block, &rks);
            assert_eq!(block, original);
        }
    }
}
