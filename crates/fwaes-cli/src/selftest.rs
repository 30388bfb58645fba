//! Known-answer and randomized self checks behind `fwaes check`.

use anyhow::{bail, Context, Result};
use fwaes_core::{increment_counter, Aes128Key, AesContext, Direction, Mode, BLOCK_LEN};
use log::{debug, info};
use rand::{Rng, RngCore};

struct Vector {
    name: &'static str,
    mode: Mode,
    key: &'static str,
    iv: Option<&'static str>,
    plaintext: &'static str,
    ciphertext: &'static str,
}

const SP800_38A_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const SP800_38A_PLAIN: &str = concat!(
    "6bc1bee22e409f96e93d7e117393172a",
    "ae2d8a571e03ac9c9eb76fac45af8e51",
    "30c81c46a35ce411e5fbc1191a0a52ef",
    "f69f2445df4f9b17ad2b417be66c3710",
);

const VECTORS: [Vector; 4] = [
    Vector {
        name: "SP 800-38A F.1.1 ECB-AES128",
        mode: Mode::Ecb,
        key: SP800_38A_KEY,
        iv: None,
        plaintext: SP800_38A_PLAIN,
        ciphertext: concat!(
            "3ad77bb40d7a3660a89ecaf32466ef97",
            "f5d3d58503b9699de785895a96fdbaaf",
            "43b1cd7f598ece23881b00e3ed030688",
            "7b0c785e27e8ad3f8223207104725dd4",
        ),
    },
    Vector {
        name: "SP 800-38A F.2.1 CBC-AES128",
        mode: Mode::Cbc,
        key: SP800_38A_KEY,
        iv: Some("000102030405060708090a0b0c0d0e0f"),
        plaintext: SP800_38A_PLAIN,
        ciphertext: concat!(
            "7649abac8119b246cee98e9b12e9197d",
            "5086cb9b507219ee95db113a917678b2",
            "73bed6b8e3c1743b7116e69e22229516",
            "3ff1caa1681fac09120eca307586e1a7",
        ),
    },
    Vector {
        name: "SP 800-38A F.5.1 CTR-AES128",
        mode: Mode::Ctr,
        key: SP800_38A_KEY,
        iv: Some("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff"),
        plaintext: SP800_38A_PLAIN,
        ciphertext: concat!(
            "874d6191b620e3261bef6864990db6ce",
            "9806f66b7970fdff8617187bb9fffdff",
            "5ae4df3edbd5d35e5b4f09020db03eab",
            "1e031dda2fbe03d1792170a0f3009cee",
        ),
    },
    Vector {
        name: "bootloader CBC image",
        mode: Mode::Cbc,
        key: "50655368566d59713374367739792442",
        iv: Some("25432a462d4a614e635266556a586e32"),
        plaintext: "d0ff2d67d042926d1db7e428c35f9bea8713866250cab36f0000000000000000",
        ciphertext: "742f3d8ea9d43523cdca976a6ab6c5e834278c044979d4504b85636363599731",
    },
];

fn context_for(vector: &Vector) -> Result<AesContext> {
    let key_bytes = hex::decode(vector.key).context("decode vector key")?;
    let key = Aes128Key::try_from(key_bytes.as_slice())?;
    Ok(match vector.iv {
        Some(iv_hex) => {
            let iv = fwaes_core::iv_from_slice(&hex::decode(iv_hex).context("decode vector IV")?)?;
            AesContext::with_iv(&key, &iv)
        }
        None => AesContext::new(&key),
    })
}

/// Runs every built-in known-answer vector in both directions.
pub fn known_answers() -> Result<usize> {
    for vector in &VECTORS {
        let mut buf = hex::decode(vector.plaintext).context("decode vector plaintext")?;
        vector
            .mode
            .apply(&mut context_for(vector)?, Direction::Encrypt, &mut buf)?;
        if hex::encode(&buf) != vector.ciphertext {
            bail!("{}: ciphertext mismatch", vector.name);
        }
        vector
            .mode
            .apply(&mut context_for(vector)?, Direction::Decrypt, &mut buf)?;
        if hex::encode(&buf) != vector.plaintext {
            bail!("{}: plaintext mismatch", vector.name);
        }
        debug!("{}: ok", vector.name);
    }

    let mut counter = [0xffu8; BLOCK_LEN];
    increment_counter(&mut counter);
    if counter != [0u8; BLOCK_LEN] {
        bail!("CTR counter did not wrap from all-ones to zero");
    }

    info!("{} known-answer vectors passed", VECTORS.len());
    Ok(VECTORS.len())
}

/// Encrypts and decrypts `samples` random buffers per mode with random keys and IVs.
pub fn random_round_trips(rng: &mut impl RngCore, samples: usize) -> Result<()> {
    for mode in [Mode::Ecb, Mode::Cbc, Mode::Ctr] {
        for sample in 0..samples {
            let mut key = [0u8; 16];
            let mut iv = [0u8; BLOCK_LEN];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut iv);
            let key = Aes128Key::from(key);

            let blocks = rng.gen_range(1..=64);
            let len = if mode.requires_alignment() {
                blocks * BLOCK_LEN
            } else {
                blocks * BLOCK_LEN - rng.gen_range(0..BLOCK_LEN)
            };
            let mut original = vec![0u8; len];
            rng.fill_bytes(&mut original);

            let mut buf = original.clone();
            mode.apply(&mut AesContext::with_iv(&key, &iv), Direction::Encrypt, &mut buf)?;
            mode.apply(&mut AesContext::with_iv(&key, &iv), Direction::Decrypt, &mut buf)?;
            if buf != original {
                bail!("{mode} round trip failed on sample {sample} ({len} bytes)");
            }
        }
    }
    info!("{samples} random round trips per mode passed");
    Ok(())
}
