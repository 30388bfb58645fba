//! Arithmetic in GF(2^8) modulo the AES polynomial x^8 + x^4 + x^3 + x + 1.

const REDUCTION: u8 = 0x1b;

/// Multiplies `byte` by `x` (i.e. `{02}`), reducing by the AES polynomial.
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Multiplies two field elements by repeated doubling of `a`.
#[inline]
pub fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xtime_reduces_on_overflow() {
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x47), 0x8e);
        assert_eq!(xtime(0x8e), 0x07);
        assert_eq!(xtime(0x80), 0x1b);
        assert_eq!(xtime(0x00), 0x00);
    }

    #[test]
    fn gmul_fips197_example() {
        // FIPS-197 section 4.2: {57} * {83} = {c1}, {57} * {13} = {fe}.
        assert_eq!(gmul(0x57, 0x83), 0xc1);
        assert_eq!(gmul(0x57, 0x13), 0xfe);
    }

    #[test]
    fn gmul_identity_and_zero() {
        for a in 0..=255u8 {
            assert_eq!(gmul(a, 1), a);
            assert_eq!(gmul(1, a), a);
            assert_eq!(gmul(a, 0), 0);
            assert_eq!(gmul(a, 2), xtime(a));
        }
    }

    #[test]
    fn gmul_commutes() {
        for a in (0..=255u8).step_by(7) {
            for b in (0..=255u8).step_by(11) {
                assert_eq!(gmul(a, b), gmul(b, a));
            }
        }
    }

    #[test]
    fn inverse_mix_constants_invert_forward_ones() {
        // Row 0 of the forward and inverse MDS matrices multiply to the identity.
        let row = [0x02u8, 0x03, 0x01, 0x01];
        let inv_col = [0x0eu8, 0x09, 0x0d, 0x0b];
        let dot = row
            .iter()
            .zip(inv_col.iter())
            .fold(0u8, |acc, (&r, &c)| acc ^ gmul(r, c));
        assert_eq!(dot, 1);
    }
}
