//! The BN254 extension field tower.
//!
//! `Fp2 = Fp[u]/(u² + 1)`, `Fp6 = Fp2[v]/(v³ − ξ)` with `ξ = 9 + u`, and
//! `Fp12 = Fp6[w]/(w² − v)`. The base field `Fp` is an external collaborator
//! (`halo2curves_axiom::bn256::Fq`); everything above it lives here.
//!
//! Changing ξ breaks every derived constant and formula in this crate: the
//! Frobenius coefficient tables below, the twist coefficient, the sparse
//! multiplication index layout and the line evaluations all assume this
//! exact tower.

mod fp12;
mod fp2;
mod fp6;

pub use fp12::{CompressedCyclotomic, Fp12};
pub use fp2::Fp2;
pub use fp6::Fp6;

use halo2curves_axiom::ff::{Field, PrimeField};
use num_bigint::BigUint;
use num_traits::Num;

use crate::error::PairingError;

/// The base prime field, provided by halo2curves.
pub type Fp = halo2curves_axiom::bn256::Fq;

/// Number of bytes in the fixed-width big-endian encoding of one base field
/// element.
pub const FP_BYTES: usize = 32;

/// ξ = 9 + u, the non-residue generating `Fp6` over `Fp2`.
pub fn xi() -> Fp2 {
    Fp2::new(Fp::from(9), Fp::one())
}

/// γ₁ₖ = ξ^(k·(p−1)/6) for k = 1..5, the Frobenius coefficients of the
/// w-power coordinates of `Fp12`.
pub(crate) fn gamma1() -> [Fp2; 5] {
    [
        Fp2::new(
            Fp::from_raw([
                0xd60b35dadcc9e470,
                0x5c521e08292f2176,
                0xe8b99fdd76e68b60,
                0x1284b71c2865a7df,
            ]),
            Fp::from_raw([
                0xca5cf05f80f362ac,
                0x747992778eeec7e5,
                0xa6327cfe12150b8e,
                0x246996f3b4fae7e6,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x99e39557176f553d,
                0xb78cc310c2c3330c,
                0x4c0bec3cf559b143,
                0x2fb347984f7911f7,
            ]),
            Fp::from_raw([
                0x1665d51c640fcba2,
                0x32ae2a1d0b7c9dce,
                0x4ba4cc8bd75a0794,
                0x16c9e55061ebae20,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0xdc54014671a0135a,
                0xdbaae0eda9c95998,
                0xdc5ec698b6e2f9b9,
                0x063cf305489af5dc,
            ]),
            Fp::from_raw([
                0x82d37f632623b0e3,
                0x21807dc98fa25bd2,
                0x0704b5a7ec796f2b,
                0x07c03cbcac41049a,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x848a1f55921ea762,
                0xd33365f7be94ec72,
                0x80f3c0b75a181e84,
                0x05b54f5e64eea801,
            ]),
            Fp::from_raw([
                0xc13b4711cd2b8126,
                0x3685d2ea1bdec763,
                0x9f3a80b03b0b1c92,
                0x2c145edbe7fd8aee,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x2ea2c810eab7692f,
                0x425c459b55aa1bd3,
                0xe93a3661a4353ff4,
                0x0183c1e74f798649,
            ]),
            Fp::from_raw([
                0x24c6b8ee6e0c2c4b,
                0xb080cb99678e2ac0,
                0xa27fb246c7729f7d,
                0x12acf2ca76fd0675,
            ]),
        ),
    ]
}

/// γ₂ₖ = ξ^(k·(p²−1)/6) for k = 1..5. These lie in `Fp`.
pub(crate) fn gamma2() -> [Fp2; 5] {
    [
        Fp2::from_base(Fp::from_raw([
            0xe4bd44e5607cfd49,
            0xc28f069fbb966e3d,
            0x5e6dd9e7e0acccb0,
            0x30644e72e131a029,
        ])),
        Fp2::from_base(Fp::from_raw([
            0xe4bd44e5607cfd48,
            0xc28f069fbb966e3d,
            0x5e6dd9e7e0acccb0,
            0x30644e72e131a029,
        ])),
        Fp2::from_base(Fp::from_raw([
            0x3c208c16d87cfd46,
            0x97816a916871ca8d,
            0xb85045b68181585d,
            0x30644e72e131a029,
        ])),
        Fp2::from_base(Fp::from_raw([
            0x5763473177fffffe,
            0xd4f263f1acdb5c4f,
            0x59e26bcea0d48bac,
            0x0000000000000000,
        ])),
        Fp2::from_base(Fp::from_raw([
            0x5763473177ffffff,
            0xd4f263f1acdb5c4f,
            0x59e26bcea0d48bac,
            0x0000000000000000,
        ])),
    ]
}

/// γ₃ₖ = ξ^(k·(p³−1)/6) for k = 1..5.
pub(crate) fn gamma3() -> [Fp2; 5] {
    [
        Fp2::new(
            Fp::from_raw([
                0xe86f7d391ed4a67f,
                0x894cb38dbe55d24a,
                0xefe9608cd0acaa90,
                0x19dc81cfcc82e4bb,
            ]),
            Fp::from_raw([
                0x7694aa2bf4c0c101,
                0x7f03a5e397d439ec,
                0x06cbeee33576139d,
                0x00abf8b60be77d73,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x7b746ee87bdcfb6d,
                0x805ffd3d5d6942d3,
                0xbaff1c77959f25ac,
                0x0856e078b755ef0a,
            ]),
            Fp::from_raw([
                0x380cab2baaa586de,
                0x0fdf31bf98ff2631,
                0xa9f30e6dec26094f,
                0x04f1de41b3d1766f,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x5fcc8ad066dce9ed,
                0xbbd689a3bea870f4,
                0xdbf17f1dca9e5ea3,
                0x2a275b6d9896aa4c,
            ]),
            Fp::from_raw([
                0xb94d0cb3b2594c64,
                0x7600ecc7d8cf6eba,
                0xb14b900e9507e932,
                0x28a411b634f09b8f,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x0e1a92bc3ccbf066,
                0xe633094575b06bcb,
                0x19bee0f7b5b2444e,
                0x0bc58c6611c08dab,
            ]),
            Fp::from_raw([
                0x5fe3ed9d730c239f,
                0xa44a9e08737f96e5,
                0xfeb0f6ef0cd21d04,
                0x23d5e999e1910a12,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0xebde847076261b43,
                0x2ed68098967c84a5,
                0x711699fa3b4d3f69,
                0x13c49044952c0905,
            ]),
            Fp::from_raw([
                0x1f25041384282499,
                0x3e2ddaea20028021,
                0x9fb1b2282a48633d,
                0x16db366a59b1dd0b,
            ]),
        ),
    ]
}

/// The base field modulus p as a big integer.
pub(crate) fn modulus() -> BigUint {
    BigUint::from_str_radix(Fp::MODULUS.trim_start_matches("0x"), 16)
        .expect("ff modulus string is valid hex")
}

/// Big-endian canonical bytes of a base field element.
pub(crate) fn fp_to_be_bytes(x: &Fp) -> [u8; FP_BYTES] {
    let mut le = x.to_bytes();
    le.reverse();
    le
}

/// Decodes a big-endian chunk of exactly [`FP_BYTES`] bytes, reducing the
/// value modulo p. The length is checked by the callers against the full
/// buffer; this helper assumes a well-sized chunk.
pub(crate) fn fp_from_be_bytes_reduced(chunk: &[u8]) -> Fp {
    debug_assert_eq!(chunk.len(), FP_BYTES);
    let reduced = BigUint::from_bytes_be(chunk) % modulus();
    let mut le = [0u8; FP_BYTES];
    for (dst, src) in le.iter_mut().zip(reduced.to_bytes_le()) {
        *dst = src;
    }
    Option::<Fp>::from(Fp::from_bytes(&le)).expect("reduced value is canonical")
}

/// Checks an input buffer against the exact expected width.
pub(crate) fn check_buffer_len(buf: &[u8], expected: usize) -> Result<(), PairingError> {
    if buf.len() != expected {
        return Err(PairingError::InvalidBufferSize {
            expected,
            got: buf.len(),
        });
    }
    Ok(())
}

/// Inverts a slice of base field elements with a single inversion
/// (Montgomery batch trick). Zero entries are skipped and stay zero, which
/// the fixed-argument Miller loop relies on for identity inputs.
pub fn batch_invert(input: &[Fp]) -> Vec<Fp> {
    let mut acc = Fp::one();
    let mut prefix = Vec::with_capacity(input.len());
    for x in input {
        prefix.push(acc);
        if !bool::from(x.is_zero()) {
            acc *= x;
        }
    }

    let mut acc_inv = acc.invert().unwrap_or(Fp::zero());
    let mut out = vec![Fp::zero(); input.len()];
    for (i, x) in input.iter().enumerate().rev() {
        if !bool::from(x.is_zero()) {
            out[i] = acc_inv * prefix[i];
            acc_inv *= x;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo2curves_axiom::ff::Field;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_batch_invert_matches_single() {
        let mut rng = StdRng::seed_from_u64(7);
        let xs = (0..17).map(|_| Fp::random(&mut rng)).collect::<Vec<_>>();
        let inv = batch_invert(&xs);
        for (x, xi) in xs.iter().zip(inv.iter()) {
            assert_eq!(*xi, x.invert().unwrap());
        }
    }

    #[test]
    fn test_batch_invert_skips_zeros() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut xs = (0..9).map(|_| Fp::random(&mut rng)).collect::<Vec<_>>();
        xs[0] = Fp::zero();
        xs[4] = Fp::zero();
        let inv = batch_invert(&xs);
        assert_eq!(inv[0], Fp::zero());
        assert_eq!(inv[4], Fp::zero());
        for i in [1, 2, 3, 5, 6, 7, 8] {
            assert_eq!(inv[i], xs[i].invert().unwrap());
        }
    }

    #[test]
    fn test_gamma_tables_match_first_principles() {
        use num_traits::One;
        let p = modulus();
        for (i, table) in [(1u32, gamma1()), (2, gamma2()), (3, gamma3())] {
            let pi = p.pow(i);
            let exp_base = (&pi - BigUint::one()) / BigUint::from(6u32);
            for (k, expect) in table.iter().enumerate() {
                let exp = &exp_base * BigUint::from(k as u32 + 1);
                assert_eq!(
                    xi().pow_vartime_biguint(&exp),
                    *expect,
                    "gamma{i}[{k}] mismatch"
                );
            }
        }
    }
}
