//! Conversions between this crate's tower types and the halo2curves
//! reference implementation, used as ground truth throughout the tests.

use halo2curves_axiom::bn256::{
    Fq2, Fq6, Fq12, Fr, G1Affine as H2cG1Affine, G2Affine as H2cG2Affine, Gt,
};
use halo2curves_axiom::ff::{Field, PrimeField};
use num_bigint::BigUint;
use num_traits::{Num, One};
use rand::rngs::StdRng;

use crate::curve::{G1Affine, G2Affine};
use crate::point::AffinePoint;
use crate::tower::{Fp, Fp2, Fp6, Fp12};

pub fn fq2_to_fp2(x: Fq2) -> Fp2 {
    Fp2::new(x.c0, x.c1)
}

pub fn fp2_to_fq2(x: Fp2) -> Fq2 {
    Fq2 { c0: x.c0, c1: x.c1 }
}

pub fn fq6_to_fp6(x: Fq6) -> Fp6 {
    Fp6::new(fq2_to_fp2(x.c0), fq2_to_fp2(x.c1), fq2_to_fp2(x.c2))
}

pub fn fq12_to_fp12(x: Fq12) -> Fp12 {
    Fp12::new(fq6_to_fp6(x.c0), fq6_to_fp6(x.c1))
}

/// `Gt` has no public constructor or accessor for its inner `Fq12`, so
/// comparing against halo2curves pairing outputs goes through a transmute
/// of the single-field wrapper.
pub fn gt_to_fp12(x: Gt) -> Fp12 {
    fq12_to_fp12(unsafe { core::mem::transmute::<Gt, Fq12>(x) })
}

pub fn random_fp2(rng: &mut StdRng) -> Fp2 {
    Fp2::new(Fp::random(&mut *rng), Fp::random(&mut *rng))
}

pub fn random_fp6(rng: &mut StdRng) -> Fp6 {
    Fp6::new(random_fp2(rng), random_fp2(rng), random_fp2(rng))
}

pub fn random_fp12(rng: &mut StdRng) -> Fp12 {
    Fp12::new(random_fp6(rng), random_fp6(rng))
}

pub fn h2c_g1_to_ours(p: H2cG1Affine) -> G1Affine {
    AffinePoint::new(p.x, p.y)
}

pub fn h2c_g2_to_ours(q: H2cG2Affine) -> G2Affine {
    AffinePoint::new(fq2_to_fp2(q.x), fq2_to_fp2(q.y))
}

pub fn ours_g1_to_h2c(p: &G1Affine) -> H2cG1Affine {
    H2cG1Affine { x: p.x, y: p.y }
}

pub fn ours_g2_to_h2c(q: &G2Affine) -> H2cG2Affine {
    H2cG2Affine {
        x: fp2_to_fq2(q.x),
        y: fp2_to_fq2(q.y),
    }
}

pub fn random_g1(rng: &mut StdRng) -> G1Affine {
    h2c_g1_to_ours(H2cG1Affine::random(rng))
}

pub fn random_g2(rng: &mut StdRng) -> G2Affine {
    h2c_g2_to_ours(H2cG2Affine::random(rng))
}

/// `[s]·G1` computed by halo2curves.
pub fn g1_gen_mul(s: Fr) -> G1Affine {
    use group::Curve;
    h2c_g1_to_ours((H2cG1Affine::generator() * s).to_affine())
}

/// `[s]·G2` computed by halo2curves.
pub fn g2_gen_mul(s: Fr) -> G2Affine {
    use group::Curve;
    h2c_g2_to_ours((H2cG2Affine::generator() * s).to_affine())
}

pub fn modulus_p() -> BigUint {
    BigUint::from_str_radix(Fp::MODULUS.trim_start_matches("0x"), 16).unwrap()
}

pub fn order_r() -> BigUint {
    BigUint::from_str_radix(Fr::MODULUS.trim_start_matches("0x"), 16).unwrap()
}

/// `(p¹² − 1)/r` as little-endian u64 limbs, for naive-exponentiation
/// cross-checks of the final exponentiation.
pub fn final_exp_exponent() -> Vec<u64> {
    let exp = (modulus_p().pow(12) - BigUint::one()) / order_r();
    exp.to_u64_digits()
}
