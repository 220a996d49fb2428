//! Tower field arithmetic and the optimal ate pairing for BN254.
//!
//! The base prime field is external (`halo2curves_axiom::bn256::Fq`);
//! this crate builds the `Fp2`/`Fp6`/`Fp12` extension tower on top of it,
//! the curve point and line-evaluation arithmetic of the two pairing
//! groups, the multi-pair Miller loop (with a fixed-argument variant over
//! precomputed line tables), the final exponentiation and the subgroup
//! membership checks.
//!
//! Entry points are [`pair`], [`pairing_check`], [`miller_loop`],
//! [`final_exponentiation`], [`precompute_lines`] and the `_fixed_q`
//! variants. None of them validate subgroup membership of their inputs;
//! use the explicit `is_on_curve` / `is_in_subgroup` checks on untrusted
//! points.

pub mod curve;
pub mod error;
pub mod final_exp;
pub mod line;
pub mod miller_loop;
pub mod pairing;
pub mod point;
pub mod tower;

#[cfg(test)]
mod test_utils;

pub use curve::{g1_generator, g2_generator, G1Affine, G2Affine};
pub use error::PairingError;
pub use final_exp::final_exponentiation;
pub use line::{G2Projective, LineEvaluation, LineEvaluationAff};
pub use miller_loop::{miller_loop, miller_loop_fixed_q, precompute_lines, PrecomputedLines};
pub use pairing::{pair, pair_fixed_q, pairing_check, pairing_check_fixed_q};
pub use point::AffinePoint;
pub use tower::{CompressedCyclotomic, Fp, Fp12, Fp2, Fp6};

/// The BN254 seed x₀. Every piece of fixed curve data in this crate (the
/// Miller loop counter, the final exponentiation chain, the subgroup check
/// identities) is derived from this value.
pub const SEED: u64 = 0x44e9_92b4_4a69_09f1;
