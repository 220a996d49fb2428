//! The multi-pair Miller loop and its fixed-argument variant.

use itertools::izip;

use crate::curve::{neg_pi_square, psi, G1Affine, G2Affine};
use crate::error::PairingError;
use crate::line::{G2Projective, LineEvaluationAff};
use crate::tower::{batch_invert, Fp12};

/// Signed-digit encoding of the optimal ate loop length `6x₀ + 2`,
/// least significant digit first: `6x₀ + 2 = Σᵢ LOOP_COUNTER[i]·2ⁱ`.
/// Shared by every Miller loop over this curve.
pub const LOOP_COUNTER: [i8; 65] = [
    0, 0, 0, 1, 0, 1, 0, -1, 0, 0, 1, -1, 0, 0, 1, 0, 0, 1, 1, 0, -1, 0, 0, 1, 0, -1, 0, 0, 0, 0,
    1, 1, 1, 0, 0, -1, 0, 0, 1, 0, 0, 0, 0, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, 0, 0, 1, 1, 0, -1, 0,
    0, 1, 0, 1, 1,
];

/// Number of doubling iterations the loop performs (all digits below the
/// leading one).
pub const LOOP_ITERATIONS: usize = LOOP_COUNTER.len() - 1;

/// Computes the multi-Miller loop `∏ᵢ f_{6x₀+2, Qᵢ}(Pᵢ)` (raw, before the
/// final exponentiation).
///
/// Pairs where either side is the identity contribute 1 and are skipped.
/// This function does not check that the inputs are on curve or in the
/// correct subgroups; see `is_on_curve` / `is_in_subgroup`.
#[allow(non_snake_case)]
pub fn miller_loop(P: &[G1Affine], Q: &[G2Affine]) -> Result<Fp12, PairingError> {
    if P.is_empty() || P.len() != Q.len() {
        return Err(PairingError::SizeMismatch);
    }

    let pairs = izip!(P.iter(), Q.iter())
        .filter(|(p, q)| !p.is_identity() && !q.is_identity())
        .map(|(p, q)| (*p, *q))
        .collect::<Vec<_>>();

    let mut q_acc = pairs
        .iter()
        .map(|(_, q)| G2Projective::from_affine(q))
        .collect::<Vec<_>>();
    let q_neg = pairs.iter().map(|(_, q)| q.neg()).collect::<Vec<_>>();

    let mut f = Fp12::one();
    for i in (0..LOOP_ITERATIONS).rev() {
        if i != LOOP_ITERATIONS - 1 {
            // One squaring serves every pair; interleaving the pairs into a
            // single loop is what makes the multi-pairing cheaper than n
            // separate ones. The first iteration squares 1 and is skipped.
            f = f.square();
        }

        for (k, (p, q)) in pairs.iter().enumerate() {
            let l0 = q_acc[k].double_step().evaluate(p);
            match LOOP_COUNTER[i] {
                0 => {
                    f = f.mul_by_034(&l0.r0, &l0.r1, &l0.r2);
                }
                1 => {
                    let l1 = q_acc[k].add_mixed_step(q).evaluate(p);
                    let prod =
                        Fp12::mul_034_by_034(&l0.r0, &l0.r1, &l0.r2, &l1.r0, &l1.r1, &l1.r2);
                    f = f.mul_by_01234(&prod);
                }
                -1 => {
                    let l1 = q_acc[k].add_mixed_step(&q_neg[k]).evaluate(p);
                    let prod =
                        Fp12::mul_034_by_034(&l0.r0, &l0.r1, &l0.r2, &l1.r0, &l1.r1, &l1.r2);
                    f = f.mul_by_01234(&prod);
                }
                _ => return Err(PairingError::InvalidLoopCounter),
            }
        }
    }

    // Tail: fold the lines through ψ(Q) and −π²(Q). The loop length 6x₀+2
    // is positive for this curve, so no closing conjugation is needed.
    for (k, (p, q)) in pairs.iter().enumerate() {
        let q1 = psi(q);
        let q2 = neg_pi_square(q);
        let l0 = q_acc[k].add_mixed_step(&q1).evaluate(p);
        let l1 = q_acc[k].line_compute(&q2).evaluate(p);
        let prod = Fp12::mul_034_by_034(&l0.r0, &l0.r1, &l0.r2, &l1.r0, &l1.r1, &l1.r2);
        f = f.mul_by_01234(&prod);
    }

    Ok(f)
}

/// The full table of affine line evaluations for one fixed G2 point:
/// everything the Miller loop needs that depends only on Q, reusable across
/// any number of G1 arguments.
#[derive(Clone, Debug)]
pub struct PrecomputedLines {
    /// One tangent line per loop iteration, most significant digit first at
    /// the highest index.
    pub double_lines: [LineEvaluationAff; LOOP_ITERATIONS],
    /// One secant line per nonzero digit; zero rows elsewhere.
    pub add_lines: [LineEvaluationAff; LOOP_ITERATIONS],
    /// The two endomorphism lines of the loop tail (through ψ(Q), −π²(Q)).
    pub tail_lines: [LineEvaluationAff; 2],
}

/// Precomputes the fixed-argument line table for Q.
///
/// For the identity every produced line is zero (the division convention
/// 1/0 = 0), which makes the fixed-argument loop fold ones and land on the
/// target-group identity after final exponentiation.
#[allow(non_snake_case)]
pub fn precompute_lines(Q: &G2Affine) -> PrecomputedLines {
    let mut lines = PrecomputedLines {
        double_lines: [LineEvaluationAff::zero(); LOOP_ITERATIONS],
        add_lines: [LineEvaluationAff::zero(); LOOP_ITERATIONS],
        tail_lines: [LineEvaluationAff::zero(); 2],
    };

    let mut acc = *Q;
    let neg_q = Q.neg();
    for i in (0..LOOP_ITERATIONS).rev() {
        lines.double_lines[i] = acc.double_step();
        match LOOP_COUNTER[i] {
            1 => lines.add_lines[i] = acc.add_step(Q),
            -1 => lines.add_lines[i] = acc.add_step(&neg_q),
            _ => {}
        }
    }

    let q1 = psi(Q);
    let q2 = neg_pi_square(Q);
    lines.tail_lines[0] = acc.add_step(&q1);
    lines.tail_lines[1] = acc.line_compute(&q2);

    lines
}

/// The multi-Miller loop over precomputed line tables. Returns the raw
/// loop value; it differs from [`miller_loop`]'s by a subfield factor that
/// the final exponentiation cancels, so only the reduced pairings agree.
///
/// Identity inputs on either side need no filtering here: an identity P
/// makes 1/y = 0 and an identity Q makes every precomputed line zero, so
/// the affected pair folds plain ones into the accumulator.
#[allow(non_snake_case)]
pub fn miller_loop_fixed_q(
    P: &[G1Affine],
    lines: &[PrecomputedLines],
) -> Result<Fp12, PairingError> {
    if P.is_empty() || P.len() != lines.len() {
        return Err(PairingError::SizeMismatch);
    }
    let n = P.len();

    let y_inv = batch_invert(&P.iter().map(|p| p.y).collect::<Vec<_>>());
    let x_neg_over_y = izip!(P.iter(), y_inv.iter())
        .map(|(p, yi)| -(p.x * yi))
        .collect::<Vec<_>>();

    let mut f = Fp12::one();
    for i in (0..LOOP_ITERATIONS).rev() {
        if i != LOOP_ITERATIONS - 1 {
            f = f.square();
        }

        for k in 0..n {
            let l0 = lines[k].double_lines[i].evaluate(&x_neg_over_y[k], &y_inv[k]);
            match LOOP_COUNTER[i] {
                0 => {
                    f = f.mul_by_34(&l0.r0, &l0.r1);
                }
                1 | -1 => {
                    let l1 = lines[k].add_lines[i].evaluate(&x_neg_over_y[k], &y_inv[k]);
                    let prod = Fp12::mul_34_by_34(&l0.r0, &l0.r1, &l1.r0, &l1.r1);
                    f = f.mul_by_01234(&prod);
                }
                _ => return Err(PairingError::InvalidLoopCounter),
            }
        }
    }

    for k in 0..n {
        let l0 = lines[k].tail_lines[0].evaluate(&x_neg_over_y[k], &y_inv[k]);
        let l1 = lines[k].tail_lines[1].evaluate(&x_neg_over_y[k], &y_inv[k]);
        let prod = Fp12::mul_34_by_34(&l0.r0, &l0.r1, &l1.r0, &l1.r1);
        f = f.mul_by_01234(&prod);
    }

    Ok(f)
}
