//! Public pairing entry points.
//!
//! None of these validate that inputs are on curve or in the correct
//! subgroups; callers owning untrusted points must run `is_on_curve` /
//! `is_in_subgroup` themselves first.

use tracing::instrument;

use crate::curve::{G1Affine, G2Affine};
use crate::error::PairingError;
use crate::final_exp::final_exponentiation;
use crate::miller_loop::{miller_loop, miller_loop_fixed_q, PrecomputedLines};
use crate::tower::Fp12;

/// Computes the reduced multi-pairing `∏ᵢ e(Pᵢ, Qᵢ)`.
///
/// Fails with [`PairingError::SizeMismatch`] on empty or unequal-length
/// inputs. Identity points contribute the target-group identity.
#[allow(non_snake_case)]
#[instrument(level = "trace", skip_all, fields(pairs = P.len()))]
pub fn pair(P: &[G1Affine], Q: &[G2Affine]) -> Result<Fp12, PairingError> {
    let f = miller_loop(P, Q)?;
    Ok(final_exponentiation(&f, &[]))
}

/// Returns true iff `∏ᵢ e(Pᵢ, Qᵢ) == 1`.
#[allow(non_snake_case)]
#[instrument(level = "trace", skip_all, fields(pairs = P.len()))]
pub fn pairing_check(P: &[G1Affine], Q: &[G2Affine]) -> Result<bool, PairingError> {
    let f = pair(P, Q)?;
    Ok(f.is_one())
}

/// [`pair`] with fixed G2 arguments given as precomputed line tables.
#[allow(non_snake_case)]
#[instrument(level = "trace", skip_all, fields(pairs = P.len()))]
pub fn pair_fixed_q(P: &[G1Affine], lines: &[PrecomputedLines]) -> Result<Fp12, PairingError> {
    let f = miller_loop_fixed_q(P, lines)?;
    Ok(final_exponentiation(&f, &[]))
}

/// [`pairing_check`] with fixed G2 arguments given as precomputed line
/// tables.
#[allow(non_snake_case)]
#[instrument(level = "trace", skip_all, fields(pairs = P.len()))]
pub fn pairing_check_fixed_q(
    P: &[G1Affine],
    lines: &[PrecomputedLines],
) -> Result<bool, PairingError> {
    let f = pair_fixed_q(P, lines)?;
    Ok(f.is_one())
}
