//! The final exponentiation: raises a raw Miller loop value to
//! `(p¹² − 1)/r`, projecting it into the order-r target subgroup.

use crate::tower::Fp12;

/// Computes `(z · ∏ extra)^((p¹²−1)/r)`.
///
/// Extra raw Miller loop factors are multiplied in first, which is how
/// aggregated checks batch several loops under one exponentiation.
///
/// The exponent splits into an easy part `(p⁶−1)(p²+1)` (one inversion,
/// one conjugation, one Frobenius) and the curve's hard part
/// `(p⁴−p²+1)/r`, a fixed vectorial addition chain over the cyclotomic
/// subgroup (Devegili et al., eprint 2007/390, in the Scott et al.
/// arrangement) built from seed powers, Frobenius maps and cyclotomic
/// squarings. The chain is curve-family data: porting this engine to
/// another curve means re-deriving it, not editing the control flow.
pub fn final_exponentiation(z: &Fp12, extra: &[Fp12]) -> Fp12 {
    let mut result = *z;
    for e in extra {
        result = result.mul(e);
    }

    // Easy part: f^((p⁶−1)(p²+1)). The inverse-of-zero convention keeps
    // this total; a zero accumulator cannot arise from filtered inputs.
    let t0 = result.conjugate();
    result = result.inverse_or_zero();
    let result_easy = t0.mul(&result);
    let mut result = result_easy.frobenius_square().mul(&result_easy);

    // Degenerate inputs collapse to the identity here; skip the chain.
    if result.is_one() {
        return result;
    }

    // Hard part: f^((p⁴−p²+1)/r).
    let fp1 = result.frobenius();
    let fp2 = result.frobenius_square();
    let fp3 = fp2.frobenius();
    let fu = result.expt();
    let fu2 = fu.expt();
    let fu3 = fu2.expt();
    let y3 = fu.frobenius().conjugate();
    let fu2p = fu2.frobenius();
    let fu3p = fu3.frobenius();
    let y2 = fu2.frobenius_square();

    let y0 = fp1.mul(&fp2).mul(&fp3);
    let y1 = result.conjugate();
    let y5 = fu2.conjugate();
    let y4 = fu.mul(&fu2p).conjugate();
    let mut y6 = fu3.mul(&fu3p).conjugate();

    y6 = y6.cyclotomic_square().mul(&y4).mul(&y5);
    let mut t1 = y3.mul(&y5).mul(&y6);
    y6 = y6.mul(&y2);
    t1 = t1.cyclotomic_square().mul(&y6).cyclotomic_square();
    let t0 = t1.mul(&y1);
    t1 = t1.mul(&y0);
    result = t0.cyclotomic_square().mul(&t1);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{final_exp_exponent, random_fp12};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_chain_matches_naive_exponentiation() {
        let mut rng = StdRng::seed_from_u64(601);
        let f = random_fp12(&mut rng);
        let naive = f.pow_vartime(&final_exp_exponent());
        assert_eq!(final_exponentiation(&f, &[]), naive);
    }

    #[test]
    fn test_extra_factors_multiply_first() {
        let mut rng = StdRng::seed_from_u64(602);
        let a = random_fp12(&mut rng);
        let b = random_fp12(&mut rng);
        let c = random_fp12(&mut rng);
        assert_eq!(
            final_exponentiation(&a, &[b, c]),
            final_exponentiation(&a.mul(&b).mul(&c), &[])
        );
    }

    #[test]
    fn test_early_exit_on_easy_part_identity() {
        // Any element of a proper subfield is killed by the easy part.
        use crate::tower::{Fp12, Fp2, Fp6};
        let subfield = Fp12::new(
            Fp6::new(Fp2::from_base(crate::tower::Fp::from(42)), Fp2::zero(), Fp2::zero()),
            Fp6::zero(),
        );
        assert_eq!(final_exponentiation(&subfield, &[]), Fp12::one());
    }

    #[test]
    fn test_output_is_in_subgroup() {
        let mut rng = StdRng::seed_from_u64(603);
        let f = random_fp12(&mut rng);
        assert!(final_exponentiation(&f, &[]).is_in_subgroup());
    }
}
