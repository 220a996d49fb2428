//! Curve point steps and the line evaluations they produce.
//!
//! Each doubling or addition of the G2 working point also yields the
//! coefficients of the line through the involved points, implicitly
//! evaluated at a G1 point; the Miller loop folds these into its `Fp12`
//! accumulator and discards them. The projective forms avoid any inversion
//! per step; the affine forms trade one (batched) inversion for cheaper
//! reuse when the G2 argument is fixed.

use crate::curve::{twist_b, G1Affine, G2Affine};
use crate::point::AffinePoint;
use crate::tower::Fp2;

/// A line produced by a projective step, as the sparse `Fp12` element
/// `r0·y_P + r1·x_P·w + r2·v·w` once evaluated at `P = (x_P, y_P)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineEvaluation {
    pub r0: Fp2,
    pub r1: Fp2,
    pub r2: Fp2,
}

impl LineEvaluation {
    /// Evaluates at the G1 point: `r0 ← r0·y_P`, `r1 ← r1·x_P`.
    pub fn evaluate(&self, p: &G1Affine) -> LineEvaluation {
        LineEvaluation {
            r0: self.r0.mul_base(&p.y),
            r1: self.r1.mul_base(&p.x),
            r2: self.r2,
        }
    }
}

/// A line produced by an affine (fixed-argument) step, as the sparse
/// element `1 + r0·(−x_P/y_P)·w + r1·(1/y_P)·v·w` once evaluated:
/// `r0 = λ`, `r1 = λ·x_S − y_S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineEvaluationAff {
    pub r0: Fp2,
    pub r1: Fp2,
}

impl LineEvaluationAff {
    pub fn zero() -> Self {
        Self {
            r0: Fp2::zero(),
            r1: Fp2::zero(),
        }
    }

    /// Evaluates at the precomputed G1 fractions `(−x_P/y_P, 1/y_P)`.
    pub fn evaluate(&self, x_neg_over_y: &crate::tower::Fp, y_inv: &crate::tower::Fp) -> Self {
        Self {
            r0: self.r0.mul_base(x_neg_over_y),
            r1: self.r1.mul_base(y_inv),
        }
    }
}

/// The homogeneous projective working point of one Miller loop pair,
/// representing the affine point `(x/z, y/z)`. Created from an affine G2
/// point at loop start, mutated step by step, discarded at loop end.
#[derive(Clone, Copy, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl G2Projective {
    pub fn from_affine(q: &G2Affine) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: Fp2::one(),
        }
    }

    /// Doubles the point and returns the tangent line (eprint 2013/722
    /// §4.3, with E = 3b'·Z² carried through the twist coefficient).
    pub fn double_step(&mut self) -> LineEvaluation {
        let a = (self.x * self.y).halve();
        let b = self.y.square();
        let c = self.z.square();
        let d = c.double() + c;
        let e = twist_b() * d;
        let f = e.double() + e;
        let g = (b + f).halve();
        let h = (self.y + self.z).square() - (b + c);
        let i = e - b;
        let j = self.x.square();
        let ee = e.square();
        let k = ee.double() + ee;

        self.x = a * (b - f);
        self.y = g.square() - k;
        self.z = b * h;

        LineEvaluation {
            r0: -h,
            r1: j.double() + j,
            r2: i,
        }
    }

    /// Adds an affine point and returns the secant line (mixed addition,
    /// eprint 2013/722 §4.3).
    pub fn add_mixed_step(&mut self, a: &G2Affine) -> LineEvaluation {
        let y2z1 = a.y * self.z;
        let o = self.y - y2z1;
        let x2z1 = a.x * self.z;
        let l = self.x - x2z1;
        let c = o.square();
        let d = l.square();
        let e = l * d;
        let f = self.z * c;
        let g = self.x * d;
        let t0 = g.double();
        let h = e + f - t0;
        let t1 = self.y * e;

        self.x = l * h;
        self.y = (g - h) * o - t1;
        self.z = e * self.z;

        let t2 = l * a.y;
        let j = a.x * o - t2;

        LineEvaluation {
            r0: l,
            r1: -o,
            r2: j,
        }
    }

    /// The line through this point and an affine point, without computing
    /// the sum (used for the final loop additions where the resulting point
    /// is never needed again).
    pub fn line_compute(&self, a: &G2Affine) -> LineEvaluation {
        let y2z1 = a.y * self.z;
        let o = self.y - y2z1;
        let x2z1 = a.x * self.z;
        let l = self.x - x2z1;
        let t2 = l * a.y;
        let j = a.x * o - t2;

        LineEvaluation {
            r0: l,
            r1: -o,
            r2: j,
        }
    }
}

impl AffinePoint<Fp2> {
    /// Affine doubling step for line precomputation. `λ = 3x²/2y` with the
    /// field's 0⁻¹ = 0 convention, so the identity yields an all-zero line
    /// and stays at the identity.
    pub(crate) fn double_step(&mut self) -> LineEvaluationAff {
        let n = self.x.square();
        let n = n.double() + n;
        let d = self.y.double();
        let lambda = n.div_or_zero(&d);

        let xr = lambda.square() - self.x - self.x;
        let yr = lambda * (self.x - xr) - self.y;

        let line = LineEvaluationAff {
            r0: lambda,
            r1: lambda * self.x - self.y,
        };

        self.x = xr;
        self.y = yr;
        line
    }

    /// Affine mixed addition step for line precomputation.
    pub(crate) fn add_step(&mut self, a: &G2Affine) -> LineEvaluationAff {
        let lambda = (a.y - self.y).div_or_zero(&(a.x - self.x));

        let xr = lambda.square() - self.x - a.x;
        let yr = lambda * (self.x - xr) - self.y;

        let line = LineEvaluationAff {
            r0: lambda,
            r1: lambda * self.x - self.y,
        };

        self.x = xr;
        self.y = yr;
        line
    }

    /// The affine secant line only, leaving the point untouched.
    pub(crate) fn line_compute(&self, a: &G2Affine) -> LineEvaluationAff {
        let lambda = (a.y - self.y).div_or_zero(&(a.x - self.x));
        LineEvaluationAff {
            r0: lambda,
            r1: lambda * self.x - self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::g2_generator;
    use crate::test_utils::random_g2;
    use rand::{rngs::StdRng, SeedableRng};

    fn to_affine(p: &G2Projective) -> G2Affine {
        let zinv = p.z.inverse_or_zero();
        AffinePoint::new(p.x * zinv, p.y * zinv)
    }

    #[test]
    fn test_projective_double_matches_affine() {
        let mut rng = StdRng::seed_from_u64(401);
        let q = random_g2(&mut rng);
        let mut proj = G2Projective::from_affine(&q);
        proj.double_step();

        let mut aff = q;
        aff.double_step();
        assert_eq!(to_affine(&proj), aff);
    }

    #[test]
    fn test_projective_add_matches_affine() {
        let mut rng = StdRng::seed_from_u64(402);
        let q = random_g2(&mut rng);
        let g = g2_generator();
        let mut proj = G2Projective::from_affine(&q);
        proj.add_mixed_step(&g);

        let mut aff = q;
        aff.add_step(&g);
        assert_eq!(to_affine(&proj), aff);
    }

    #[test]
    fn test_line_vanishes_on_its_points() {
        // The tangent line at T evaluated "at T itself" must vanish:
        // r0·y_T + r1·x_T + r2·(z-normalization) == 0 in the affine chart.
        let mut rng = StdRng::seed_from_u64(403);
        let q = random_g2(&mut rng);
        let mut proj = G2Projective::from_affine(&q);
        let line = proj.double_step();
        let lhs = line.r0 * q.y + line.r1 * q.x + line.r2;
        assert_eq!(lhs, Fp2::zero());
    }

    #[test]
    fn test_secant_line_vanishes_on_both_points() {
        let mut rng = StdRng::seed_from_u64(404);
        let q = random_g2(&mut rng);
        let g = g2_generator();
        let proj = G2Projective::from_affine(&q);
        let line = proj.line_compute(&g);
        assert_eq!(line.r0 * q.y + line.r1 * q.x + line.r2, Fp2::zero());
        assert_eq!(line.r0 * g.y + line.r1 * g.x + line.r2, Fp2::zero());
    }

    #[test]
    fn test_identity_yields_zero_affine_lines() {
        let mut inf = G2Affine::new(Fp2::zero(), Fp2::zero());
        let line = inf.double_step();
        assert_eq!(line, LineEvaluationAff::zero());
        assert_eq!(inf, G2Affine::new(Fp2::zero(), Fp2::zero()));
    }
}
