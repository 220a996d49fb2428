//! The BN254 curve pair.
//!
//! G1: `y² = x³ + 3` over Fp (cofactor 1). G2: `y² = x³ + 3/ξ` over Fp2,
//! the D-type sextic twist. Point arithmetic here exists to support the
//! explicit validity checks; the Miller loop uses its own projective steps
//! in `line.rs`.

use halo2curves_axiom::ff::Field;

use crate::error::PairingError;
use crate::point::AffinePoint;
use crate::tower::{
    check_buffer_len, fp_from_be_bytes_reduced, fp_to_be_bytes, gamma1, gamma2, Fp, Fp2, FP_BYTES,
};
use crate::SEED;

pub type G1Affine = AffinePoint<Fp>;
pub type G2Affine = AffinePoint<Fp2>;

/// b' = 3/ξ, the twist curve coefficient.
pub fn twist_b() -> Fp2 {
    Fp2::new(
        Fp::from_raw([
            0x3267e6dc24a138e5,
            0xb5b4c5e559dbefa3,
            0x81be18991be06ac3,
            0x2b149d40ceb8aaae,
        ]),
        Fp::from_raw([
            0xe4a2bd0685c315d2,
            0xa74fa084e52d1852,
            0xcd2cafadeed8fdf4,
            0x009713b03af0fed4,
        ]),
    )
}

pub fn g1_generator() -> G1Affine {
    AffinePoint::new(Fp::from(1), Fp::from(2))
}

pub fn g2_generator() -> G2Affine {
    AffinePoint::new(
        Fp2::new(
            Fp::from_raw([
                0x46debd5cd992f6ed,
                0x674322d4f75edadd,
                0x426a00665e5c4479,
                0x1800deef121f1e76,
            ]),
            Fp::from_raw([
                0x97e485b7aef312c2,
                0xf1aa493335a9e712,
                0x7260bfb731fb5d25,
                0x198e9393920d483a,
            ]),
        ),
        Fp2::new(
            Fp::from_raw([
                0x4ce6cc0166fa7daa,
                0xe3d1e7690c43d37b,
                0x4aab71808dcb408f,
                0x12c85ea5db8c6deb,
            ]),
            Fp::from_raw([
                0x55acdadcd122975b,
                0xbc4b313370b38ef3,
                0xec9e99ad690c3395,
                0x090689d0585ff075,
            ]),
        ),
    )
}

impl AffinePoint<Fp> {
    pub const BYTES: usize = 2 * FP_BYTES;

    pub fn identity() -> Self {
        Self::new(Fp::ZERO, Fp::ZERO)
    }

    pub fn is_identity(&self) -> bool {
        bool::from(self.x.is_zero()) && bool::from(self.y.is_zero())
    }

    pub fn neg(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        Self::new(self.x, -self.y)
    }

    /// Checks `y² = x³ + 3`. Not enforced by any arithmetic routine.
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        self.y.square() == self.x.square() * self.x + Fp::from(3)
    }

    /// G1 has cofactor 1: every point on the curve already has order r, so
    /// membership reduces to the curve check.
    pub fn is_in_subgroup(&self) -> bool {
        self.is_on_curve()
    }

    /// Uncompressed big-endian `x || y` encoding; the identity encodes as
    /// all zeroes.
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out[..FP_BYTES].copy_from_slice(&fp_to_be_bytes(&self.x));
        out[FP_BYTES..].copy_from_slice(&fp_to_be_bytes(&self.y));
        out
    }

    /// Decodes the layout produced by [`Self::to_bytes`]. Fails with
    /// [`PairingError::InvalidBufferSize`] on any other length; does not
    /// validate the curve equation (see [`Self::is_on_curve`]).
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PairingError> {
        check_buffer_len(buf, Self::BYTES)?;
        Ok(Self::new(
            fp_from_be_bytes_reduced(&buf[..FP_BYTES]),
            fp_from_be_bytes_reduced(&buf[FP_BYTES..]),
        ))
    }
}

impl AffinePoint<Fp2> {
    pub const BYTES: usize = 2 * Fp2::BYTES;

    pub fn identity() -> Self {
        Self::new(Fp2::zero(), Fp2::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn neg(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        Self::new(self.x, -self.y)
    }

    /// Checks `y² = x³ + 3/ξ`. Not enforced by any arithmetic routine.
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        self.y.square() == self.x.square() * self.x + twist_b()
    }

    /// Checks order-r membership through the ψ endomorphism
    /// (eprint 2022/348 §3, §5.1):
    /// `[x₀+1]P + ψ([x₀]P) + ψ²([x₀]P) == ψ³([2x₀]P)`,
    /// avoiding a full scalar multiplication by r.
    pub fn is_in_subgroup(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        if !self.is_on_curve() {
            return false;
        }
        let s = g2_mul_u64(self, SEED);
        let lhs = g2_add(&g2_add(&g2_add(&s, self), &psi(&s)), &psi(&psi(&s)));
        let rhs = psi(&psi(&psi(&g2_add(&s, &s))));
        lhs == rhs
    }

    /// Uncompressed big-endian `x || y` encoding; the identity encodes as
    /// all zeroes.
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out[..Fp2::BYTES].copy_from_slice(&self.x.to_bytes());
        out[Fp2::BYTES..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Decodes the layout produced by [`Self::to_bytes`]. Fails with
    /// [`PairingError::InvalidBufferSize`] on any other length; does not
    /// validate the curve equation or subgroup membership.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PairingError> {
        check_buffer_len(buf, Self::BYTES)?;
        Ok(Self::new(
            Fp2::from_bytes(&buf[..Fp2::BYTES])?,
            Fp2::from_bytes(&buf[Fp2::BYTES..])?,
        ))
    }
}

/// The Frobenius-twist endomorphism ψ = twist ∘ π ∘ untwist:
/// `ψ(x, y) = (x̄·ξ^((p−1)/3), ȳ·ξ^((p−1)/2))`. Acts on the order-r
/// subgroup as multiplication by p.
pub(crate) fn psi(q: &G2Affine) -> G2Affine {
    if q.is_identity() {
        return *q;
    }
    let g = gamma1();
    AffinePoint::new(q.x.conjugate() * g[1], q.y.conjugate() * g[2])
}

/// The endomorphism-derived auxiliary point `−π²(Q)` used by the Miller
/// loop tail: `(x·ξ^((p²−1)/3), y)` (the y-coefficient `−ξ^((p²−1)/2)`
/// equals one).
pub(crate) fn neg_pi_square(q: &G2Affine) -> G2Affine {
    let g = gamma2();
    AffinePoint::new(q.x * g[1], q.y)
}

/// Complete affine addition; only used by the subgroup check, where
/// clarity beats speed.
pub(crate) fn g2_add(a: &G2Affine, b: &G2Affine) -> G2Affine {
    if a.is_identity() {
        return *b;
    }
    if b.is_identity() {
        return *a;
    }
    if a.x == b.x {
        if a.y == b.y {
            return g2_double(a);
        }
        return G2Affine::identity();
    }
    let lambda = (b.y - a.y).div_or_zero(&(b.x - a.x));
    let xr = lambda.square() - a.x - b.x;
    let yr = lambda * (a.x - xr) - a.y;
    AffinePoint::new(xr, yr)
}

pub(crate) fn g2_double(a: &G2Affine) -> G2Affine {
    if a.is_identity() || a.y.is_zero() {
        return G2Affine::identity();
    }
    let n = a.x.square();
    let lambda = (n.double() + n).div_or_zero(&a.y.double());
    let xr = lambda.square() - a.x.double();
    let yr = lambda * (a.x - xr) - a.y;
    AffinePoint::new(xr, yr)
}

pub(crate) fn g2_mul_u64(p: &G2Affine, k: u64) -> G2Affine {
    let mut res = G2Affine::identity();
    for i in (0..64).rev() {
        res = g2_double(&res);
        if (k >> i) & 1 == 1 {
            res = g2_add(&res, p);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{random_g1, random_g2};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generators_are_valid() {
        assert!(g1_generator().is_on_curve());
        assert!(g1_generator().is_in_subgroup());
        assert!(g2_generator().is_on_curve());
        assert!(g2_generator().is_in_subgroup());
    }

    #[test]
    fn test_random_points_are_valid() {
        let mut rng = StdRng::seed_from_u64(501);
        let p = random_g1(&mut rng);
        let q = random_g2(&mut rng);
        assert!(p.is_on_curve());
        assert!(q.is_on_curve());
        assert!(q.is_in_subgroup());
    }

    #[test]
    fn test_off_curve_points_rejected() {
        let mut rng = StdRng::seed_from_u64(502);
        let mut p = random_g1(&mut rng);
        p.x += Fp::ONE;
        assert!(!p.is_on_curve());

        let mut q = random_g2(&mut rng);
        q.y = q.y + Fp2::one();
        assert!(!q.is_on_curve());
        assert!(!q.is_in_subgroup());
    }

    #[test]
    fn test_psi_acts_as_mul_by_p_on_subgroup() {
        // On the order-r subgroup, ψ² − [t]ψ + [p] = 0 forces
        // ψ(ψ(Q)) + [p]Q = [t]ψ(Q); spot-check the low-order consequence
        // ψ(Q) stays on curve and in subgroup.
        let mut rng = StdRng::seed_from_u64(503);
        let q = random_g2(&mut rng);
        let pq = psi(&q);
        assert!(pq.is_on_curve());
        assert!(pq.is_in_subgroup());
    }

    #[test]
    fn test_g2_scalar_arithmetic() {
        let g = g2_generator();
        let g2 = g2_double(&g);
        assert_eq!(g2, g2_add(&g, &g));
        assert_eq!(g2_mul_u64(&g, 5), {
            let four = g2_double(&g2);
            g2_add(&four, &g)
        });
        assert_eq!(g2_add(&g, &g.neg()), G2Affine::identity());
    }

    #[test]
    fn test_identity_conventions() {
        assert!(G1Affine::identity().is_on_curve());
        assert!(G2Affine::identity().is_in_subgroup());
        assert_eq!(G1Affine::identity().neg(), G1Affine::identity());
    }

    #[test]
    fn test_point_serialization_round_trip() {
        let mut rng = StdRng::seed_from_u64(504);
        let p = random_g1(&mut rng);
        let q = random_g2(&mut rng);
        assert_eq!(G1Affine::from_bytes(&p.to_bytes()).unwrap(), p);
        assert_eq!(G2Affine::from_bytes(&q.to_bytes()).unwrap(), q);
        assert_eq!(G1Affine::identity().to_bytes(), [0u8; G1Affine::BYTES]);
        assert!(G1Affine::from_bytes(&[0u8; 63]).is_err());
        assert!(G2Affine::from_bytes(&[0u8; 127]).is_err());
    }
}
