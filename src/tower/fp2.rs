use core::ops::{Add, Mul, Neg, Sub};

use halo2curves_axiom::ff::{Field, PrimeField};

use super::{check_buffer_len, fp_from_be_bytes_reduced, fp_to_be_bytes, Fp, FP_BYTES};
use crate::error::PairingError;

/// An element of `Fp2 = Fp[u]/(u² + 1)`, stored as `c0 + c1·u`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp2 {
    pub c0: Fp,
    pub c1: Fp,
}

impl Fp2 {
    pub const BYTES: usize = 2 * FP_BYTES;

    pub const fn new(c0: Fp, c1: Fp) -> Self {
        Self { c0, c1 }
    }

    pub const fn from_base(c0: Fp) -> Self {
        Self { c0, c1: Fp::ZERO }
    }

    pub fn zero() -> Self {
        Self::new(Fp::ZERO, Fp::ZERO)
    }

    pub fn one() -> Self {
        Self::new(Fp::ONE, Fp::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        bool::from(self.c0.is_zero()) && bool::from(self.c1.is_zero())
    }

    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    pub fn halve(&self) -> Self {
        self.mul_base(&Fp::TWO_INV)
    }

    /// Karatsuba multiplication: 3 base field multiplications.
    pub fn mul(&self, other: &Self) -> Self {
        let t0 = self.c0 * other.c0;
        let t1 = self.c1 * other.c1;
        let c1 = (self.c0 + self.c1) * (other.c0 + other.c1) - t0 - t1;
        Self::new(t0 - t1, c1)
    }

    /// Complex squaring. Agrees bit-for-bit with `self.mul(self)`.
    pub fn square(&self) -> Self {
        let c0 = (self.c0 + self.c1) * (self.c0 - self.c1);
        let c1 = (self.c0 * self.c1).double();
        Self::new(c0, c1)
    }

    pub fn mul_base(&self, b: &Fp) -> Self {
        Self::new(self.c0 * b, self.c1 * b)
    }

    /// Multiplication by ξ = 9 + u:
    /// `(a0 + a1·u)(9 + u) = (9·a0 − a1) + (9·a1 + a0)·u`.
    pub fn mul_by_nonresidue(&self) -> Self {
        let t0 = self.c0.double().double().double() + self.c0;
        let t1 = self.c1.double().double().double() + self.c1;
        Self::new(t0 - self.c1, t1 + self.c0)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// The p-power Frobenius. Since p ≡ 3 (mod 4) this is conjugation.
    pub fn frobenius(&self) -> Self {
        self.conjugate()
    }

    /// Inverse through the norm: `(a0 − a1·u)/(a0² + a1²)`.
    ///
    /// Fails with [`PairingError::NonInvertible`] only for zero.
    pub fn invert(&self) -> Result<Self, PairingError> {
        if self.is_zero() {
            return Err(PairingError::NonInvertible);
        }
        Ok(self.inverse_or_zero())
    }

    /// Inversion mapping 0 to 0. The line-evaluation routines rely on this
    /// convention so that identity points produce all-zero lines.
    pub(crate) fn inverse_or_zero(&self) -> Self {
        let norm = self.c0.square() + self.c1.square();
        let ninv = norm.invert().unwrap_or(Fp::ZERO);
        Self::new(self.c0 * ninv, -(self.c1 * ninv))
    }

    /// `n / d`, yielding zero when `d` is zero.
    pub(crate) fn div_or_zero(&self, d: &Self) -> Self {
        self.mul(&d.inverse_or_zero())
    }

    /// Big-endian encoding, most significant coordinate (`c1`) first.
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out[..FP_BYTES].copy_from_slice(&fp_to_be_bytes(&self.c1));
        out[FP_BYTES..].copy_from_slice(&fp_to_be_bytes(&self.c0));
        out
    }

    /// Decodes the layout produced by [`Self::to_bytes`], reducing each
    /// coordinate modulo p. Fails with [`PairingError::InvalidBufferSize`]
    /// unless the buffer is exactly [`Self::BYTES`] long.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PairingError> {
        check_buffer_len(buf, Self::BYTES)?;
        Ok(Self::new(
            fp_from_be_bytes_reduced(&buf[FP_BYTES..]),
            fp_from_be_bytes_reduced(&buf[..FP_BYTES]),
        ))
    }

    #[cfg(test)]
    pub(crate) fn pow_vartime_biguint(&self, e: &num_bigint::BigUint) -> Self {
        let mut res = Self::one();
        for byte in e.to_bytes_be() {
            for bit in (0..8).rev() {
                res = res.square();
                if (byte >> bit) & 1 == 1 {
                    res = res.mul(*self);
                }
            }
        }
        res
    }
}

impl Add for Fp2 {
    type Output = Fp2;
    fn add(self, rhs: Fp2) -> Fp2 {
        Fp2::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl Sub for Fp2 {
    type Output = Fp2;
    fn sub(self, rhs: Fp2) -> Fp2 {
        Fp2::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl Mul for Fp2 {
    type Output = Fp2;
    fn mul(self, rhs: Fp2) -> Fp2 {
        Fp2::mul(&self, &rhs)
    }
}

impl Neg for Fp2 {
    type Output = Fp2;
    fn neg(self) -> Fp2 {
        Fp2::new(-self.c0, -self.c1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fq2_to_fp2, random_fp2};
    use crate::tower::xi;
    use halo2curves_axiom::bn256::Fq2;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_mul_matches_halo2curves() {
        let mut rng = StdRng::seed_from_u64(101);
        for _ in 0..16 {
            let a = Fq2::random(&mut rng);
            let b = Fq2::random(&mut rng);
            assert_eq!(fq2_to_fp2(a) * fq2_to_fp2(b), fq2_to_fp2(a * b));
        }
    }

    #[test]
    fn test_square_equals_mul_self() {
        let mut rng = StdRng::seed_from_u64(102);
        for _ in 0..16 {
            let a = random_fp2(&mut rng);
            assert_eq!(a.square(), a * a);
        }
    }

    #[test]
    fn test_square_matches_halo2curves() {
        let mut rng = StdRng::seed_from_u64(103);
        let a = Fq2::random(&mut rng);
        assert_eq!(fq2_to_fp2(a).square(), fq2_to_fp2(a.square()));
    }

    #[test]
    fn test_invert() {
        let mut rng = StdRng::seed_from_u64(104);
        let a = Fq2::random(&mut rng);
        let mine = fq2_to_fp2(a).invert().unwrap();
        assert_eq!(mine, fq2_to_fp2(a.invert().unwrap()));
        assert_eq!(mine * fq2_to_fp2(a), Fp2::one());
        assert_eq!(Fp2::zero().invert(), Err(PairingError::NonInvertible));
        assert_eq!(Fp2::zero().inverse_or_zero(), Fp2::zero());
    }

    #[test]
    fn test_mul_by_nonresidue_is_mul_by_xi() {
        let mut rng = StdRng::seed_from_u64(105);
        for _ in 0..8 {
            let a = random_fp2(&mut rng);
            assert_eq!(a.mul_by_nonresidue(), a * xi());
        }
    }

    #[test]
    fn test_receiver_as_operand_aliasing() {
        let mut rng = StdRng::seed_from_u64(106);
        let a = random_fp2(&mut rng);
        let expected = a * a;
        let mut x = a;
        x = x * x;
        assert_eq!(x, expected);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut rng = StdRng::seed_from_u64(107);
        let a = random_fp2(&mut rng);
        let bytes = a.to_bytes();
        assert_eq!(Fp2::from_bytes(&bytes).unwrap(), a);

        let err = Fp2::from_bytes(&bytes[1..]).unwrap_err();
        assert_eq!(
            err,
            PairingError::InvalidBufferSize {
                expected: Fp2::BYTES,
                got: Fp2::BYTES - 1
            }
        );
    }

    #[test]
    fn test_from_bytes_reduces() {
        // 2^256 - 1 in both coordinates decodes to the reduced values.
        let buf = [0xffu8; Fp2::BYTES];
        let a = Fp2::from_bytes(&buf).unwrap();
        let b = a.to_bytes();
        assert_eq!(Fp2::from_bytes(&b).unwrap(), a);
    }
}
