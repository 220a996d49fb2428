use core::ops::{Add, Mul, Neg, Sub};

use super::{check_buffer_len, Fp2};
use crate::error::PairingError;

/// An element of `Fp6 = Fp2[v]/(v³ − ξ)`, stored as `c0 + c1·v + c2·v²`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp6 {
    pub c0: Fp2,
    pub c1: Fp2,
    pub c2: Fp2,
}

impl Fp6 {
    pub const BYTES: usize = 3 * Fp2::BYTES;

    pub const fn new(c0: Fp2, c1: Fp2, c2: Fp2) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn zero() -> Self {
        Self::new(Fp2::zero(), Fp2::zero(), Fp2::zero())
    }

    pub fn one() -> Self {
        Self::new(Fp2::one(), Fp2::zero(), Fp2::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double(), self.c2.double())
    }

    /// Karatsuba multiplication: 6 Fp2 multiplications.
    pub fn mul(&self, other: &Self) -> Self {
        let t0 = self.c0 * other.c0;
        let t1 = self.c1 * other.c1;
        let t2 = self.c2 * other.c2;

        let c0 = ((self.c1 + self.c2) * (other.c1 + other.c2) - t1 - t2).mul_by_nonresidue() + t0;
        let c1 = (self.c0 + self.c1) * (other.c0 + other.c1) - t0 - t1 + t2.mul_by_nonresidue();
        let c2 = (self.c0 + self.c2) * (other.c0 + other.c2) - t0 - t2 + t1;
        Self::new(c0, c1, c2)
    }

    /// CH-SQR2 squaring (Chung–Hasan). Agrees bit-for-bit with
    /// `self.mul(self)`.
    pub fn square(&self) -> Self {
        let s0 = self.c0.square();
        let s1 = (self.c0 * self.c1).double();
        let s2 = (self.c0 - self.c1 + self.c2).square();
        let s3 = (self.c1 * self.c2).double();
        let s4 = self.c2.square();

        let c0 = s3.mul_by_nonresidue() + s0;
        let c1 = s4.mul_by_nonresidue() + s1;
        let c2 = s1 + s2 + s3 - s0 - s4;
        Self::new(c0, c1, c2)
    }

    /// Multiplication by v: `(c0 + c1·v + c2·v²)·v = ξ·c2 + c0·v + c1·v²`.
    pub fn mul_by_nonresidue(&self) -> Self {
        Self::new(self.c2.mul_by_nonresidue(), self.c0, self.c1)
    }

    /// Scales every coordinate by an `Fp2` element.
    pub fn mul_by_e2(&self, b: &Fp2) -> Self {
        Self::new(self.c0 * *b, self.c1 * *b, self.c2 * *b)
    }

    /// Sparse multiplication by `b0 + b1·v`.
    pub fn mul_by_01(&self, b0: &Fp2, b1: &Fp2) -> Self {
        let t0 = self.c0 * *b0;
        let t1 = self.c1 * *b1;

        let c0 = ((self.c1 + self.c2) * *b1 - t1).mul_by_nonresidue() + t0;
        let c1 = (self.c0 + self.c1) * (*b0 + *b1) - t0 - t1;
        let c2 = self.c2 * *b0 + t1;
        Self::new(c0, c1, c2)
    }

    /// Inverse via the norm (eprint 2010/354 Alg. 17).
    ///
    /// Fails with [`PairingError::NonInvertible`] only for zero.
    pub fn invert(&self) -> Result<Self, PairingError> {
        if self.is_zero() {
            return Err(PairingError::NonInvertible);
        }
        Ok(self.inverse_or_zero())
    }

    pub(crate) fn inverse_or_zero(&self) -> Self {
        let t0 = self.c0.square();
        let t1 = self.c1.square();
        let t2 = self.c2.square();
        let t3 = self.c0 * self.c1;
        let t4 = self.c0 * self.c2;
        let t5 = self.c1 * self.c2;

        let d0 = t0 - t5.mul_by_nonresidue();
        let d1 = t2.mul_by_nonresidue() - t3;
        let d2 = t1 - t4;

        let t6 = self.c0 * d0
            + (self.c2 * d1).mul_by_nonresidue()
            + (self.c1 * d2).mul_by_nonresidue();
        let t6 = t6.inverse_or_zero();
        Self::new(d0 * t6, d1 * t6, d2 * t6)
    }

    /// Big-endian encoding, most significant coordinate (`c2`) first.
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out[..Fp2::BYTES].copy_from_slice(&self.c2.to_bytes());
        out[Fp2::BYTES..2 * Fp2::BYTES].copy_from_slice(&self.c1.to_bytes());
        out[2 * Fp2::BYTES..].copy_from_slice(&self.c0.to_bytes());
        out
    }

    /// Decodes the layout produced by [`Self::to_bytes`]. Fails with
    /// [`PairingError::InvalidBufferSize`] on any other length.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PairingError> {
        check_buffer_len(buf, Self::BYTES)?;
        Ok(Self::new(
            Fp2::from_bytes(&buf[2 * Fp2::BYTES..])?,
            Fp2::from_bytes(&buf[Fp2::BYTES..2 * Fp2::BYTES])?,
            Fp2::from_bytes(&buf[..Fp2::BYTES])?,
        ))
    }
}

impl Add for Fp6 {
    type Output = Fp6;
    fn add(self, rhs: Fp6) -> Fp6 {
        Fp6::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl Sub for Fp6 {
    type Output = Fp6;
    fn sub(self, rhs: Fp6) -> Fp6 {
        Fp6::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl Mul for Fp6 {
    type Output = Fp6;
    fn mul(self, rhs: Fp6) -> Fp6 {
        Fp6::mul(&self, &rhs)
    }
}

impl Neg for Fp6 {
    type Output = Fp6;
    fn neg(self) -> Fp6 {
        Fp6::new(-self.c0, -self.c1, -self.c2)
    }
}
