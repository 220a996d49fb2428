use core::ops::{Add, Mul, Neg, Sub};

use super::{check_buffer_len, gamma1, gamma2, gamma3, Fp2, Fp6};
use crate::error::PairingError;
use crate::SEED;

/// An element of `Fp12 = Fp6[w]/(w² − v)`, stored as `c0 + c1·w`.
///
/// The target group GT of the pairing is the order-r subgroup of `Fp12*`;
/// see [`Fp12::is_in_subgroup`]. Raw Miller loop outputs are plain `Fp12`
/// values with no extra invariant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp12 {
    pub c0: Fp6,
    pub c1: Fp6,
}

/// A compressed element of the cyclotomic subgroup (Karabina, eprint
/// 2010/542): the `w`, `v`, `v²` and `v²·w` coordinates of a cyclotomic
/// square, with the two remaining coordinates dropped.
///
/// The compressed form only supports further compressed squarings; any
/// other arithmetic requires an explicit [`CompressedCyclotomic::decompress`]
/// first, which is why this is a separate type rather than an `Fp12` with
/// garbage coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressedCyclotomic {
    g1: Fp2,
    g2: Fp2,
    g3: Fp2,
    g5: Fp2,
}

impl Fp12 {
    pub const BYTES: usize = 2 * Fp6::BYTES;

    pub const fn new(c0: Fp6, c1: Fp6) -> Self {
        Self { c0, c1 }
    }

    pub fn zero() -> Self {
        Self::new(Fp6::zero(), Fp6::zero())
    }

    pub fn one() -> Self {
        Self::new(Fp6::one(), Fp6::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    pub fn is_one(&self) -> bool {
        *self == Self::one()
    }

    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    /// Karatsuba multiplication: 3 Fp6 multiplications.
    pub fn mul(&self, other: &Self) -> Self {
        let a = (self.c0 + self.c1) * (other.c0 + other.c1);
        let b = self.c0 * other.c0;
        let c = self.c1 * other.c1;
        Self::new(c.mul_by_nonresidue() + b, a - b - c)
    }

    /// Complex squaring (eprint 2010/354 Alg. 22). Agrees bit-for-bit with
    /// `self.mul(self)`.
    pub fn square(&self) -> Self {
        let c2 = self.c0 * self.c1;
        let c0 = (self.c0 - self.c1) * (self.c0 - self.c1.mul_by_nonresidue()) + c2;
        Self::new(c0 + c2.mul_by_nonresidue(), c2.double())
    }

    /// Conjugation over Fp6: negates the `w` half. For unitary elements
    /// (anything in the cyclotomic subgroup) this is the inverse.
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Inverse via the norm (eprint 2010/354 Alg. 23).
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
        let t = (t0 - t1.mul_by_nonresidue()).inverse_or_zero();
        Self::new(self.c0 * t, -(self.c1 * t))
    }

    /// The six `Fp2` coordinates in w-power order
    /// (1, w, w², w³, w⁴, w⁵) = (c0.c0, c1.c0, c0.c1, c1.c1, c0.c2, c1.c2).
    fn to_wpower_coords(self) -> [Fp2; 6] {
        [
            self.c0.c0, self.c1.c0, self.c0.c1, self.c1.c1, self.c0.c2, self.c1.c2,
        ]
    }

    fn from_wpower_coords(c: [Fp2; 6]) -> Self {
        Self::new(Fp6::new(c[0], c[2], c[4]), Fp6::new(c[1], c[3], c[5]))
    }

    /// The p-power Frobenius: conjugate each `Fp2` coordinate, then scale
    /// the `w^k` coordinate by γ₁ₖ = ξ^(k·(p−1)/6).
    pub fn frobenius(&self) -> Self {
        let g = gamma1();
        let mut c = self.to_wpower_coords().map(|x| x.conjugate());
        for k in 1..6 {
            c[k] = c[k] * g[k - 1];
        }
        Self::from_wpower_coords(c)
    }

    /// The p²-power Frobenius. No conjugation; the γ₂ coefficients lie in Fp.
    pub fn frobenius_square(&self) -> Self {
        let g = gamma2();
        let mut c = self.to_wpower_coords();
        for k in 1..6 {
            c[k] = c[k] * g[k - 1];
        }
        Self::from_wpower_coords(c)
    }

    /// The p³-power Frobenius.
    pub fn frobenius_cube(&self) -> Self {
        let g = gamma3();
        let mut c = self.to_wpower_coords().map(|x| x.conjugate());
        for k in 1..6 {
            c[k] = c[k] * g[k - 1];
        }
        Self::from_wpower_coords(c)
    }

    /// Multiplies by the sparse element `c0 + c3·w + c4·v·w` (the shape of a
    /// projective line evaluation).
    pub fn mul_by_034(&self, c0: &Fp2, c3: &Fp2, c4: &Fp2) -> Self {
        let a = self.c0.mul_by_e2(c0);
        let b = self.c1.mul_by_01(c3, c4);
        let d0 = *c0 + *c3;
        let d = (self.c0 + self.c1).mul_by_01(&d0, c4);
        let z1 = d - (a + b);
        let z0 = b.mul_by_nonresidue() + a;
        Self::new(z0, z1)
    }

    /// Product of two 034-sparse elements, returned in 01234 form
    /// (coordinates 1, v, v², w, v·w).
    pub fn mul_034_by_034(d0: &Fp2, d3: &Fp2, d4: &Fp2, c0: &Fp2, c3: &Fp2, c4: &Fp2) -> [Fp2; 5] {
        let x0 = *d0 * *c0;
        let x3 = *d3 * *c3;
        let x4 = *d4 * *c4;
        let x04 = (*d0 + *d4) * (*c0 + *c4);
        let x03 = (*d0 + *d3) * (*c0 + *c3);
        let x34 = (*d3 + *d4) * (*c3 + *c4);

        [
            x4.mul_by_nonresidue() + x0,
            x3,
            x34 - x3 - x4,
            x03 - x0 - x3,
            x04 - x0 - x4,
        ]
    }

    /// Multiplies by a 01234-sparse element (w⁵ coordinate zero).
    pub fn mul_by_01234(&self, x: &[Fp2; 5]) -> Self {
        let c0 = Fp6::new(x[0], x[1], x[2]);
        let c1 = Fp6::new(x[3], x[4], Fp2::zero());
        let a = (self.c0 + self.c1) * (c0 + c1);
        let b = self.c0 * c0;
        let c = self.c1.mul_by_01(&x[3], &x[4]);
        Self::new(c.mul_by_nonresidue() + b, a - b - c)
    }

    /// Multiplies by the sparse element `1 + c3·w + c4·v·w` (the shape of a
    /// normalized fixed-argument line evaluation).
    pub fn mul_by_34(&self, c3: &Fp2, c4: &Fp2) -> Self {
        let a = self.c0;
        let b = self.c1.mul_by_01(c3, c4);
        let d0 = Fp2::one() + *c3;
        let d = (self.c0 + self.c1).mul_by_01(&d0, c4);
        let z1 = d - (a + b);
        let z0 = b.mul_by_nonresidue() + a;
        Self::new(z0, z1)
    }

    /// Product of two 34-sparse elements, returned in 01234 form.
    pub fn mul_34_by_34(d3: &Fp2, d4: &Fp2, c3: &Fp2, c4: &Fp2) -> [Fp2; 5] {
        let x3 = *d3 * *c3;
        let x4 = *d4 * *c4;
        let x04 = *c4 + *d4;
        let x03 = *c3 + *d3;
        let x34 = (*d3 + *d4) * (*c3 + *c4);

        [
            x4.mul_by_nonresidue() + Fp2::one(),
            x3,
            x34 - x3 - x4,
            x03,
            x04,
        ]
    }

    /// Granger–Scott squaring (eprint 2009/565 §3.2), valid only for
    /// elements of the cyclotomic subgroup.
    pub fn cyclotomic_square(&self) -> Self {
        let mut z0 = self.c0.c0;
        let mut z4 = self.c0.c1;
        let mut z3 = self.c0.c2;
        let mut z2 = self.c1.c0;
        let mut z1 = self.c1.c1;
        let mut z5 = self.c1.c2;

        let (t0, t1) = fp4_square(&z0, &z1);
        z0 = (t0 - z0).double() + t0;
        z1 = (t1 + z1).double() + t1;

        let (t0, t1) = fp4_square(&z2, &z3);
        let (t2, t3) = fp4_square(&z4, &z5);
        z4 = (t0 - z4).double() + t0;
        z5 = (t1 + z5).double() + t1;

        let t0 = t3.mul_by_nonresidue();
        z2 = (t0 + z2).double() + t0;
        z3 = (t2 - z3).double() + t2;

        Self::new(Fp6::new(z0, z4, z3), Fp6::new(z2, z1, z5))
    }

    /// Karabina compressed squaring (eprint 2010/542 Th. 3.2), valid only
    /// for elements of the cyclotomic subgroup. The result must be
    /// decompressed before any generic multiplication.
    pub fn cyclotomic_square_compressed(&self) -> CompressedCyclotomic {
        karabina_square(&self.c0.c1, &self.c0.c2, &self.c1.c0, &self.c1.c2)
    }

    /// Exponentiation by the curve seed x₀ over the cyclotomic subgroup.
    /// The single seed-power primitive from which the final exponentiation
    /// hard part and the subgroup checks are chained.
    pub fn expt(&self) -> Self {
        let mut res = Self::one();
        let mut found_one = false;
        for i in (0..64).rev() {
            if found_one {
                res = res.cyclotomic_square();
            }
            if (SEED >> i) & 1 == 1 {
                if found_one {
                    res = res.mul(*self);
                } else {
                    res = *self;
                    found_one = true;
                }
            }
        }
        res
    }

    /// Square-and-multiply exponentiation by little-endian u64 limbs.
    /// Variable time; not for secret exponents.
    pub fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::one();
        for limb in exp.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if (limb >> i) & 1 == 1 {
                    res = res.mul(*self);
                }
            }
        }
        res
    }

    /// Returns true iff this element lies in the order-r target subgroup.
    ///
    /// Two cheap identities replace the full cofactor exponentiation:
    /// membership in the cyclotomic subgroup via `z^(p⁴+1) == z^(p²)`
    /// (Frobenius only), and the trace condition `z^(p+1−t) == 1` with
    /// `t = 6x₀² + 1`, checked as `z^p == z^(6x₀²)` via [`Fp12::expt`].
    pub fn is_in_subgroup(&self) -> bool {
        let a = self.frobenius_square();
        let b = a.frobenius_square().mul(*self);
        if a != b {
            return false;
        }

        let x2 = self.expt().expt();
        let c = (x2.cyclotomic_square().mul(x2)).cyclotomic_square();
        self.frobenius() == c
    }

    /// Big-endian encoding, most significant tower coordinate first:
    /// `c1.c2.c1 | c1.c2.c0 | … | c0.c0.c1 | c0.c0.c0`, 384 bytes.
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out[..Fp6::BYTES].copy_from_slice(&self.c1.to_bytes());
        out[Fp6::BYTES..].copy_from_slice(&self.c0.to_bytes());
        out
    }

    /// Decodes the layout produced by [`Self::to_bytes`], reducing each
    /// coordinate modulo p. Fails with [`PairingError::InvalidBufferSize`]
    /// unless the buffer is exactly [`Self::BYTES`] long. Does not check
    /// subgroup membership; see [`Fp12::is_in_subgroup`].
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PairingError> {
        check_buffer_len(buf, Self::BYTES)?;
        Ok(Self::new(
            Fp6::from_bytes(&buf[Fp6::BYTES..])?,
            Fp6::from_bytes(&buf[..Fp6::BYTES])?,
        ))
    }
}

impl CompressedCyclotomic {
    /// Another compressed squaring; only the four stored coordinates are
    /// needed.
    pub fn square(&self) -> Self {
        karabina_square(&self.g1, &self.g2, &self.g3, &self.g5)
    }

    /// Recovers the full `Fp12` representation (eprint 2010/542 §3.2):
    /// `g4 = (ξ·g5² + 3·g1² − 2·g2)/(4·g3)`, then
    /// `g0 = ξ·(2·g4² + g3·g5 − 3·g2·g1) + 1`.
    ///
    /// `g3 = 0` only for the identity among the values this crate
    /// produces; the 0⁻¹ = 0 convention then yields exactly 1.
    pub fn decompress(&self) -> Fp12 {
        let t0 = self.g1.square();
        let t1 = (t0 - self.g2).double() + t0;
        let t2 = self.g5.square();
        let t0 = t2.mul_by_nonresidue() + t1;
        let t1 = self.g3.double().double().inverse_or_zero();
        let g4 = t0 * t1;

        let t1 = self.g2 * self.g1;
        let t2 = (g4.square() - t1).double() - t1;
        let t1 = self.g3 * self.g5;
        let g0 = (t2 + t1).mul_by_nonresidue() + Fp2::one();

        Fp12::new(
            Fp6::new(g0, self.g1, self.g2),
            Fp6::new(self.g3, g4, self.g5),
        )
    }
}

/// Squaring in `Fp4 = Fp2[t]/(t² − ξ)`, the building block of the
/// cyclotomic squaring formulas.
fn fp4_square(a: &Fp2, b: &Fp2) -> (Fp2, Fp2) {
    let t0 = a.square();
    let t1 = b.square();
    let c0 = t1.mul_by_nonresidue() + t0;
    let c1 = (*a + *b).square() - t0 - t1;
    (c0, c1)
}

fn karabina_square(g1: &Fp2, g2: &Fp2, g3: &Fp2, g5: &Fp2) -> CompressedCyclotomic {
    let t0 = g1.square();
    let t1 = g5.square();
    let t5 = *g1 + *g5;
    let t2 = t5.square();
    let t3 = t0 + t1;
    let t5 = t2 - t3;

    let t6 = *g3 + *g2;
    let t3 = t6.square();
    let t2 = g3.square();

    let t6 = t5.mul_by_nonresidue();
    let t5 = (t6 + *g3).double();
    let z3 = t5 + t6;

    let t4 = t1.mul_by_nonresidue();
    let t5 = t0 + t4;
    let t6 = t5 - *g2;
    let t1 = g2.square();
    let t6 = t6.double();
    let z2 = t6 + t5;

    let t4 = t1.mul_by_nonresidue();
    let t5 = t2 + t4;
    let t6 = t5 - *g1;
    let t6 = t6.double();
    let z1 = t6 + t5;

    let t0 = t2 + t1;
    let t5 = t3 - t0;
    let t6 = t5 + *g5;
    let t6 = t6.double();
    let z5 = t5 + t6;

    CompressedCyclotomic {
        g1: z1,
        g2: z2,
        g3: z3,
        g5: z5,
    }
}

impl Add for Fp12 {
    type Output = Fp12;
    fn add(self, rhs: Fp12) -> Fp12 {
        Fp12::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl Sub for Fp12 {
    type Output = Fp12;
    fn sub(self, rhs: Fp12) -> Fp12 {
        Fp12::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl Mul for Fp12 {
    type Output = Fp12;
    fn mul(self, rhs: Fp12) -> Fp12 {
        Fp12::mul(&self, &rhs)
    }
}

impl Neg for Fp12 {
    type Output = Fp12;
    fn neg(self) -> Fp12 {
        Fp12::new(-self.c0, -self.c1)
    }
}
