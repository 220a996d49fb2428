/// An elliptic curve point in affine coordinates.
///
/// The point at infinity (the group identity) is encoded as `(0, 0)`, which
/// never satisfies the curve equations used by this crate. Arithmetic
/// routines do not validate that a point is on the curve or in the prime
/// order subgroup; callers needing those guarantees must use the explicit
/// `is_on_curve` / `is_in_subgroup` checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffinePoint<F> {
    pub x: F,
    pub y: F,
}

impl<F> AffinePoint<F> {
    pub const fn new(x: F, y: F) -> Self {
        Self { x, y }
    }
}
