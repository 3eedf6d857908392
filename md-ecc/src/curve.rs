//! Short Weierstrass curve parameters.

use crate::{point::AffinePoint, uint::U256};

/// Parameters of a curve `y^2 = x^3 + a x + b` over `GF(p)` with a base point
/// `G = (gx, gy)` of prime order `n`.
///
/// The driver works with any 256-bit (or shorter) curve; nothing about a
/// particular curve is assumed. Reference sets live in [`crate::curves`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    /// Coefficient `a`.
    pub a: U256,
    /// Coefficient `b`.
    pub b: U256,
    /// Field prime.
    pub p: U256,
    /// Order of the base point.
    pub n: U256,
    /// Base point x coordinate.
    pub gx: U256,
    /// Base point y coordinate.
    pub gy: U256,
}

impl CurveParams {
    /// The base point.
    pub const fn generator(&self) -> AffinePoint {
        AffinePoint::new(self.gx, self.gy)
    }

    /// Bit length of the group order.
    pub fn order_bits(&self) -> u32 {
        self.n.bits()
    }
}
