//! Jacobian point arithmetic used by the point multiplication and ZADDU modes.
//!
//! A point `(X, Y, Z)` represents the affine point `(X / Z^2, Y / Z^3)`;
//! `Z = 0` is the point at infinity.

use crate::{
    monty::{Element, Modulus, is_zero},
    uint::U256,
};

#[derive(Clone, Copy, Debug)]
pub(super) struct Jacobian {
    pub x: Element,
    pub y: Element,
    pub z: Element,
}

impl Jacobian {
    pub fn identity(f: &Modulus) -> Self {
        Self {
            x: f.zero(),
            y: f.zero(),
            z: f.zero(),
        }
    }

    pub fn is_identity(&self) -> bool {
        is_zero(&self.z)
    }

    /// Point doubling for any `a` (`dbl-2007-bl` without the `Z = 1` shortcut).
    pub fn double(&self, a: &Element) -> Self {
        if self.is_identity() {
            return *self;
        }

        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        // S = 4 * X * YY
        let s = self.x * yy;
        let s = s + s;
        let s = s + s;

        // M = 3 * XX + a * ZZ^2
        let m = xx + xx + xx + *a * zz.square();

        let x3 = m.square() - (s + s);

        let yyyy2 = yyyy + yyyy;
        let yyyy4 = yyyy2 + yyyy2;
        let y3 = m * (s - x3) - (yyyy4 + yyyy4);

        let yz = self.y * self.z;
        let z3 = yz + yz;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// General addition (`add-2007-bl`), falling back to doubling for equal
    /// inputs.
    pub fn add(&self, rhs: &Self, a: &Element) -> Self {
        if self.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;

        let h = u2 - u1;
        let r = s2 - s1;

        if is_zero(&h) {
            return if is_zero(&r) {
                self.double(a)
            } else {
                // h is zero: the point at infinity
                Self {
                    x: h,
                    y: h,
                    z: h,
                }
            };
        }

        let hh = h.square();
        let hhh = h * hh;
        let v = u1 * hh;

        let x3 = r.square() - hhh - (v + v);
        let y3 = r * (v - x3) - s1 * hhh;
        let z3 = self.z * rhs.z * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Left-to-right double-and-add. `acc` seeds the top bit of `k` and is
    /// expected to equal `base`.
    pub fn mul(base: &Self, acc: &Self, k: &U256, f: &Modulus, a: &Element) -> Self {
        let top = k.bits();
        if top == 0 {
            return Self::identity(f);
        }

        let mut acc = *acc;
        for i in (0..top - 1).rev() {
            acc = acc.double(a);
            if k.bit_vartime(i) {
                acc = acc.add(base, a);
            }
        }
        acc
    }

    /// Convert to plain-domain affine coordinates.
    pub fn to_affine(&self, f: &Modulus) -> Option<(U256, U256)> {
        if self.is_identity() {
            return None;
        }

        let z_inv = f.invert_element(&self.z)?;
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2 * z_inv;

        Some(((self.x * z_inv2).retrieve(), (self.y * z_inv3).retrieve()))
    }
}

/// Output of one co-Z addition with update.
#[derive(Clone, Copy, Debug)]
pub(super) struct ZAddU {
    /// `P + Q`.
    pub sum: Jacobian,
    /// `P` rescaled to the new common `Z`.
    pub updated: (Element, Element),
}

/// Co-Z addition with update (Meloni 2007).
///
/// `P = (x1, y1, z)` and `Q = (x2, y2, z)` share `z`; `d` is `x1 - x2`.
pub(super) fn zaddu(
    (x1, y1): (&Element, &Element),
    (x2, y2): (&Element, &Element),
    z: &Element,
    d: &Element,
) -> ZAddU {
    let c = d.square();
    let w1 = *x1 * c;
    let w2 = *x2 * c;
    let e = *y1 - *y2;
    let a1 = *y1 * (w1 - w2);

    let x3 = e.square() - w1 - w2;
    let y3 = e * (w1 - x3) - a1;
    let z3 = *z * *d;

    ZAddU {
        sum: Jacobian {
            x: x3,
            y: y3,
            z: z3,
        },
        updated: (w1, a1),
    }
}
