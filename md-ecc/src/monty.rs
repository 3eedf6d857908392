//! Montgomery arithmetic modulo a runtime odd modulus.
//!
//! This is the arithmetic the accelerator implements in silicon: `R = 2^256`,
//! `H = R^2 mod m` (latched by the H-calculation mode) and the word constant
//! `n0 = -m^-1 mod 2^32` (computed by [`n0_calculate`] and written to `PARA`).
//! Values in the Montgomery domain are `x * R mod m`. The software model
//! computes with `crypto-bigint`'s [`MontyForm`].

use bigint::{
    Odd,
    modular::{MontyForm, MontyParams},
};
use subtle::CtOption;

use crate::uint::{U256, low_word};

/// Computes the Montgomery reduction constant `n0 = -word^-1 mod 2^32`.
///
/// Bit-serial: each of the 32 iterations fixes one bit of `word * n0` to one,
/// so that the final product is `2^32 - 1`. `word` must be odd (the low word
/// of an odd modulus); for an even word the result is meaningless.
pub const fn n0_calculate(word: u32) -> u32 {
    let mut t: u32 = 0;
    let mut n0: u32 = 0;
    let mut i = 0;
    while i < 32 {
        if (t >> i) & 1 == 0 {
            t = t.wrapping_add(word << i);
            n0 |= 1 << i;
        }
        i += 1;
    }
    n0
}

/// Residue modulo a runtime modulus, in Montgomery form.
pub(crate) type Element = MontyForm<{ U256::LIMBS }>;

/// Does `e` represent zero?
pub(crate) fn is_zero(e: &Element) -> bool {
    *e.as_montgomery() == U256::ZERO
}

/// Montgomery parameters of an odd modulus greater than one.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Modulus {
    modulus: U256,
    params: MontyParams<{ U256::LIMBS }>,
}

impl Modulus {
    /// Returns `None` unless `modulus` is odd and greater than one.
    pub fn new(modulus: &U256) -> Option<Self> {
        if low_word(modulus) & 1 == 0 || *modulus == U256::ONE {
            return None;
        }

        let odd = Option::<Odd<U256>>::from(Odd::new(*modulus))?;
        Some(Self {
            modulus: *modulus,
            params: MontyParams::new_vartime(odd),
        })
    }

    /// `n0` for this modulus.
    pub fn n0(&self) -> u32 {
        n0_calculate(low_word(&self.modulus))
    }

    /// `H = R^2 mod m`: `R mod m` moved into the Montgomery domain.
    pub fn h(&self) -> U256 {
        let r = Element::one(self.params);
        *self.to_monty(r.as_montgomery()).as_montgomery()
    }

    /// Zero.
    pub fn zero(&self) -> Element {
        Element::zero(self.params)
    }

    /// Into the Montgomery domain; accepts any 256-bit input.
    pub fn to_monty(&self, x: &U256) -> Element {
        Element::new(x, self.params)
    }

    /// Element whose Montgomery representation is `x mod m`.
    pub fn from_montgomery(&self, x: &U256) -> Element {
        Element::from_montgomery(self.reduce(x), self.params)
    }

    /// `x mod m` for any 256-bit input.
    pub fn reduce(&self, x: &U256) -> U256 {
        self.to_monty(x).retrieve()
    }

    /// `a + b mod m`.
    pub fn add(&self, a: &U256, b: &U256) -> U256 {
        self.reduce(a).add_mod(&self.reduce(b), &self.modulus)
    }

    /// `a - b mod m`.
    pub fn sub(&self, a: &U256, b: &U256) -> U256 {
        self.reduce(a).sub_mod(&self.reduce(b), &self.modulus)
    }

    /// `x^-1 mod m`, or `None` when `x` shares a factor with `m`.
    pub fn invert(&self, x: &U256) -> Option<U256> {
        let inv: CtOption<U256> = self.reduce(x).inv_odd_mod(self.params.modulus()).into();
        Option::from(inv)
    }

    /// Plain-domain inverse of an element, as an element.
    pub fn invert_element(&self, e: &Element) -> Option<Element> {
        self.invert(&e.retrieve()).map(|inv| self.to_monty(&inv))
    }
}
