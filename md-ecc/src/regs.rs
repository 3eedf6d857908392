//! Register map of the ECC accelerator.
//!
//! | register | words | role |
//! |----------|-------|------|
//! | `CON`    | 1     | mode, operand-slot mask, start bit |
//! | `STA`    | 1     | DONE / ERR / ECC_OVER / MI_ZERO, write-one-to-clear |
//! | `AREG`   | 56    | operand slots A0..A6, eight words each |
//! | `NREG`   | 8     | modulus |
//! | `SCALAR` | 8     | scalar for point multiplication |
//! | `YCO`    | 8     | y coordinate of a point multiplication result |
//! | `PARA`   | 1     | Montgomery constant `n0` |
//! | `HREG`   | 8     | `R^2 mod N`, latched by [`Mode::HCal`] |
//!
//! Operand usage per mode:
//!
//! | mode       | inputs                                   | outputs |
//! |------------|------------------------------------------|---------|
//! | `HCal`     | NREG                                     | HREG |
//! | `MontMul`  | A1, A2                                   | A0 = A1 * A2 * R^-1 |
//! | `ModAdd`   | A1, A2                                   | A0 = A1 + A2 |
//! | `ModSub`   | A1, A2                                   | A0 = A1 - A2 |
//! | `ModInv`   | A1                                       | A0 = A1^-1 |
//! | `MontIn`   | slots in the CON mask                    | same slots, times R |
//! | `MontOut`  | slots in the CON mask                    | same slots, times R^-1 |
//! | `PointMul` | A0..A2 = (X, Y, Z), A3..A5 = copy, A6 = a, SCALAR, PARA | A0 = x, YCO = y |
//! | `ZAddU`    | A0..A5 = X1, Y1, X2, Y2, Z, X1 - X2 (Montgomery domain) | A0, A1, A4 = X3, Y3, Z3; A2, A3 = updated X1, Y1 |

pub use crate::uint::{from_words, to_words};

use crate::uint::{U256, WORDS};

/// Words per operand slot.
pub const SLOT_WORDS: usize = WORDS;

/// Number of operand slots in `AREG`.
pub const SLOTS: usize = 7;

/// Total number of `AREG` words.
pub const AREG_WORDS: usize = SLOT_WORDS * SLOTS;

/// `CON` register fields.
pub mod con {
    /// Arithmetic mode field.
    pub const MODE_MASK: u32 = 0x0000_000F;

    /// Shift of the operand-slot mask used by the domain transform modes.
    pub const SLOT_SHIFT: u32 = 8;

    /// Operand-slot mask field.
    pub const SLOT_MASK: u32 = 0x7F << SLOT_SHIFT;

    /// Run bit.
    pub const START: u32 = 1 << 31;
}

/// `STA` register bits.
pub mod sta {
    /// Operation complete.
    pub const DONE: u32 = 1 << 0;

    /// Arithmetic error.
    pub const ERR: u32 = 1 << 1;

    /// Point multiplication produced the point at infinity.
    pub const ECC_OVER: u32 = 1 << 2;

    /// Modular inverse of zero requested.
    pub const MI_ZERO: u32 = 1 << 3;

    /// Every status bit.
    pub const ALL: u32 = DONE | ERR | ECC_OVER | MI_ZERO;
}

/// Operand slot indices.
pub mod slot {
    /// Result slot.
    pub const A0: usize = 0;
    /// First operand.
    pub const A1: usize = 1;
    /// Second operand.
    pub const A2: usize = 2;
    #[allow(missing_docs)]
    pub const A3: usize = 3;
    #[allow(missing_docs)]
    pub const A4: usize = 4;
    #[allow(missing_docs)]
    pub const A5: usize = 5;
    /// Curve coefficient `a` for point multiplication.
    pub const A6: usize = 6;

    /// Bit for `slot` in the `CON` slot mask.
    pub const fn mask(slot: usize) -> u8 {
        1 << slot
    }
}

/// Arithmetic mode selected by `CON[3:0]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Mode {
    /// Compute `H = R^2 mod N`.
    HCal = 0,
    /// Montgomery multiplication.
    MontMul = 1,
    /// Modular addition.
    ModAdd = 2,
    /// Modular subtraction.
    ModSub = 3,
    /// Modular inverse.
    ModInv = 4,
    /// Transform slots into the Montgomery domain.
    MontIn = 5,
    /// Transform slots out of the Montgomery domain.
    MontOut = 6,
    /// Scalar point multiplication.
    PointMul = 7,
    /// Co-Z addition with update.
    ZAddU = 8,
}

impl Mode {
    /// Decode the mode field of a `CON` value.
    pub const fn from_con(con: u32) -> Option<Self> {
        Some(match con & con::MODE_MASK {
            0 => Mode::HCal,
            1 => Mode::MontMul,
            2 => Mode::ModAdd,
            3 => Mode::ModSub,
            4 => Mode::ModInv,
            5 => Mode::MontIn,
            6 => Mode::MontOut,
            7 => Mode::PointMul,
            8 => Mode::ZAddU,
            _ => return None,
        })
    }

    /// `CON` value that starts this mode on the slots in `slots`.
    pub const fn con(self, slots: u8) -> u32 {
        self as u32 | ((slots as u32) << con::SLOT_SHIFT) | con::START
    }
}

/// In-memory copy of the accelerator's register file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterBlock {
    /// Control register.
    pub con: u32,
    /// Status register.
    pub sta: u32,
    /// Operand bank.
    pub areg: [u32; AREG_WORDS],
    /// Modulus.
    pub nreg: [u32; WORDS],
    /// Scalar.
    pub scalar: [u32; WORDS],
    /// Result y coordinate.
    pub yco: [u32; WORDS],
    /// Montgomery constant.
    pub para: u32,
    /// Latched `R^2 mod N`.
    pub hreg: [u32; WORDS],
}

impl RegisterBlock {
    /// Register file after reset.
    pub const fn new() -> Self {
        Self {
            con: 0,
            sta: 0,
            areg: [0; AREG_WORDS],
            nreg: [0; WORDS],
            scalar: [0; WORDS],
            yco: [0; WORDS],
            para: 0,
            hreg: [0; WORDS],
        }
    }

    /// Read operand slot `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`SLOTS`].
    pub fn slot(&self, index: usize) -> U256 {
        let mut words = [0u32; WORDS];
        words.copy_from_slice(&self.areg[Self::slot_range(index)]);
        from_words(&words)
    }

    /// Write operand slot `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`SLOTS`].
    pub fn set_slot(&mut self, index: usize, value: &U256) {
        self.areg[Self::slot_range(index)].copy_from_slice(&to_words(value));
    }

    fn slot_range(index: usize) -> core::ops::Range<usize> {
        assert!(index < SLOTS, "operand slot {index} out of range");
        index * SLOT_WORDS..(index + 1) * SLOT_WORDS
    }

    /// Decoded mode field of `CON`.
    pub const fn mode(&self) -> Option<Mode> {
        Mode::from_con(self.con)
    }

    /// Slot mask field of `CON`.
    pub const fn slot_mask(&self) -> u8 {
        ((self.con & con::SLOT_MASK) >> con::SLOT_SHIFT) as u8
    }
}

impl Default for RegisterBlock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn con_round_trip() {
        let con = Mode::MontIn.con(slot::mask(slot::A1) | slot::mask(slot::A5));
        assert_ne!(con & con::START, 0);
        assert_eq!(Mode::from_con(con), Some(Mode::MontIn));

        let mut regs = RegisterBlock::new();
        regs.con = con;
        assert_eq!(regs.slot_mask(), 0b010_0010);
        assert_eq!(Mode::from_con(0xF), None);
    }

    #[test]
    fn slots_do_not_overlap() {
        let mut regs = RegisterBlock::new();
        regs.set_slot(slot::A2, &U256::MAX);
        assert_eq!(regs.slot(slot::A1), U256::ZERO);
        assert_eq!(regs.slot(slot::A2), U256::MAX);
        assert_eq!(regs.slot(slot::A3), U256::ZERO);
        assert_eq!(regs.areg[16..24], [u32::MAX; 8]);
    }

    #[test]
    #[should_panic(expected = "operand slot 7 out of range")]
    fn slot_index_is_checked() {
        RegisterBlock::new().slot(SLOTS);
    }
}
