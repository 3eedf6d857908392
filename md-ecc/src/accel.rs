//! Register-level access to the accelerator.
//!
//! [`Accelerator`] is the seam between the driver and the silicon: the driver
//! only ever loads operands, writes `CON` and polls `STA` through it.
//! [`SoftAccelerator`] implements every arithmetic mode in software on an
//! in-memory [`RegisterBlock`], so the driver runs off-target.

mod jacobian;

use self::jacobian::{Jacobian, zaddu};
use crate::{
    monty::Modulus,
    regs::{Mode, RegisterBlock, SLOTS, con, slot, sta},
    uint::{U256, from_words, to_words},
};

/// Register-level interface of the ECC accelerator.
pub trait Accelerator {
    /// Write operand slot `index` of `AREG`.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`SLOTS`].
    fn write_slot(&mut self, index: usize, value: &U256);

    /// Read operand slot `index` of `AREG`.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`SLOTS`].
    fn read_slot(&self, index: usize) -> U256;

    /// Write `NREG`.
    fn write_modulus(&mut self, modulus: &U256);

    /// Write `SCALAR0..7`.
    fn write_scalar(&mut self, scalar: &U256);

    /// Write `PARA`.
    fn write_para(&mut self, n0: u32);

    /// Read `YCO0..7`.
    fn read_yco(&self) -> U256;

    /// Write `CON`. Setting the start bit begins a transaction.
    fn write_con(&mut self, con: u32);

    /// Read `STA`.
    fn read_status(&mut self) -> u32;

    /// Clear the `STA` bits in `mask`.
    fn clear_status(&mut self, mask: u32);
}

/// Software model of the accelerator.
///
/// A started transaction completes after `latency` further status reads; the
/// result registers are updated at that point. A stalled model never
/// completes.
///
/// Arithmetic needs a consistent register file: an odd `NREG` above one,
/// `PARA` equal to its `n0` and `HREG` latched for it. Anything else raises
/// ERR, as does the mode selected with [`SoftAccelerator::fail_on`].
#[derive(Clone, Debug)]
pub struct SoftAccelerator {
    regs: RegisterBlock,
    latency: Option<u32>,
    pending: Option<u32>,
    fault: Option<Mode>,
}

impl SoftAccelerator {
    /// Model that completes on the first status read.
    pub const fn new() -> Self {
        Self::with_latency(0)
    }

    /// Model that reports DONE only after `polls` further status reads.
    pub const fn with_latency(polls: u32) -> Self {
        Self {
            regs: RegisterBlock::new(),
            latency: Some(polls),
            pending: None,
            fault: None,
        }
    }

    /// Model that never completes a transaction.
    pub const fn stalled() -> Self {
        Self {
            regs: RegisterBlock::new(),
            latency: None,
            pending: None,
            fault: None,
        }
    }

    /// Complete every transaction in `mode` with ERR and leave the result
    /// registers untouched.
    pub fn fail_on(mut self, mode: Mode) -> Self {
        self.fault = Some(mode);
        self
    }

    /// Borrow the register file.
    pub fn registers(&self) -> &RegisterBlock {
        &self.regs
    }

    /// Is a transaction in flight?
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Modulus parameters, if the register file is consistent.
    fn modulus(&self) -> Option<Modulus> {
        let f = Modulus::new(&from_words(&self.regs.nreg))?;
        if self.regs.para != f.n0() || from_words(&self.regs.hreg) != f.h() {
            return None;
        }
        Some(f)
    }

    /// Run the latched mode, returning the status bits to raise besides DONE.
    fn execute(&mut self) -> u32 {
        let mode = self.regs.mode();
        if mode.is_some() && mode == self.fault {
            return sta::ERR;
        }

        match mode {
            Some(Mode::HCal) => self.hcal(),
            Some(mode) => match self.modulus() {
                Some(f) => self.arithmetic(mode, &f),
                None => sta::ERR,
            },
            None => sta::ERR,
        }
    }

    fn hcal(&mut self) -> u32 {
        match Modulus::new(&from_words(&self.regs.nreg)) {
            Some(f) => {
                self.regs.hreg = to_words(&f.h());
                0
            }
            None => sta::ERR,
        }
    }

    fn arithmetic(&mut self, mode: Mode, f: &Modulus) -> u32 {
        match mode {
            Mode::HCal => return self.hcal(),
            Mode::MontMul => {
                let a = f.from_montgomery(&self.regs.slot(slot::A1));
                let b = f.from_montgomery(&self.regs.slot(slot::A2));
                self.regs.set_slot(slot::A0, (a * b).as_montgomery());
            }
            Mode::ModAdd | Mode::ModSub => {
                let (a, b) = (self.regs.slot(slot::A1), self.regs.slot(slot::A2));
                let r = if mode == Mode::ModAdd {
                    f.add(&a, &b)
                } else {
                    f.sub(&a, &b)
                };
                self.regs.set_slot(slot::A0, &r);
            }
            Mode::ModInv => {
                let a = f.reduce(&self.regs.slot(slot::A1));
                if a == U256::ZERO {
                    return sta::ERR | sta::MI_ZERO;
                }
                match f.invert(&a) {
                    Some(r) => self.regs.set_slot(slot::A0, &r),
                    None => return sta::ERR,
                }
            }
            Mode::MontIn | Mode::MontOut => {
                let mask = self.regs.slot_mask();
                for index in (0..SLOTS).filter(|i| mask & slot::mask(*i) != 0) {
                    let value = self.regs.slot(index);
                    let value = if mode == Mode::MontIn {
                        *f.to_monty(&value).as_montgomery()
                    } else {
                        f.from_montgomery(&value).retrieve()
                    };
                    self.regs.set_slot(index, &value);
                }
            }
            Mode::PointMul => return self.point_mul(f),
            Mode::ZAddU => {
                let load = |index: usize| f.from_montgomery(&self.regs.slot(index));
                let out = zaddu(
                    (&load(slot::A0), &load(slot::A1)),
                    (&load(slot::A2), &load(slot::A3)),
                    &load(slot::A4),
                    &load(slot::A5),
                );
                self.regs.set_slot(slot::A0, out.sum.x.as_montgomery());
                self.regs.set_slot(slot::A1, out.sum.y.as_montgomery());
                self.regs.set_slot(slot::A2, out.updated.0.as_montgomery());
                self.regs.set_slot(slot::A3, out.updated.1.as_montgomery());
                self.regs.set_slot(slot::A4, out.sum.z.as_montgomery());
            }
        }

        0
    }

    fn point_mul(&mut self, f: &Modulus) -> u32 {
        let load = |x: usize, y: usize, z: usize| Jacobian {
            x: f.to_monty(&self.regs.slot(x)),
            y: f.to_monty(&self.regs.slot(y)),
            z: f.to_monty(&self.regs.slot(z)),
        };
        let base = load(slot::A0, slot::A1, slot::A2);
        let acc = load(slot::A3, slot::A4, slot::A5);
        let a = f.to_monty(&self.regs.slot(slot::A6));
        let k = from_words(&self.regs.scalar);

        match Jacobian::mul(&base, &acc, &k, f, &a).to_affine(f) {
            Some((x, y)) => {
                self.regs.set_slot(slot::A0, &x);
                self.regs.yco = to_words(&y);
                0
            }
            None => sta::ECC_OVER,
        }
    }
}

impl Default for SoftAccelerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accelerator for SoftAccelerator {
    fn write_slot(&mut self, index: usize, value: &U256) {
        self.regs.set_slot(index, value);
    }

    fn read_slot(&self, index: usize) -> U256 {
        self.regs.slot(index)
    }

    fn write_modulus(&mut self, modulus: &U256) {
        self.regs.nreg = to_words(modulus);
    }

    fn write_scalar(&mut self, scalar: &U256) {
        self.regs.scalar = to_words(scalar);
    }

    fn write_para(&mut self, n0: u32) {
        self.regs.para = n0;
    }

    fn read_yco(&self) -> U256 {
        from_words(&self.regs.yco)
    }

    fn write_con(&mut self, value: u32) {
        self.regs.con = value;
        if value & con::START != 0 {
            self.regs.sta = 0;
            self.pending = Some(self.latency.unwrap_or(u32::MAX));
        }
    }

    fn read_status(&mut self) -> u32 {
        match (self.pending, self.latency) {
            (Some(0), Some(_)) => {
                let flags = self.execute();
                self.regs.sta |= sta::DONE | flags;
                self.regs.con &= !con::START;
                self.pending = None;
            }
            (Some(remaining), Some(_)) => self.pending = Some(remaining - 1),
            _ => {}
        }
        self.regs.sta
    }

    fn clear_status(&mut self, mask: u32) {
        self.regs.sta &= !mask;
    }
}
