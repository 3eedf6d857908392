//! Modular arithmetic engine driver.
//!
//! Every primitive is one transaction: load operands, write `CON` with the
//! mode and the start bit, poll `STA` until DONE, check ERR, read `A0`.
//! The modulus is whatever the last [`Engine::hcal`] loaded into `NREG`.

use crate::{
    Config,
    accel::{Accelerator, SoftAccelerator},
    error::{Error, Result},
    monty::n0_calculate,
    regs::{Mode, slot, sta},
    uint::{U256, low_word},
};

/// Driver for the ECC accelerator.
///
/// Owns the accelerator; every operation takes `&mut self`, so transactions
/// never interleave.
#[derive(Debug)]
pub struct Engine<A: Accelerator = SoftAccelerator> {
    accel: A,
    config: Config,
}

impl Engine<SoftAccelerator> {
    /// Engine backed by the software model with the default configuration.
    pub fn soft() -> Self {
        Self::new(SoftAccelerator::new(), Config::default())
    }
}

impl Default for Engine<SoftAccelerator> {
    fn default() -> Self {
        Self::soft()
    }
}

impl<A: Accelerator> Engine<A> {
    /// Create a driver around `accel`.
    pub fn new(accel: A, config: Config) -> Self {
        Self { accel, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the underlying accelerator.
    pub fn accelerator(&self) -> &A {
        &self.accel
    }

    /// Release the accelerator.
    pub fn free(self) -> A {
        self.accel
    }

    pub(crate) fn accel_mut(&mut self) -> &mut A {
        &mut self.accel
    }

    pub(crate) fn start(&mut self, mode: Mode, slots: u8) {
        log::trace!("ecc: start {mode:?} slots={slots:#04x}");
        self.accel.write_con(mode.con(slots));
    }

    /// Poll `STA` until DONE and return the raw status. Status bits are left
    /// for the caller to interpret and clear.
    pub(crate) fn poll_completion(&mut self) -> Result<u32> {
        let mut polls: u32 = 0;
        loop {
            let status = self.accel.read_status();
            if status & sta::DONE != 0 {
                log::trace!("ecc: done sta={status:#x} after {polls} polls");
                return Ok(status);
            }

            if let Some(limit) = self.config.poll_limit {
                if polls >= limit {
                    log::warn!("ecc: no completion after {polls} polls, sta={status:#x}");
                    return Err(Error::Timeout);
                }
            }
            polls = polls.saturating_add(1);
            core::hint::spin_loop();
        }
    }

    /// Wait for the running transaction to complete.
    ///
    /// On ERR all status bits are cleared and [`Error::HardwareStatus`] is
    /// returned; otherwise DONE is cleared.
    pub fn wait_done(&mut self) -> Result<()> {
        let status = self.poll_completion()?;
        if status & sta::ERR != 0 {
            log::warn!("ecc: error status {status:#x}");
            self.accel.clear_status(sta::ALL);
            return Err(Error::HardwareStatus);
        }

        self.accel.clear_status(sta::DONE);
        Ok(())
    }

    fn run(&mut self, mode: Mode, slots: u8) -> Result<()> {
        self.start(mode, slots);
        self.wait_done()
    }

    /// Load `modulus` and its Montgomery constant `n0`, then latch
    /// `H = R^2 mod modulus`.
    ///
    /// Must precede any Montgomery operation on that modulus.
    pub fn hcal(&mut self, modulus: &U256) -> Result<()> {
        self.accel.write_modulus(modulus);
        self.accel.write_para(n0_calculate(low_word(modulus)));
        self.run(Mode::HCal, 0)
    }

    /// `a * b mod m`.
    ///
    /// Two transactions: `a` is moved into the Montgomery domain, then
    /// multiplied by `b`, which cancels the `R` factor. Both operands may be
    /// any 256-bit value: `a R mod m` is reduced, so `a R b < m R` and the
    /// product comes out fully reduced.
    pub fn mul(&mut self, a: &U256, b: &U256) -> Result<U256> {
        self.accel.write_slot(slot::A1, a);
        self.run(Mode::MontIn, slot::mask(slot::A1))?;

        self.accel.write_slot(slot::A2, b);
        self.run(Mode::MontMul, 0)?;

        Ok(self.accel.read_slot(slot::A0))
    }

    /// `a + b mod m`.
    pub fn add_mod(&mut self, a: &U256, b: &U256) -> Result<U256> {
        self.binary(Mode::ModAdd, a, b)
    }

    /// `a - b mod m`.
    pub fn sub_mod(&mut self, a: &U256, b: &U256) -> Result<U256> {
        self.binary(Mode::ModSub, a, b)
    }

    fn binary(&mut self, mode: Mode, a: &U256, b: &U256) -> Result<U256> {
        self.accel.write_slot(slot::A1, a);
        self.accel.write_slot(slot::A2, b);
        self.run(mode, 0)?;
        Ok(self.accel.read_slot(slot::A0))
    }

    /// `a^-1 mod m`. Inverting zero is a hardware error.
    pub fn inv(&mut self, a: &U256) -> Result<U256> {
        self.accel.write_slot(slot::A1, a);
        self.run(Mode::ModInv, 0)?;
        Ok(self.accel.read_slot(slot::A0))
    }

    /// `x mod m`.
    pub fn reduce(&mut self, x: &U256) -> Result<U256> {
        self.mul(x, &U256::ONE)
    }
}
