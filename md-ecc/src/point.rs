//! Elliptic curve point operations.

use bigint::Encoding;

use crate::{
    accel::Accelerator,
    curve::CurveParams,
    engine::Engine,
    error::{Error, Result},
    regs::{Mode, slot, sta},
    uint::{BYTES, U256},
};

/// Tag byte of an uncompressed SEC1 point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Length of an uncompressed SEC1 point.
pub const UNCOMPRESSED_LEN: usize = 1 + 2 * BYTES;

/// Point in affine coordinates.
///
/// The point at infinity has no affine representation: operations that would
/// produce it return [`Error::PointAtInfinity`] instead. The all-zero point
/// is representable but rejected wherever a point is validated or added.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct AffinePoint {
    x: U256,
    y: U256,
}

/// Public key: an affine point.
pub type PublicKey = AffinePoint;

impl AffinePoint {
    /// Point from its coordinates. Nothing is checked.
    pub const fn new(x: U256, y: U256) -> Self {
        Self { x, y }
    }

    /// x coordinate.
    pub const fn x(&self) -> &U256 {
        &self.x
    }

    /// y coordinate.
    pub const fn y(&self) -> &U256 {
        &self.y
    }

    /// Are both coordinates zero?
    pub fn is_zero(&self) -> bool {
        self.x == U256::ZERO && self.y == U256::ZERO
    }

    /// Decode an uncompressed SEC1 point (`0x04 || x || y`).
    ///
    /// Only the framing is checked; use [`Engine::validate_public_key`] to
    /// check the point itself.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != UNCOMPRESSED_LEN || bytes[0] != SEC1_UNCOMPRESSED {
            return Err(Error::BadParameter);
        }

        let (x, y) = bytes[1..].split_at(BYTES);
        Ok(Self {
            x: U256::from_be_slice(x),
            y: U256::from_be_slice(y),
        })
    }

    /// Encode as an uncompressed SEC1 point.
    pub fn to_sec1_bytes(&self) -> [u8; UNCOMPRESSED_LEN] {
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out[0] = SEC1_UNCOMPRESSED;
        out[1..1 + BYTES].copy_from_slice(&self.x.to_be_bytes());
        out[1 + BYTES..].copy_from_slice(&self.y.to_be_bytes());
        out
    }
}

impl<A: Accelerator> Engine<A> {
    /// Compute `k * point`.
    ///
    /// Neither the scalar range nor the point is checked. Returns
    /// [`Error::PointAtInfinity`] when the result is the identity (including
    /// `k = 0` and `k = n`) and [`Error::Failed`] when the engine reports an
    /// error.
    pub fn scalar_mul(
        &mut self,
        point: &AffinePoint,
        k: &U256,
        curve: &CurveParams,
    ) -> Result<AffinePoint> {
        log::debug!("ecc: scalar multiplication");
        self.hcal(&curve.p)?;

        let accel = self.accel_mut();
        for base in [slot::A0, slot::A3] {
            accel.write_slot(base, &point.x);
            accel.write_slot(base + 1, &point.y);
            accel.write_slot(base + 2, &U256::ONE);
        }
        accel.write_slot(slot::A6, &curve.a);
        accel.write_scalar(k);

        self.start(Mode::PointMul, 0);
        let status = self.poll_completion();

        let accel = self.accel_mut();
        accel.write_scalar(&U256::ZERO);
        let status = status?;
        accel.clear_status(sta::ALL);

        if status & sta::ERR != 0 {
            log::warn!("ecc: point multiplication failed, sta={status:#x}");
            return Err(Error::Failed);
        }
        if status & sta::ECC_OVER != 0 {
            return Err(Error::PointAtInfinity);
        }

        Ok(AffinePoint::new(accel.read_slot(slot::A0), accel.read_yco()))
    }

    /// Compute `p1 + p2`.
    ///
    /// Distinct x coordinates go through one co-Z addition followed by a
    /// conversion to affine coordinates. Coordinates are compared modulo
    /// `p` when x coordinates coincide:
    ///
    /// - equal points are doubled
    /// - opposite points give [`Error::PointAtInfinity`]
    /// - any other pair cannot lie on one curve: [`Error::PointInvalid`]
    ///
    /// An all-zero operand is rejected with [`Error::BadParameter`].
    pub fn point_add(
        &mut self,
        p1: &AffinePoint,
        p2: &AffinePoint,
        curve: &CurveParams,
    ) -> Result<AffinePoint> {
        log::debug!("ecc: point addition");
        if p1.is_zero() || p2.is_zero() {
            return Err(Error::BadParameter);
        }

        self.hcal(&curve.p)?;
        let d = self.sub_mod(&p1.x, &p2.x)?;
        if d == U256::ZERO {
            let sum = self.add_mod(&p1.y, &p2.y)?;
            let diff = self.sub_mod(&p1.y, &p2.y)?;
            return if sum == U256::ZERO {
                Err(Error::PointAtInfinity)
            } else if diff == U256::ZERO {
                self.scalar_mul(p1, &U256::from_u32(2), curve)
            } else {
                log::warn!("ecc: operands share x but not y up to sign");
                Err(Error::PointInvalid)
            };
        }

        // X1, Y1, X2, Y2, Z, X1 - X2
        let operands = [p1.x, p1.y, p2.x, p2.y, U256::ONE, d];
        let mut mask = 0;
        for (index, value) in operands.iter().enumerate() {
            self.accel_mut().write_slot(index, value);
            mask |= slot::mask(index);
        }
        self.start(Mode::MontIn, mask);
        self.wait_done()?;
        self.start(Mode::ZAddU, 0);
        self.wait_done()?;
        self.start(
            Mode::MontOut,
            slot::mask(slot::A0) | slot::mask(slot::A1) | slot::mask(slot::A4),
        );
        self.wait_done()?;

        let accel = self.accel_mut();
        let (x3, y3, z3) = (
            accel.read_slot(slot::A0),
            accel.read_slot(slot::A1),
            accel.read_slot(slot::A4),
        );
        if z3 == U256::ZERO {
            return Err(Error::PointAtInfinity);
        }

        let z_inv = self.inv(&z3)?;
        let z_inv2 = self.mul(&z_inv, &z_inv)?;
        let z_inv3 = self.mul(&z_inv2, &z_inv)?;
        let x = self.mul(&x3, &z_inv2)?;
        let y = self.mul(&y3, &z_inv3)?;
        Ok(AffinePoint::new(x, y))
    }

    /// Check that `point` is a valid public key on `curve`.
    ///
    /// - all-zero: [`Error::BadParameter`]
    /// - a coordinate outside `[0, p)` or off the curve: [`Error::PointInvalid`]
    /// - not in the subgroup generated by `G` (`n * point` is finite):
    ///   [`Error::Failed`]
    pub fn validate_public_key(&mut self, point: &AffinePoint, curve: &CurveParams) -> Result<()> {
        log::debug!("ecc: validating public key");
        if point.is_zero() {
            return Err(Error::BadParameter);
        }
        if point.x >= curve.p || point.y >= curve.p {
            return Err(Error::PointInvalid);
        }

        // y^2 == x (x^2 + a) + b
        self.hcal(&curve.p)?;
        let lhs = self.mul(&point.y, &point.y)?;
        let x2 = self.mul(&point.x, &point.x)?;
        let t = self.add_mod(&x2, &curve.a)?;
        let t = self.mul(&t, &point.x)?;
        let rhs = self.add_mod(&t, &curve.b)?;
        if lhs != rhs {
            return Err(Error::PointInvalid);
        }

        match self.scalar_mul(point, &curve.n, curve) {
            Err(Error::PointAtInfinity) => Ok(()),
            Ok(_) => {
                log::warn!("ecc: public key outside the prime order subgroup");
                Err(Error::Failed)
            }
            Err(e) => Err(e),
        }
    }
}
