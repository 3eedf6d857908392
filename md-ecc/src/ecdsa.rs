//! Elliptic Curve Digital Signature Algorithm (ECDSA)
//!
//! Signing computes `R = k G` for a fresh nonce `k` and derives
//! `r = R.x mod n`, `s = k^-1 (z + r d) mod n`. Verification recomputes
//! `u1 G + u2 Q` with `w = s^-1`, `u1 = z w`, `u2 = r w` and compares its x
//! coordinate with `r`.
//!
//! The digest `z` is given as 32 big-endian bytes and truncated to the bit
//! length of the group order. Hashing is the caller's concern, except for
//! the `*_msg` helpers behind the `sha256` feature.
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "sha256")]
//! # {
//! use md_ecc::{Engine, curves::NIST_P256};
//! # use rand_core::{CryptoRng, RngCore};
//! # struct Counter(u8);
//! # impl RngCore for Counter {
//! #     fn next_u32(&mut self) -> u32 { self.next_u64() as u32 }
//! #     fn next_u64(&mut self) -> u64 { self.0 = self.0.wrapping_add(1); self.0.into() }
//! #     fn fill_bytes(&mut self, dst: &mut [u8]) {
//! #         for b in dst { self.0 = self.0.wrapping_mul(5).wrapping_add(1); *b = self.0; }
//! #     }
//! # }
//! # impl CryptoRng for Counter {}
//! # let mut rng = Counter(7);
//!
//! let mut engine = Engine::soft();
//! let (d, q) = engine.keygen(&mut rng, &NIST_P256)?;
//!
//! let msg = b"ECDSA proves knowledge of a secret number in the context of a single message";
//! let sig = engine.sign_msg(msg, &d, &mut rng, &NIST_P256)?;
//! assert!(engine.verify_msg(msg, &sig, &q, &NIST_P256).is_ok());
//! # }
//! # Ok::<(), md_ecc::Error>(())
//! ```

use bigint::Encoding;
use rand_core::CryptoRng;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::{
    accel::Accelerator,
    curve::CurveParams,
    engine::Engine,
    error::{Error, Result},
    key::{PrivateKey, random_scalar},
    point::{AffinePoint, PublicKey},
    uint::{BYTES, U256},
};

/// Length of an encoded signature: `r || s`.
pub const SIGNATURE_LEN: usize = 2 * BYTES;

/// ECDSA signature `(r, s)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    r: U256,
    s: U256,
}

impl Signature {
    /// Signature from its components. Ranges are checked on verification.
    pub const fn from_scalars(r: U256, s: U256) -> Self {
        Self { r, s }
    }

    /// Decode `r || s`, each 32 bytes big-endian.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LEN]) -> Self {
        let (r, s) = bytes.split_at(BYTES);
        Self {
            r: U256::from_be_slice(r),
            s: U256::from_be_slice(s),
        }
    }

    /// Decode `r || s` from a slice, which must be exactly 64 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes = <&[u8; SIGNATURE_LEN]>::try_from(slice).map_err(|_| Error::BadParameter)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Encode as `r || s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..BYTES].copy_from_slice(&self.r.to_be_bytes());
        out[BYTES..].copy_from_slice(&self.s.to_be_bytes());
        out
    }

    /// `r` component.
    pub const fn r(&self) -> &U256 {
        &self.r
    }

    /// `s` component.
    pub const fn s(&self) -> &U256 {
        &self.s
    }
}

impl ConstantTimeEq for Signature {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.r.ct_eq(&other.r) & self.s.ct_eq(&other.s)
    }
}

/// Convert a digest to an integer, keeping its leftmost `order_bits` bits.
///
/// `order_bits` is the bit length of the group order,
/// [`CurveParams::order_bits`].
pub fn bits2int(digest: &[u8; BYTES], order_bits: u32) -> U256 {
    match order_bits {
        0 => U256::ZERO,
        b if b >= U256::BITS => U256::from_be_slice(digest),
        b => U256::from_be_slice(digest) >> (U256::BITS - b),
    }
}

/// Is `v` in `[1, n-1]`? Compared as big-endian byte strings.
fn in_scalar_range(v: &U256, n: &U256) -> bool {
    let max = n.wrapping_sub(&U256::ONE).to_be_bytes();
    *v != U256::ZERO && v.to_be_bytes() <= max
}

impl<A: Accelerator> Engine<A> {
    /// Derive `(r, s)` from the x coordinate of `k G`, the nonce, the digest
    /// integer and the private key.
    ///
    /// Fails with [`Error::Failed`] when `r` or `s` is zero. No retry is
    /// attempted.
    pub fn r_s(
        &mut self,
        x: &U256,
        k: &U256,
        z: &U256,
        d: &PrivateKey,
        curve: &CurveParams,
    ) -> Result<Signature> {
        self.hcal(&curve.n)?;

        let r = self.reduce(x)?;
        if r == U256::ZERO {
            log::warn!("ecdsa: r is zero");
            return Err(Error::Failed);
        }

        let k_inv = Zeroizing::new(self.inv(k)?);
        let rd = Zeroizing::new(self.mul(d.as_uint(), &r)?);
        let z = self.reduce(z)?;
        let sum = Zeroizing::new(self.add_mod(&z, &rd)?);
        let s = self.mul(&sum, &k_inv)?;
        if s == U256::ZERO {
            log::warn!("ecdsa: s is zero");
            return Err(Error::Failed);
        }

        Ok(Signature { r, s })
    }

    /// Sign a digest with a nonce drawn from `rng`.
    ///
    /// One attempt is made: a zero `r` or `s` is returned as
    /// [`Error::Failed`].
    pub fn sign<R: CryptoRng + ?Sized>(
        &mut self,
        digest: &[u8; BYTES],
        d: &PrivateKey,
        rng: &mut R,
        curve: &CurveParams,
    ) -> Result<Signature> {
        log::debug!("ecdsa: signing");
        let k = Zeroizing::new(random_scalar(rng, &curve.n, self.config().rng_attempts)?);
        self.sign_with_nonce(digest, d, &k, curve)
    }

    /// Sign a digest with a caller-provided nonce.
    ///
    /// # ⚠️ Warning
    ///
    /// Reusing a nonce, or using a predictable one, reveals the private key.
    /// This exists for known-answer tests and deterministic nonce schemes.
    pub fn sign_with_nonce(
        &mut self,
        digest: &[u8; BYTES],
        d: &PrivateKey,
        k: &U256,
        curve: &CurveParams,
    ) -> Result<Signature> {
        if !in_scalar_range(k, &curve.n) {
            return Err(Error::BadParameter);
        }

        let big_r = self.scalar_mul(&curve.generator(), k, curve)?;
        let z = bits2int(digest, curve.order_bits());
        self.r_s(big_r.x(), k, &z, d, curve)
    }

    /// Check a signature over the digest integer `z` against public key `q`.
    ///
    /// - `r` or `s` outside `[1, n-1]`: [`Error::BadParameter`]
    /// - `u1 G + u2 Q` is the point at infinity or its x coordinate does not
    ///   reduce to `r`: [`Error::SignatureMismatch`]
    pub fn r_s_check(
        &mut self,
        z: &U256,
        sig: &Signature,
        q: &PublicKey,
        curve: &CurveParams,
    ) -> Result<()> {
        if !in_scalar_range(&sig.r, &curve.n) || !in_scalar_range(&sig.s, &curve.n) {
            return Err(Error::BadParameter);
        }

        self.hcal(&curve.n)?;
        let w = self.inv(&sig.s)?;
        let u1 = self.mul(z, &w)?;
        let u2 = self.mul(&sig.r, &w)?;

        let total = match (
            self.scalar_mul(&curve.generator(), &u1, curve),
            self.scalar_mul(q, &u2, curve),
        ) {
            (Ok(a), Ok(b)) => self.point_add(&a, &b, curve),
            (Ok(p), Err(Error::PointAtInfinity)) | (Err(Error::PointAtInfinity), Ok(p)) => Ok(p),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        let total: AffinePoint = match total {
            Err(Error::PointAtInfinity) => return Err(Error::SignatureMismatch),
            other => other?,
        };

        self.hcal(&curve.n)?;
        let v = self.reduce(total.x())?;
        if bool::from(v.ct_eq(&sig.r)) {
            Ok(())
        } else {
            Err(Error::SignatureMismatch)
        }
    }

    /// Verify a signature over a digest.
    pub fn verify(
        &mut self,
        digest: &[u8; BYTES],
        sig: &Signature,
        q: &PublicKey,
        curve: &CurveParams,
    ) -> Result<()> {
        log::debug!("ecdsa: verifying");
        self.r_s_check(&bits2int(digest, curve.order_bits()), sig, q, curve)
    }

    /// Hash `msg` with SHA-256 and sign the digest.
    #[cfg(feature = "sha256")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha256")))]
    pub fn sign_msg<R: CryptoRng + ?Sized>(
        &mut self,
        msg: &[u8],
        d: &PrivateKey,
        rng: &mut R,
        curve: &CurveParams,
    ) -> Result<Signature> {
        self.sign(&sha256(msg), d, rng, curve)
    }

    /// Hash `msg` with SHA-256 and verify the signature over the digest.
    #[cfg(feature = "sha256")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha256")))]
    pub fn verify_msg(
        &mut self,
        msg: &[u8],
        sig: &Signature,
        q: &PublicKey,
        curve: &CurveParams,
    ) -> Result<()> {
        self.verify(&sha256(msg), sig, q, curve)
    }
}

#[cfg(feature = "sha256")]
fn sha256(msg: &[u8]) -> [u8; BYTES] {
    use sha2::{Digest, Sha256};

    let mut out = [0u8; BYTES];
    out.copy_from_slice(&Sha256::digest(msg));
    out
}
