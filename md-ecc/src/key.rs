//! Private keys and key generation.

use bigint::Encoding;
use core::fmt;
use rand_core::CryptoRng;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    accel::Accelerator,
    curve::CurveParams,
    engine::Engine,
    error::{Error, Result},
    point::PublicKey,
    uint::{BYTES, U256, WORDS, from_words, truncate},
};

/// ECDSA private key: a scalar in `[1, n-1]`.
///
/// # ⚠️ Warning
///
/// This value is key material. It is zeroized on drop and never printed.
#[derive(Clone)]
pub struct PrivateKey {
    d: U256,
}

impl PrivateKey {
    /// Key from a big-endian scalar.
    ///
    /// Returns [`Error::BadParameter`] unless `1 <= d <= n-1`.
    pub fn from_bytes(bytes: &[u8; BYTES], curve: &CurveParams) -> Result<Self> {
        Self::from_uint(U256::from_be_slice(bytes), curve)
    }

    /// Key from little-endian words, the layout the engine uses.
    pub fn from_words(words: [u32; WORDS], curve: &CurveParams) -> Result<Self> {
        Self::from_uint(from_words(&words), curve)
    }

    fn from_uint(d: U256, curve: &CurveParams) -> Result<Self> {
        if d == U256::ZERO || d >= curve.n {
            return Err(Error::BadParameter);
        }
        Ok(Self { d })
    }

    /// Serialize as a big-endian scalar.
    pub fn to_bytes(&self) -> Zeroizing<[u8; BYTES]> {
        Zeroizing::new(self.d.to_be_bytes())
    }

    /// Borrow the secret scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    pub fn as_uint(&self) -> &U256 {
        &self.d
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.d.ct_eq(&other.d)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
    }
}

/// Draw a scalar uniformly from `[1, n-1]` by rejection sampling.
///
/// Candidates are masked to the bit length of `n`, so each attempt succeeds
/// with probability above one half.
pub(crate) fn random_scalar<R: CryptoRng + ?Sized>(
    rng: &mut R,
    n: &U256,
    attempts: u32,
) -> Result<U256> {
    let bits = n.bits();
    let mut bytes = Zeroizing::new([0u8; BYTES]);

    for _ in 0..attempts {
        rng.fill_bytes(&mut bytes[..]);
        let mut k = truncate(&U256::from_be_slice(&bytes[..]), bits);
        if k != U256::ZERO && k < *n {
            return Ok(k);
        }
        k.zeroize();
    }

    log::warn!("ecc: no scalar in range after {attempts} attempts");
    Err(Error::Failed)
}

impl<A: Accelerator> Engine<A> {
    /// Generate a key pair.
    ///
    /// The private key is drawn from `rng`; at most
    /// [`Config::rng_attempts`](crate::Config::rng_attempts) candidates are
    /// tried before giving up with [`Error::Failed`].
    pub fn keygen<R: CryptoRng + ?Sized>(
        &mut self,
        rng: &mut R,
        curve: &CurveParams,
    ) -> Result<(PrivateKey, PublicKey)> {
        log::debug!("ecc: generating key pair");
        let d = PrivateKey {
            d: random_scalar(rng, &curve.n, self.config().rng_attempts)?,
        };
        let q = self.public_key(&d, curve)?;
        Ok((d, q))
    }

    /// Public key `d * G`.
    pub fn public_key(&mut self, d: &PrivateKey, curve: &CurveParams) -> Result<PublicKey> {
        self.scalar_mul(&curve.generator(), &d.d, curve)
    }
}
