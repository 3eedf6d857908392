//! Development helper functions.

use crate::{BYTES, U256};
use bigint::Encoding;
use num_bigint::BigUint;

/// Converts a [`U256`] to a [`BigUint`].
pub fn u256_to_biguint(x: &U256) -> BigUint {
    BigUint::from_bytes_be(&x.to_be_bytes())
}

/// Converts a [`BigUint`] below `2^256` to a [`U256`].
pub fn biguint_to_u256(x: &BigUint) -> U256 {
    let bytes = x.to_bytes_be();
    assert!(bytes.len() <= BYTES, "value exceeds 256 bits");
    let mut padded = [0u8; BYTES];
    padded[BYTES - bytes.len()..].copy_from_slice(&bytes);
    U256::from_be_slice(&padded)
}
