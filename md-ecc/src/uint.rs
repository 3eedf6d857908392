//! 256-bit operands and their register layout.
//!
//! Values are `crypto-bigint`'s [`U256`]. The register banks (`AREG`, `NREG`,
//! `SCALAR`, `YCO`, `HREG`) hold an operand as eight 32-bit words, least
//! significant word first, independent of the host's limb size; [`to_words`]
//! and [`from_words`] convert at that boundary.

pub use bigint::U256;

use bigint::Encoding;

/// Number of 32-bit words in an operand.
pub const WORDS: usize = 8;

/// Number of bytes in an operand.
pub const BYTES: usize = WORDS * 4;

/// Split an operand into register words, least significant first.
pub fn to_words(x: &U256) -> [u32; WORDS] {
    let bytes = x.to_le_bytes();
    let mut words = [0u32; WORDS];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Assemble an operand from register words, least significant first.
pub fn from_words(words: &[u32; WORDS]) -> U256 {
    let mut bytes = [0u8; BYTES];
    for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    U256::from_le_slice(&bytes)
}

/// Least significant register word.
pub(crate) fn low_word(x: &U256) -> u32 {
    to_words(x)[0]
}

/// Keep the lowest `bits` bits and clear the rest.
pub(crate) fn truncate(x: &U256, bits: u32) -> U256 {
    match bits {
        0 => U256::ZERO,
        b if b >= U256::BITS => *x,
        b => *x & (U256::MAX >> (U256::BITS - b)),
    }
}
