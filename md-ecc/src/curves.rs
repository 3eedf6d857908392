//! Reference curve parameter sets.

use crate::{curve::CurveParams, uint::U256};

/// NIST P-256 (secp256r1), FIPS 186-4 D.1.2.3.
pub const NIST_P256: CurveParams = CurveParams {
    a: U256::from_be_hex("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
    b: U256::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
    p: U256::from_be_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
    n: U256::from_be_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
    gx: U256::from_be_hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    gy: U256::from_be_hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
};

/// SM2 recommended curve, GB/T 32918.5-2017.
pub const SM2: CurveParams = CurveParams {
    a: U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffc"),
    b: U256::from_be_hex("28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93"),
    p: U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff"),
    n: U256::from_be_hex("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123"),
    gx: U256::from_be_hex("32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7"),
    gy: U256::from_be_hex("bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0"),
};
