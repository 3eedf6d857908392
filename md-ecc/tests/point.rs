//! Point operation tests.

use hex_literal::hex;
use md_ecc::{
    AffinePoint, CurveParams, Engine, Error, U256,
    bigint::Encoding,
    curves::{NIST_P256, SM2},
};
use num_bigint::BigUint;
use num_traits::Zero;
use proptest::prelude::*;

/// `y^2 = x^3 + 2x + 4` over `GF(1000003)`: 4 * 250307 points, `G` of prime
/// order 250307.
const TOY: CurveParams = CurveParams {
    a: U256::from_be_hex("0000000000000000000000000000000000000000000000000000000000000002"),
    b: U256::from_be_hex("0000000000000000000000000000000000000000000000000000000000000004"),
    p: U256::from_be_hex("00000000000000000000000000000000000000000000000000000000000f4243"),
    n: U256::from_be_hex("000000000000000000000000000000000000000000000000000000000003d1c3"),
    gx: U256::from_be_hex("0000000000000000000000000000000000000000000000000000000000000007"),
    gy: U256::from_be_hex("0000000000000000000000000000000000000000000000000000000000000013"),
};

fn point(x: [u8; 32], y: [u8; 32]) -> AffinePoint {
    AffinePoint::new(U256::from_be_slice(&x), U256::from_be_slice(&y))
}

fn big(x: &U256) -> BigUint {
    BigUint::from_bytes_be(&x.to_be_bytes())
}

fn uint(x: &BigUint) -> U256 {
    let bytes = x.to_bytes_be();
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    U256::from_be_slice(&padded)
}

fn neg(p: &AffinePoint, curve: &CurveParams) -> AffinePoint {
    AffinePoint::new(*p.x(), curve.p.wrapping_sub(p.y()))
}

/// Affine reference arithmetic; `None` is the point at infinity.
type RefPoint = Option<(BigUint, BigUint)>;

fn ref_add(lhs: &RefPoint, rhs: &RefPoint, curve: &CurveParams) -> RefPoint {
    let p = big(&curve.p);
    let inv = |v: &BigUint| v.modpow(&(&p - 2u8), &p);
    let (Some((x1, y1)), Some((x2, y2))) = (lhs, rhs) else {
        return lhs.clone().or_else(|| rhs.clone());
    };

    let lambda = if x1 == x2 {
        if ((y1 + y2) % &p).is_zero() {
            return None;
        }
        (BigUint::from(3u8) * x1 * x1 + big(&curve.a)) * inv(&(y1 * 2u8 % &p)) % &p
    } else {
        (y2 + &p - y1) * inv(&((x2 + &p - x1) % &p)) % &p
    };
    let x3 = (&lambda * &lambda + &p * 2u8 - x1 - x2) % &p;
    let y3 = (&lambda * ((x1 + &p - &x3) % &p) + &p - y1) % &p;
    Some((x3, y3))
}

fn ref_mul(k: &BigUint, base: &AffinePoint, curve: &CurveParams) -> RefPoint {
    let base = Some((big(base.x()), big(base.y())));
    let mut acc: RefPoint = None;
    for i in (0..k.bits()).rev() {
        acc = ref_add(&acc, &acc, curve);
        if k.bit(i) {
            acc = ref_add(&acc, &base, curve);
        }
    }
    acc
}

fn to_point(p: &RefPoint) -> Option<AffinePoint> {
    p.as_ref().map(|(x, y)| AffinePoint::new(uint(x), uint(y)))
}

#[test]
fn mul_by_one_is_identity_map() {
    let mut engine = Engine::soft();
    for curve in [NIST_P256, SM2, TOY] {
        let g = curve.generator();
        assert_eq!(engine.scalar_mul(&g, &U256::ONE, &curve), Ok(g));
    }
}

#[test]
fn mul_by_order_is_infinity() {
    let mut engine = Engine::soft();
    for curve in [NIST_P256, SM2, TOY] {
        let g = curve.generator();
        assert_eq!(engine.scalar_mul(&g, &curve.n, &curve), Err(Error::PointAtInfinity));
    }
}

#[test]
fn double_generator() {
    let g2 = point(
        hex!("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"),
        hex!("07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1"),
    );

    let mut engine = Engine::soft();
    let g = NIST_P256.generator();
    assert_eq!(engine.scalar_mul(&g, &U256::from_u32(2), &NIST_P256), Ok(g2));
    assert_eq!(engine.point_add(&g, &g, &NIST_P256), Ok(g2));
}

#[test]
fn mul_by_order_minus_one_is_negation() {
    let mut engine = Engine::soft();
    for curve in [NIST_P256, SM2] {
        let g = curve.generator();
        let k = curve.n.wrapping_sub(&U256::ONE);
        assert_eq!(engine.scalar_mul(&g, &k, &curve), Ok(neg(&g, &curve)));
    }
}

/// P-256 hash-to-curve outputs (RFC 9380 J.1.1): `P = Q0 + Q1`.
#[test]
fn hash_to_curve_sums() {
    let vectors = [
        (
            // msg = ""
            point(
                hex!("2c15230b26dbc6fc9a37051158c95b79656e17a1a920b11394ca91c44247d3e4"),
                hex!("8a7a74985cc5c776cdfe4b1f19884970453912e9d31528c060be9ab5c43e8415"),
            ),
            point(
                hex!("ab640a12220d3ff283510ff3f4b1953d09fad35795140b1c5d64f313967934d5"),
                hex!("dccb558863804a881d4fff3455716c836cef230e5209594ddd33d85c565b19b1"),
            ),
            point(
                hex!("51cce63c50d972a6e51c61334f0f4875c9ac1cd2d3238412f84e31da7d980ef5"),
                hex!("b45d1a36d00ad90e5ec7840a60a4de411917fbe7c82c3949a6e699e5a1b66aac"),
            ),
        ),
        (
            // msg = "abc"
            point(
                hex!("0bb8b87485551aa43ed54f009230450b492fead5f1cc91658775dac4a3388a0f"),
                hex!("5c41b3d0731a27a7b14bc0bf0ccded2d8751f83493404c84a88e71ffd424212e"),
            ),
            point(
                hex!("5219ad0ddef3cc49b714145e91b2f7de6ce0a7a7dc7406c7726c7e373c58cb48"),
                hex!("7950144e52d30acbec7b624c203b1996c99617d0b61c2442354301b191d93ecf"),
            ),
            point(
                hex!("019b7cb4efcfeaf39f738fe638e31d375ad6837f58a852d032ff60c69ee3875f"),
                hex!("589a62d2b22357fed5449bc38065b760095ebe6aeac84b01156ee4252715446e"),
            ),
        ),
    ];

    let mut engine = Engine::soft();
    for (p, q0, q1) in vectors {
        assert_eq!(engine.point_add(&q0, &q1, &NIST_P256), Ok(p));
        assert_eq!(engine.point_add(&q1, &q0, &NIST_P256), Ok(p));
    }
}

#[test]
fn add_opposite_is_infinity() {
    let mut engine = Engine::soft();
    for curve in [NIST_P256, SM2, TOY] {
        let g = curve.generator();
        assert_eq!(
            engine.point_add(&g, &neg(&g, &curve), &curve),
            Err(Error::PointAtInfinity)
        );
    }
}

#[test]
fn add_compares_coordinates_modulo_p() {
    let mut engine = Engine::soft();
    let g = TOY.generator();
    let g2 = AffinePoint::new(U256::from_u32(0xfb96), U256::from_u32(0xb_ce9c));
    assert_eq!(engine.scalar_mul(&g, &U256::from_u32(2), &TOY), Ok(g2));

    // same residues as G
    let shifted_x = AffinePoint::new(g.x().wrapping_add(&TOY.p), *g.y());
    let shifted_y = AffinePoint::new(*g.x(), g.y().wrapping_add(&TOY.p));
    assert_eq!(engine.point_add(&g, &shifted_x, &TOY), Ok(g2));
    assert_eq!(engine.point_add(&g, &shifted_y, &TOY), Ok(g2));
    assert_eq!(engine.point_add(&shifted_y, &g, &TOY), Ok(g2));

    // same residues as -G
    let minus_g = neg(&g, &TOY);
    let shifted_minus_g = AffinePoint::new(*g.x(), minus_g.y().wrapping_add(&TOY.p));
    assert_eq!(
        engine.point_add(&g, &shifted_minus_g, &TOY),
        Err(Error::PointAtInfinity)
    );
}

#[test]
fn add_rejects_shared_x_with_unrelated_y() {
    let mut engine = Engine::soft();
    let g = TOY.generator();
    let other = AffinePoint::new(*g.x(), U256::from_u32(20));
    assert_eq!(engine.point_add(&g, &other, &TOY), Err(Error::PointInvalid));
    assert_eq!(engine.point_add(&other, &g, &TOY), Err(Error::PointInvalid));
}

#[test]
fn mul_outside_subgroup() {
    // (0, 2) has order 4 * 250307, so n * (0, 2) is a point of order 4
    let mut engine = Engine::soft();
    let p = AffinePoint::new(U256::ZERO, U256::from_u32(2));
    let q = engine.scalar_mul(&p, &TOY.n, &TOY).unwrap();
    assert_eq!(q, AffinePoint::new(U256::from_u32(842_077), U256::from_u32(110_620)));
    assert_eq!(to_point(&ref_mul(&big(&TOY.n), &p, &TOY)), Some(q));
}

#[test]
fn validate_generator_multiples() {
    let mut engine = Engine::soft();
    for curve in [NIST_P256, SM2, TOY] {
        let g = curve.generator();
        engine.validate_public_key(&g, &curve).unwrap();
        let q = engine.scalar_mul(&g, &U256::from_u32(0xdead_beef), &curve).unwrap();
        engine.validate_public_key(&q, &curve).unwrap();
    }
}

#[test]
fn validate_sm2_public_key() {
    let q = AffinePoint::from_sec1_bytes(&hex!(
        "0408D77AE04C01CC4C1104360DD8AF6B6F7DF334283D7C1A6AFD5652407B87BEE5014E2A57C36C150D16324DC664E31E6432359609C4E79847A5B161C8C7364C8A"
    ))
    .unwrap();
    let mut engine = Engine::soft();
    engine.validate_public_key(&q, &SM2).unwrap();
    assert_eq!(engine.validate_public_key(&q, &NIST_P256), Err(Error::PointInvalid));
}

#[test]
fn validate_rejects_zero() {
    let mut engine = Engine::soft();
    assert_eq!(
        engine.validate_public_key(&AffinePoint::default(), &NIST_P256),
        Err(Error::BadParameter)
    );
}

#[test]
fn validate_rejects_off_curve() {
    let mut engine = Engine::soft();
    let g = NIST_P256.generator();
    let off = AffinePoint::new(*g.x(), g.y().wrapping_add(&U256::ONE));
    assert_eq!(engine.validate_public_key(&off, &NIST_P256), Err(Error::PointInvalid));
}

#[test]
fn validate_rejects_unreduced_coordinates() {
    let mut engine = Engine::soft();
    let g = TOY.generator();
    // same residue as G, but x >= p
    let unreduced = AffinePoint::new(g.x().wrapping_add(&TOY.p), *g.y());
    assert_eq!(engine.validate_public_key(&unreduced, &TOY), Err(Error::PointInvalid));

    let x_is_p = AffinePoint::new(NIST_P256.p, *NIST_P256.generator().y());
    assert_eq!(engine.validate_public_key(&x_is_p, &NIST_P256), Err(Error::PointInvalid));
}

#[test]
fn validate_rejects_point_outside_subgroup() {
    let mut engine = Engine::soft();
    let p = AffinePoint::new(U256::ZERO, U256::from_u32(2));
    assert_eq!(engine.validate_public_key(&p, &TOY), Err(Error::Failed));
}

#[test]
fn stalled_accelerator_times_out() {
    let config = md_ecc::Config::default().poll_limit(100);
    let mut engine = Engine::new(md_ecc::SoftAccelerator::stalled(), config);
    let g = NIST_P256.generator();
    assert_eq!(engine.scalar_mul(&g, &U256::ONE, &NIST_P256), Err(Error::Timeout));
    assert_eq!(engine.point_add(&g, &g, &NIST_P256), Err(Error::Timeout));
    assert_eq!(engine.validate_public_key(&g, &NIST_P256), Err(Error::Timeout));
}

#[test]
fn slow_accelerator_completes() {
    let config = md_ecc::Config::default().poll_limit(4);
    let mut engine = Engine::new(md_ecc::SoftAccelerator::with_latency(3), config);
    let g = SM2.generator();
    let g3 = engine.scalar_mul(&g, &U256::from_u32(3), &SM2).unwrap();
    let g2 = engine.scalar_mul(&g, &U256::from_u32(2), &SM2).unwrap();
    assert_eq!(engine.point_add(&g2, &g, &SM2), Ok(g3));
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> U256 {
        U256::from_be_slice(&bytes)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn scalar_mul_matches_reference(k in scalar(), i in 0usize..3) {
        let curve = [NIST_P256, SM2, TOY][i];
        let g = curve.generator();
        let mut engine = Engine::soft();

        let expected = to_point(&ref_mul(&big(&k), &g, &curve));
        match engine.scalar_mul(&g, &k, &curve) {
            Ok(p) => prop_assert_eq!(Some(p), expected),
            Err(e) => {
                prop_assert_eq!(e, Error::PointAtInfinity);
                prop_assert!(expected.is_none());
            }
        }
    }

    #[test]
    fn point_add_matches_reference(a in scalar(), b in scalar(), i in 0usize..2) {
        let curve = [NIST_P256, SM2][i];
        let g = curve.generator();
        let mut engine = Engine::soft();

        let p = engine.scalar_mul(&g, &a, &curve).unwrap();
        let q = engine.scalar_mul(&g, &b, &curve).unwrap();
        let expected = ref_add(
            &Some((big(p.x()), big(p.y()))),
            &Some((big(q.x()), big(q.y()))),
            &curve,
        );
        prop_assert_eq!(engine.point_add(&p, &q, &curve).ok(), to_point(&expected));
    }

    #[test]
    fn scalar_mul_distributes(a in 1u32.., b in 1u32..) {
        let curve = TOY;
        let g = curve.generator();
        let mut engine = Engine::soft();

        let sum = (BigUint::from(a) + b) % big(&curve.n);
        let lhs = engine.scalar_mul(&g, &uint(&sum), &curve);
        let p = engine.scalar_mul(&g, &U256::from_u32(a), &curve);
        let q = engine.scalar_mul(&g, &U256::from_u32(b), &curve);
        let rhs = match (p, q) {
            (Ok(p), Ok(q)) => engine.point_add(&p, &q, &curve),
            (Ok(p), Err(_)) | (Err(_), Ok(p)) => Ok(p),
            (Err(e), Err(_)) => Err(e),
        };
        prop_assert_eq!(lhs, rhs);
    }
}
