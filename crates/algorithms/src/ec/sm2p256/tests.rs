use super::*;
use crate::bignum::BigInt256;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn generator_is_on_curve() {
    let g = base_point_g();
    assert!(g.is_on_curve());
    assert!(!g.is_identity());
}

#[test]
fn encoding_round_trip() {
    let g = base_point_g();
    let encoded = g.to_encoded();
    assert_eq!(encoded.len(), SM2_POINT_UNCOMPRESSED_SIZE);
    assert_eq!(encoded[0], 0x04);
    let decoded = Point::from_encoded(&encoded).unwrap();
    assert_eq!(g, decoded);

    let hex = g.to_hex_encoded();
    assert_eq!(hex.len(), 130);
    assert_eq!(Point::from_hex_encoded(&hex).unwrap(), g);

    // Infinity encodes to a single zero byte; a zero-length input decodes
    // back to infinity.
    assert_eq!(Point::identity().to_encoded(), &[0x00]);
    assert!(Point::from_encoded(&[]).unwrap().is_identity());
}

#[test]
fn decoding_rejects_malformed_input() {
    let g = base_point_g();
    let mut encoded = g.to_encoded();

    encoded[0] = 0x02;
    assert!(Point::from_encoded(&encoded).is_err());

    encoded[0] = 0x04;
    encoded.pop();
    assert!(Point::from_encoded(&encoded).is_err());

    // The single-byte infinity marker is an output form only.
    assert!(Point::from_encoded(&[0x00]).is_err());
    assert!(Point::from_hex_encoded("zz").is_err());
}

#[test]
fn group_identity_laws() {
    let g = base_point_g();
    let inf = Point::identity();

    assert_eq!(g.add(&inf), g);
    assert_eq!(inf.add(&g), g);
    assert!(g.add(&g.negate()).is_identity());
    assert!(g.subtract(&g).is_identity());
    assert!(inf.double().is_identity());
}

#[test]
fn doubling_matches_self_addition() {
    let g = base_point_g();
    assert_eq!(g.double(), g.add(&g));

    let three = BigInt256::from_limbs([3, 0, 0, 0]);
    let triple_g = g.mul(&three);
    assert_eq!(triple_g, g.double().add(&g));
    assert!(triple_g.is_on_curve());
}

#[test]
fn scalar_multiplication_distributes() {
    let g = base_point_g();
    let mut rng = ChaCha20Rng::seed_from_u64(0xEC);
    for _ in 0..4 {
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        let sum = a.as_bigint().mod_add(b.as_bigint(), &SM2_N);

        let lhs = g.mul(&sum);
        let rhs = g.mul(a.as_bigint()).add(&g.mul(b.as_bigint()));
        assert_eq!(lhs, rhs);
    }
}

#[test]
fn small_scalar_multiples() {
    let g = base_point_g();
    assert!(g.mul(&BigInt256::ZERO).is_identity());
    assert_eq!(g.mul(&BigInt256::ONE), g);

    let five = BigInt256::from_limbs([5, 0, 0, 0]);
    let mut acc = Point::identity();
    for _ in 0..5 {
        acc = acc.add(&g);
    }
    assert_eq!(g.mul(&five), acc);
}

#[test]
fn multiples_of_generator_stay_on_curve() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    for _ in 0..8 {
        let (sk, pk) = generate_keypair(&mut rng);
        assert!(pk.is_on_curve());
        assert!(!pk.is_identity());
        assert_eq!(public_from_private(&sk), pk);
    }
}

#[test]
fn order_times_generator_is_identity() {
    let g = base_point_g();
    assert!(g.mul(&SM2_N).is_identity());
}

#[test]
fn scalar_validation() {
    assert!(Scalar::new(BigInt256::ZERO).is_err());
    assert!(Scalar::new(SM2_N).is_err());
    assert!(Scalar::new(SM2_N.add(&BigInt256::ONE).0).is_err());
    let n_minus_1 = SM2_N.sub(&BigInt256::ONE).0;
    assert!(Scalar::new(n_minus_1).is_ok());

    let s = Scalar::from_hex("6FCBA2EF9AE0AB902BC3BDE3FF915D44BA4CC78F88E2F8E7F8996D3B8CCEEDEE")
        .unwrap();
    assert_eq!(
        s.to_hex(),
        "6FCBA2EF9AE0AB902BC3BDE3FF915D44BA4CC78F88E2F8E7F8996D3B8CCEEDEE"
    );
    assert_eq!(Scalar::from_bytes(&s.to_bytes()).unwrap(), s);
}

#[test]
fn keypair_generation_with_os_rng() {
    let (_, pk) = generate_keypair(&mut OsRng);
    assert!(pk.is_on_curve());
}
