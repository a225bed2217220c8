use super::*;
use crate::keypair::KeyPair;
use rand::rngs::OsRng;

const USER_ID: &[u8] = b"ALICE123@YAHOO.COM";
const MESSAGE: &[u8] = b"encryption standard";

#[test]
fn sign_verify_round_trip() {
    let pair = KeyPair::generate(&mut OsRng);
    let signature = sign(&mut OsRng, USER_ID, MESSAGE, pair.private_key()).unwrap();
    assert!(verify(USER_ID, &signature, MESSAGE, pair.public_key()));
}

#[test]
fn wire_format_is_r_h_s() {
    let pair = KeyPair::generate(&mut OsRng);
    let encoded = sign_to_string(&mut OsRng, USER_ID, MESSAGE, pair.private_key()).unwrap();

    assert_eq!(encoded.len(), 129);
    let (r_hex, s_hex) = encoded.split_once('h').unwrap();
    assert_eq!(r_hex.len(), 64);
    assert_eq!(s_hex.len(), 64);
    assert!(r_hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert!(s_hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    assert!(verify_str(USER_ID, &encoded, MESSAGE, pair.public_key()));

    let parsed: Signature = encoded.parse().unwrap();
    use alloc::string::ToString;
    assert_eq!(parsed.to_string(), encoded);
}

#[test]
fn verification_rejects_any_mutation() {
    let pair = KeyPair::generate(&mut OsRng);
    let signature = sign(&mut OsRng, USER_ID, MESSAGE, pair.private_key()).unwrap();

    // Wrong message
    assert!(!verify(USER_ID, &signature, b"wrong message", pair.public_key()));
    // Wrong identifier
    assert!(!verify(b"BILL456@YAHOO.COM", &signature, MESSAGE, pair.public_key()));
    // Wrong public key
    let other = KeyPair::generate(&mut OsRng);
    assert!(!verify(USER_ID, &signature, MESSAGE, other.public_key()));
}

#[test]
fn verification_rejects_altered_components() {
    let pair = KeyPair::generate(&mut OsRng);
    let encoded = sign_to_string(&mut OsRng, USER_ID, MESSAGE, pair.private_key()).unwrap();
    let (r_hex, s_hex) = encoded.split_once('h').unwrap();

    let flip = |hex: &str| {
        let mut out = alloc::string::String::from(hex);
        let replacement = if &hex[..1] == "0" { "1" } else { "0" };
        out.replace_range(0..1, replacement);
        out
    };

    let bad_r = alloc::format!("{}h{}", flip(r_hex), s_hex);
    assert!(!verify_str(USER_ID, &bad_r, MESSAGE, pair.public_key()));

    let bad_s = alloc::format!("{}h{}", r_hex, flip(s_hex));
    assert!(!verify_str(USER_ID, &bad_s, MESSAGE, pair.public_key()));
}

#[test]
fn out_of_range_components_are_rejected() {
    let pair = KeyPair::generate(&mut OsRng);
    let n_hex = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123";
    let zero_hex = "0000000000000000000000000000000000000000000000000000000000000000";
    let one_hex = "0000000000000000000000000000000000000000000000000000000000000001";

    let zero_r = alloc::format!("{}h{}", zero_hex, one_hex);
    assert!(!verify_str(USER_ID, &zero_r, MESSAGE, pair.public_key()));

    let oversized_s = alloc::format!("{}h{}", one_hex, n_hex);
    assert!(!verify_str(USER_ID, &oversized_s, MESSAGE, pair.public_key()));
}

#[test]
fn malformed_wire_forms_fail_to_parse() {
    assert!("".parse::<Signature>().is_err());
    assert!("deadbeef".parse::<Signature>().is_err());
    assert!("xyhzz".parse::<Signature>().is_err());

    let pair = KeyPair::generate(&mut OsRng);
    assert!(!verify_str(USER_ID, "not a signature", MESSAGE, pair.public_key()));
}

#[test]
fn signatures_are_randomized_but_all_verify() {
    let pair = KeyPair::generate(&mut OsRng);
    let a = sign(&mut OsRng, USER_ID, MESSAGE, pair.private_key()).unwrap();
    let b = sign(&mut OsRng, USER_ID, MESSAGE, pair.private_key()).unwrap();
    assert_ne!(a, b);
    assert!(verify(USER_ID, &a, MESSAGE, pair.public_key()));
    assert!(verify(USER_ID, &b, MESSAGE, pair.public_key()));
}
