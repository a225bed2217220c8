//! SM2 public-key encryption
//!
//! Ciphertexts use the C1‖C3‖C2 layout as one lowercase hex string: the
//! ephemeral point (130 hex chars), the SM3 integrity digest (64 hex chars),
//! and the masked message. The KDF mask is regenerated from the shared point
//! on decryption and the digest is recomputed and compared before any
//! plaintext is released.

use alloc::string::String;
use alloc::vec::Vec;

use algorithms::ec::sm2p256::{self, Point, Scalar};
use algorithms::hash::{HashFunction, Sm3};
use algorithms::kdf::Sm3Kdf;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Hex length of the encoded C1 point.
const C1_HEX_LEN: usize = 130;

/// Hex length of the C3 digest.
const C3_HEX_LEN: usize = 64;

/// Encrypt a non-empty message to a public key.
///
/// Draws a fresh scalar per attempt and restarts internally when the shared
/// point degenerates to infinity or the KDF mask comes out all-zero.
pub fn encrypt<R: CryptoRng + RngCore>(
    rng: &mut R,
    public_key: &Point,
    plaintext: &[u8],
) -> Result<String> {
    if plaintext.is_empty() {
        return Err(Error::InvalidPlaintext("plaintext cannot be empty"));
    }
    if public_key.is_identity() || !public_key.is_on_curve() {
        return Err(Error::InvalidKey("public key is not a curve point"));
    }

    loop {
        let k = Scalar::random(rng);
        let c1 = sm2p256::scalar_mult_base_g(&k);
        let shared = sm2p256::scalar_mult(&k, public_key);
        if shared.is_identity() {
            continue;
        }

        let mask = Sm3Kdf::derive(&point_seed(&shared), plaintext.len())?;
        if mask.iter().all(|&b| b == 0) {
            continue;
        }

        let mut c2 = Vec::with_capacity(plaintext.len());
        for (m, t) in plaintext.iter().zip(mask.iter()) {
            c2.push(m ^ t);
        }

        let mut hasher = Sm3::new();
        hasher.update(&shared.x_coordinate_bytes())?;
        hasher.update(plaintext)?;
        hasher.update(&shared.y_coordinate_bytes())?;
        let c3 = hasher.finalize()?;

        let mut out = String::with_capacity(C1_HEX_LEN + C3_HEX_LEN + c2.len() * 2);
        out.push_str(&c1.to_hex_encoded());
        out.push_str(&c3.to_hex());
        out.push_str(&hex::encode(&c2));
        return Ok(out);
    }
}

/// Decrypt a C1‖C3‖C2 hex ciphertext with a private key.
pub fn decrypt(private_key: &Scalar, ciphertext: &str) -> Result<Vec<u8>> {
    if !ciphertext.is_ascii() {
        return Err(Error::InvalidCiphertext("invalid ciphertext hex"));
    }
    // At least C1, C3, and one masked byte
    if ciphertext.len() < C1_HEX_LEN + C3_HEX_LEN + 2 {
        return Err(Error::InvalidCiphertext("ciphertext too short"));
    }

    let (c1_hex, rest) = ciphertext.split_at(C1_HEX_LEN);
    let (c3_hex, c2_hex) = rest.split_at(C3_HEX_LEN);

    let c1 = Point::from_hex_encoded(c1_hex)
        .map_err(|_| Error::InvalidCiphertext("invalid C1 encoding"))?;
    if !c1.is_on_curve() {
        return Err(Error::NotOnCurve("C1 point"));
    }

    let c3 = hex::decode(c3_hex).map_err(|_| Error::InvalidCiphertext("invalid C3 hex"))?;
    let mut c2 = hex::decode(c2_hex).map_err(|_| Error::InvalidCiphertext("invalid C2 hex"))?;

    let shared = sm2p256::scalar_mult(private_key, &c1);
    if shared.is_identity() {
        return Err(Error::PointAtInfinity("shared point"));
    }

    let mask = Sm3Kdf::derive(&point_seed(&shared), c2.len())?;
    for (b, t) in c2.iter_mut().zip(mask.iter()) {
        *b ^= t;
    }

    let mut hasher = Sm3::new();
    hasher.update(&shared.x_coordinate_bytes())?;
    hasher.update(&c2)?;
    hasher.update(&shared.y_coordinate_bytes())?;
    let computed = hasher.finalize()?;

    if computed.as_ref() != c3.as_slice() {
        return Err(Error::DecryptionFailed("ciphertext digest mismatch"));
    }

    Ok(c2)
}

/// KDF seed for encryption: x ‖ y of the shared point.
fn point_seed(point: &Point) -> Vec<u8> {
    let mut seed = Vec::with_capacity(64);
    seed.extend_from_slice(&point.x_coordinate_bytes());
    seed.extend_from_slice(&point.y_coordinate_bytes());
    seed
}
