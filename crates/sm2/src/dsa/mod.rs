//! SM2 digital signatures
//!
//! The signature digest is e = SM3(Z ‖ M) with Z the signer's identity
//! digest, so signatures are bound to an identifier as well as a key. The
//! wire form is the pair of lowercase 64-character hex values joined by a
//! literal `h`: `<r>h<s>`. That separator is a compatibility quirk of the
//! reference peer, not a standard encoding.

use alloc::string::String;

use core::fmt;
use core::str::FromStr;

use algorithms::bignum::BigInt256;
use algorithms::ec::sm2p256::{self, Point, Scalar, SM2_N};
use algorithms::hash::{HashFunction, Sm3};
use rand::{CryptoRng, RngCore};

use crate::distid::identity_digest;
use crate::error::{Error, Result};

/// An SM2 signature pair (r, s), both in [1, n−1].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigInt256,
    s: BigInt256,
}

impl Signature {
    /// The r component.
    pub fn r(&self) -> &BigInt256 {
        &self.r
    }

    /// The s component.
    pub fn s(&self) -> &BigInt256 {
        &self.s
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}", self.r.to_hex_lower(), self.s.to_hex_lower())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (r_hex, s_hex) = s
            .split_once('h')
            .ok_or(Error::InvalidSignature("missing separator"))?;
        let r = BigInt256::from_hex(r_hex)
            .map_err(|_| Error::InvalidSignature("invalid r component"))?;
        let s = BigInt256::from_hex(s_hex)
            .map_err(|_| Error::InvalidSignature("invalid s component"))?;
        Ok(Signature { r, s })
    }
}

/// Compute the signature digest e = SM3(Z ‖ M) as a 256-bit integer.
fn message_digest(user_id: &[u8], public_key: &Point, message: &[u8]) -> Result<BigInt256> {
    let z = identity_digest(user_id, public_key)?;
    let mut hasher = Sm3::new();
    hasher.update(z.as_ref())?;
    hasher.update(message)?;
    Ok(BigInt256::from_be_bytes(hasher.finalize()?.as_ref()))
}

/// Sign a message under an identifier and private key.
///
/// The nonce loop restarts on r = 0, r + k = n, or s = 0, so a returned
/// signature always verifies.
pub fn sign<R: CryptoRng + RngCore>(
    rng: &mut R,
    user_id: &[u8],
    message: &[u8],
    private_key: &Scalar,
) -> Result<Signature> {
    let public_key = sm2p256::public_from_private(private_key);
    let e = message_digest(user_id, &public_key, message)?;
    let d = private_key.as_bigint();

    loop {
        let k = Scalar::random(rng);
        let kp = sm2p256::scalar_mult_base_g(&k);
        let x1 = kp.x().to_bigint();

        let r = e.mod_add(x1, &SM2_N);
        if r.is_zero() {
            continue;
        }

        let (rk, _) = r.add(k.as_bigint());
        if rk == SM2_N {
            continue;
        }

        let (d_plus_1, _) = d.add(&BigInt256::ONE);
        let d_plus_1_inv = d_plus_1.mod_inverse(&SM2_N);
        let rd = r.mod_mul(d, &SM2_N);
        let k_minus_rd = k.as_bigint().mod_sub(&rd, &SM2_N);
        let s = k_minus_rd.mod_mul(&d_plus_1_inv, &SM2_N);
        if s.is_zero() {
            continue;
        }

        return Ok(Signature { r, s });
    }
}

/// Sign and return the `<r>h<s>` wire form.
pub fn sign_to_string<R: CryptoRng + RngCore>(
    rng: &mut R,
    user_id: &[u8],
    message: &[u8],
    private_key: &Scalar,
) -> Result<String> {
    use alloc::string::ToString;
    Ok(sign(rng, user_id, message, private_key)?.to_string())
}

/// Verify a signature against an identifier, message, and public key.
pub fn verify(user_id: &[u8], signature: &Signature, message: &[u8], public_key: &Point) -> bool {
    verify_inner(user_id, signature, message, public_key).unwrap_or(false)
}

/// Verify a signature in its `<r>h<s>` wire form.
pub fn verify_str(user_id: &[u8], signature: &str, message: &[u8], public_key: &Point) -> bool {
    match signature.parse::<Signature>() {
        Ok(sig) => verify(user_id, &sig, message, public_key),
        Err(_) => false,
    }
}

fn verify_inner(
    user_id: &[u8],
    signature: &Signature,
    message: &[u8],
    public_key: &Point,
) -> Result<bool> {
    let r = &signature.r;
    let s = &signature.s;

    if r.is_zero() || *r >= SM2_N || s.is_zero() || *s >= SM2_N {
        return Ok(false);
    }
    if public_key.is_identity() || !public_key.is_on_curve() {
        return Ok(false);
    }

    let e = message_digest(user_id, public_key, message)?;

    let t = r.mod_add(s, &SM2_N);
    if t.is_zero() {
        return Ok(false);
    }

    let point = sm2p256::base_point_g()
        .mul(s)
        .add(&public_key.mul(&t));
    if point.is_identity() {
        return Ok(false);
    }

    let computed = e.mod_add(point.x().to_bigint(), &SM2_N);
    Ok(computed == *r)
}

#[cfg(test)]
mod tests;
