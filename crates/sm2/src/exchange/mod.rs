//! Two-party authenticated key exchange
//!
//! The SM2 key-agreement protocol between an initiator A and a responder B.
//! Each side folds its ephemeral scalar into its long-term key through the
//! truncated x-coordinate (t = d + x̄·r mod n), multiplies the peer's
//! combined point (P + x̄·R) by t, and derives the session key from the
//! resulting point and both identity digests. Confirmation tags with domain
//! bytes 0x02 (responder) and 0x03 (initiator) close the mutual
//! authentication:
//!
//! 1. B receives R_A and runs [`respond`], sending S_B back.
//! 2. A receives S_B and runs [`initiate`], which checks it and produces
//!    S_A.
//! 3. B checks S_A with [`ResponderStep::confirm_initiator`].
//!
//! On success both sides hold the same key of the requested length.

use alloc::vec::Vec;

use algorithms::bignum::BigInt256;
use algorithms::ec::sm2p256::{Point, Scalar, SM2_N};
use algorithms::hash::sm3::SM3_OUTPUT_SIZE;
use algorithms::hash::{HashFunction, Sm3};
use algorithms::kdf::Sm3Kdf;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::distid::identity_digest;
use crate::error::{Error, Result};

/// Everything the responder B knows when R_A arrives.
pub struct ResponderTranscript<'a> {
    /// The initiator's identifier
    pub initiator_id: &'a [u8],
    /// The responder's identifier
    pub responder_id: &'a [u8],
    /// The initiator's long-term public key P_A
    pub initiator_public: &'a Point,
    /// The initiator's ephemeral point R_A, received over the wire
    pub initiator_ephemeral: &'a Point,
    /// The responder's long-term public key P_B
    pub responder_public: &'a Point,
    /// The responder's long-term private key d_B
    pub responder_private: &'a Scalar,
    /// The responder's ephemeral point R_B
    pub responder_ephemeral: &'a Point,
    /// The responder's ephemeral scalar r_B
    pub responder_ephemeral_private: &'a Scalar,
    /// Desired session-key length in bytes
    pub key_len: usize,
}

/// Everything the initiator A knows when S_B arrives.
pub struct InitiatorTranscript<'a> {
    /// The initiator's identifier
    pub initiator_id: &'a [u8],
    /// The responder's identifier
    pub responder_id: &'a [u8],
    /// The initiator's long-term public key P_A
    pub initiator_public: &'a Point,
    /// The initiator's long-term private key d_A
    pub initiator_private: &'a Scalar,
    /// The initiator's ephemeral point R_A
    pub initiator_ephemeral: &'a Point,
    /// The initiator's ephemeral scalar r_A
    pub initiator_ephemeral_private: &'a Scalar,
    /// The responder's long-term public key P_B
    pub responder_public: &'a Point,
    /// The responder's ephemeral point R_B, received over the wire
    pub responder_ephemeral: &'a Point,
    /// The responder's confirmation tag S_B, received over the wire
    pub responder_tag: &'a [u8],
    /// Desired session-key length in bytes
    pub key_len: usize,
}

/// The responder's output: the session key, the tag S_B to send, and the
/// retained transcript state needed to check the initiator's S_A later.
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct ResponderStep {
    /// The derived session key K_B
    pub key: Vec<u8>,
    /// The confirmation tag S_B to send to the initiator
    pub tag: [u8; SM3_OUTPUT_SIZE],
    #[zeroize(skip)]
    shared: Point,
    initiator_z: [u8; SM3_OUTPUT_SIZE],
    responder_z: [u8; SM3_OUTPUT_SIZE],
    #[zeroize(skip)]
    initiator_ephemeral: Point,
    #[zeroize(skip)]
    responder_ephemeral: Point,
}

/// The initiator's output: the session key and the tag S_A to send back.
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct InitiatorStep {
    /// The derived session key K_A
    pub key: Vec<u8>,
    /// The confirmation tag S_A to send to the responder
    pub tag: [u8; SM3_OUTPUT_SIZE],
}

/// x̄ = 2¹²⁷ + (x mod 2¹²⁷): the w-truncation with w = 128.
fn truncated_x(x: &BigInt256) -> BigInt256 {
    const TWO_POW_127: BigInt256 = BigInt256::from_limbs([0, 0x8000_0000_0000_0000, 0, 0]);
    const LOW_127_MASK: BigInt256 =
        BigInt256::from_limbs([u64::MAX, 0x7FFF_FFFF_FFFF_FFFF, 0, 0]);
    TWO_POW_127.add(&x.and(&LOW_127_MASK)).0
}

/// t = (d + x̄·r) mod n: the sender's combined long-term/ephemeral secret.
fn combined_secret(private: &BigInt256, ephemeral: &BigInt256, x_bar: &BigInt256) -> BigInt256 {
    let xr = x_bar.mod_mul(ephemeral, &SM2_N);
    private.mod_add(&xr, &SM2_N)
}

/// t · (P + x̄·R): the shared point U (initiator side) or V (responder side).
fn shared_point(
    t: &BigInt256,
    x_bar: &BigInt256,
    peer_public: &Point,
    peer_ephemeral: &Point,
) -> Point {
    peer_public.add(&peer_ephemeral.mul(x_bar)).mul(t)
}

/// K = KDF(x ‖ y ‖ Z_A ‖ Z_B, key_len)
fn session_key(shared: &Point, za: &[u8], zb: &[u8], key_len: usize) -> Result<Vec<u8>> {
    let mut seed = Vec::with_capacity(64 + za.len() + zb.len());
    seed.extend_from_slice(&shared.x_coordinate_bytes());
    seed.extend_from_slice(&shared.y_coordinate_bytes());
    seed.extend_from_slice(za);
    seed.extend_from_slice(zb);
    Ok(Sm3Kdf::derive(&seed, key_len)?)
}

/// S = SM3(tag ‖ y ‖ SM3(x ‖ Z_A ‖ Z_B ‖ R_A.x ‖ R_A.y ‖ R_B.x ‖ R_B.y))
fn confirmation_tag(
    domain: u8,
    shared: &Point,
    za: &[u8],
    zb: &[u8],
    initiator_ephemeral: &Point,
    responder_ephemeral: &Point,
) -> Result<[u8; SM3_OUTPUT_SIZE]> {
    let mut inner = Sm3::new();
    inner.update(&shared.x_coordinate_bytes())?;
    inner.update(za)?;
    inner.update(zb)?;
    inner.update(&initiator_ephemeral.x_coordinate_bytes())?;
    inner.update(&initiator_ephemeral.y_coordinate_bytes())?;
    inner.update(&responder_ephemeral.x_coordinate_bytes())?;
    inner.update(&responder_ephemeral.y_coordinate_bytes())?;
    let transcript = inner.finalize()?;

    let mut outer = Sm3::new();
    outer.update_byte(domain)?;
    outer.update(&shared.y_coordinate_bytes())?;
    outer.update(transcript.as_ref())?;
    let digest = outer.finalize()?;

    let mut out = [0u8; SM3_OUTPUT_SIZE];
    out.copy_from_slice(digest.as_ref());
    Ok(out)
}

/// Responder step: derive (K_B, S_B) from the initiator's R_A.
pub fn respond(t: &ResponderTranscript<'_>) -> Result<ResponderStep> {
    let x2_bar = truncated_x(t.responder_ephemeral.x().to_bigint());
    let tb = combined_secret(
        t.responder_private.as_bigint(),
        t.responder_ephemeral_private.as_bigint(),
        &x2_bar,
    );

    if !t.initiator_ephemeral.is_on_curve() {
        return Err(Error::NotOnCurve("RA point"));
    }

    let x1_bar = truncated_x(t.initiator_ephemeral.x().to_bigint());
    let v = shared_point(&tb, &x1_bar, t.initiator_public, t.initiator_ephemeral);
    if v.is_identity() {
        return Err(Error::PointAtInfinity("V"));
    }

    let za = identity_digest(t.initiator_id, t.initiator_public)?;
    let zb = identity_digest(t.responder_id, t.responder_public)?;

    let key = session_key(&v, za.as_ref(), zb.as_ref(), t.key_len)?;
    let tag = confirmation_tag(
        0x02,
        &v,
        za.as_ref(),
        zb.as_ref(),
        t.initiator_ephemeral,
        t.responder_ephemeral,
    )?;

    let mut initiator_z = [0u8; SM3_OUTPUT_SIZE];
    initiator_z.copy_from_slice(za.as_ref());
    let mut responder_z = [0u8; SM3_OUTPUT_SIZE];
    responder_z.copy_from_slice(zb.as_ref());

    Ok(ResponderStep {
        key,
        tag,
        shared: v,
        initiator_z,
        responder_z,
        initiator_ephemeral: t.initiator_ephemeral.clone(),
        responder_ephemeral: t.responder_ephemeral.clone(),
    })
}

/// Initiator step: check S_B, then derive (K_A, S_A).
pub fn initiate(t: &InitiatorTranscript<'_>) -> Result<InitiatorStep> {
    let x1_bar = truncated_x(t.initiator_ephemeral.x().to_bigint());
    let ta = combined_secret(
        t.initiator_private.as_bigint(),
        t.initiator_ephemeral_private.as_bigint(),
        &x1_bar,
    );

    if !t.responder_ephemeral.is_on_curve() {
        return Err(Error::NotOnCurve("RB point"));
    }

    let x2_bar = truncated_x(t.responder_ephemeral.x().to_bigint());
    let u = shared_point(&ta, &x2_bar, t.responder_public, t.responder_ephemeral);
    if u.is_identity() {
        return Err(Error::PointAtInfinity("U"));
    }

    let za = identity_digest(t.initiator_id, t.initiator_public)?;
    let zb = identity_digest(t.responder_id, t.responder_public)?;

    let key = session_key(&u, za.as_ref(), zb.as_ref(), t.key_len)?;
    let expected = confirmation_tag(
        0x02,
        &u,
        za.as_ref(),
        zb.as_ref(),
        t.initiator_ephemeral,
        t.responder_ephemeral,
    )?;
    if expected[..] != *t.responder_tag {
        return Err(Error::TagMismatch("B's verification value does not match"));
    }

    let tag = confirmation_tag(
        0x03,
        &u,
        za.as_ref(),
        zb.as_ref(),
        t.initiator_ephemeral,
        t.responder_ephemeral,
    )?;

    Ok(InitiatorStep { key, tag })
}

impl ResponderStep {
    /// Check the initiator's confirmation tag S_A against the retained
    /// transcript. Completes the mutual authentication.
    pub fn confirm_initiator(&self, initiator_tag: &[u8]) -> bool {
        match confirmation_tag(
            0x03,
            &self.shared,
            &self.initiator_z,
            &self.responder_z,
            &self.initiator_ephemeral,
            &self.responder_ephemeral,
        ) {
            Ok(expected) => expected[..] == *initiator_tag,
            Err(_) => false,
        }
    }
}
