//! Distinguishing-identifier digest
//!
//! The Z value binds a party's identity to its public key and the curve
//! parameters: Z = SM3(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ Qx ‖ Qy), where ENTL
//! is the 16-bit big-endian bit length of the identifier. Both the signature
//! digest and the key-exchange transcript start from it.

use algorithms::ec::sm2p256::{self, Point};
use algorithms::hash::sm3::SM3_OUTPUT_SIZE;
use algorithms::hash::{HashFunction, Sm3};
use algorithms::types::Digest;

use crate::error::Result;

/// Compute the Z value for an identifier and public key.
pub fn identity_digest(user_id: &[u8], public_key: &Point) -> Result<Digest<SM3_OUTPUT_SIZE>> {
    let entl = (user_id.len() * 8) as u16;
    let g = sm2p256::base_point_g();

    let mut hasher = Sm3::new();
    hasher.update_byte((entl >> 8) as u8)?;
    hasher.update_byte((entl & 0xFF) as u8)?;
    hasher.update(user_id)?;
    hasher.update(&sm2p256::curve_a().to_bytes())?;
    hasher.update(&sm2p256::curve_b().to_bytes())?;
    hasher.update(&g.x_coordinate_bytes())?;
    hasher.update(&g.y_coordinate_bytes())?;
    hasher.update(&public_key.x_coordinate_bytes())?;
    hasher.update(&public_key.y_coordinate_bytes())?;
    Ok(hasher.finalize()?)
}
