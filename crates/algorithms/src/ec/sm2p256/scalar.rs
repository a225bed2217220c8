//! SM2 scalar values
//!
//! A `Scalar` is a validated integer in [1, n) where n is the curve order.
//! Used for long-term and ephemeral private keys and signing nonces, so the
//! value is scrubbed on drop. Arithmetic mod n runs through the generic
//! `BigInt256` reduction; only the field layer has a fast path.

use alloc::string::String;

use crate::bignum::BigInt256;
use crate::ec::sm2p256::constants::{SM2_N, SM2_SCALAR_SIZE};
use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A non-zero scalar below the curve order n.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(BigInt256);

impl Scalar {
    /// Wrap a value, rejecting zero and anything at or above n.
    pub fn new(value: BigInt256) -> Result<Self> {
        if value.is_zero() {
            return Err(Error::param("SM2 scalar", "scalar cannot be zero"));
        }
        if value >= SM2_N {
            return Err(Error::param("SM2 scalar", "scalar exceeds the group order"));
        }
        Ok(Scalar(value))
    }

    /// Parse a scalar from 32 big-endian bytes.
    pub fn from_bytes(bytes: &[u8; SM2_SCALAR_SIZE]) -> Result<Self> {
        Self::new(BigInt256::from_be_bytes(bytes))
    }

    /// Parse a scalar from a big-endian hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::new(BigInt256::from_hex(s)?)
    }

    /// Draw a uniform scalar in [1, n) by rejection sampling.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; SM2_SCALAR_SIZE];
        loop {
            rng.fill_bytes(&mut bytes);
            if let Ok(scalar) = Self::from_bytes(&bytes) {
                bytes.zeroize();
                return scalar;
            }
        }
    }

    /// The scalar's integer value.
    #[inline]
    pub fn as_bigint(&self) -> &BigInt256 {
        &self.0
    }

    /// Serialize as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; SM2_SCALAR_SIZE] {
        self.0.to_be_bytes()
    }

    /// Canonical 64-character uppercase hex form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}
