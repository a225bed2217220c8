//! SM2 key pair generation

use alloc::string::String;

use algorithms::ec::sm2p256::{self, Point, Scalar};
use rand::{CryptoRng, RngCore};

use crate::error::Result;

/// An SM2 key pair: a private scalar in [1, n) and its public point d·G.
#[derive(Clone)]
pub struct KeyPair {
    private: Scalar,
    public: Point,
}

impl KeyPair {
    /// Generate a key pair.
    ///
    /// The private scalar is rejection-sampled into [1, n). The hex-length
    /// check guards against accidental short encodings at the wire boundary.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        loop {
            let (private, public) = sm2p256::generate_keypair(rng);
            if private.to_hex().len() == 64 && public.to_hex_encoded().len() == 130 {
                return KeyPair { private, public };
            }
        }
    }

    /// Rebuild a key pair from a 64-character private-key hex string.
    pub fn from_private_hex(private_hex: &str) -> Result<Self> {
        let private = Scalar::from_hex(private_hex)?;
        let public = sm2p256::public_from_private(&private);
        Ok(KeyPair { private, public })
    }

    /// The private scalar.
    pub fn private_key(&self) -> &Scalar {
        &self.private
    }

    /// The public point.
    pub fn public_key(&self) -> &Point {
        &self.public
    }

    /// The private key as 64 uppercase hex characters.
    pub fn private_hex(&self) -> String {
        self.private.to_hex()
    }

    /// The public key as 130 lowercase hex characters (0x04 ‖ x ‖ y).
    pub fn public_hex(&self) -> String {
        self.public.to_hex_encoded()
    }
}
