//! # guomi
//!
//! A self-contained implementation of the Chinese commercial cryptography
//! suite: the SM2 elliptic-curve public-key scheme (key generation,
//! encryption, signatures, and two-party authenticated key exchange), the
//! SM3 256-bit hash, and the SM4 128-bit block cipher in CBC mode with
//! PKCS#7 padding.
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports the two member crates:
//!
//! - [`algorithms`] (`guomi-algorithms`): the primitive layer — 256-bit
//!   arithmetic, the SM2 field and curve group, SM3, SM4 with CBC, and the
//!   SM3 counter-mode KDF
//! - [`sm2`] (`guomi-sm2`): the scheme layer — key pairs, C1‖C3‖C2
//!   encryption, `<r>h<s>` signatures, and the key-exchange state machine
//!
//! ## Example
//!
//! ```
//! use guomi::prelude::*;
//! use rand::rngs::OsRng;
//!
//! let pair = KeyPair::generate(&mut OsRng);
//! let ciphertext = pke::encrypt(&mut OsRng, pair.public_key(), b"message")?;
//! let plaintext = pke::decrypt(pair.private_key(), &ciphertext)?;
//! assert_eq!(plaintext, b"message");
//! # Ok::<(), guomi::sm2::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub use guomi_algorithms as algorithms;
pub use guomi_sm2 as sm2;

/// Re-exports commonly used items
pub mod prelude {
    pub use guomi_algorithms::block::{BlockCipher, CipherAlgorithm};
    pub use guomi_algorithms::ec::sm2p256::{Point, Scalar};
    pub use guomi_algorithms::hash::HashFunction;
    pub use guomi_algorithms::{BigInt256, Cbc, Digest, Sm3, Sm3Kdf, Sm4};
    pub use guomi_sm2::{dsa, exchange, pke};
    pub use guomi_sm2::{Error, KeyPair, Result, Signature};
}
