//! Cryptographic primitives for the SM2/SM3/SM4 suite
//!
//! This crate provides self-contained implementations of the Chinese
//! commercial cryptography primitives: fixed-width 256-bit arithmetic with a
//! fast reduction for the SM2 prime, the SM2 curve group in Jacobian
//! coordinates, the SM3 hash, the SM4 block cipher with CBC mode and PKCS#7
//! padding, and the SM3 counter-mode KDF. The scheme layer (encryption,
//! signatures, key exchange) lives in `guomi-sm2`.
//!
//! The core is purely computational: no I/O, no global state, and no
//! locking. Randomness always enters through an explicit
//! `CryptoRng + RngCore` argument.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// 256-bit arithmetic core
pub mod bignum;
pub use bignum::BigInt256;

// Elliptic curve primitives
pub mod ec;
pub use ec::{FieldElement, Point, Scalar};

// Hash function implementations
pub mod hash;
pub use hash::{HashFunction, Sm3};

// Block cipher implementations
pub mod block;
pub use block::{BlockCipher, Cbc, CipherAlgorithm, Sm4};

// KDF implementations
pub mod kdf;
pub use kdf::Sm3Kdf;

// Type system
pub mod types;
pub use types::Digest;
