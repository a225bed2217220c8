//! The SM2 public-key scheme
//!
//! This crate builds the SM2 scheme operations on top of the primitives in
//! `guomi-algorithms`:
//!
//! - [`keypair`]: key-pair generation with wire-format guarantees
//! - [`pke`]: public-key encryption in the C1‖C3‖C2 hex layout
//! - [`dsa`]: identity-bound digital signatures with the `<r>h<s>` wire form
//! - [`exchange`]: two-party authenticated key agreement with confirmation
//!   tags
//! - [`distid`]: the Z value binding an identifier to a public key
//!
//! Randomized operations take an explicit `CryptoRng + RngCore`; retry loops
//! required by the scheme (nonce rejection, degenerate points, all-zero KDF
//! output) restart internally and never surface to the caller.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

pub mod error;
pub use error::{Error, Result};

pub mod distid;
pub mod dsa;
pub mod exchange;
pub mod keypair;
pub mod pke;

pub use distid::identity_digest;
pub use dsa::{sign, sign_to_string, verify, verify_str, Signature};
pub use exchange::{
    initiate, respond, InitiatorStep, InitiatorTranscript, ResponderStep, ResponderTranscript,
};
pub use keypair::KeyPair;

// Re-export the primitive layer for callers that need direct access
pub use algorithms;
