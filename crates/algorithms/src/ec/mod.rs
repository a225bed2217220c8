//! Elliptic curve primitives
//!
//! A single curve is supported: the SM2 recommended curve over the prime
//! field F_p. The curve parameters are fixed program constants; there is no
//! curve agility.

pub mod sm2p256;

// Re-export common EC types
pub use sm2p256::{FieldElement, Point, Scalar};
