//! SM2 Elliptic Curve Primitives
//!
//! This module implements the group operations for the SM2 curve
//! y² = x³ − 3x + b over F_p, with p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1 and the
//! standard GB/T 32918 base point and order. The implementation uses:
//! - A Solinas fast reduction for field arithmetic
//! - Jacobian projective coordinates with the a = −3 doubling shortcut
//! - Binary double-and-add scalar multiplication (variable-time; see the
//!   note on `Point::mul`)

mod constants;
mod field;
mod point;
mod scalar;

pub use constants::{
    SM2_A, SM2_B, SM2_FIELD_ELEMENT_SIZE, SM2_GX, SM2_GY, SM2_N, SM2_P,
    SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE,
};
pub use field::FieldElement;
pub use point::Point;
pub use scalar::Scalar;

use rand::{CryptoRng, RngCore};

/// The standard base point G of the SM2 curve.
pub fn base_point_g() -> Point {
    Point::new(
        FieldElement::new_unchecked(SM2_GX),
        FieldElement::new_unchecked(SM2_GY),
    )
}

/// The curve coefficient a = −3 mod p as a field element.
pub fn curve_a() -> FieldElement {
    FieldElement::new_unchecked(SM2_A)
}

/// The curve coefficient b as a field element.
pub fn curve_b() -> FieldElement {
    FieldElement::new_unchecked(SM2_B)
}

/// Scalar multiplication with the base point: scalar · G.
pub fn scalar_mult_base_g(scalar: &Scalar) -> Point {
    base_point_g().mul(scalar.as_bigint())
}

/// The public point for a private scalar: Q = d·G.
pub fn public_from_private(private_key: &Scalar) -> Point {
    scalar_mult_base_g(private_key)
}

/// General scalar multiplication: scalar · point.
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Point {
    point.mul(scalar.as_bigint())
}

/// Generate a key pair: a uniform private scalar in [1, n) by rejection
/// sampling, and its public point d·G.
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> (Scalar, Point) {
    let private_key = Scalar::random(rng);
    let public_key = scalar_mult_base_g(&private_key);
    (private_key, public_key)
}

#[cfg(test)]
mod tests;
