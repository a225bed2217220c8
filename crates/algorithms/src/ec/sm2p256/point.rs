//! SM2 elliptic curve point operations
//!
//! Affine points carry an identity flag; the group law runs in Jacobian
//! coordinates internally so that doubling and mixed addition avoid field
//! inversions, with a single inversion when converting back to affine.

use alloc::string::String;
use alloc::vec::Vec;

use crate::bignum::BigInt256;
use crate::ec::sm2p256::constants::{SM2_A, SM2_B, SM2_POINT_UNCOMPRESSED_SIZE};
use crate::ec::sm2p256::field::FieldElement;
use crate::error::{Error, Result};
use subtle::Choice;

/// A point on the SM2 curve in affine coordinates, or the point at infinity.
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// Jacobian-coordinate representation: (X, Y, Z) maps to the affine point
/// (X/Z², Y/Z³) when Z ≠ 0, and to infinity when Z = 0.
#[derive(Clone)]
struct JacobianPoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let self_is_identity: bool = self.is_identity.into();
        let other_is_identity: bool = other.is_identity.into();
        if self_is_identity || other_is_identity {
            return self_is_identity == other_is_identity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Point {
    /// Create an affine point from its coordinates. Curve membership is not
    /// enforced here; callers that require it check `is_on_curve`.
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Point {
            is_identity: Choice::from(0),
            x,
            y,
        }
    }

    /// The point at infinity (group identity).
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Check whether this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Verify y² = x³ + ax + b. The point at infinity is on the curve.
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let a = FieldElement::new_unchecked(SM2_A);
        let b = FieldElement::new_unchecked(SM2_B);
        let lhs = self.y.square();
        let rhs = self.x.square().add(&a).mul(&self.x).add(&b);
        lhs == rhs
    }

    /// The x-coordinate.
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    /// The y-coordinate.
    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// The x-coordinate as 32 big-endian bytes.
    pub fn x_coordinate_bytes(&self) -> [u8; 32] {
        self.x.to_bytes()
    }

    /// The y-coordinate as 32 big-endian bytes.
    pub fn y_coordinate_bytes(&self) -> [u8; 32] {
        self.y.to_bytes()
    }

    /// The point with the y-coordinate negated mod p.
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return Self::identity();
        }
        Point::new(self.x, self.y.negate())
    }

    /// Serialize: infinity is the single byte 0x00, any other point is
    /// 0x04 ‖ x (32 BE) ‖ y (32 BE).
    pub fn to_encoded(&self) -> Vec<u8> {
        if self.is_identity() {
            let mut out = Vec::with_capacity(1);
            out.push(0x00);
            return out;
        }
        let mut out = Vec::with_capacity(SM2_POINT_UNCOMPRESSED_SIZE);
        out.push(0x04);
        out.extend_from_slice(&self.x.to_bytes());
        out.extend_from_slice(&self.y.to_bytes());
        out
    }

    /// Lowercase hex form of the encoding.
    pub fn to_hex_encoded(&self) -> String {
        hex::encode(self.to_encoded())
    }

    /// Decode a point. A zero-length input decodes to infinity; everything
    /// else must be exactly 65 bytes starting with 0x04.
    pub fn from_encoded(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::identity());
        }
        if data.len() != SM2_POINT_UNCOMPRESSED_SIZE || data[0] != 0x04 {
            return Err(Error::param(
                "SM2 point",
                "invalid uncompressed point encoding",
            ));
        }

        let mut x_bytes = [0u8; 32];
        let mut y_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&data[1..33]);
        y_bytes.copy_from_slice(&data[33..65]);

        Ok(Point::new(
            FieldElement::from_bytes(&x_bytes),
            FieldElement::from_bytes(&y_bytes),
        ))
    }

    /// Decode a point from its hex encoding.
    pub fn from_hex_encoded(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|_| Error::param("SM2 point", "invalid hexadecimal input"))?;
        Self::from_encoded(&bytes)
    }

    /// Group addition.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        JacobianPoint::from_affine(self).add_affine(other).to_affine()
    }

    /// Group doubling.
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }
        JacobianPoint::from_affine(self).double().to_affine()
    }

    /// Group subtraction.
    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Scalar multiplication [k]P, double-and-add from the most significant
    /// set bit downward with mixed additions of the affine base.
    ///
    /// The bit walk branches on scalar bits and is not constant-time.
    pub fn mul(&self, k: &BigInt256) -> Self {
        if k.is_zero() || self.is_identity() {
            return Self::identity();
        }
        if k.is_one() {
            return self.clone();
        }

        let mut result = JacobianPoint::identity();
        for i in (0..k.bit_length()).rev() {
            result = result.double();
            if k.bit(i) {
                result = result.add_affine(self);
            }
        }
        result.to_affine()
    }
}

impl JacobianPoint {
    /// Canonical infinity: (1, 1, 0).
    fn identity() -> Self {
        JacobianPoint {
            x: FieldElement::one(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    fn from_affine(p: &Point) -> Self {
        if p.is_identity() {
            return Self::identity();
        }
        JacobianPoint {
            x: p.x,
            y: p.y,
            z: FieldElement::one(),
        }
    }

    /// One field inversion per conversion.
    fn to_affine(&self) -> Point {
        if self.z.is_zero() {
            return Point::identity();
        }
        let z_inv = self.z.invert().expect("nonzero Z is invertible");
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv);
        Point::new(self.x.mul(&z_inv2), self.y.mul(&z_inv3))
    }

    /// Doubling with the a = −3 specialization (dbl-2001-b).
    fn double(&self) -> Self {
        if self.z.is_zero() || self.y.is_zero() {
            return Self::identity();
        }

        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = self.x.mul(&gamma);

        // alpha = 3·(X1 − delta)·(X1 + delta)
        let alpha = self.x.sub(&delta).mul(&self.x.add(&delta)).triple();

        // X3 = alpha² − 8·beta
        let beta8 = beta.double().double().double();
        let x3 = alpha.square().sub(&beta8);

        // Z3 = (Y1 + Z1)² − gamma − delta
        let z3 = self.y.add(&self.z).square().sub(&gamma).sub(&delta);

        // Y3 = alpha·(4·beta − X3) − 8·gamma²
        let beta4 = beta.double().double();
        let gamma_sq8 = gamma.square().double().double().double();
        let y3 = alpha.mul(&beta4.sub(&x3)).sub(&gamma_sq8);

        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Mixed addition of an affine point.
    fn add_affine(&self, q: &Point) -> Self {
        if q.is_identity() {
            return self.clone();
        }
        if self.z.is_zero() {
            return Self::from_affine(q);
        }

        let z1z1 = self.z.square();
        let u2 = q.x.mul(&z1z1);
        let s2 = q.y.mul(&self.z).mul(&z1z1);
        let h = u2.sub(&self.x);
        let r = s2.sub(&self.y);

        if h.is_zero() {
            if r.is_zero() {
                return self.double();
            }
            return Self::identity();
        }

        let hh = h.square();
        let hhh = hh.mul(&h);
        let v = self.x.mul(&hh);
        let x3 = r.square().sub(&hhh).sub(&v.double());
        let y3 = r.mul(&v.sub(&x3)).sub(&self.y.mul(&hhh));
        let z3 = self.z.mul(&h);

        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}
