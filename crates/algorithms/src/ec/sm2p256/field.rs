//! SM2 field arithmetic
//!
//! `FieldElement` wraps a canonical `BigInt256` below the SM2 prime p.
//! Multiplication and squaring run on the fast Solinas reduction; addition
//! and subtraction use a single conditional subtraction/addition.

use alloc::string::String;

use crate::bignum::BigInt256;
use crate::ec::sm2p256::constants::{SM2_FIELD_ELEMENT_SIZE, SM2_P};
use crate::error::{Error, Result};
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

/// An element of F_p for the SM2 prime, always in canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct FieldElement(pub(crate) BigInt256);

impl FieldElement {
    /// Wrap a value already known to be below p. Callers are the curve
    /// constants and reduction outputs only.
    #[inline]
    pub(crate) const fn new_unchecked(value: BigInt256) -> Self {
        FieldElement(value)
    }

    /// Canonicalize an input below 2p by one conditional subtraction.
    pub fn new(value: BigInt256) -> Self {
        let (reduced, borrow) = value.sub(&SM2_P);
        // borrow == 1 means the input was already below p
        FieldElement(BigInt256::conditional_select(
            &reduced,
            &value,
            Choice::from(borrow as u8),
        ))
    }

    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement(BigInt256::ZERO)
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        FieldElement(BigInt256::ONE)
    }

    /// Build a field element from 32 big-endian bytes, normalizing mod p.
    pub fn from_bytes(bytes: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Self {
        Self::new(BigInt256::from_be_bytes(bytes))
    }

    /// Build a field element from a big-endian hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self::new(BigInt256::from_hex(s)?))
    }

    /// Serialize as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.0.to_be_bytes()
    }

    /// Canonical uppercase hex form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// The canonical integer representative.
    #[inline]
    pub fn to_bigint(&self) -> &BigInt256 {
        &self.0
    }

    /// True for the additive identity.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True for the multiplicative identity.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// (self + other) mod p
    pub fn add(&self, other: &Self) -> Self {
        FieldElement(self.0.mod_add(&other.0, &SM2_P))
    }

    /// (self − other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        FieldElement(self.0.mod_sub(&other.0, &SM2_P))
    }

    /// 2·self mod p
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// 3·self mod p
    pub fn triple(&self) -> Self {
        self.double().add(self)
    }

    /// −self mod p
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return *self;
        }
        FieldElement(SM2_P.mod_sub(&self.0, &SM2_P))
    }

    /// (self · other) mod p on the Solinas path.
    pub fn mul(&self, other: &Self) -> Self {
        FieldElement(self.0.mul_mod_sm2_p(&other.0))
    }

    /// (self²) mod p on the Solinas path.
    pub fn square(&self) -> Self {
        FieldElement(self.0.square_mod_sm2_p())
    }

    /// self⁻¹ mod p via Fermat, squaring and multiplying on the fast
    /// reduction path rather than the generic one.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::param("SM2 field element", "inverse of zero"));
        }

        let two = BigInt256::from_limbs([2, 0, 0, 0]);
        let exp = SM2_P.sub(&two).0;

        let mut result = BigInt256::ONE;
        let mut base = self.0;
        for i in 0..exp.bit_length() {
            if exp.bit(i) {
                result = result.mul_mod_sm2_p(&base);
            }
            base = base.square_mod_sm2_p();
        }
        Ok(FieldElement(result))
    }

    /// (self / other) mod p. Fails when other is zero.
    pub fn div(&self, other: &Self) -> Result<Self> {
        Ok(self.mul(&other.invert()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn constructor_normalizes_values_at_or_above_p() {
        assert!(FieldElement::new(SM2_P).is_zero());
        let p_plus_1 = SM2_P.add(&BigInt256::ONE).0;
        assert!(FieldElement::new(p_plus_1).is_one());
        assert!(FieldElement::new(BigInt256::from_limbs([5, 0, 0, 0]))
            .to_bigint()
            .bit(0));
    }

    #[test]
    fn additive_laws() {
        let a = FieldElement::from_hex("123456789ABCDEF0123456789ABCDEF0").unwrap();
        assert!(a.add(&a.negate()).is_zero());
        assert_eq!(a.sub(&a), FieldElement::zero());
        assert_eq!(a.double(), a.add(&a));
        assert_eq!(a.triple(), a.add(&a).add(&a));
        assert_eq!(FieldElement::zero().negate(), FieldElement::zero());
    }

    #[test]
    fn multiplicative_laws() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x4650);
        for _ in 0..16 {
            let mut buf = [0u8; 32];
            rng.fill_bytes(&mut buf);
            let a = FieldElement::from_bytes(&buf);
            if a.is_zero() {
                continue;
            }
            let inv = a.invert().unwrap();
            assert!(a.mul(&inv).is_one());
            assert_eq!(a.square(), a.mul(&a));
            assert_eq!(a.div(&a).unwrap(), FieldElement::one());
        }
    }

    #[test]
    fn inverse_of_zero_is_rejected() {
        assert!(FieldElement::zero().invert().is_err());
        assert!(FieldElement::one().div(&FieldElement::zero()).is_err());
    }

    #[test]
    fn subtraction_wraps_below_zero() {
        let one = FieldElement::one();
        let two = one.double();
        // 1 - 2 = p - 1 = -1, and (-1) + 2 = 1
        let minus_one = one.sub(&two);
        assert_eq!(minus_one.add(&two), one);
        assert_eq!(minus_one, one.negate());
    }
}
