//! Fixed-width 256-bit unsigned arithmetic
//!
//! `BigInt256` stores a value below 2²⁵⁶ as four 64-bit limbs in little-endian
//! order (limb 0 is least significant). Every operation returns a new value;
//! modular results are always canonical, in `[0, m)`.
//!
//! Two reduction paths exist: a generic bit-by-bit reduction of the 512-bit
//! product for an arbitrary modulus (used with the curve order n), and a fast
//! Solinas reduction specialized for the SM2 prime
//! p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1 (used by the field layer).

use alloc::string::String;

use core::cmp::Ordering;

use crate::error::{Error, Result};
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

/// A 256-bit unsigned integer held as four little-endian 64-bit limbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct BigInt256 {
    limbs: [u64; 4],
}

/// The SM2 prime p, kept here for the fast reduction's final subtractions.
const SM2_PRIME: BigInt256 = BigInt256::from_limbs([
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_0000_0000,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
]);

/// Signed per-word coefficients folding the product words w₈…w₁₅ into the
/// low eight 32-bit lanes, derived from the sparse binary form of p.
const REDUCTION_TABLE: [[i64; 8]; 8] = [
    [1, 0, -1, 1, 0, 0, 0, 1],
    [1, 1, -1, 0, 1, 0, 0, 1],
    [1, 1, 0, 0, 0, 1, 0, 1],
    [1, 1, 0, 1, 0, 0, 1, 1],
    [1, 1, 0, 1, 1, 0, 0, 2],
    [2, 1, -1, 2, 1, 1, 0, 2],
    [2, 2, -1, 1, 2, 1, 1, 2],
    [2, 2, 0, 1, 1, 2, 1, 3],
];

/// Add with carry in, returning (sum, carry out).
#[inline(always)]
fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Subtract with borrow in, returning (difference, borrow out).
#[inline(always)]
fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, ((t >> 64) as u64) & 1)
}

impl BigInt256 {
    /// The value 0.
    pub const ZERO: Self = Self::from_limbs([0, 0, 0, 0]);

    /// The value 1.
    pub const ONE: Self = Self::from_limbs([1, 0, 0, 0]);

    /// Build a value from little-endian 64-bit limbs.
    #[inline]
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        BigInt256 { limbs }
    }

    /// Parse a big-endian byte string. Inputs shorter than 32 bytes are
    /// zero-padded on the left; longer inputs keep their low 32 bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut padded = [0u8; 32];
        if bytes.len() >= 32 {
            padded.copy_from_slice(&bytes[bytes.len() - 32..]);
        } else {
            padded[32 - bytes.len()..].copy_from_slice(bytes);
        }

        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let off = (3 - i) * 8;
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&padded[off..off + 8]);
            *limb = u64::from_be_bytes(chunk);
        }
        BigInt256 { limbs }
    }

    /// Parse a big-endian hex string. Accepts an optional `0x` prefix, either
    /// case, and odd-length input; values wider than 256 bits keep their low
    /// 256 bits.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let decoded = if s.len() % 2 == 1 {
            let mut padded = String::with_capacity(s.len() + 1);
            padded.push('0');
            padded.push_str(s);
            hex::decode(&padded)
        } else {
            hex::decode(s)
        };

        let bytes =
            decoded.map_err(|_| Error::param("hex string", "invalid hexadecimal input"))?;
        Ok(Self::from_be_bytes(&bytes))
    }

    /// Serialize as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, &limb) in self.limbs.iter().enumerate() {
            let off = (3 - i) * 8;
            out[off..off + 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Canonical 64-character uppercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_be_bytes())
    }

    /// 64-character lowercase hex form.
    pub fn to_hex_lower(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// True if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// True if the value is one.
    #[inline]
    pub fn is_one(&self) -> bool {
        self.limbs[0] == 1 && self.limbs[1] == 0 && self.limbs[2] == 0 && self.limbs[3] == 0
    }

    /// Full addition: returns (self + other, carry).
    pub fn add(&self, other: &Self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (sum, c) = adc(self.limbs[i], other.limbs[i], carry);
            r[i] = sum;
            carry = c;
        }
        (BigInt256 { limbs: r }, carry)
    }

    /// Full subtraction: returns (self − other, borrow).
    pub fn sub(&self, other: &Self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (diff, b) = sbb(self.limbs[i], other.limbs[i], borrow);
            r[i] = diff;
            borrow = b;
        }
        (BigInt256 { limbs: r }, borrow)
    }

    /// Schoolbook 4×4 product, returned as eight little-endian 64-bit limbs.
    pub fn widening_mul(&self, other: &Self) -> [u64; 8] {
        let mut out = [0u64; 8];
        for i in 0..4 {
            let mut carry = 0u128;
            for j in 0..4 {
                let t = (self.limbs[i] as u128) * (other.limbs[j] as u128)
                    + (out[i + j] as u128)
                    + carry;
                out[i + j] = t as u64;
                carry = t >> 64;
            }
            out[i + 4] = carry as u64;
        }
        out
    }

    /// (self + other) mod m. Inputs must already be below m.
    pub fn mod_add(&self, other: &Self, modulus: &Self) -> Self {
        let (sum, carry) = self.add(other);
        if carry != 0 || sum >= *modulus {
            sum.sub(modulus).0
        } else {
            sum
        }
    }

    /// (self − other) mod m. Inputs must already be below m.
    pub fn mod_sub(&self, other: &Self, modulus: &Self) -> Self {
        let (diff, borrow) = self.sub(other);
        if borrow != 0 {
            diff.add(modulus).0
        } else {
            diff
        }
    }

    /// (self · other) mod m via the generic 512-bit reduction.
    pub fn mod_mul(&self, other: &Self, modulus: &Self) -> Self {
        let product = self.widening_mul(other);
        reduce_512(&product, modulus)
    }

    /// (self²) mod m via the generic 512-bit reduction.
    pub fn mod_square(&self, modulus: &Self) -> Self {
        self.mod_mul(self, modulus)
    }

    /// (self^exp) mod m. Square-and-multiply, scanning exp from the LSB up.
    pub fn mod_pow(&self, exp: &Self, modulus: &Self) -> Self {
        if exp.is_zero() {
            return Self::ONE;
        }
        let mut result = Self::ONE;
        let mut base = *self;
        for i in 0..exp.bit_length() {
            if exp.bit(i) {
                result = result.mod_mul(&base, modulus);
            }
            base = base.mod_square(modulus);
        }
        result
    }

    /// self⁻¹ mod m for a prime m, via Fermat: self^(m−2) mod m.
    pub fn mod_inverse(&self, modulus: &Self) -> Self {
        let two = Self::from_limbs([2, 0, 0, 0]);
        let exp = modulus.sub(&two).0;
        self.mod_pow(&exp, modulus)
    }

    /// (self · other) mod the SM2 prime p, on the fast Solinas path.
    pub fn mul_mod_sm2_p(&self, other: &Self) -> Self {
        let product = self.widening_mul(other);
        reduce_sm2_p(&product)
    }

    /// (self²) mod the SM2 prime p, on the fast Solinas path.
    pub fn square_mod_sm2_p(&self) -> Self {
        let product = self.widening_mul(self);
        reduce_sm2_p(&product)
    }

    /// The bit at position `i` (0 = LSB). Positions ≥ 256 read as zero.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        if i >= 256 {
            return false;
        }
        (self.limbs[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Position of the highest set bit plus one; zero for the value 0.
    pub fn bit_length(&self) -> usize {
        for i in (0..4).rev() {
            if self.limbs[i] != 0 {
                return (i + 1) * 64 - self.limbs[i].leading_zeros() as usize;
            }
        }
        0
    }

    /// Bitwise AND.
    pub fn and(&self, other: &Self) -> Self {
        BigInt256 {
            limbs: [
                self.limbs[0] & other.limbs[0],
                self.limbs[1] & other.limbs[1],
                self.limbs[2] & other.limbs[2],
                self.limbs[3] & other.limbs[3],
            ],
        }
    }
}

impl ConditionallySelectable for BigInt256 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.limbs[i], &b.limbs[i], choice);
        }
        BigInt256 { limbs }
    }
}

impl Ord for BigInt256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BigInt256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reduce a 512-bit value modulo an arbitrary modulus by conditional
/// subtraction of the modulus shifted left by every feasible amount, from
/// the largest down to zero. Fallback path; the field layer never takes it.
fn reduce_512(value: &[u64; 8], modulus: &BigInt256) -> BigInt256 {
    let mut remainder = *value;

    let dividend_bits = bits_512(&remainder);
    let modulus_bits = modulus.bit_length();
    if modulus_bits == 0 {
        panic!("modular reduction by zero");
    }

    if dividend_bits < modulus_bits {
        return BigInt256::from_limbs([remainder[0], remainder[1], remainder[2], remainder[3]]);
    }

    let mut shift = dividend_bits - modulus_bits;
    loop {
        let shifted = shift_left_512(&modulus.limbs, shift);
        if compare_512(&remainder, &shifted) != Ordering::Less {
            remainder = sub_512(&remainder, &shifted);
        }
        if shift == 0 {
            break;
        }
        shift -= 1;
    }

    BigInt256::from_limbs([remainder[0], remainder[1], remainder[2], remainder[3]])
}

fn bits_512(value: &[u64; 8]) -> usize {
    for i in (0..8).rev() {
        if value[i] != 0 {
            return (i + 1) * 64 - value[i].leading_zeros() as usize;
        }
    }
    0
}

fn shift_left_512(value: &[u64; 4], shift: usize) -> [u64; 8] {
    let mut result = [0u64; 8];
    let word_shift = shift / 64;
    let bit_shift = shift % 64;

    if bit_shift == 0 {
        for i in 0..4 {
            if i + word_shift < 8 {
                result[i + word_shift] = value[i];
            }
        }
    } else {
        for i in 0..4 {
            if i + word_shift < 8 {
                result[i + word_shift] |= value[i] << bit_shift;
            }
            if i + word_shift + 1 < 8 {
                result[i + word_shift + 1] |= value[i] >> (64 - bit_shift);
            }
        }
    }
    result
}

fn compare_512(a: &[u64; 8], b: &[u64; 8]) -> Ordering {
    for i in (0..8).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

fn sub_512(a: &[u64; 8], b: &[u64; 8]) -> [u64; 8] {
    let mut result = [0u64; 8];
    let mut borrow = 0u64;
    for i in 0..8 {
        let (diff, br) = sbb(a[i], b[i], borrow);
        result[i] = diff;
        borrow = br;
    }
    result
}

/// Carry-propagate the nine signed 32-bit lanes once, left to right.
fn propagate(acc: &mut [i64; 9]) {
    for i in 0..8 {
        let carry = acc[i] >> 32;
        acc[i] &= 0xFFFF_FFFF;
        acc[i + 1] += carry;
    }
}

/// Fast reduction of a 512-bit product modulo the SM2 prime.
///
/// Works on the product as sixteen signed 32-bit words: the eight high words
/// fold into the low lanes through `REDUCTION_TABLE`, the residual high word
/// folds through (+x, 0, −x, +x, 0, 0, 0, +x) at most twice, negative lanes
/// borrow from their neighbour, and the packed result drops below p by
/// conditional subtraction.
fn reduce_sm2_p(product: &[u64; 8]) -> BigInt256 {
    let word = |i: usize| -> i64 {
        if i % 2 == 0 {
            (product[i / 2] & 0xFFFF_FFFF) as i64
        } else {
            (product[i / 2] >> 32) as i64
        }
    };

    let mut acc = [0i64; 9];
    for (j, lane) in acc.iter_mut().take(8).enumerate() {
        *lane = word(j);
        for i in 0..8 {
            *lane += word(i + 8) * REDUCTION_TABLE[i][j];
        }
    }

    propagate(&mut acc);

    for _ in 0..2 {
        let overflow = acc[8];
        if overflow == 0 {
            break;
        }
        acc[8] = 0;
        acc[0] += overflow;
        acc[2] -= overflow;
        acc[3] += overflow;
        acc[7] += overflow;
        propagate(&mut acc);
    }

    for i in 0..8 {
        while acc[i] < 0 {
            acc[i] += 1 << 32;
            acc[i + 1] -= 1;
        }
    }

    let mut result = BigInt256::from_limbs([
        acc[0] as u64 | ((acc[1] as u64) << 32),
        acc[2] as u64 | ((acc[3] as u64) << 32),
        acc[4] as u64 | ((acc[5] as u64) << 32),
        acc[6] as u64 | ((acc[7] as u64) << 32),
    ]);

    while result >= SM2_PRIME {
        result = result.sub(&SM2_PRIME).0;
    }
    result
}
