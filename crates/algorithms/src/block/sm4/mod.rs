//! SM4 block cipher
//!
//! The 128-bit block cipher from GB/T 32907: a 32-round unbalanced Feistel
//! network with a byte-wise S-box and two linear diffusion layers, one for
//! data (L) and one for the key schedule (L′).

use crate::block::{BlockCipher, CipherAlgorithm};
use crate::error::{validate, Result};
use crate::hash::Sm3;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SM4 key size in bytes
pub const SM4_KEY_SIZE: usize = 16;

/// SM4 block size in bytes
pub const SM4_BLOCK_SIZE: usize = 16;

const SBOX: [u8; 256] = [
    0xd6, 0x90, 0xe9, 0xfe, 0xcc, 0xe1, 0x3d, 0xb7, 0x16, 0xb6, 0x14, 0xc2, 0x28, 0xfb, 0x2c, 0x05,
    0x2b, 0x67, 0x9a, 0x76, 0x2a, 0xbe, 0x04, 0xc3, 0xaa, 0x44, 0x13, 0x26, 0x49, 0x86, 0x06, 0x99,
    0x9c, 0x42, 0x50, 0xf4, 0x91, 0xef, 0x98, 0x7a, 0x33, 0x54, 0x0b, 0x43, 0xed, 0xcf, 0xac, 0x62,
    0xe4, 0xb3, 0x1c, 0xa9, 0xc9, 0x08, 0xe8, 0x95, 0x80, 0xdf, 0x94, 0xfa, 0x75, 0x8f, 0x3f, 0xa6,
    0x47, 0x07, 0xa7, 0xfc, 0xf3, 0x73, 0x17, 0xba, 0x83, 0x59, 0x3c, 0x19, 0xe6, 0x85, 0x4f, 0xa8,
    0x68, 0x6b, 0x81, 0xb2, 0x71, 0x64, 0xda, 0x8b, 0xf8, 0xeb, 0x0f, 0x4b, 0x70, 0x56, 0x9d, 0x35,
    0x1e, 0x24, 0x0e, 0x5e, 0x63, 0x58, 0xd1, 0xa2, 0x25, 0x22, 0x7c, 0x3b, 0x01, 0x21, 0x78, 0x87,
    0xd4, 0x00, 0x46, 0x57, 0x9f, 0xd3, 0x27, 0x52, 0x4c, 0x36, 0x02, 0xe7, 0xa0, 0xc4, 0xc8, 0x9e,
    0xea, 0xbf, 0x8a, 0xd2, 0x40, 0xc7, 0x38, 0xb5, 0xa3, 0xf7, 0xf2, 0xce, 0xf9, 0x61, 0x15, 0xa1,
    0xe0, 0xae, 0x5d, 0xa4, 0x9b, 0x34, 0x1a, 0x55, 0xad, 0x93, 0x32, 0x30, 0xf5, 0x8c, 0xb1, 0xe3,
    0x1d, 0xf6, 0xe2, 0x2e, 0x82, 0x66, 0xca, 0x60, 0xc0, 0x29, 0x23, 0xab, 0x0d, 0x53, 0x4e, 0x6f,
    0xd5, 0xdb, 0x37, 0x45, 0xde, 0xfd, 0x8e, 0x2f, 0x03, 0xff, 0x6a, 0x72, 0x6d, 0x6c, 0x5b, 0x51,
    0x8d, 0x1b, 0xaf, 0x92, 0xbb, 0xdd, 0xbc, 0x7f, 0x11, 0xd9, 0x5c, 0x41, 0x1f, 0x10, 0x5a, 0xd8,
    0x0a, 0xc1, 0x31, 0x88, 0xa5, 0xcd, 0x7b, 0xbd, 0x2d, 0x74, 0xd0, 0x12, 0xb8, 0xe5, 0xb4, 0xb0,
    0x89, 0x69, 0x97, 0x4a, 0x0c, 0x96, 0x77, 0x7e, 0x65, 0xb9, 0xf1, 0x09, 0xc5, 0x6e, 0xc6, 0x84,
    0x18, 0xf0, 0x7d, 0xec, 0x3a, 0xdc, 0x4d, 0x20, 0x79, 0xee, 0x5f, 0x3e, 0xd7, 0xcb, 0x39, 0x48,
];

const FK: [u32; 4] = [0xa3b1bac6, 0x56aa3350, 0x677d9197, 0xb27022dc];

const CK: [u32; 32] = [
    0x00070e15, 0x1c232a31, 0x383f464d, 0x545b6269, 0x70777e85, 0x8c939aa1, 0xa8afb6bd, 0xc4cbd2d9,
    0xe0e7eef5, 0xfc030a11, 0x181f262d, 0x343b4249, 0x50575e65, 0x6c737a81, 0x888f969d, 0xa4abb2b9,
    0xc0c7ced5, 0xdce3eaf1, 0xf8ff060d, 0x141b2229, 0x30373e45, 0x4c535a61, 0x686f767d, 0x848b9299,
    0xa0a7aeb5, 0xbcc3cad1, 0xd8dfe6ed, 0xf4fb0209, 0x10171e25, 0x2c333a41, 0x484f565d, 0x646b7279,
];

/// Byte-wise S-box substitution τ
#[inline(always)]
fn tau(a: u32) -> u32 {
    let b0 = SBOX[(a >> 24) as usize & 0xFF];
    let b1 = SBOX[(a >> 16) as usize & 0xFF];
    let b2 = SBOX[(a >> 8) as usize & 0xFF];
    let b3 = SBOX[a as usize & 0xFF];
    ((b0 as u32) << 24) | ((b1 as u32) << 16) | ((b2 as u32) << 8) | (b3 as u32)
}

/// Data-path diffusion L
#[inline(always)]
fn linear(b: u32) -> u32 {
    b ^ b.rotate_left(2) ^ b.rotate_left(10) ^ b.rotate_left(18) ^ b.rotate_left(24)
}

/// Data-path round transform T = L ∘ τ
#[inline(always)]
fn transform(a: u32) -> u32 {
    linear(tau(a))
}

/// Key-schedule round transform T′ = L′ ∘ τ
#[inline(always)]
fn transform_key(a: u32) -> u32 {
    let b = tau(a);
    b ^ b.rotate_left(13) ^ b.rotate_left(23)
}

/// Round function F
#[inline(always)]
fn round(x0: u32, x1: u32, x2: u32, x3: u32, rk: u32) -> u32 {
    x0 ^ transform(x1 ^ x2 ^ x3 ^ rk)
}

#[inline(always)]
fn load_words(block: &[u8]) -> [u32; 4] {
    let mut x = [0u32; 4];
    for (i, word) in x.iter_mut().enumerate() {
        *word = u32::from_be_bytes([
            block[i * 4],
            block[i * 4 + 1],
            block[i * 4 + 2],
            block[i * 4 + 3],
        ]);
    }
    x
}

#[inline(always)]
fn store_words(words: &[u32; 4], block: &mut [u8]) {
    for (i, word) in words.iter().enumerate() {
        block[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
    }
}

/// SM4 block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm4 {
    round_keys: [u32; 32],
}

impl Sm4 {
    /// Expand a 128-bit master key into the 32 round keys.
    pub fn new(key: &[u8; SM4_KEY_SIZE]) -> Self {
        let mk = load_words(key);

        let mut k = [0u32; 36];
        for i in 0..4 {
            k[i] = mk[i] ^ FK[i];
        }

        let mut round_keys = [0u32; 32];
        for i in 0..32 {
            k[i + 4] = k[i] ^ transform_key(k[i + 1] ^ k[i + 2] ^ k[i + 3] ^ CK[i]);
            round_keys[i] = k[i + 4];
        }

        k.zeroize();
        Sm4 { round_keys }
    }

    /// Build a cipher from key material of any length, applying the
    /// preparation contract of `prepare_key_material`.
    pub fn with_material(material: &[u8]) -> Result<Self> {
        Ok(Self::new(&Self::prepare_key_material(material)?))
    }

    /// Derive the 16 bytes actually used as a key or IV.
    ///
    /// Material of exactly 16 bytes is used as-is. Anything else is hashed
    /// with SM3 and the first 16 characters of the uppercase hex digest
    /// become the 16 bytes, as ASCII. Interop peers depend on this exact
    /// behavior.
    pub fn prepare_key_material(material: &[u8]) -> Result<[u8; SM4_KEY_SIZE]> {
        let mut out = [0u8; SM4_KEY_SIZE];
        if material.len() == SM4_KEY_SIZE {
            out.copy_from_slice(material);
            return Ok(out);
        }
        let digest = Sm3::digest(material)?;
        let hex_upper = digest.to_hex_upper();
        out.copy_from_slice(&hex_upper.as_bytes()[..SM4_KEY_SIZE]);
        Ok(out)
    }

    /// Run the 32-round pipeline with the given round-key order.
    #[inline(always)]
    fn crypt_block(&self, block: &mut [u8], reverse_keys: bool) {
        let x = load_words(block);

        let mut xn = [0u32; 36];
        xn[..4].copy_from_slice(&x);
        for i in 0..32 {
            let rk = if reverse_keys {
                self.round_keys[31 - i]
            } else {
                self.round_keys[i]
            };
            xn[i + 4] = round(xn[i], xn[i + 1], xn[i + 2], xn[i + 3], rk);
        }

        // Output is the reversed last four words
        let out = [xn[35], xn[34], xn[33], xn[32]];
        store_words(&out, block);
        xn.zeroize();
    }
}

impl CipherAlgorithm for Sm4 {
    const KEY_SIZE: usize = SM4_KEY_SIZE;
    const BLOCK_SIZE: usize = SM4_BLOCK_SIZE;

    fn name() -> &'static str {
        "SM4"
    }
}

impl BlockCipher for Sm4 {
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("SM4 block", block.len(), SM4_BLOCK_SIZE)?;
        self.crypt_block(block, false);
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("SM4 block", block.len(), SM4_BLOCK_SIZE)?;
        self.crypt_block(block, true);
        Ok(())
    }
}
