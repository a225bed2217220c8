//! Cipher Block Chaining (CBC) mode with PKCS#7 padding
//!
//! Each plaintext block is XORed with the previous ciphertext block before
//! encryption; the first block is XORed with the IV. Padding is always
//! applied on encryption, so aligned input grows by a full block. The
//! configured IV is the starting point of every call; it does not advance
//! across calls.

use alloc::string::String;
use alloc::vec::Vec;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::sm4::Sm4;
use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};

/// CBC mode over a 16-byte-block cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Cbc<B: BlockCipher + Zeroize + ZeroizeOnDrop> {
    cipher: B,
    iv: [u8; 16],
}

impl<B: BlockCipher + Zeroize + ZeroizeOnDrop> Cbc<B> {
    /// Create a CBC instance with the given cipher and 16-byte IV.
    pub fn new(cipher: B, iv: &[u8; 16]) -> Result<Self> {
        validate::length("CBC initialization vector", iv.len(), B::block_size())?;
        Ok(Self { cipher, iv: *iv })
    }

    /// Encrypt a message. PKCS#7 padding is applied unconditionally, so the
    /// output is always a non-empty multiple of the block size.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let padded = pkcs7_pad(plaintext);
        let mut ciphertext = Vec::with_capacity(padded.len());
        let mut prev_block = self.iv;

        for chunk in padded.chunks(16) {
            let mut block = [0u8; 16];
            block.copy_from_slice(chunk);

            for (b, p) in block.iter_mut().zip(prev_block.iter()) {
                *b ^= p;
            }

            self.cipher.encrypt_block(&mut block)?;

            ciphertext.extend_from_slice(&block);
            prev_block = block;
        }

        Ok(ciphertext)
    }

    /// Decrypt a message and strip the padding. The ciphertext must be a
    /// non-empty multiple of the block size; encryption always pads, so an
    /// empty ciphertext cannot be genuine.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
            return Err(Error::Length {
                context: "CBC ciphertext",
                expected: (ciphertext.len() / 16 + 1) * 16,
                actual: ciphertext.len(),
            });
        }

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut prev_block = self.iv;

        for chunk in ciphertext.chunks(16) {
            let mut block = [0u8; 16];
            block.copy_from_slice(chunk);

            let current_block = block;
            self.cipher.decrypt_block(&mut block)?;

            for (b, p) in block.iter_mut().zip(prev_block.iter()) {
                *b ^= p;
            }

            plaintext.extend_from_slice(&block);
            prev_block = current_block;
        }

        pkcs7_unpad(plaintext)
    }

    /// Encrypt and return the ciphertext as lowercase hex.
    pub fn encrypt_to_hex(&self, plaintext: &[u8]) -> Result<String> {
        Ok(hex::encode(self.encrypt(plaintext)?))
    }

    /// Decrypt a lowercase or uppercase hex ciphertext.
    pub fn decrypt_from_hex(&self, ciphertext_hex: &str) -> Result<Vec<u8>> {
        let bytes = hex::decode(ciphertext_hex)
            .map_err(|_| Error::param("CBC ciphertext", "invalid hexadecimal input"))?;
        self.decrypt(&bytes)
    }
}

impl Cbc<Sm4> {
    /// Build an SM4-CBC instance from key and IV material of any length,
    /// both run through `Sm4::prepare_key_material`.
    pub fn sm4_from_material(key_material: &[u8], iv_material: &[u8]) -> Result<Self> {
        let cipher = Sm4::with_material(key_material)?;
        let iv = Sm4::prepare_key_material(iv_material)?;
        Self::new(cipher, &iv)
    }
}

/// Append N bytes of value N, N in [1, 16]. Aligned input gains a full
/// block.
fn pkcs7_pad(input: &[u8]) -> Vec<u8> {
    let pad_len = 16 - input.len() % 16;
    let mut out = Vec::with_capacity(input.len() + pad_len);
    out.extend_from_slice(input);
    out.resize(input.len() + pad_len, pad_len as u8);
    out
}

/// Strip and verify PKCS#7 padding.
fn pkcs7_unpad(mut input: Vec<u8>) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(input);
    }
    let pad_len = input[input.len() - 1] as usize;
    if pad_len == 0 || pad_len > 16 || pad_len > input.len() {
        return Err(Error::param("PKCS#7 padding", "invalid padding"));
    }
    let body_len = input.len() - pad_len;
    if input[body_len..].iter().any(|&b| b as usize != pad_len) {
        return Err(Error::param("PKCS#7 padding", "invalid padding"));
    }
    input.truncate(body_len);
    Ok(input)
}

#[cfg(test)]
mod tests;
