//! Block cipher implementations
//!
//! The SM4 cipher and its modes of operation. Block-level APIs work on raw
//! 16-byte blocks; chaining, padding, and the key/IV preparation contract
//! live in the mode layer.

pub mod modes;
pub mod sm4;

pub use modes::Cbc;
pub use sm4::Sm4;

use crate::error::Result;

/// Type-level constants describing a block cipher
pub trait CipherAlgorithm {
    /// Key size in bytes
    const KEY_SIZE: usize;
    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Human-readable algorithm name
    fn name() -> &'static str;
}

/// A keyed block cipher operating on single blocks in place
pub trait BlockCipher: CipherAlgorithm {
    /// Encrypt one block in place; the slice must be exactly one block long
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt one block in place; the slice must be exactly one block long
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Block size in bytes
    fn block_size() -> usize {
        Self::BLOCK_SIZE
    }
}
