//! Hash function implementations

use alloc::string::String;

use crate::error::Result;

pub mod sm3;

pub use sm3::Sm3;

/// Common interface for streaming hash functions
pub trait HashFunction {
    /// The digest type produced on finalization
    type Output;

    /// Create a fresh instance in its initial state
    fn new() -> Self;

    /// Feed bytes into the hash; may be called any number of times
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Consume the buffered input, produce the digest, and reset the
    /// instance to its initial state
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Digest size in bytes
    fn output_size() -> usize;

    /// Internal block size in bytes
    fn block_size() -> usize;

    /// Human-readable algorithm name
    fn name() -> String;
}
