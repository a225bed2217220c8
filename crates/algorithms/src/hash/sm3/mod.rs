//! SM3 hash function
//!
//! The 256-bit iterated hash from GB/T 32905, a Merkle–Damgård construction
//! over 512-bit blocks. The final length field is written as the full 64-bit
//! big-endian bit count.

use alloc::string::{String, ToString};

use crate::error::Result;
use crate::hash::HashFunction;
use crate::types::Digest;
use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

/// SM3 digest size in bytes
pub const SM3_OUTPUT_SIZE: usize = 32;

/// SM3 block size in bytes
pub const SM3_BLOCK_SIZE: usize = 64;

const SM3_IV: [u32; 8] = [
    0x7380166F, 0x4914B2B9, 0x172442D7, 0xDA8A0600, 0xA96F30BC, 0x163138AA, 0xE38DEE4D, 0xB0FB0E4E,
];

const T0: u32 = 0x79CC4519;
const T1: u32 = 0x7A879D8A;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// SM3 hash function state
#[derive(Clone, Zeroize)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sm3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Sm3 {
    /// Create a fresh instance in its initial state.
    pub fn new() -> Self {
        Sm3 {
            state: SM3_IV,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    /// Return the instance to its initial state, discarding buffered input.
    pub fn reset(&mut self) {
        self.state = SM3_IV;
        self.buffer = [0u8; SM3_BLOCK_SIZE];
        self.buffer_idx = 0;
        self.total_bytes = 0;
    }

    /// Feed a single byte into the hash.
    pub fn update_byte(&mut self, byte: u8) -> Result<&mut Self> {
        self.update_internal(&[byte]);
        Ok(self)
    }

    /// Hash a complete message in one call.
    pub fn digest(data: &[u8]) -> Result<Digest<SM3_OUTPUT_SIZE>> {
        let mut hasher = Sm3::new();
        hasher.update_internal(data);
        Ok(hasher.finalize_internal())
    }

    fn compress(state: &mut [u32; 8], block: &[u8; SM3_BLOCK_SIZE]) {
        // Message expansion
        let mut w = [0u32; 68];
        for (i, word) in w.iter_mut().take(16).enumerate() {
            *word = BigEndian::read_u32(&block[i * 4..]);
        }
        for j in 16..68 {
            w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
                ^ w[j - 13].rotate_left(7)
                ^ w[j - 6];
        }
        let mut w2 = [0u32; 64];
        for (j, word) in w2.iter_mut().enumerate() {
            *word = w[j] ^ w[j + 4];
        }

        // Compression
        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

        for j in 0..64 {
            let a12 = a.rotate_left(12);
            let tj = if j < 16 {
                T0.rotate_left(j as u32)
            } else {
                T1.rotate_left((j % 32) as u32)
            };
            let ss1 = a12.wrapping_add(e).wrapping_add(tj).rotate_left(7);
            let ss2 = ss1 ^ a12;

            let (ff, gg) = if j < 16 {
                (a ^ b ^ c, e ^ f ^ g)
            } else {
                ((a & b) | (a & c) | (b & c), (e & f) | (!e & g))
            };
            let tt1 = ff.wrapping_add(d).wrapping_add(ss2).wrapping_add(w2[j]);
            let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);

            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }

        state[0] ^= a;
        state[1] ^= b;
        state[2] ^= c;
        state[3] ^= d;
        state[4] ^= e;
        state[5] ^= f;
        state[6] ^= g;
        state[7] ^= h;
    }

    fn update_internal(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SM3_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SM3_BLOCK_SIZE {
                let block = self.buffer;
                Self::compress(&mut self.state, &block);
                self.total_bytes += SM3_BLOCK_SIZE as u64;
                self.buffer_idx = 0;
            }
        }
    }

    fn finalize_internal(&mut self) -> Digest<SM3_OUTPUT_SIZE> {
        self.total_bytes += self.buffer_idx as u64;
        let bit_len = self.total_bytes.wrapping_mul(8);

        // Padding: 0x80, zeros to the length field, then the 64-bit count
        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= SM3_BLOCK_SIZE - 8 {
            for b in &mut self.buffer[self.buffer_idx + 1..] {
                *b = 0;
            }
            let block = self.buffer;
            Self::compress(&mut self.state, &block);
            self.buffer = [0u8; SM3_BLOCK_SIZE];
        } else {
            for b in &mut self.buffer[self.buffer_idx + 1..SM3_BLOCK_SIZE - 8] {
                *b = 0;
            }
        }

        BigEndian::write_u64(&mut self.buffer[SM3_BLOCK_SIZE - 8..], bit_len);
        let block = self.buffer;
        Self::compress(&mut self.state, &block);

        let mut out = [0u8; SM3_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        self.reset();
        Digest::new(out)
    }
}

impl HashFunction for Sm3 {
    type Output = Digest<SM3_OUTPUT_SIZE>;

    fn new() -> Self {
        Sm3::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data);
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        Ok(self.finalize_internal())
    }

    fn output_size() -> usize {
        SM3_OUTPUT_SIZE
    }

    fn block_size() -> usize {
        SM3_BLOCK_SIZE
    }

    fn name() -> String {
        "SM3".to_string()
    }
}

#[cfg(test)]
mod tests;
