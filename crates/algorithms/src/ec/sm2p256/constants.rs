//! Shared constants for the SM2 curve
//!
//! The curve is y² = x³ + ax + b over F_p with a = −3 mod p, the standard
//! GB/T 32918 parameters. There is no curve agility; every value here is a
//! compile-time constant.

use crate::bignum::BigInt256;

/// Size of an SM2 scalar in bytes (32 bytes = 256 bits)
pub const SM2_SCALAR_SIZE: usize = 32;

/// Size of an SM2 field element in bytes (32 bytes = 256 bits)
pub const SM2_FIELD_ELEMENT_SIZE: usize = 32;

/// Size of an uncompressed SM2 point: format byte (0x04) + x + y
pub const SM2_POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * SM2_FIELD_ELEMENT_SIZE;

/// The field prime p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1
pub const SM2_P: BigInt256 = BigInt256::from_limbs([
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_0000_0000,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
]);

/// Curve coefficient a = −3 mod p
pub const SM2_A: BigInt256 = BigInt256::from_limbs([
    0xFFFF_FFFF_FFFF_FFFC,
    0xFFFF_FFFF_0000_0000,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
]);

/// Curve coefficient b
pub const SM2_B: BigInt256 = BigInt256::from_limbs([
    0xDDBC_BD41_4D94_0E93,
    0xF397_89F5_15AB_8F92,
    0x4D5A_9E4B_CF65_09A7,
    0x28E9_FA9E_9D9F_5E34,
]);

/// x-coordinate of the base point G
pub const SM2_GX: BigInt256 = BigInt256::from_limbs([
    0x715A_4589_334C_74C7,
    0x8FE3_0BBF_F266_0BE1,
    0x5F99_0446_6A39_C994,
    0x32C4_AE2C_1F19_8119,
]);

/// y-coordinate of the base point G
pub const SM2_GY: BigInt256 = BigInt256::from_limbs([
    0x02DF_32E5_2139_F0A0,
    0xD0A9_877C_C62A_4740,
    0x59BD_CEE3_6B69_2153,
    0xBC37_36A2_F4F6_779C,
]);

/// The group order n, used as the scalar modulus
pub const SM2_N: BigInt256 = BigInt256::from_limbs([
    0x53BB_F409_39D5_4123,
    0x7203_DF6B_21C6_052B,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
]);
