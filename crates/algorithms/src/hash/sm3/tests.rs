use super::*;

#[test]
fn empty_message_vector() {
    let digest = Sm3::digest(b"").unwrap();
    assert_eq!(
        digest.to_hex_upper(),
        "1AB21D8355CFA17F8E61194831E81A8F22BEC8C728FEFB747ED035EB5082AA2B"
    );
}

#[test]
fn abc_vector() {
    let digest = Sm3::digest(b"abc").unwrap();
    assert_eq!(
        digest.to_hex_upper(),
        "66C7F0F462EEEDD9D1F2D46BDC10E4E24167C4875CF2F7A2297DA02B8F4BA8E0"
    );
}

#[test]
fn two_block_vector() {
    // The second GB/T 32905 example: "abcd" repeated 16 times (64 bytes),
    // which exercises a full-block boundary before padding.
    let msg = b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd";
    let digest = Sm3::digest(msg).unwrap();
    assert_eq!(
        digest.to_hex(),
        "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732"
    );
}

#[test]
fn streaming_matches_one_shot() {
    let msg = b"The quick brown fox jumps over the lazy dog, twice over, and then some padding bytes";
    let one_shot = Sm3::digest(msg).unwrap();

    let mut hasher = Sm3::new();
    for chunk in msg.chunks(7) {
        hasher.update(chunk).unwrap();
    }
    assert_eq!(hasher.finalize().unwrap(), one_shot);

    let mut byte_wise = Sm3::new();
    for &b in msg.iter() {
        byte_wise.update_byte(b).unwrap();
    }
    assert_eq!(byte_wise.finalize().unwrap(), one_shot);
}

#[test]
fn finalize_resets_for_reuse() {
    let mut hasher = Sm3::new();
    hasher.update(b"abc").unwrap();
    let first = hasher.finalize().unwrap();

    hasher.update(b"abc").unwrap();
    let second = hasher.finalize().unwrap();
    assert_eq!(first, second);

    // An explicit reset discards buffered input.
    hasher.update(b"garbage").unwrap();
    hasher.reset();
    hasher.update(b"abc").unwrap();
    assert_eq!(hasher.finalize().unwrap(), first);
}

#[test]
fn padding_boundary_lengths_are_consistent() {
    // Lengths around the 56-byte padding threshold all produce distinct,
    // deterministic digests.
    for len in 53..=66 {
        let msg = alloc::vec![0xA5u8; len];
        let a = Sm3::digest(&msg).unwrap();
        let b = Sm3::digest(&msg).unwrap();
        assert_eq!(a, b);

        let mut longer = msg.clone();
        longer.push(0xA5);
        assert_ne!(Sm3::digest(&longer).unwrap(), a);
    }
}

#[test]
fn trait_constants() {
    assert_eq!(<Sm3 as HashFunction>::output_size(), 32);
    assert_eq!(<Sm3 as HashFunction>::block_size(), 64);
    assert_eq!(<Sm3 as HashFunction>::name(), "SM3");
}
