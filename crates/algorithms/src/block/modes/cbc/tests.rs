use super::*;

fn reference_cipher() -> Cbc<Sm4> {
    Cbc::sm4_from_material(b"this is the key", b"this is the iv").unwrap()
}

#[test]
fn interop_vector_with_hashed_key_and_iv() {
    // Key and IV are not 16 bytes, so both go through the SM3 uppercase-hex
    // preparation step. The expected ciphertext comes from the reference
    // peer.
    let cbc = reference_cipher();
    let plaintext = "国密SM4对称加密算法";

    let ciphertext = cbc.encrypt_to_hex(plaintext.as_bytes()).unwrap();
    assert_eq!(
        ciphertext,
        "09908004c24cece806ee6dc2d6a3d154907048fb96d0201a8c47f4f1e03995bc"
    );

    let decrypted = cbc.decrypt_from_hex(&ciphertext).unwrap();
    assert_eq!(decrypted, plaintext.as_bytes());
}

#[test]
fn round_trip_for_all_residue_lengths() {
    let cbc = Cbc::new(Sm4::new(b"0123456789abcdef"), b"fedcba9876543210").unwrap();
    for len in 0..=48 {
        let message: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let ciphertext = cbc.encrypt(&message).unwrap();

        // Padding always rounds up to the next full block.
        assert_eq!(ciphertext.len(), (len / 16 + 1) * 16);
        assert_eq!(cbc.decrypt(&ciphertext).unwrap(), message);
    }
}

#[test]
fn configured_iv_restarts_every_call() {
    let cbc = reference_cipher();
    let a = cbc.encrypt(b"same input").unwrap();
    let b = cbc.encrypt(b"same input").unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_iv_changes_ciphertext() {
    let key = b"0123456789abcdef";
    let a = Cbc::new(Sm4::new(key), b"aaaaaaaaaaaaaaaa").unwrap();
    let b = Cbc::new(Sm4::new(key), b"bbbbbbbbbbbbbbbb").unwrap();
    assert_ne!(
        a.encrypt(b"identical plaintext").unwrap(),
        b.encrypt(b"identical plaintext").unwrap()
    );
}

#[test]
fn decrypt_rejects_partial_blocks() {
    let cbc = reference_cipher();
    assert!(cbc.decrypt(&[0u8; 15]).is_err());
    assert!(cbc.decrypt(&[0u8; 17]).is_err());
    assert!(cbc.decrypt_from_hex("00ff00").is_err());
    assert!(cbc.decrypt_from_hex("not hex").is_err());
}

#[test]
fn decrypt_rejects_empty_ciphertext() {
    // Encryption always pads, so no genuine ciphertext is empty.
    let cbc = reference_cipher();
    assert!(cbc.decrypt(&[]).is_err());
    assert!(cbc.decrypt_from_hex("").is_err());
}

#[test]
fn unpad_rejects_malformed_padding() {
    // Pad byte zero
    let mut data = alloc::vec![0u8; 16];
    data[15] = 0;
    assert!(pkcs7_unpad(data).is_err());

    // Pad byte above the block size
    let mut data = alloc::vec![0u8; 16];
    data[15] = 17;
    assert!(pkcs7_unpad(data).is_err());

    // Pad byte longer than the input
    let data = alloc::vec![5u8, 5, 5, 5];
    assert!(pkcs7_unpad(alloc::vec![9u8, 9, 9]).is_err());
    assert!(pkcs7_unpad(data).is_err());

    // Mismatched pad bytes
    let mut data = alloc::vec![0u8; 16];
    data[13] = 2;
    data[14] = 3;
    data[15] = 3;
    assert!(pkcs7_unpad(data).is_err());

    // Valid padding passes
    let mut data = alloc::vec![7u8; 16];
    for b in &mut data[13..] {
        *b = 3;
    }
    assert_eq!(pkcs7_unpad(data).unwrap(), alloc::vec![7u8; 13]);
}

#[test]
fn pad_always_appends() {
    assert_eq!(pkcs7_pad(b"").len(), 16);
    assert_eq!(pkcs7_pad(&[0u8; 16]).len(), 32);
    let padded = pkcs7_pad(&[1u8; 10]);
    assert_eq!(padded.len(), 16);
    assert!(padded[10..].iter().all(|&b| b == 6));
}
