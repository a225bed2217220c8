use super::*;

#[test]
fn parameter_error_display() {
    let err = Error::param("scalar", "value out of range");
    assert_eq!(
        err.to_string(),
        "Invalid parameter 'scalar': value out of range"
    );
}

#[test]
fn length_error_display() {
    let err = Error::Length {
        context: "SM4 block",
        expected: 16,
        actual: 15,
    };
    assert_eq!(
        err.to_string(),
        "Invalid length for SM4 block: expected 16, got 15"
    );
}

#[test]
fn validate_length_passes_and_fails() {
    assert!(validate::length("digest", 32, 32).is_ok());
    assert!(validate::length("digest", 31, 32).is_err());
    assert!(validate::min_length("ciphertext", 196, 196).is_ok());
    assert!(validate::min_length("ciphertext", 100, 196).is_err());
}

#[test]
fn validate_parameter_reports_reason() {
    let err = validate::parameter(false, "padding", "pad byte out of range").unwrap_err();
    match err {
        Error::Parameter { name, reason } => {
            assert_eq!(name, "padding");
            assert_eq!(reason, "pad byte out of range");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
