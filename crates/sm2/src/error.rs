//! Error handling for the SM2 scheme layer

use core::fmt;

use algorithms::error::Error as PrimitiveError;

/// Error type for SM2 scheme operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A failure bubbled up from the primitive layer
    Primitive(PrimitiveError),
    /// A public or private key failed validation
    InvalidKey(&'static str),
    /// A plaintext failed validation
    InvalidPlaintext(&'static str),
    /// A ciphertext failed structural validation
    InvalidCiphertext(&'static str),
    /// A signature failed structural validation
    InvalidSignature(&'static str),
    /// A point that must lie on the curve does not
    NotOnCurve(&'static str),
    /// A derived point degenerated to the point at infinity
    PointAtInfinity(&'static str),
    /// Decryption failed integrity or sanity checks
    DecryptionFailed(&'static str),
    /// A key-exchange confirmation tag did not match
    TagMismatch(&'static str),
}

/// Result type for SM2 scheme operations.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "primitive error: {}", e),
            Error::InvalidKey(reason) => write!(f, "invalid key: {}", reason),
            Error::InvalidPlaintext(reason) => write!(f, "invalid plaintext: {}", reason),
            Error::InvalidCiphertext(reason) => write!(f, "invalid ciphertext: {}", reason),
            Error::InvalidSignature(reason) => write!(f, "invalid signature: {}", reason),
            Error::NotOnCurve(which) => write!(f, "{} is not on curve", which),
            Error::PointAtInfinity(which) => write!(f, "{} is point at infinity", which),
            Error::DecryptionFailed(reason) => write!(f, "decryption failed: {}", reason),
            Error::TagMismatch(message) => write!(f, "{}", message),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        Error::Primitive(err)
    }
}
