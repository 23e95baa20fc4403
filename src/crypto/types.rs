use std::fmt;

/// Key derivation failures. Always fatal for the stream being decoded.
#[derive(Debug)]
pub enum KdfError {
    /// Requested key size is not a positive multiple of 8 bits or exceeds
    /// what the PRF can produce.
    InvalidKeyLen { bits: usize },

    /// PRF-level failure with context.
    Failure(String),
}

impl fmt::Display for KdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KdfError::InvalidKeyLen { bits } => {
                write!(f, "invalid derived key size: {} bits", bits)
            }
            KdfError::Failure(msg) => write!(f, "kdf failure: {}", msg),
        }
    }
}

impl std::error::Error for KdfError {}

/// Failures while instantiating a decrypt transform from descriptor + key + IV.
#[derive(Debug)]
pub enum CipherInitError {
    /// Derived key length does not match the descriptor.
    InvalidKeyLen { expected: usize, actual: usize },

    /// IV length from the header does not match what the cipher accepts.
    InvalidIvLen { expected: usize, actual: usize },

    /// Cipher construction failed with context.
    Failure(String),
}

impl fmt::Display for CipherInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherInitError::InvalidKeyLen { expected, actual } => {
                write!(f, "invalid key length: expected={}, actual={}", expected, actual)
            }
            CipherInitError::InvalidIvLen { expected, actual } => {
                write!(f, "invalid IV length: expected={}, actual={}", expected, actual)
            }
            CipherInitError::Failure(msg) => write!(f, "cipher init failure: {}", msg),
        }
    }
}

impl std::error::Error for CipherInitError {}
