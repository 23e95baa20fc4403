use std::io;

use crate::crypto::{CipherInitError, KdfError};
use crate::header::{FormatError, IntegrityError};

/// Unified stream error covering I/O, format, integrity, key-derivation, and
/// cipher-setup failures plus reader lifecycle violations.
/// - Ergonomic `From<T>` impls enable `?` across the decoder.
/// - Every failure is fatal: the reader that produced it is permanently
///   poisoned and no step is retried at this layer.
#[derive(Debug)]
pub enum StreamError {
    /// I/O error from the underlying raw source, surfaced as-is.
    Io(io::Error),

    /// Malformed stream (bad magic, unsupported version, unknown cipher id,
    /// truncated fixed-size field).
    Format(FormatError),

    /// Tamper detection (header tag mismatch, payload tag mismatch).
    Integrity(IntegrityError),

    /// Key derivation failed (invalid parameters or PRF failure).
    KeyDerivation(KdfError),

    /// Decrypt transform could not be instantiated.
    CipherInit(CipherInitError),

    /// Read or close on a reader that was already closed.
    ReaderClosed,

    /// Read on a reader whose header parsing previously failed.
    ReaderFailed,
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::Io(e) => write!(f, "I/O error: {}", e),
            StreamError::Format(e) => write!(f, "format error: {}", e),
            StreamError::Integrity(e) => write!(f, "integrity error: {}", e),
            StreamError::KeyDerivation(e) => write!(f, "key derivation error: {}", e),
            StreamError::CipherInit(e) => write!(f, "cipher init error: {}", e),
            StreamError::ReaderClosed => write!(f, "reader is already closed"),
            StreamError::ReaderFailed => write!(f, "reader failed during header parsing"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(e) => Some(e),
            StreamError::Format(e) => Some(e),
            StreamError::Integrity(e) => Some(e),
            StreamError::KeyDerivation(e) => Some(e),
            StreamError::CipherInit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        StreamError::Io(e)
    }
}

impl From<FormatError> for StreamError {
    fn from(e: FormatError) -> Self {
        StreamError::Format(e)
    }
}

impl From<IntegrityError> for StreamError {
    fn from(e: IntegrityError) -> Self {
        StreamError::Integrity(e)
    }
}

impl From<KdfError> for StreamError {
    fn from(e: KdfError) -> Self {
        StreamError::KeyDerivation(e)
    }
}

impl From<CipherInitError> for StreamError {
    fn from(e: CipherInitError) -> Self {
        StreamError::CipherInit(e)
    }
}

/// Bridge into `std::io::Error` for the `io::Read` surface.
impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            StreamError::Format(_) | StreamError::Integrity(_) => {
                io::Error::new(io::ErrorKind::InvalidData, e)
            }
            _ => io::Error::other(e),
        }
    }
}
