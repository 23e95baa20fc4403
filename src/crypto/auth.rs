//! crypto/auth.rs
//! Keyed running digest over the header's chain description.
//!
//! Design notes:
//! - HMAC-SHA256 keyed by a key derived from the header's auth salt, so the
//!   authenticator cannot exist before that salt has been read.
//! - `finish` consumes the authenticator: single use is enforced by the type
//!   system rather than a runtime flag. One authenticator per header.
//! - Tag comparison is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::constants::AUTH_TAG_LEN;
use crate::crypto::types::KdfError;
use crate::header::IntegrityError;

type HmacSha256 = Hmac<Sha256>;

/// Running digest over the chain-description bytes, in stream order.
pub struct ChainAuthenticator {
    mac: HmacSha256,
}

impl ChainAuthenticator {
    pub fn start(key: &[u8]) -> Result<Self, KdfError> {
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|_| KdfError::Failure("invalid HMAC key".into()))?;
        Ok(Self { mac })
    }

    /// Accumulate bytes. Order-sensitive.
    pub fn update(&mut self, bytes: &[u8]) {
        self.mac.update(bytes);
    }

    /// Final tag. Consumes the authenticator.
    pub fn finish(self) -> [u8; AUTH_TAG_LEN] {
        let out = self.mac.finalize().into_bytes();
        let mut tag = [0u8; AUTH_TAG_LEN];
        tag.copy_from_slice(&out);
        tag
    }

    /// Finalize and compare against the tag read from the stream.
    pub fn verify(self, stored: &[u8; AUTH_TAG_LEN]) -> Result<(), IntegrityError> {
        let computed = self.finish();
        if bool::from(computed[..].ct_eq(&stored[..])) {
            Ok(())
        } else {
            Err(IntegrityError::HeaderTagMismatch {
                computed,
                stored: *stored,
            })
        }
    }
}
