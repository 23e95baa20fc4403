//! crypto/kdf.rs
//! Password-based key derivation for authentication and per-link cipher keys.
//!
//! Design:
//! - HKDF-Extract(password, salt) -> PRK
//! - HKDF-Expand(PRK, info) -> key of the requested size
//!
//! The 'info' string binds the algorithm name and key size, so the key for
//! "aes256-gcm"/256 can never collide with the key for "hmac-sha256"/256
//! even under identical salts. Salts are random per stream; derivation is
//! fully deterministic given (algorithm, size, password, salt).

use hkdf::Hkdf;
use sha2::Sha256;

use crate::crypto::types::KdfError;

/// Longest key HKDF-SHA256 can produce (255 * hash length), in bits.
const MAX_KEY_LEN_BITS: usize = 255 * 32 * 8;

/// Deterministic password-to-key derivation.
///
/// Injectable so tests (or callers with an external KDF policy) can replace
/// the default. Implementations must be pure: same inputs, same key.
pub trait KeyDeriver: Send + Sync {
    fn derive(
        &self,
        algorithm: &str,
        key_len_bits: usize,
        password: &str,
        salt: &[u8],
    ) -> Result<Vec<u8>, KdfError>;
}

/// Default deriver: HKDF-SHA256 with the password as input key material.
#[derive(Debug, Clone, Default)]
pub struct HkdfSha256Deriver;

impl KeyDeriver for HkdfSha256Deriver {
    fn derive(
        &self,
        algorithm: &str,
        key_len_bits: usize,
        password: &str,
        salt: &[u8],
    ) -> Result<Vec<u8>, KdfError> {
        if key_len_bits == 0 || key_len_bits % 8 != 0 || key_len_bits > MAX_KEY_LEN_BITS {
            return Err(KdfError::InvalidKeyLen { bits: key_len_bits });
        }
        if salt.is_empty() {
            return Err(KdfError::Failure("salt must not be empty".into()));
        }

        let mut info = Vec::with_capacity(algorithm.len() + 8);
        info.extend_from_slice(algorithm.as_bytes());
        info.extend_from_slice(&(key_len_bits as u32).to_le_bytes());

        let hk = Hkdf::<Sha256>::new(Some(salt), password.as_bytes());
        let mut key = vec![0u8; key_len_bits / 8];
        hk.expand(&info, &mut key)
            .map_err(|_| KdfError::Failure("HKDF expand failed (SHA-256)".into()))?;
        Ok(key)
    }
}
