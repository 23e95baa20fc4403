//! crypto/aead.rs
//! AEAD transforms backing each chain link.
//!
//! Design notes:
//! - All four ciphers carry a 16-byte tag trailing the ciphertext; decryption
//!   is verify-then-release, so no unverified plaintext ever leaves a link.
//! - The IV comes from the header (authenticated), the key from the deriver.
//! - Cipher selection is driven by the catalog descriptor, never by guessing.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce as AesNonce};
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce, XChaCha20Poly1305, XNonce};

use crate::catalog::{CipherAlg, CipherDescriptor};
use crate::constants::PAYLOAD_TAG_LEN;
use crate::crypto::types::CipherInitError;
use crate::header::{FormatError, IntegrityError};
use crate::types::StreamError;

/// Unified AEAD implementation selected by a catalog descriptor.
pub enum AeadImpl {
    Aes128Gcm(Aes128Gcm),
    Aes256Gcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
    XChaCha(XChaCha20Poly1305),
}

impl AeadImpl {
    /// Instantiate the cipher for `desc` with a derived key.
    pub fn for_descriptor(desc: &CipherDescriptor, key: &[u8]) -> Result<Self, CipherInitError> {
        if key.len() != desc.key_len() {
            return Err(CipherInitError::InvalidKeyLen {
                expected: desc.key_len(),
                actual: key.len(),
            });
        }

        let invalid_key = || CipherInitError::InvalidKeyLen {
            expected: desc.key_len(),
            actual: key.len(),
        };

        match desc.alg {
            CipherAlg::Aes128Gcm => Ok(Self::Aes128Gcm(
                Aes128Gcm::new_from_slice(key).map_err(|_| invalid_key())?,
            )),
            CipherAlg::Aes256Gcm => Ok(Self::Aes256Gcm(
                Aes256Gcm::new_from_slice(key).map_err(|_| invalid_key())?,
            )),
            CipherAlg::ChaCha20Poly1305 => Ok(Self::ChaCha(
                ChaCha20Poly1305::new_from_slice(key).map_err(|_| invalid_key())?,
            )),
            CipherAlg::XChaCha20Poly1305 => Ok(Self::XChaCha(
                XChaCha20Poly1305::new_from_slice(key).map_err(|_| invalid_key())?,
            )),
        }
    }

    /// IV length this cipher accepts, in bytes.
    pub fn iv_len(&self) -> usize {
        match self {
            AeadImpl::Aes128Gcm(_) | AeadImpl::Aes256Gcm(_) | AeadImpl::ChaCha(_) => 12,
            AeadImpl::XChaCha(_) => 24,
        }
    }

    /// Check an IV from the header against this cipher's geometry.
    pub fn check_iv(&self, iv: &[u8]) -> Result<(), CipherInitError> {
        if iv.len() != self.iv_len() {
            return Err(CipherInitError::InvalidIvLen {
                expected: self.iv_len(),
                actual: iv.len(),
            });
        }
        Ok(())
    }

    /// Encrypt one whole layer (writer side). Output is ciphertext || tag.
    pub fn seal(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, StreamError> {
        self.check_iv(iv)?;
        let payload = Payload {
            msg: plaintext,
            aad: b"",
        };
        let sealed = match self {
            AeadImpl::Aes128Gcm(cipher) => cipher.encrypt(AesNonce::from_slice(iv), payload),
            AeadImpl::Aes256Gcm(cipher) => cipher.encrypt(AesNonce::from_slice(iv), payload),
            AeadImpl::ChaCha(cipher) => cipher.encrypt(ChaNonce::from_slice(iv), payload),
            AeadImpl::XChaCha(cipher) => cipher.encrypt(XNonce::from_slice(iv), payload),
        };
        sealed.map_err(|_| {
            StreamError::CipherInit(CipherInitError::Failure("AEAD seal failed".into()))
        })
    }

    /// Decrypt one whole layer. Input is ciphertext || tag; tag verification
    /// happens before any plaintext is released.
    pub fn open(&self, iv: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, StreamError> {
        self.check_iv(iv)?;
        if ciphertext_and_tag.len() < PAYLOAD_TAG_LEN {
            return Err(FormatError::Truncated {
                field: "payload auth tag",
                need: PAYLOAD_TAG_LEN,
                have: ciphertext_and_tag.len(),
            }
            .into());
        }

        let payload = Payload {
            msg: ciphertext_and_tag,
            aad: b"",
        };
        let opened = match self {
            AeadImpl::Aes128Gcm(cipher) => cipher.decrypt(AesNonce::from_slice(iv), payload),
            AeadImpl::Aes256Gcm(cipher) => cipher.decrypt(AesNonce::from_slice(iv), payload),
            AeadImpl::ChaCha(cipher) => cipher.decrypt(ChaNonce::from_slice(iv), payload),
            AeadImpl::XChaCha(cipher) => cipher.decrypt(XNonce::from_slice(iv), payload),
        };
        opened.map_err(|_| StreamError::Integrity(IntegrityError::PayloadTagMismatch))
    }
}
