//! catalog.rs
//! Cipher descriptor registry consumed while parsing chain entries.
//!
//! Design notes:
//! - The catalog is an injected capability, not a process-wide singleton, so
//!   tests can run against a restricted cipher set deterministically.
//! - Absence of an id is a hard format error at the call site, never a
//!   fallback to some default cipher.

use num_enum::TryFromPrimitive;

use crate::constants::cipher_ids;

/// Cipher algorithms known to the built-in registry.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CipherAlg {
    Aes128Gcm         = cipher_ids::AES128_GCM,
    Aes256Gcm         = cipher_ids::AES256_GCM,
    ChaCha20Poly1305  = cipher_ids::CHACHA20_POLY1305,
    XChaCha20Poly1305 = cipher_ids::XCHACHA20_POLY1305,
}

impl CipherAlg {
    /// Stable algorithm name handed to the key deriver.
    pub fn name(self) -> &'static str {
        match self {
            CipherAlg::Aes128Gcm => "aes128-gcm",
            CipherAlg::Aes256Gcm => "aes256-gcm",
            CipherAlg::ChaCha20Poly1305 => "chacha20-poly1305",
            CipherAlg::XChaCha20Poly1305 => "xchacha20-poly1305",
        }
    }
}

/// Wire-level description of one cipher: id plus key and IV geometry.
///
/// The IV size drives parsing (the header stores exactly `iv_len()` IV bytes
/// per chain entry), so a descriptor lookup must happen before the entry can
/// be consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherDescriptor {
    pub id: u8,
    pub alg: CipherAlg,
    pub key_len_bits: usize,
    pub iv_len_bits: usize,
}

impl CipherDescriptor {
    pub fn key_len(&self) -> usize {
        self.key_len_bits / 8
    }

    pub fn iv_len(&self) -> usize {
        self.iv_len_bits / 8
    }
}

/// Read-only cipher registry. Deterministic: the same id always resolves to
/// the same descriptor for the lifetime of the catalog.
pub trait CipherCatalog: Send + Sync {
    fn lookup(&self, id: u8) -> Option<&CipherDescriptor>;
}

/// Default registry covering the four built-in AEAD ciphers.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    descriptors: Vec<CipherDescriptor>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self {
            descriptors: vec![
                CipherDescriptor {
                    id: cipher_ids::AES128_GCM,
                    alg: CipherAlg::Aes128Gcm,
                    key_len_bits: 128,
                    iv_len_bits: 96,
                },
                CipherDescriptor {
                    id: cipher_ids::AES256_GCM,
                    alg: CipherAlg::Aes256Gcm,
                    key_len_bits: 256,
                    iv_len_bits: 96,
                },
                CipherDescriptor {
                    id: cipher_ids::CHACHA20_POLY1305,
                    alg: CipherAlg::ChaCha20Poly1305,
                    key_len_bits: 256,
                    iv_len_bits: 96,
                },
                CipherDescriptor {
                    id: cipher_ids::XCHACHA20_POLY1305,
                    alg: CipherAlg::XChaCha20Poly1305,
                    key_len_bits: 256,
                    iv_len_bits: 192,
                },
            ],
        }
    }

    /// Catalog restricted to the given ids. Unknown ids are skipped.
    /// Intended for tests that must prove unknown-cipher handling.
    pub fn restricted(ids: &[u8]) -> Self {
        let full = Self::new();
        Self {
            descriptors: full
                .descriptors
                .into_iter()
                .filter(|d| ids.contains(&d.id))
                .collect(),
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherCatalog for BuiltinCatalog {
    fn lookup(&self, id: u8) -> Option<&CipherDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }
}
