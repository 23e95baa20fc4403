//! header/types.rs
//! Stream header structs and the format/integrity error taxonomy.
//!
//! Industry notes:
//! - The header is self-describing: each chain entry's cipher id determines
//!   how many IV bytes follow it, so parsing and descriptor lookup interleave.
//! - The trailing tag authenticates the chain-description bytes only (count
//!   plus every entry), never magic, version, or the auth salt. The auth salt
//!   cannot be covered because the tag key is derived from it; magic and
//!   version carry no secret-dependent information.

use std::fmt;

use crate::catalog::CipherAlg;
use crate::constants::{AUTH_TAG_LEN, SALT_LEN, STREAM_MAGIC};
use crate::utils::{enum_name_or_hex, fmt_bytes};

/// One cipher layer as encoded in the header: descriptor reference, salt for
/// key derivation, and the IV. Owns no key material; keys are derived on
/// demand and handed straight to the cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    pub cipher_id: u8,
    pub salt: [u8; SALT_LEN],
    pub iv: Vec<u8>,
}

/// Fully parsed stream header.
///
/// `auth_tag` covers exactly the chain-count byte and every entry's encoded
/// bytes in stream order; see `encode::chain_description_bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    pub magic: [u8; 4],
    pub version: u8,
    pub auth_salt: [u8; SALT_LEN],
    pub entries: Vec<ChainEntry>,
    pub auth_tag: [u8; AUTH_TAG_LEN],
}

impl StreamHeader {
    /// Number of chain links described by this header.
    pub fn chain_len(&self) -> usize {
        self.entries.len()
    }

    /// Cipher ids in stream order. Innermost (applied first on decode) first.
    pub fn cipher_ids(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.cipher_id).collect()
    }
}

/// Malformed-stream errors. Always fatal, never retried.
#[derive(Debug)]
pub enum FormatError {
    /// Magic bytes do not match the format identifier.
    BadMagic { have: [u8; 4] },

    /// Version byte does not match the single supported version.
    UnsupportedVersion { have: u8 },

    /// Chain entry references an id the catalog does not know.
    UnknownCipherId { id: u8 },

    /// Source exhausted inside a fixed-size field.
    Truncated {
        field: &'static str,
        need: usize,
        have: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FormatError::*;
        match self {
            BadMagic { have } => write!(
                f,
                "bad magic: expected {}, got {}",
                fmt_bytes(&STREAM_MAGIC),
                fmt_bytes(have)
            ),
            UnsupportedVersion { have } => write!(f, "unsupported stream version: {}", have),
            UnknownCipherId { id } => {
                write!(f, "unknown cipher id: {}", enum_name_or_hex::<CipherAlg>(*id))
            }
            Truncated { field, need, have } => {
                write!(f, "truncated {}: {} of {} bytes", field, have, need)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Tamper-detection errors. Always fatal; no bytes produced after detection
/// may be treated as trustworthy.
#[derive(Debug)]
pub enum IntegrityError {
    /// Computed chain-description tag does not match the stored one.
    HeaderTagMismatch {
        computed: [u8; AUTH_TAG_LEN],
        stored: [u8; AUTH_TAG_LEN],
    },

    /// A payload layer's trailing AEAD tag failed verification.
    PayloadTagMismatch,
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityError::HeaderTagMismatch { computed, stored } => write!(
                f,
                "header tag mismatch: computed {} but stream carries {}",
                hex::encode(computed),
                hex::encode(stored)
            ),
            IntegrityError::PayloadTagMismatch => write!(f, "payload tag mismatch"),
        }
    }
}

impl std::error::Error for IntegrityError {}
