//! header/encode.rs
//! Header serialization.
//!
//! Design notes:
//! - Byte order must match `decode.rs` exactly: magic, version, auth salt,
//!   chain count, entries (id, salt, IV each), trailing tag.
//! - `chain_description_bytes` is the single definition of what the header
//!   tag covers; writer-side tag computation and tests both go through it.

use crate::header::types::{ChainEntry, StreamHeader};

/// The exact bytes the header tag authenticates: the chain-count byte
/// followed by every entry's id, salt, and IV, in stream order.
pub fn chain_description_bytes(entries: &[ChainEntry]) -> Vec<u8> {
    let mut out = vec![entries.len() as u8];
    for entry in entries {
        out.push(entry.cipher_id);
        out.extend_from_slice(&entry.salt);
        out.extend_from_slice(&entry.iv);
    }
    out
}

/// Serialize a complete header, tag included.
pub fn encode_stream_header(h: &StreamHeader) -> Vec<u8> {
    let description = chain_description_bytes(&h.entries);
    let mut out = Vec::with_capacity(
        h.magic.len() + 1 + h.auth_salt.len() + description.len() + h.auth_tag.len(),
    );
    out.extend_from_slice(&h.magic);
    out.push(h.version);
    out.extend_from_slice(&h.auth_salt);
    out.extend_from_slice(&description);
    out.extend_from_slice(&h.auth_tag);
    out
}
