// Shared helpers for the integration suites.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use multicipher_core::constants::{AUTH_TAG_LEN, SALT_LEN, STREAM_MAGIC};
use multicipher_core::{
    BuiltinCatalog, CipherCatalog, CipherSession, MultiCipherReader, MultiCipherWriter,
    StreamError,
};

pub const PASSWORD: &str = "correct horse battery staple";

pub fn session() -> CipherSession {
    CipherSession::new(PASSWORD)
}

/// Encode `payload` behind the given cipher chain.
pub fn encode_stream(payload: &[u8], cipher_ids: &[u8], session: &CipherSession) -> Vec<u8> {
    let mut w = MultiCipherWriter::new(Vec::new(), session, cipher_ids);
    w.write_all(payload).unwrap();
    w.finish().unwrap()
}

/// Decode a full stream into a plaintext vector.
pub fn decode_stream(bytes: &[u8], session: &CipherSession) -> Result<Vec<u8>, StreamError> {
    let mut r = MultiCipherReader::new(Cursor::new(bytes.to_vec()), session);
    let mut out = Vec::new();
    let mut buf = [0u8; 257];
    loop {
        let n = r.read_bytes(&mut buf)?;
        if n == 0 {
            return Ok(out);
        }
        out.extend_from_slice(&buf[..n]);
    }
}

/// Offset of the chain-count byte.
pub fn count_offset() -> usize {
    STREAM_MAGIC.len() + 1 + SALT_LEN
}

/// Total header length for a chain over the built-in catalog.
pub fn header_len(cipher_ids: &[u8]) -> usize {
    let catalog = BuiltinCatalog::new();
    let entries: usize = cipher_ids
        .iter()
        .map(|&id| 1 + SALT_LEN + catalog.lookup(id).unwrap().iv_len())
        .sum();
    count_offset() + 1 + entries + AUTH_TAG_LEN
}
