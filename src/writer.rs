//! writer.rs
//! Encoder counterpart of `MultiCipherReader`, primarily here so round trips
//! can be produced and verified without an external tool.
//!
//! The writer buffers plaintext and emits everything on `finish()`: header
//! (fresh random auth salt, per-link salts and IVs, tag over the chain
//! description) followed by the layered ciphertext. Layers are applied so
//! that the reader's stage 0 — the first header entry — strips the outermost
//! one.

use std::io::{self, Write};
use std::mem;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::{AUTH_ALG, AUTH_KEY_LEN_BITS, SALT_LEN, STREAM_MAGIC, STREAM_VERSION};
use crate::crypto::{AeadImpl, ChainAuthenticator};
use crate::header::{chain_description_bytes, encode_stream_header, ChainEntry, FormatError, StreamHeader};
use crate::session::CipherSession;
use crate::types::StreamError;

/// Buffering writer producing a multi-cipher stream on `finish`.
pub struct MultiCipherWriter<'s, W: Write> {
    sink: W,
    session: &'s CipherSession,
    cipher_ids: Vec<u8>,
    buf: Vec<u8>,
}

impl<'s, W: Write> MultiCipherWriter<'s, W> {
    /// `cipher_ids` lists the chain in header order; empty means the payload
    /// is written as-is after the (still authenticated) header.
    pub fn new(sink: W, session: &'s CipherSession, cipher_ids: &[u8]) -> Self {
        Self {
            sink,
            session,
            cipher_ids: cipher_ids.to_vec(),
            buf: Vec::new(),
        }
    }

    /// Encrypt the buffered plaintext and write header plus payload.
    /// Returns the sink.
    pub fn finish(mut self) -> Result<W, StreamError> {
        let mut auth_salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut auth_salt);
        let auth_key = self.session.derive_key(AUTH_ALG, AUTH_KEY_LEN_BITS, &auth_salt)?;

        // Build the chain entries and the matching seal transforms.
        let mut entries = Vec::with_capacity(self.cipher_ids.len());
        let mut seals: Vec<(AeadImpl, Vec<u8>)> = Vec::with_capacity(self.cipher_ids.len());
        for &id in &self.cipher_ids {
            let desc = self
                .session
                .catalog()
                .lookup(id)
                .ok_or(FormatError::UnknownCipherId { id })?
                .clone();

            let mut salt = [0u8; SALT_LEN];
            OsRng.fill_bytes(&mut salt);
            let mut iv = vec![0u8; desc.iv_len()];
            OsRng.fill_bytes(&mut iv);

            let key = self.session.derive_link_key(&desc, &salt)?;
            let aead = AeadImpl::for_descriptor(&desc, &key)?;
            seals.push((aead, iv.clone()));
            entries.push(ChainEntry {
                cipher_id: id,
                salt,
                iv,
            });
        }

        let mut auth = ChainAuthenticator::start(&auth_key)?;
        auth.update(&chain_description_bytes(&entries));
        let auth_tag = auth.finish();

        let header = StreamHeader {
            magic: STREAM_MAGIC,
            version: STREAM_VERSION,
            auth_salt,
            entries,
            auth_tag,
        };

        // Entry 0 is decrypted first, so its layer is sealed last.
        let mut payload = mem::take(&mut self.buf);
        for (aead, iv) in seals.iter().rev() {
            payload = aead.seal(iv, &payload)?;
        }

        self.sink.write_all(&encode_stream_header(&header))?;
        self.sink.write_all(&payload)?;
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl<W: Write> Write for MultiCipherWriter<'_, W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
