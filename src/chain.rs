//! chain.rs
//! The decrypt chain: an explicit ordered list of transform stages plus one
//! pull function, instead of N nested reader wrappers.
//!
//! Stage order matches header order: stage 0 is applied to the raw payload
//! bytes first, the last stage yields the caller-visible plaintext. An empty
//! chain is the identity transform and streams straight from the source.
//!
//! Every built-in cipher mode carries a trailing tag, so a stage needs its
//! whole layer before any byte of it is verifiable. The chain therefore
//! drains the source on first pull, folds the stages in order, and serves the
//! verified plaintext sequentially. Fail-closed: a tag mismatch on any layer
//! means no byte of that layer's output is ever released.

use std::io::Read;

use crate::crypto::AeadImpl;
use crate::types::StreamError;

/// One decrypt transform: cipher instance plus its header-supplied IV.
pub struct DecryptStage {
    cipher_id: u8,
    aead: AeadImpl,
    iv: Vec<u8>,
}

impl DecryptStage {
    pub fn new(cipher_id: u8, aead: AeadImpl, iv: Vec<u8>) -> Result<Self, StreamError> {
        aead.check_iv(&iv)?;
        Ok(Self { cipher_id, aead, iv })
    }

    pub fn cipher_id(&self) -> u8 {
        self.cipher_id
    }

    /// Strip this layer: verify the trailing tag, return the layer beneath.
    fn open(&self, ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, StreamError> {
        self.aead.open(&self.iv, ciphertext_and_tag)
    }
}

enum ChainState {
    /// No stages: bytes pass through untouched, streamed.
    Identity,
    /// Stages pending; the source has not been drained yet.
    Pending,
    /// Decrypted plaintext being served from `buf[pos..]`.
    Drained { buf: Vec<u8>, pos: usize },
}

/// Ordered decrypt transforms over a raw byte source.
pub struct DecryptChain<R: Read> {
    source: R,
    stages: Vec<DecryptStage>,
    state: ChainState,
}

impl<R: Read> DecryptChain<R> {
    pub fn new(source: R, stages: Vec<DecryptStage>) -> Self {
        let state = if stages.is_empty() {
            ChainState::Identity
        } else {
            ChainState::Pending
        };
        Self {
            source,
            stages,
            state,
        }
    }

    /// Number of transform stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Cipher ids of the stages, in application order.
    pub fn stage_ids(&self) -> Vec<u8> {
        self.stages.iter().map(|s| s.cipher_id).collect()
    }

    /// Drain the source and fold every stage over it, innermost first.
    fn drain(&mut self) -> Result<(), StreamError> {
        let mut buf = Vec::new();
        self.source.read_to_end(&mut buf)?;
        for stage in &self.stages {
            buf = stage.open(&buf)?;
        }
        self.state = ChainState::Drained { buf, pos: 0 };
        Ok(())
    }

    /// Pull decrypted bytes into `out`. Returns 0 at end of payload.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        if out.is_empty() {
            return Ok(0);
        }
        match &mut self.state {
            ChainState::Identity => Ok(self.source.read(out)?),
            ChainState::Pending => {
                self.drain()?;
                self.read_bytes(out)
            }
            ChainState::Drained { buf, pos } => {
                let n = out.len().min(buf.len() - *pos);
                out[..n].copy_from_slice(&buf[*pos..*pos + n]);
                *pos += n;
                Ok(n)
            }
        }
    }

    /// Pull a single decrypted byte, `None` at end of payload.
    pub fn read_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let mut b = [0u8; 1];
        match self.read_bytes(&mut b)? {
            0 => Ok(None),
            _ => Ok(Some(b[0])),
        }
    }
}
