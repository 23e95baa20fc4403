//! reader.rs
//! Public decoding surface: a sequential byte source over the decrypted
//! payload, however many cipher layers the header describes.
//!
//! Lifecycle is an explicit state machine so illegal transitions are
//! distinguishable instead of accidentally permitted:
//!
//! ```text
//! Unopened --first read--> Opened --close--> Closed
//!     \--header error--> Failed (terminal)
//! ```
//!
//! Construction is infallible; all I/O and all fallible parsing are deferred
//! to the first read. A parse failure poisons the reader permanently.

use std::io::{self, Read};
use std::mem;
use std::time::Instant;

use crate::chain::DecryptChain;
use crate::header::{decode_stream_header, StreamHeader};
use crate::session::CipherSession;
use crate::telemetry::DecodeCounters;
use crate::types::StreamError;

enum ReaderState<R: Read> {
    Unopened { source: R },
    Opened { chain: DecryptChain<R> },
    Failed,
    Closed,
}

/// Sequential reader over a multi-cipher encrypted stream.
///
/// Not safe for concurrent reads: lazy open is a one-time mutation guarded
/// only by the single-reader assumption. Build one reader per consumer;
/// independent readers may share one `CipherSession`.
pub struct MultiCipherReader<'s, R: Read> {
    state: ReaderState<R>,
    session: &'s CipherSession,
    header: Option<StreamHeader>,
    counters: DecodeCounters,
    started: Instant,
}

impl<'s, R: Read> MultiCipherReader<'s, R> {
    /// Wrap a raw source. Performs no I/O.
    pub fn new(source: R, session: &'s CipherSession) -> Self {
        Self {
            state: ReaderState::Unopened { source },
            session,
            header: None,
            counters: DecodeCounters::default(),
            started: Instant::now(),
        }
    }

    /// Parsed header, available once the first read has succeeded.
    pub fn header(&self) -> Option<&StreamHeader> {
        self.header.as_ref()
    }

    /// Decode-side telemetry counters.
    pub fn counters(&self) -> &DecodeCounters {
        &self.counters
    }

    /// Seconds since construction, for telemetry snapshots.
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Parse the header and assemble the chain. One-shot: any failure leaves
    /// the reader in `Failed` with the source discarded.
    fn open(&mut self) -> Result<(), StreamError> {
        let state = mem::replace(&mut self.state, ReaderState::Failed);
        let mut source = match state {
            ReaderState::Unopened { source } => source,
            // Callers check the state before coming here.
            _ => return Err(StreamError::ReaderFailed),
        };

        match decode_stream_header(&mut source, self.session) {
            Ok((header, stages)) => {
                self.counters.add_header(stages.len());
                self.header = Some(header);
                self.state = ReaderState::Opened {
                    chain: DecryptChain::new(source, stages),
                };
                Ok(())
            }
            Err(e) => {
                self.counters.add_failure(&e);
                Err(e)
            }
        }
    }

    /// Read decrypted payload bytes into `out`. Returns 0 at end of payload.
    ///
    /// The first call triggers header parsing and chain assembly.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        if matches!(self.state, ReaderState::Unopened { .. }) {
            self.open()?;
        }
        match &mut self.state {
            ReaderState::Opened { chain } => match chain.read_bytes(out) {
                Ok(n) => {
                    self.counters.add_plaintext(n);
                    Ok(n)
                }
                Err(e) => {
                    // Payload errors poison the reader like header errors do.
                    self.counters.add_failure(&e);
                    self.state = ReaderState::Failed;
                    Err(e)
                }
            },
            ReaderState::Failed => Err(StreamError::ReaderFailed),
            ReaderState::Closed => Err(StreamError::ReaderClosed),
            // `open` either moved to Opened or returned the error above.
            ReaderState::Unopened { .. } => unreachable!("open() left reader unopened"),
        }
    }

    /// Read one decrypted byte, `None` at end of payload.
    pub fn read_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let mut b = [0u8; 1];
        match self.read_bytes(&mut b)? {
            0 => Ok(None),
            _ => Ok(Some(b[0])),
        }
    }

    /// Release the chain and the underlying source. Double close is a no-op.
    pub fn close(&mut self) {
        // Dropping the chain drops buffered cipher state and the raw source.
        self.state = ReaderState::Closed;
    }

    /// Whether this reader has been closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, ReaderState::Closed)
    }
}

impl<R: Read> Read for MultiCipherReader<'_, R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        self.read_bytes(out).map_err(io::Error::from)
    }
}
