//! telemetry/counters.rs
//! Mutable counters collected while decoding a stream.
//!
//! Summary: header and failure counts plus plaintext byte totals, converted
//! into an immutable TelemetrySnapshot when the caller asks for one.

use crate::types::StreamError;

/// Deterministic counters collected during decode.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DecodeCounters {
    pub headers_parsed: u64,
    pub chain_stages: u64,
    pub bytes_plaintext: u64,
    pub format_failures: u64,
    pub header_tag_failures: u64,
    pub payload_tag_failures: u64,
    pub io_failures: u64,
    pub other_failures: u64,
}

impl DecodeCounters {
    /// Record one successfully parsed and authenticated header.
    pub fn add_header(&mut self, stages: usize) {
        self.headers_parsed += 1;
        self.chain_stages += stages as u64;
    }

    /// Record plaintext bytes handed to the caller.
    pub fn add_plaintext(&mut self, n: usize) {
        self.bytes_plaintext += n as u64;
    }

    /// Classify and record a decode failure.
    pub fn add_failure(&mut self, e: &StreamError) {
        use crate::header::IntegrityError;
        match e {
            StreamError::Format(_) => self.format_failures += 1,
            StreamError::Integrity(IntegrityError::HeaderTagMismatch { .. }) => {
                self.header_tag_failures += 1
            }
            StreamError::Integrity(IntegrityError::PayloadTagMismatch) => {
                self.payload_tag_failures += 1
            }
            StreamError::Io(_) => self.io_failures += 1,
            _ => self.other_failures += 1,
        }
    }

    /// Total failures of any class.
    pub fn failures(&self) -> u64 {
        self.format_failures
            + self.header_tag_failures
            + self.payload_tag_failures
            + self.io_failures
            + self.other_failures
    }
}
