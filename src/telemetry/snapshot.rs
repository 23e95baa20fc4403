//! telemetry/snapshot.rs
//!
//! Immutable decode telemetry snapshot.
//!
//! Design notes:
//! - Snapshots are plain serializable values; counters stay mutable inside
//!   the reader, snapshots are what crosses API boundaries.
//! - Throughput is derived, never stored incrementally.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::DecodeCounters;

/// Point-in-time view of one reader's decode counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub headers_parsed: u64,
    pub chain_stages: u64,
    pub bytes_plaintext: u64,
    pub format_failures: u64,
    pub header_tag_failures: u64,
    pub payload_tag_failures: u64,
    pub io_failures: u64,
    pub elapsed_secs: f64,
    pub throughput_plaintext_bytes_per_sec: f64,
}

impl TelemetrySnapshot {
    pub fn from(counters: &DecodeCounters, elapsed_secs: f64) -> Self {
        let throughput = if elapsed_secs > 0.0 {
            counters.bytes_plaintext as f64 / elapsed_secs
        } else {
            0.0
        };

        Self {
            headers_parsed: counters.headers_parsed,
            chain_stages: counters.chain_stages,
            bytes_plaintext: counters.bytes_plaintext,
            format_failures: counters.format_failures,
            header_tag_failures: counters.header_tag_failures,
            payload_tag_failures: counters.payload_tag_failures,
            io_failures: counters.io_failures,
            elapsed_secs,
            throughput_plaintext_bytes_per_sec: throughput,
        }
    }

    /// JSON rendering for logs and external collectors.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".into())
    }
}
