//! telemetry/mod.rs
//! Decode-side counters and immutable snapshots.
//!
//! Industry notes:
//! - Immutable snapshots prevent accidental mutation and are safe to ship
//!   across API boundaries or serialize for collectors.
//! - Failure counts are classified by error kind, mirroring the crate's
//!   error taxonomy, so integrity failures are distinguishable from plain
//!   malformed input in dashboards.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
