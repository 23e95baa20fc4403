//! multicipher-core
//!
//! Decoding of a composable, integrity-authenticated, multi-layer encrypted
//! stream format: a self-describing header names an ordered chain of cipher
//! layers, the chain description is HMAC-authenticated against tampering, and
//! the decrypted payload is exposed as an ordinary sequential byte source.
//!
//! Pure Rust, synchronous, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Collaborators and crypto
pub mod catalog;
pub mod crypto;
pub mod session;

// Wire format
pub mod header;

// Stream surfaces
pub mod chain;
pub mod reader;
pub mod writer;

// Observability
pub mod telemetry;

pub use catalog::{BuiltinCatalog, CipherAlg, CipherCatalog, CipherDescriptor};
pub use chain::{DecryptChain, DecryptStage};
pub use header::{ChainEntry, FormatError, IntegrityError, StreamHeader};
pub use reader::MultiCipherReader;
pub use session::CipherSession;
pub use types::StreamError;
pub use writer::MultiCipherWriter;
