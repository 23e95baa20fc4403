//! header/mod.rs
//! Self-describing, integrity-authenticated stream header.
//!
//! Wire layout (all integers single unsigned bytes):
//!
//! ```text
//! MAGIC       4 bytes   "MCS1"
//! VERSION     1 byte    must equal STREAM_VERSION
//! AUTH_SALT   12 bytes  seeds the header-tag key; outside the tag
//! CHAIN_COUNT 1 byte    N, tag-covered
//!   N times:
//!     CIPHER_ID  1 byte           tag-covered
//!     LINK_SALT  12 bytes         tag-covered
//!     LINK_IV    descriptor-sized tag-covered
//! AUTH_TAG    32 bytes  HMAC-SHA256 over the tag-covered bytes
//! PAYLOAD     remaining bytes, layered ciphertext
//! ```

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
