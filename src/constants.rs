/// Magic number for the multi-cipher stream envelope.
/// "MCS1" = Multi-Cipher Stream v1
// - A **protocol magic field** is `[u8; 4]` so the type itself enforces
//   "exactly 4 bytes" and matches the struct field type.
pub const STREAM_MAGIC: [u8; 4] = *b"MCS1";

/// Single supported stream version.
pub const STREAM_VERSION: u8 = 1;

/// Size of every salt in the header (auth salt and per-link salts).
pub const SALT_LEN: usize = 12;

/// Algorithm name handed to the key deriver for the header authentication key.
pub const AUTH_ALG: &str = "hmac-sha256";

/// Header authentication key size in bits.
pub const AUTH_KEY_LEN_BITS: usize = 256;

/// Header authentication tag size in bytes (HMAC-SHA256 output).
pub const AUTH_TAG_LEN: usize = 32;

/// AEAD tag length trailing each encrypted layer (bytes).
pub const PAYLOAD_TAG_LEN: usize = 16;

/// Cipher identifiers (mirrored in headers).
pub mod cipher_ids {
    pub const AES128_GCM: u8          = 0x01;
    pub const AES256_GCM: u8          = 0x02;
    pub const CHACHA20_POLY1305: u8   = 0x03;
    pub const XCHACHA20_POLY1305: u8  = 0x04;
}
