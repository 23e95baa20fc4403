pub mod types;
pub mod kdf;
pub mod auth;
pub mod aead;

pub use types::*;
pub use kdf::*;
pub use auth::*;
pub use aead::*;
