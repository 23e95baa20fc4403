//! header/decode.rs
//!
//! Authenticated header parsing.
//!
//! Design notes:
//! - Strictly forward-only: each field is read exactly once, in wire order,
//!   and a failure at any step abandons the stream for good.
//! - The authenticator is created only after the auth salt has been read,
//!   because its key is derived from that salt. Magic, version, and the salt
//!   itself are therefore outside the tag; everything from the chain-count
//!   byte to the last IV byte is inside it.
//! - Descriptor lookup happens immediately after the cipher-id byte: the
//!   descriptor's IV size decides how many bytes the entry still owes, so an
//!   unknown id stops parsing before any further byte is consumed.

use std::io::Read;

use crate::chain::DecryptStage;
use crate::constants::{
    AUTH_ALG, AUTH_KEY_LEN_BITS, AUTH_TAG_LEN, SALT_LEN, STREAM_MAGIC, STREAM_VERSION,
};
use crate::crypto::{AeadImpl, ChainAuthenticator};
use crate::header::types::{ChainEntry, FormatError, StreamHeader};
use crate::session::CipherSession;
use crate::types::StreamError;
use crate::utils::{read_exact_field, read_u8_field};

/// Parse and authenticate a stream header, building the decrypt stages as
/// entries are consumed.
///
/// On success the source is positioned at the first payload byte and the
/// returned stages are in application order (stage 0 strips the outermost
/// ciphertext layer). `Ok` implies the chain description authenticated.
pub fn decode_stream_header<R: Read>(
    r: &mut R,
    session: &CipherSession,
) -> Result<(StreamHeader, Vec<DecryptStage>), StreamError> {
    // Magic and version come first and fail without touching the key deriver.
    let mut magic = [0u8; STREAM_MAGIC.len()];
    read_exact_field(r, &mut magic, "magic")?;
    if magic != STREAM_MAGIC {
        return Err(FormatError::BadMagic { have: magic }.into());
    }

    let version = read_u8_field(r, "version")?;
    if version != STREAM_VERSION {
        return Err(FormatError::UnsupportedVersion { have: version }.into());
    }

    // The auth salt seeds the authenticator key, so it cannot be covered by
    // the tag itself.
    let mut auth_salt = [0u8; SALT_LEN];
    read_exact_field(r, &mut auth_salt, "auth salt")?;
    let auth_key = session.derive_key(AUTH_ALG, AUTH_KEY_LEN_BITS, &auth_salt)?;
    let mut auth = ChainAuthenticator::start(&auth_key)?;

    // Chain description: count, then (id, salt, iv) per entry. Every byte of
    // it feeds the authenticator in stream order.
    let count = read_u8_field(r, "chain count")?;
    auth.update(&[count]);

    let mut entries = Vec::with_capacity(count as usize);
    let mut stages = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let id = read_u8_field(r, "cipher id")?;
        auth.update(&[id]);

        let desc = session
            .catalog()
            .lookup(id)
            .ok_or(FormatError::UnknownCipherId { id })?
            .clone();

        let mut salt = [0u8; SALT_LEN];
        read_exact_field(r, &mut salt, "link salt")?;
        auth.update(&salt);

        let mut iv = vec![0u8; desc.iv_len()];
        read_exact_field(r, &mut iv, "link iv")?;
        auth.update(&iv);

        let key = session.derive_link_key(&desc, &salt)?;
        let aead = AeadImpl::for_descriptor(&desc, &key)?;
        stages.push(DecryptStage::new(id, aead, iv.clone())?);
        entries.push(ChainEntry {
            cipher_id: id,
            salt,
            iv,
        });
    }

    // The stored tag trails the description and is compared, not accumulated.
    let mut stored_tag = [0u8; AUTH_TAG_LEN];
    read_exact_field(r, &mut stored_tag, "auth tag")?;
    auth.verify(&stored_tag)?;

    Ok((
        StreamHeader {
            magic,
            version,
            auth_salt,
            entries,
            auth_tag: stored_tag,
        },
        stages,
    ))
}
