//! session.rs
//! Shared decryption context: password, catalog, deriver, derived-key cache.
//!
//! A session outlives the readers built from it and may be shared by several
//! readers at once (readers only take `&CipherSession`). Nothing here is
//! mutated by reads except the key cache, which sits behind a mutex so the
//! sharing contract stays `&self`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::catalog::{BuiltinCatalog, CipherCatalog, CipherDescriptor};
use crate::crypto::{HkdfSha256Deriver, KdfError, KeyDeriver};

/// Cache key: algorithm name, key size in bits, salt.
type CacheKey = (&'static str, usize, Vec<u8>);

pub struct CipherSession {
    password: String,
    catalog: Arc<dyn CipherCatalog>,
    deriver: Arc<dyn KeyDeriver>,
    key_cache: Mutex<HashMap<CacheKey, Vec<u8>>>,
}

impl CipherSession {
    /// Session over the built-in catalog and HKDF-SHA256 deriver.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            catalog: Arc::new(BuiltinCatalog::new()),
            deriver: Arc::new(HkdfSha256Deriver),
            key_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the cipher catalog (e.g. a restricted test double).
    pub fn with_catalog(mut self, catalog: Arc<dyn CipherCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the key deriver.
    pub fn with_deriver(mut self, deriver: Arc<dyn KeyDeriver>) -> Self {
        self.deriver = deriver;
        self
    }

    pub fn catalog(&self) -> &dyn CipherCatalog {
        self.catalog.as_ref()
    }

    /// Derive (or fetch from cache) a key for the given parameters.
    ///
    /// Caching is sound because derivation is deterministic; poisoned-mutex
    /// recovery just skips the cache for that call.
    pub fn derive_key(
        &self,
        algorithm: &'static str,
        key_len_bits: usize,
        salt: &[u8],
    ) -> Result<Vec<u8>, KdfError> {
        let cache_key = (algorithm, key_len_bits, salt.to_vec());
        if let Ok(cache) = self.key_cache.lock() {
            if let Some(key) = cache.get(&cache_key) {
                return Ok(key.clone());
            }
        }

        let key = self
            .deriver
            .derive(algorithm, key_len_bits, &self.password, salt)?;

        if let Ok(mut cache) = self.key_cache.lock() {
            cache.insert(cache_key, key.clone());
        }
        Ok(key)
    }

    /// Derive the key for one chain link's descriptor.
    pub fn derive_link_key(
        &self,
        desc: &CipherDescriptor,
        salt: &[u8],
    ) -> Result<Vec<u8>, KdfError> {
        self.derive_key(desc.alg.name(), desc.key_len_bits, salt)
    }
}

impl std::fmt::Debug for CipherSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the password.
        f.debug_struct("CipherSession").finish_non_exhaustive()
    }
}
