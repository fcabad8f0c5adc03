// src/key_store.rs

use crate::client::KeySetFetcher;
use crate::error::KeyStoreError;
use crate::model::SigningKey;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, instrument};

/// A lazily populated cache of a user pool's signing keys, keyed by `kid`.
///
/// Lookups take the read lock only. A miss triggers one fetch of the full key
/// set with no lock held, then the fetched keys are merged under the write
/// lock. Concurrent misses may fetch redundantly; merges are idempotent.
///
/// Keys are never expired or refreshed in the background. A key that later
/// disappears from the provider's key set stays usable until [`KeyStore::evict`]
/// or [`KeyStore::clear`] is called.
pub struct KeyStore {
    keys: RwLock<HashMap<String, Arc<SigningKey>>>,
    fetcher: Box<dyn KeySetFetcher>,
}

impl KeyStore {
    /// Creates an empty store backed by `fetcher`.
    pub fn new(fetcher: impl KeySetFetcher + 'static) -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
            fetcher: Box::new(fetcher),
        }
    }

    /// Creates a store already holding `keys`.
    pub fn with_keys(
        fetcher: impl KeySetFetcher + 'static,
        keys: impl IntoIterator<Item = SigningKey>,
    ) -> Self {
        let store = Self::new(fetcher);
        store.merge(keys);
        store
    }

    /// Retrieves the signing key for the given Key ID (`kid`).
    ///
    /// On a cache miss the whole key set is fetched once and merged before
    /// the lookup is retried.
    ///
    /// # Errors
    ///
    /// `KeyFetchFailed` if the fetch fails (the cache is left untouched), or
    /// `KeyNotFound` if the key is still absent after a successful fetch.
    #[instrument(skip(self), err)]
    pub fn get_key(&self, kid: &str) -> Result<Arc<SigningKey>, KeyStoreError> {
        if let Some(key) = self.lookup(kid) {
            debug!("Signing key cache hit for kid: {}", kid);
            return Ok(key);
        }

        debug!("Signing key cache miss for kid: {}. Fetching from provider.", kid);
        let jwks = self.fetcher.fetch_keys()?;
        self.merge(jwks.keys);

        self.lookup(kid)
            .ok_or_else(|| KeyStoreError::KeyNotFound(kid.to_string()))
    }

    /// Whether a key with this `kid` is cached. Never fetches.
    pub fn contains(&self, kid: &str) -> bool {
        self.read_keys().contains_key(kid)
    }

    pub fn len(&self) -> usize {
        self.read_keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_keys().is_empty()
    }

    /// The identifiers of all cached keys, in no particular order.
    pub fn key_ids(&self) -> Vec<String> {
        self.read_keys().keys().cloned().collect()
    }

    /// Removes a single key, returning it if it was cached.
    pub fn evict(&self, kid: &str) -> Option<Arc<SigningKey>> {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(kid)
    }

    /// Drops every cached key. The next lookup fetches again.
    pub fn clear(&self) {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn lookup(&self, kid: &str) -> Option<Arc<SigningKey>> {
        self.read_keys().get(kid).cloned()
    }

    fn merge(&self, keys: impl IntoIterator<Item = SigningKey>) {
        let mut cache = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        let before = cache.len();
        for key in keys {
            cache.insert(key.kid.clone(), Arc::new(key));
        }
        debug!("Merged key set: {} cached keys (was {})", cache.len(), before);
    }

    fn read_keys(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<SigningKey>>> {
        self.keys.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("key_ids", &self.key_ids())
            .finish_non_exhaustive()
    }
}
