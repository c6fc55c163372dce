//! JSON records in named hashes of a Redis-compatible store
//!
//! Writes report failures to the caller. Reads degrade to a cache miss:
//! missing entries, undecodable entries and backend errors all come back
//! as `None`, `false` or an empty map, with the cause logged.

#![allow(clippy::must_use_candidate)]

mod error;
pub mod store;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::CacheError;
pub use store::{HashStore, MemoryStore, RedisStore};

/// Typed cache over a [`HashStore`]
#[derive(Clone)]
pub struct CacheProvider {
    store: Arc<dyn HashStore>,
}

impl CacheProvider {
    pub fn new(store: Arc<dyn HashStore>) -> Self {
        Self { store }
    }

    /// Cache backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Store `value` under `key` in `hash`
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be encoded or the store rejects
    /// the write
    pub async fn put<T: Serialize + ?Sized>(&self, hash: &str, key: &str, value: &T) -> Result<(), CacheError> {
        tracing::info!(hash, key, "adding entry to cache");
        let json = serde_json::to_string(value).map_err(|e| {
            tracing::error!(hash, key, error = %e, "failed to serialize cache entry");
            CacheError::Serialization(format!("serialize: {e}"))
        })?;

        self.store.hset(hash, key, json).await.inspect_err(|e| {
            tracing::error!(hash, key, error = %e, "failed to write cache entry");
        })
    }

    /// Replace the entry under `key`; same semantics as [`put`](Self::put)
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be encoded or the store rejects
    /// the write
    pub async fn update<T: Serialize + ?Sized>(&self, hash: &str, key: &str, value: &T) -> Result<(), CacheError> {
        tracing::info!(hash, key, "updating entry in cache");
        self.put(hash, key, value).await
    }

    /// Fetch and decode one entry
    pub async fn get<T: DeserializeOwned>(&self, hash: &str, key: &str) -> Option<T> {
        tracing::debug!(hash, key, "fetching entry from cache");
        let json = match self.store.hget(hash, key).await {
            Ok(json) => json?,
            Err(e) => {
                tracing::error!(hash, key, error = %e, "failed to fetch cache entry");
                return None;
            }
        };

        serde_json::from_str(&json)
            .inspect_err(|e| tracing::error!(hash, key, error = %e, "failed to deserialize cache entry"))
            .ok()
    }

    /// Fetch and decode every entry of `hash`
    ///
    /// A single undecodable entry discards the whole result.
    pub async fn get_all<T: DeserializeOwned>(&self, hash: &str) -> HashMap<String, T> {
        tracing::debug!(hash, "fetching all entries from cache");
        let raw = match self.store.hgetall(hash).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(hash, error = %e, "failed to fetch cache entries");
                return HashMap::new();
            }
        };

        raw.into_iter()
            .map(|(key, json)| serde_json::from_str(&json).map(|value| (key, value)))
            .collect::<Result<_, _>>()
            .unwrap_or_else(|e| {
                tracing::error!(hash, error = %e, "failed to deserialize cache entries");
                HashMap::new()
            })
    }

    /// Remove one entry; true only if something was removed
    pub async fn delete(&self, hash: &str, key: &str) -> bool {
        tracing::info!(hash, key, "deleting entry from cache");
        match self.store.hdel(hash, key).await {
            Ok(removed) => removed > 0,
            Err(e) => {
                tracing::error!(hash, key, error = %e, "failed to delete cache entry");
                false
            }
        }
    }

    pub async fn exists(&self, hash: &str, key: &str) -> bool {
        tracing::debug!(hash, key, "checking cache entry");
        self.store
            .hexists(hash, key)
            .await
            .inspect_err(|e| tracing::error!(hash, key, error = %e, "failed to check cache entry"))
            .unwrap_or(false)
    }

    /// Set a TTL on the whole hash; best effort
    pub async fn expire(&self, hash: &str, ttl: Duration) {
        tracing::info!(hash, ttl_secs = ttl.as_secs(), "setting cache expiry");
        if let Err(e) = self.store.expire(hash, ttl).await {
            tracing::error!(hash, error = %e, "failed to set cache expiry");
        }
    }

    /// Remaining TTL of the hash
    ///
    /// `None` if the hash is missing, has no expiry, or the store fails.
    pub async fn ttl(&self, hash: &str) -> Option<Duration> {
        self.store
            .ttl(hash)
            .await
            .inspect_err(|e| tracing::error!(hash, error = %e, "failed to get cache expiry"))
            .ok()
            .flatten()
    }

    /// Remove the whole hash; best effort
    pub async fn clear(&self, hash: &str) {
        tracing::warn!(hash, "clearing all cache entries");
        if let Err(e) = self.store.del(hash).await {
            tracing::error!(hash, error = %e, "failed to clear cache hash");
        }
    }
}

impl std::fmt::Debug for CacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheProvider").finish_non_exhaustive()
    }
}
