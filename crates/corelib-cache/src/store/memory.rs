use std::collections::HashMap;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use super::HashStore;
use crate::CacheError;

struct Entry {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-process hash store for local development and tests
///
/// Expiry is evaluated lazily on access. Removing the last field of a
/// hash removes the hash, as Redis does.
#[derive(Default)]
pub struct MemoryStore {
    hashes: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop `hash` if its TTL has elapsed
    fn evict_expired(&self, hash: &str) {
        let now = Instant::now();
        self.hashes.remove_if(hash, |_, entry| entry.is_expired(now));
    }
}

#[async_trait::async_trait]
impl HashStore for MemoryStore {
    async fn hset(&self, hash: &str, field: &str, value: String) -> Result<(), CacheError> {
        self.evict_expired(hash);
        self.hashes
            .entry(hash.to_owned())
            .or_insert_with(|| Entry {
                fields: HashMap::new(),
                expires_at: None,
            })
            .fields
            .insert(field.to_owned(), value);
        Ok(())
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>, CacheError> {
        self.evict_expired(hash);
        Ok(self.hashes.get(hash).and_then(|entry| entry.fields.get(field).cloned()))
    }

    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>, CacheError> {
        self.evict_expired(hash);
        Ok(self.hashes.get(hash).map(|entry| entry.fields.clone()).unwrap_or_default())
    }

    async fn hdel(&self, hash: &str, field: &str) -> Result<u64, CacheError> {
        self.evict_expired(hash);
        let removed = self
            .hashes
            .get_mut(hash)
            .is_some_and(|mut entry| entry.fields.remove(field).is_some());
        self.hashes.remove_if(hash, |_, entry| entry.fields.is_empty());
        Ok(u64::from(removed))
    }

    async fn hexists(&self, hash: &str, field: &str) -> Result<bool, CacheError> {
        self.evict_expired(hash);
        Ok(self.hashes.get(hash).is_some_and(|entry| entry.fields.contains_key(field)))
    }

    async fn expire(&self, hash: &str, ttl: Duration) -> Result<bool, CacheError> {
        self.evict_expired(hash);
        Ok(self.hashes.get_mut(hash).is_some_and(|mut entry| {
            entry.expires_at = Some(Instant::now() + ttl);
            true
        }))
    }

    async fn ttl(&self, hash: &str) -> Result<Option<Duration>, CacheError> {
        self.evict_expired(hash);
        let now = Instant::now();
        Ok(self
            .hashes
            .get(hash)
            .and_then(|entry| entry.expires_at.map(|at| at.saturating_duration_since(now))))
    }

    async fn del(&self, hash: &str) -> Result<bool, CacheError> {
        Ok(self.hashes.remove(hash).is_some())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").field("hashes", &self.hashes.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removing_last_field_removes_hash() {
        let store = MemoryStore::new();
        store.hset("h", "a", "1".to_owned()).await.unwrap();
        assert_eq!(store.hdel("h", "a").await.unwrap(), 1);
        assert!(!store.del("h").await.unwrap());
    }

    #[tokio::test]
    async fn hdel_missing_field_is_zero() {
        let store = MemoryStore::new();
        store.hset("h", "a", "1".to_owned()).await.unwrap();
        assert_eq!(store.hdel("h", "b").await.unwrap(), 0);
        assert_eq!(store.hdel("nope", "a").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn expire_on_missing_hash_is_false() {
        let store = MemoryStore::new();
        assert!(!store.expire("h", Duration::from_secs(5)).await.unwrap());
        assert!(store.ttl("h").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn hash_disappears_after_ttl() {
        let store = MemoryStore::new();
        store.hset("h", "a", "1".to_owned()).await.unwrap();
        assert!(store.expire("h", Duration::from_secs(10)).await.unwrap());
        assert_eq!(store.ttl("h").await.unwrap(), Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(11)).await;

        assert!(store.hget("h", "a").await.unwrap().is_none());
        assert!(store.ttl("h").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sub_second_ttl_keeps_hash_until_it_elapses() {
        let store = MemoryStore::new();
        store.hset("h", "a", "1".to_owned()).await.unwrap();
        assert!(store.expire("h", Duration::from_millis(500)).await.unwrap());

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(store.hget("h", "a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.ttl("h").await.unwrap(), Some(Duration::from_millis(300)));

        tokio::time::advance(Duration::from_millis(400)).await;
        assert!(store.hget("h", "a").await.unwrap().is_none());
    }
}
