//! Hash-store backends for [`CacheProvider`](crate::CacheProvider)

mod memory;
mod redis;

use std::collections::HashMap;
use std::time::Duration;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;
use crate::CacheError;

/// Minimal set of hash commands the cache provider issues
///
/// Mirrors the Redis hash commands one to one so that the Redis backend
/// stays a thin translation layer.
#[async_trait::async_trait]
pub trait HashStore: Send + Sync {
    /// `HSET hash field value`
    async fn hset(&self, hash: &str, field: &str, value: String) -> Result<(), CacheError>;

    /// `HGET hash field`
    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>, CacheError>;

    /// `HGETALL hash`
    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>, CacheError>;

    /// `HDEL hash field`, returning the number of fields removed
    async fn hdel(&self, hash: &str, field: &str) -> Result<u64, CacheError>;

    /// `HEXISTS hash field`
    async fn hexists(&self, hash: &str, field: &str) -> Result<bool, CacheError>;

    /// `EXPIRE hash seconds`, returning whether the hash exists
    async fn expire(&self, hash: &str, ttl: Duration) -> Result<bool, CacheError>;

    /// `TTL hash`; `None` when the hash is missing or never expires
    async fn ttl(&self, hash: &str) -> Result<Option<Duration>, CacheError>;

    /// `DEL hash`, returning whether anything was removed
    async fn del(&self, hash: &str) -> Result<bool, CacheError>;
}
