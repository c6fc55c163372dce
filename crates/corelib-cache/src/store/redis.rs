use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;

use super::HashStore;
use crate::CacheError;

/// Redis/Valkey hash store
///
/// A connection manager is created on first use and shared by every
/// command. It reconnects on its own after the server restarts or the
/// socket drops. Each command, including the initial connect, is bounded
/// by the configured timeout.
pub struct RedisStore {
    client: redis::Client,
    connection: OnceCell<ConnectionManager>,
    command_timeout: Duration,
}

impl RedisStore {
    /// Create a store for the given connection URL
    ///
    /// No connection is made until the first command.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(url: &str, command_timeout: Duration) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Backend(format!("invalid URL: {e}")))?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            command_timeout,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let conn = self
            .connection
            .get_or_try_init(|| async {
                let conn = self
                    .timed("CONNECT", self.client.get_connection_manager())
                    .await?;
                tracing::debug!("cache connection established");
                Ok::<_, CacheError>(conn)
            })
            .await?;
        Ok(conn.clone())
    }

    async fn timed<T>(
        &self,
        command: &'static str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, CacheError> {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(result) => result.map_err(|e| CacheError::Backend(format!("{command} failed: {e}"))),
            Err(_) => Err(CacheError::Timeout {
                command,
                timeout: self.command_timeout,
            }),
        }
    }
}

#[async_trait::async_trait]
impl HashStore for RedisStore {
    async fn hset(&self, hash: &str, field: &str, value: String) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        self.timed("HSET", conn.hset::<_, _, _, ()>(hash, field, value)).await
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        self.timed("HGET", conn.hget(hash, field)).await
    }

    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>, CacheError> {
        let mut conn = self.connection().await?;
        self.timed("HGETALL", conn.hgetall(hash)).await
    }

    async fn hdel(&self, hash: &str, field: &str) -> Result<u64, CacheError> {
        let mut conn = self.connection().await?;
        self.timed("HDEL", conn.hdel(hash, field)).await
    }

    async fn hexists(&self, hash: &str, field: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        self.timed("HEXISTS", conn.hexists(hash, field)).await
    }

    async fn expire(&self, hash: &str, ttl: Duration) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        self.timed("PEXPIRE", conn.pexpire(hash, ttl_millis(ttl))).await
    }

    async fn ttl(&self, hash: &str) -> Result<Option<Duration>, CacheError> {
        let mut conn = self.connection().await?;
        let millis: i64 = self.timed("PTTL", conn.pttl(hash)).await?;
        // -2: no such key, -1: key without expiry
        Ok(u64::try_from(millis).ok().map(Duration::from_millis))
    }

    async fn del(&self, hash: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        let removed: u64 = self.timed("DEL", conn.del(hash)).await?;
        Ok(removed > 0)
    }
}

/// Expiry in whole milliseconds, so sub-second TTLs are not truncated to zero
fn ttl_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("connected", &self.connection.initialized())
            .field("command_timeout", &self.command_timeout)
            .finish_non_exhaustive()
    }
}
