//! HTTP surface of a corelib service
//!
//! Wires the message catalogs, the cache and the exception advice into an
//! axum router.

#![allow(clippy::must_use_candidate)]

pub mod advice;
pub mod envelope;
mod health;
pub mod onboarding;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use corelib_cache::{CacheProvider, HashStore, MemoryStore, RedisStore};
use corelib_config::Config;
use corelib_messages::{DirectorySource, MessageResolver};
use secrecy::ExposeSecret;
use tower_http::trace::TraceLayer;

pub use advice::{AppError, ExceptionAdvice, HandledError, error_advice, with_error_advice};
pub use envelope::{EnvelopeBuilder, ErrorResponse, extract_upstream_message};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Uses Redis when `[redis]` is configured and an in-process store
    /// otherwise. No connection is attempted until the first cache call.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis URL is invalid or the message
    /// configuration is unusable
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn HashStore> = match config.redis {
            Some(ref redis) => {
                let url = redis.connection_url()?;
                tracing::info!(host = %redis.host, port = redis.port, database = redis.database, "using redis cache");
                Arc::new(RedisStore::new(url.expose_secret(), redis.command_timeout())?)
            }
            None => {
                tracing::warn!("no [redis] section configured, using in-memory cache");
                Arc::new(MemoryStore::new())
            }
        };

        Self::with_store(config, store)
    }

    /// Build the server around an existing hash store
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default locale is malformed
    pub fn with_store(config: &Config, store: Arc<dyn HashStore>) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        if !config.messages.directory.is_dir() {
            tracing::warn!(
                directory = %config.messages.directory.display(),
                "message directory not found, error messages will fall back to their codes"
            );
        }

        let messages = MessageResolver::new(DirectorySource::new(config.messages.directory.clone()))
            .with_base_name(config.messages.base_name.clone())
            .with_default_locale(config.messages.locale()?);
        messages.preload();
        let envelope = EnvelopeBuilder::new(&config.service, &config.errors, Arc::new(messages));
        let advice = Arc::new(ExceptionAdvice::new(envelope));

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.merge(onboarding::router(CacheProvider::new(store)));

        // Apply middleware layers (innermost first)
        app = with_error_advice(app, advice);
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
