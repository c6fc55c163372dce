//! Test server wrapper that starts a corelib service on a random port

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use corelib_cache::HashStore;
use corelib_config::Config;
use corelib_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(&config)?;
        Self::serve(server.into_router()).await
    }

    /// Start a test server backed by `store` instead of the configured cache
    pub async fn start_with_store(config: Config, store: Arc<dyn HashStore>) -> anyhow::Result<Self> {
        let server = Server::with_store(&config, store)?;
        Self::serve(server.into_router()).await
    }

    /// Serve an arbitrary router
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn serve(router: Router) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
