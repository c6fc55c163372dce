//! Mock downstream service for integration tests
//!
//! `/json/{status}` answers with `{"message": ...}`, `/reason/{status}`
//! with `{"reason": ...}` and `/text/{status}` with a plain-text body.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock upstream that fails with whatever status it is asked for
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let app = Router::new()
            .route("/json/{status}", routing::get(json_failure))
            .route("/reason/{status}", routing::get(reason_failure))
            .route("/text/{status}", routing::get(text_failure));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn json_failure(Path(code): Path<u16>) -> Response {
    let body = serde_json::json!({ "message": format!("upstream failed with {code}") });
    (status(code), Json(body)).into_response()
}

async fn reason_failure(Path(code): Path<u16>) -> Response {
    let body = serde_json::json!({ "reason": format!("upstream reason {code}") });
    (status(code), Json(body)).into_response()
}

async fn text_failure(Path(code): Path<u16>) -> Response {
    (status(code), format!("upstream text {code}")).into_response()
}
