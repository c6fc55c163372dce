mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn health_endpoint_returns_success_envelope() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["message"], "UP");
    assert!(body["timestamp"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn health_endpoint_custom_path() {
    let config = ConfigBuilder::new().with_health_path("/status").build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/status")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let config = ConfigBuilder::new().without_health().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}
