mod harness;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use corelib_cache::{CacheError, HashStore};
use harness::config::ConfigBuilder;
use harness::server::TestServer;
use serde_json::{Value, json};

/// Store that refuses every command
struct DownStore;

#[async_trait::async_trait]
impl HashStore for DownStore {
    async fn hset(&self, _: &str, _: &str, _: String) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn hget(&self, _: &str, _: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn hgetall(&self, _: &str) -> Result<HashMap<String, String>, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn hdel(&self, _: &str, _: &str) -> Result<u64, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn hexists(&self, _: &str, _: &str) -> Result<bool, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn expire(&self, _: &str, _: Duration) -> Result<bool, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn ttl(&self, _: &str) -> Result<Option<Duration>, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
    async fn del(&self, _: &str) -> Result<bool, CacheError> {
        Err(CacheError::Backend("connection refused".to_owned()))
    }
}

fn client_payload() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "panNumber": "ABCDE1234F",
        "kycStatus": "PENDING",
        "contacts": [{"contactType": "MOBILE", "contactValue": "+91 98765 43210", "isPrimary": true}],
        "country": {"countryCode": "IN", "countryName": "India", "currencyCode": "INR"}
    })
}

#[tokio::test]
async fn client_lifecycle() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();
    let client = server.client();

    let resp = client
        .put(server.url("/clients/42"))
        .json(&client_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["data"]["clientId"], 42);

    let body: Value = client
        .get(server.url("/clients/42"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["panNumber"], "ABCDE1234F");
    assert_eq!(body["data"]["country"]["currencyCode"], "INR");

    let body: Value = client.get(server.url("/clients")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let resp = client.delete(server.url("/clients/42")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.get(server.url("/clients/42")).send().await.unwrap();
    assert_eq!(resp.status(), 206);
}

#[tokio::test]
async fn missing_client_is_a_business_error() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().get(server.url("/clients/99")).send().await.unwrap();
    assert_eq!(resp.status(), 206);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 206);
    assert_eq!(body["errorCode"], "ONB-BUS-B404");
    assert_eq!(body["errorMessage"], "Client not found.");
    assert_eq!(body["reason"], "client 99 not found");
    assert_eq!(body["errorType"], "BUSINESS_ERROR");
    assert_eq!(body["path"], "/clients/99");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn deleting_missing_client_is_a_business_error() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().delete(server.url("/clients/5")).send().await.unwrap();
    assert_eq!(resp.status(), 206);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errorCode"], "ONB-BUS-B404");
}

#[tokio::test]
async fn malformed_payload_is_rejected_with_envelope() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .put(server.url("/clients/1"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 206);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errorCode"], "ONB-BUS-B400");
    assert_eq!(body["errorMessage"], "Client details are invalid.");
}

#[tokio::test]
async fn malformed_client_id_is_rejected_with_envelope() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().get(server.url("/clients/abc")).send().await.unwrap();
    assert_eq!(resp.status(), 206);
    assert_eq!(resp.headers()["content-type"], "application/json");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errorCode"], "ONB-BUS-B400");
    assert_eq!(body["path"], "/clients/abc");
}

#[tokio::test]
async fn localized_messages_follow_default_locale() {
    let config = ConfigBuilder::new().with_locale("hi-IN").build();
    let server = TestServer::start(config).await.unwrap();

    let body: Value = server
        .client()
        .get(server.url("/clients/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["errorMessage"], "ग्राहक नहीं मिला।");
}

#[tokio::test]
async fn cache_outage_is_an_internal_error_on_write() {
    let server = TestServer::start_with_store(ConfigBuilder::new().build(), Arc::new(DownStore))
        .await
        .unwrap();

    let resp = server
        .client()
        .put(server.url("/clients/1"))
        .json(&client_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 500);
    assert_eq!(body["errorCode"], "ONB-INT-S503");
    assert_eq!(body["errorMessage"], "Client records are temporarily unavailable.");
    assert_eq!(body["errorType"], "TECHNICAL_ERROR");
    assert_eq!(body["reason"], "cache backend: connection refused");
}

#[tokio::test]
async fn cache_outage_degrades_reads() {
    let server = TestServer::start_with_store(ConfigBuilder::new().build(), Arc::new(DownStore))
        .await
        .unwrap();

    let body: Value = server
        .client()
        .get(server.url("/clients"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["data"], json!([]));

    let resp = server.client().get(server.url("/clients/1")).send().await.unwrap();
    assert_eq!(resp.status(), 206);
}
