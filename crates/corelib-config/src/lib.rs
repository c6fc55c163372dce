#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod messages;
pub mod redis;
pub mod server;
pub mod service;
pub mod telemetry;

use serde::Deserialize;

pub use messages::*;
pub use redis::*;
pub use server::*;
pub use service::*;
pub use telemetry::*;

/// Top-level corelib configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Identity of the service emitting error codes
    pub service: ServiceConfig,
    /// Error code prefixes
    pub errors: ErrorCodeConfig,
    /// Message catalog location and default locale
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Cache backend; an in-memory store is used when absent
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
