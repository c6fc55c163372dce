//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::PathBuf;

use corelib_config::{
    Config, ErrorCodeConfig, HealthConfig, MessagesConfig, ServerConfig, ServiceConfig, TelemetryConfig,
};

/// Catalogs shipped at the workspace root
pub fn messages_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../messages")
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder for service `ONB` with prefixes `BUS` and `INT`
    pub fn new() -> Self {
        Self {
            config: Config {
                service: ServiceConfig { code: "ONB".to_owned() },
                errors: ErrorCodeConfig {
                    business_prefix: "BUS".to_owned(),
                    internal_prefix: "INT".to_owned(),
                },
                messages: MessagesConfig {
                    directory: messages_dir(),
                    ..MessagesConfig::default()
                },
                redis: None,
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Change the service code segment
    pub fn with_service_code(mut self, code: &str) -> Self {
        self.config.service.code = code.to_owned();
        self
    }

    /// Resolve messages in another default locale
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.config.messages.default_locale = locale.to_owned();
        self
    }

    /// Serve the health check on a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
