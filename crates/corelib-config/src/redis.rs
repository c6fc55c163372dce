use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Redis/Valkey connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedisConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional `AUTH` password
    #[serde(default)]
    pub password: Option<SecretString>,
    /// Logical database index
    #[serde(default)]
    pub database: u32,
    /// Connect over TLS (`rediss://`)
    #[serde(default)]
    pub tls: bool,
    /// Per-command timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl RedisConfig {
    /// Connection URL including credentials
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot form a valid URL
    pub fn connection_url(&self) -> anyhow::Result<SecretString> {
        let scheme = if self.tls { "rediss" } else { "redis" };
        let mut url = Url::parse(&format!("{scheme}://{}:{}/{}", self.host, self.port, self.database))
            .map_err(|e| anyhow::anyhow!("invalid redis host '{}': {e}", self.host))?;

        if let Some(password) = self.password.as_ref().filter(|p| !p.expose_secret().is_empty()) {
            url.set_password(Some(password.expose_secret()))
                .map_err(|()| anyhow::anyhow!("redis URL cannot carry a password"))?;
        }

        Ok(SecretString::from(url.to_string()))
    }

    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    6379
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_ms() -> u64 {
    5000
}
