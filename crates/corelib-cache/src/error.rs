use std::time::Duration;

use thiserror::Error;

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Store connection or command error
    #[error("cache backend: {0}")]
    Backend(String),

    /// Command did not complete within the configured timeout
    #[error("cache command {command} timed out after {}ms", .timeout.as_millis())]
    Timeout { command: &'static str, timeout: Duration },

    /// Serialization error
    #[error("serialization: {0}")]
    Serialization(String),
}
