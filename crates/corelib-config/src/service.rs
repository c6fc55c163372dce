use serde::Deserialize;

/// Service identity
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// First segment of every composite error code, e.g. `ONB`
    pub code: String,
}

/// Prefixes forming the middle segment of composite error codes
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorCodeConfig {
    /// Prefix for business rule violations
    pub business_prefix: String,
    /// Prefix for internal, upstream and unclassified failures
    pub internal_prefix: String,
}
