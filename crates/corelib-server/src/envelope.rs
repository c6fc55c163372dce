//! Uniform JSON body for every handled failure

use std::sync::Arc;

use corelib_config::{ErrorCodeConfig, ServiceConfig};
use corelib_core::{ClassifiedError, ErrorType, PrefixRole, UNCLASSIFIED_SHORT_CODE};
use corelib_messages::MessageResolver;
use jiff::civil::DateTime;
use serde::Serialize;

/// Message used when an upstream body carries no readable explanation
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Unexpected error occurred";

/// Error envelope returned to API consumers
///
/// Absent fields are omitted from the JSON rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Classified numeric status
    pub code: u16,
    /// `{service}-{prefix}-{short}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Localized, consumer-facing text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Developer-facing explanation, never localized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub error_type: ErrorType,
    pub path: String,
    /// Server-local time the envelope was built
    pub timestamp: DateTime,
}

/// Turns classified failures into [`ErrorResponse`] values
pub struct EnvelopeBuilder {
    service_code: String,
    business_prefix: String,
    internal_prefix: String,
    messages: Arc<MessageResolver>,
}

impl EnvelopeBuilder {
    pub fn new(service: &ServiceConfig, errors: &ErrorCodeConfig, messages: Arc<MessageResolver>) -> Self {
        Self {
            service_code: service.code.clone(),
            business_prefix: errors.business_prefix.clone(),
            internal_prefix: errors.internal_prefix.clone(),
            messages,
        }
    }

    /// Composite code for `classified`, if it has a short code
    pub fn composite_code(&self, classified: &ClassifiedError) -> Option<String> {
        let prefix = match classified.prefix_role() {
            PrefixRole::Business => &self.business_prefix,
            PrefixRole::Internal => &self.internal_prefix,
        };
        classified
            .short_code()
            .map(|short| format!("{}-{prefix}-{short}", self.service_code))
    }

    /// Build the envelope for `classified` raised while serving `path`
    ///
    /// Errors raised without a short code get no `errorCode`, but their
    /// message still resolves through the generic `S500` entry.
    pub fn build(&self, classified: &ClassifiedError, path: &str) -> ErrorResponse {
        let error_message = match classified {
            ClassifiedError::UpstreamHttp { response_body, .. } => extract_upstream_message(response_body),
            _ => match classified.short_code() {
                Some(short) => self.messages.resolve(&short),
                None => self.messages.resolve(UNCLASSIFIED_SHORT_CODE),
            },
        };

        ErrorResponse {
            code: classified.status(),
            error_code: self.composite_code(classified),
            error_message: Some(error_message),
            reason: classified.reason().map(str::to_owned),
            error_type: classified.error_type(),
            path: path.to_owned(),
            timestamp: jiff::Zoned::now().datetime(),
        }
    }
}

impl std::fmt::Debug for EnvelopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeBuilder")
            .field("service_code", &self.service_code)
            .field("business_prefix", &self.business_prefix)
            .field("internal_prefix", &self.internal_prefix)
            .finish_non_exhaustive()
    }
}

/// Pull a human-readable message out of an upstream error body
///
/// A JSON object's string `message` field wins, then its `reason` field.
/// Anything else yields [`UPSTREAM_FALLBACK_MESSAGE`].
pub fn extract_upstream_message(body: &str) -> String {
    let Ok(serde_json::Value::Object(object)) = serde_json::from_str::<serde_json::Value>(body) else {
        tracing::debug!(body, "upstream error body is not a JSON object");
        return UPSTREAM_FALLBACK_MESSAGE.to_owned();
    };

    object
        .get("message")
        .or_else(|| object.get("reason"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_owned(), str::to_owned)
}
