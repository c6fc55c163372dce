use http::StatusCode;
use thiserror::Error;

/// Non-success response received from a downstream HTTP dependency
#[derive(Debug, Clone, Error)]
#[error("{status}{}", body_suffix(.body))]
pub struct UpstreamHttpError {
    status: StatusCode,
    body: String,
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": \"{body}\"")
    }
}

impl UpstreamHttpError {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Capture status and body of a failed downstream response
    ///
    /// An unreadable body is recorded as empty.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self { status, body }
    }

    /// Pass successful responses through, turning 4xx/5xx into an error
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamHttpError` when the response status is a client
    /// or server error
    pub async fn check(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Self::from_response(response).await);
        }
        Ok(response)
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw response body as received from the dependency
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = UpstreamHttpError::new(StatusCode::NOT_FOUND, r#"{"message":"gone"}"#);
        assert_eq!(err.to_string(), r#"404 Not Found: "{"message":"gone"}""#);
    }

    #[test]
    fn display_without_body() {
        let err = UpstreamHttpError::new(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }

    #[test]
    fn status_ranges() {
        assert!(UpstreamHttpError::new(StatusCode::CONFLICT, "").is_client_error());
        assert!(UpstreamHttpError::new(StatusCode::SERVICE_UNAVAILABLE, "").is_server_error());
    }
}
