use http::Method;

/// Request facts the error layer needs
///
/// Captured at the request boundary before the handler runs, since the
/// request itself is consumed by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    /// Request path without the query string
    pub path: String,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.path())
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
