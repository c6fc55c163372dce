use thiserror::Error;

use crate::{BUSINESS_ERROR_STATUS, INTERNAL_ERROR_STATUS};

/// Boxed error usable as the underlying cause of a [`CommonError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which half of the taxonomy a [`CommonError`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected rule violation, surfaced to the client
    Business,
    /// Unexpected technical fault
    Internal,
}

/// Application error raised by service code
///
/// `error_code` is the short code used for catalog lookup and for the
/// last segment of the composite error code. `message` is the text the
/// error was raised with and `reason` the developer-facing explanation
/// that ends up in the response envelope.
#[derive(Debug, Error)]
pub enum CommonError {
    /// Business rule violation
    #[error("{}", .message.as_deref().unwrap_or("business error"))]
    Business {
        error_code: Option<String>,
        message: Option<String>,
        reason: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    /// System or technical fault
    #[error("{}", .message.as_deref().unwrap_or("internal error"))]
    Internal {
        error_code: Option<String>,
        message: Option<String>,
        reason: Option<String>,
        #[source]
        source: Option<BoxError>,
    },
}

impl CommonError {
    /// Business error identified by a short code
    pub fn business(error_code: impl Into<String>) -> Self {
        Self::new(ErrorKind::Business, Some(error_code.into()))
    }

    /// Internal error identified by a short code
    pub fn internal(error_code: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, Some(error_code.into()))
    }

    /// Error of the given kind without a short code
    ///
    /// The resulting envelope carries no composite error code.
    pub const fn uncoded(kind: ErrorKind) -> Self {
        Self::new(kind, None)
    }

    const fn new(kind: ErrorKind, error_code: Option<String>) -> Self {
        match kind {
            ErrorKind::Business => Self::Business {
                error_code,
                message: None,
                reason: None,
                source: None,
            },
            ErrorKind::Internal => Self::Internal {
                error_code,
                message: None,
                reason: None,
                source: None,
            },
        }
    }

    /// Attach a message
    ///
    /// The message doubles as the reason unless a cause is attached.
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let (message, reason, source) = self.parts_mut();
        if source.is_none() {
            *reason = Some(text.clone());
        }
        *message = Some(text);
        self
    }

    /// Attach the underlying cause
    ///
    /// The cause's display text becomes the reason, and the message when
    /// none was set.
    #[must_use]
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        let text = cause.to_string();
        let (message, reason, source) = self.parts_mut();
        if message.is_none() {
            *message = Some(text.clone());
        }
        *reason = Some(text);
        *source = Some(cause);
        self
    }

    fn parts_mut(&mut self) -> (&mut Option<String>, &mut Option<String>, &mut Option<BoxError>) {
        match self {
            Self::Business {
                message, reason, source, ..
            }
            | Self::Internal {
                message, reason, source, ..
            } => (message, reason, source),
        }
    }

    /// Whether this is a business or an internal error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Business { .. } => ErrorKind::Business,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Short catalog code, absent for uncoded errors
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Business { error_code, .. } | Self::Internal { error_code, .. } => error_code.as_deref(),
        }
    }

    /// Consumer-facing message, if one was given
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Business { message, .. } | Self::Internal { message, .. } => message.as_deref(),
        }
    }

    /// Developer-facing explanation
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Business { reason, .. } | Self::Internal { reason, .. } => reason.as_deref(),
        }
    }

    /// Fixed numeric status for this kind of error
    pub const fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Business => BUSINESS_ERROR_STATUS,
            ErrorKind::Internal => INTERNAL_ERROR_STATUS,
        }
    }
}
