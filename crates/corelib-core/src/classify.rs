use std::borrow::Cow;
use std::error::Error;

use http::StatusCode;
use serde::Serialize;

use crate::{
    CLIENT_PREFIX, CommonError, ErrorKind, INTERNAL_ERROR_STATUS, SERVER_PREFIX, UNCLASSIFIED_SHORT_CODE,
    UpstreamHttpError,
};

/// Label attached to every error envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    BusinessError,
    TechnicalError,
}

impl ErrorType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BusinessError => "BUSINESS_ERROR",
            Self::TechnicalError => "TECHNICAL_ERROR",
        }
    }
}

/// Which configured prefix a composite error code uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRole {
    Business,
    Internal,
}

/// A caught failure reduced to the data needed to build an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    /// Business rule violation
    Business {
        error_code: Option<String>,
        message: Option<String>,
        reason: Option<String>,
    },
    /// Technical fault raised by application code
    Internal {
        error_code: Option<String>,
        message: Option<String>,
        reason: Option<String>,
    },
    /// Failure surfaced from a downstream HTTP call
    UpstreamHttp {
        status: StatusCode,
        response_body: String,
        reason: String,
    },
    /// Anything not recognized by a more specific entry
    Unclassified { reason: String },
}

impl ClassifiedError {
    /// Numeric status carried in the envelope's `code` field
    pub const fn status(&self) -> u16 {
        match self {
            Self::Business { .. } => crate::BUSINESS_ERROR_STATUS,
            Self::Internal { .. } | Self::Unclassified { .. } => INTERNAL_ERROR_STATUS,
            Self::UpstreamHttp { status, .. } => status.as_u16(),
        }
    }

    pub const fn error_type(&self) -> ErrorType {
        match self {
            Self::Business { .. } => ErrorType::BusinessError,
            _ => ErrorType::TechnicalError,
        }
    }

    pub const fn prefix_role(&self) -> PrefixRole {
        match self {
            Self::Business { .. } => PrefixRole::Business,
            _ => PrefixRole::Internal,
        }
    }

    /// Taxonomy-local code used for catalog lookup and composition
    ///
    /// `None` only for business or internal errors raised without a code.
    pub fn short_code(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Business { error_code, .. } | Self::Internal { error_code, .. } => {
                error_code.as_deref().filter(|code| !code.is_empty()).map(Cow::Borrowed)
            }
            Self::UpstreamHttp { status, .. } => {
                let prefix = if status.is_server_error() { SERVER_PREFIX } else { CLIENT_PREFIX };
                Some(Cow::Owned(format!("{prefix}{}", status.as_u16())))
            }
            Self::Unclassified { .. } => Some(Cow::Borrowed(UNCLASSIFIED_SHORT_CODE)),
        }
    }

    /// Developer-facing explanation, never localized
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Business { reason, .. } | Self::Internal { reason, .. } => reason.as_deref(),
            Self::UpstreamHttp { reason, .. } | Self::Unclassified { reason } => Some(reason),
        }
    }
}

/// Dispatch entries, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Forbidden,
    NotFound,
    ClientError,
    BadGateway,
    GatewayTimeout,
    ServerError,
    Business,
    Internal,
    Unclassified,
}

/// Declared dispatch priority, most specific first
///
/// The first entry that matches a failure wins. `Unclassified` is last
/// and matches everything.
pub const DISPATCH_ORDER: [FailureKind; 10] = [
    FailureKind::Unauthorized,
    FailureKind::Forbidden,
    FailureKind::NotFound,
    FailureKind::ClientError,
    FailureKind::BadGateway,
    FailureKind::GatewayTimeout,
    FailureKind::ServerError,
    FailureKind::Business,
    FailureKind::Internal,
    FailureKind::Unclassified,
];

/// The outermost error in a chain that the taxonomy knows about
enum Recognized<'a> {
    Common(&'a CommonError),
    Upstream(&'a UpstreamHttpError),
    Other,
}

impl<'a> Recognized<'a> {
    fn find(failure: &'a (dyn Error + 'static)) -> Self {
        let mut current = Some(failure);
        while let Some(err) = current {
            if let Some(common) = err.downcast_ref::<CommonError>() {
                return Self::Common(common);
            }
            if let Some(upstream) = err.downcast_ref::<UpstreamHttpError>() {
                return Self::Upstream(upstream);
            }
            current = err.source();
        }
        Self::Other
    }
}

impl FailureKind {
    /// HTTP status the response is sent with when this entry matches
    pub const fn response_status(self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ClientError => StatusCode::BAD_REQUEST,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Business => StatusCode::PARTIAL_CONTENT,
            Self::ServerError | Self::Internal | Self::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn matches(self, failure: &Recognized<'_>) -> bool {
        match (self, failure) {
            (Self::Unauthorized, Recognized::Upstream(e)) => e.status() == StatusCode::UNAUTHORIZED,
            (Self::Forbidden, Recognized::Upstream(e)) => e.status() == StatusCode::FORBIDDEN,
            (Self::NotFound, Recognized::Upstream(e)) => e.status() == StatusCode::NOT_FOUND,
            (Self::ClientError, Recognized::Upstream(e)) => e.is_client_error(),
            (Self::BadGateway, Recognized::Upstream(e)) => e.status() == StatusCode::BAD_GATEWAY,
            (Self::GatewayTimeout, Recognized::Upstream(e)) => e.status() == StatusCode::GATEWAY_TIMEOUT,
            (Self::ServerError, Recognized::Upstream(e)) => e.is_server_error(),
            (Self::Business, Recognized::Common(e)) => e.kind() == ErrorKind::Business,
            (Self::Internal, Recognized::Common(e)) => e.kind() == ErrorKind::Internal,
            (Self::Unclassified, _) => true,
            _ => false,
        }
    }

    fn build(self, failure: &Recognized<'_>, outer: &(dyn Error + 'static)) -> ClassifiedError {
        match failure {
            Recognized::Upstream(e) if self.is_upstream() => ClassifiedError::UpstreamHttp {
                status: e.status(),
                response_body: e.body().to_owned(),
                reason: e.to_string(),
            },
            Recognized::Common(e) if self == Self::Business => ClassifiedError::Business {
                error_code: e.error_code().map(str::to_owned),
                message: e.message().map(str::to_owned),
                reason: e.reason().map(str::to_owned),
            },
            Recognized::Common(e) if self == Self::Internal => ClassifiedError::Internal {
                error_code: e.error_code().map(str::to_owned),
                message: e.message().map(str::to_owned),
                reason: e.reason().map(str::to_owned),
            },
            _ => unclassified(outer),
        }
    }

    const fn is_upstream(self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::Forbidden
                | Self::NotFound
                | Self::ClientError
                | Self::BadGateway
                | Self::GatewayTimeout
                | Self::ServerError
        )
    }
}

fn unclassified(failure: &(dyn Error + 'static)) -> ClassifiedError {
    let reason = failure.to_string();
    ClassifiedError::Unclassified {
        reason: if reason.is_empty() {
            "Unexpected error".to_owned()
        } else {
            reason
        },
    }
}

/// Classify a caught failure against [`DISPATCH_ORDER`]
///
/// The failure and its `source()` chain are searched for the outermost
/// [`CommonError`] or [`UpstreamHttpError`]; the first dispatch entry that
/// matches it decides the classification. Never fails.
pub fn classify(failure: &(dyn Error + 'static)) -> (FailureKind, ClassifiedError) {
    let recognized = Recognized::find(failure);
    DISPATCH_ORDER
        .into_iter()
        .find(|kind| kind.matches(&recognized))
        .map_or_else(
            || (FailureKind::Unclassified, unclassified(failure)),
            |kind| (kind, kind.build(&recognized, failure)),
        )
}
