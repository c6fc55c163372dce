//! Terminal failure handling for every route
//!
//! Handlers return [`AppError`]. Its response is a placeholder carrying the
//! failure in its extensions; the [`error_advice`] middleware swaps it for
//! the classified JSON envelope once the request path is known.

use std::any::Any;
use std::error::Error;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use corelib_core::{CommonError, RequestContext, UpstreamHttpError, classify};
use http::StatusCode;
use tower_http::catch_panic::CatchPanicLayer;

use crate::envelope::{EnvelopeBuilder, ErrorResponse};

type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Classifies failures and builds their responses
#[derive(Debug)]
pub struct ExceptionAdvice {
    envelope: EnvelopeBuilder,
}

/// Status and body chosen for a failure
#[derive(Debug, Clone)]
pub struct HandledError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for HandledError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl ExceptionAdvice {
    pub const fn new(envelope: EnvelopeBuilder) -> Self {
        Self { envelope }
    }

    /// Classify `failure`, build its envelope and log it once
    pub fn handle(&self, failure: &(dyn Error + 'static), context: &RequestContext) -> HandledError {
        let (kind, classified) = classify(failure);
        let body = self.envelope.build(&classified, context.path());

        tracing::error!(
            code = body.code,
            error_code = body.error_code.as_deref(),
            reason = body.reason.as_deref(),
            path = %body.path,
            method = %context.method,
            error_message = body.error_message.as_deref(),
            error_type = body.error_type.as_str(),
            dispatch = ?kind,
            error = %failure,
            "exception handled"
        );

        HandledError {
            status: kind.response_status(),
            body,
        }
    }
}

/// Handler-facing error accepting any standard error
///
/// Deliberately not an `Error` itself so the blanket `From` stays coherent.
#[derive(Debug, Clone)]
pub struct AppError(SharedError);

impl AppError {
    /// Convert an `anyhow::Error`, keeping taxonomy errors recognizable
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CommonError>() {
            Ok(common) => return common.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<UpstreamHttpError>() {
            Ok(upstream) => return upstream.into(),
            Err(err) => err,
        };
        let boxed: Box<dyn Error + Send + Sync + 'static> = err.into();
        Self(Arc::from(boxed))
    }

    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }
}

impl<E> From<E> for AppError
where
    E: Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self(Arc::new(err))
    }
}

/// Failure stashed in a response for [`error_advice`] to pick up
#[derive(Clone)]
pub(crate) struct CaughtFailure(pub(crate) SharedError);

/// A handler panicked while serving the request
#[derive(Debug, thiserror::Error)]
#[error("handler panicked: {0}")]
pub struct HandlerPanicked(String);

/// Turn a caught panic into a stashed failure
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match payload.downcast::<String>() {
        Ok(text) => *text,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map_or_else(|| "non-string panic payload".to_owned(), |text| (*text).to_owned()),
    };
    AppError::from(HandlerPanicked(detail)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(CaughtFailure(self.0));
        response
    }
}

/// Middleware that renders stashed failures as error envelopes
///
/// Also makes the [`RequestContext`] available to handlers as an extension.
pub async fn error_advice(State(advice): State<Arc<ExceptionAdvice>>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let context = RequestContext::from_parts(&parts);
    parts.extensions.insert(context.clone());

    let mut response = next.run(Request::from_parts(parts, body)).await;
    match response.extensions_mut().remove::<CaughtFailure>() {
        Some(CaughtFailure(failure)) => advice.handle(&*failure, &context).into_response(),
        None => response,
    }
}

/// Wrap `router` so every [`AppError`] it produces becomes an envelope
///
/// Panics inside handlers are caught and rendered as unclassified failures.
pub fn with_error_advice(router: Router, advice: Arc<ExceptionAdvice>) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn_with_state(advice, error_advice))
}
