//! Error taxonomy shared by every corelib service
//!
//! Application code raises [`CommonError`] for business and internal
//! failures and [`UpstreamHttpError`] for failed downstream calls. The
//! [`classify`] function maps any caught error onto exactly one
//! [`ClassifiedError`] by walking the declared [`DISPATCH_ORDER`].

#![allow(clippy::must_use_candidate)]

mod classify;
mod context;
mod error;
mod upstream;

pub use classify::{ClassifiedError, DISPATCH_ORDER, ErrorType, FailureKind, PrefixRole, classify};
pub use context::RequestContext;
pub use error::{BoxError, CommonError, ErrorKind};
pub use upstream::UpstreamHttpError;

/// Numeric status reported for business rule violations
pub const BUSINESS_ERROR_STATUS: u16 = 206;

/// Numeric status reported for technical faults
pub const INTERNAL_ERROR_STATUS: u16 = 500;

/// Short code used when a failure matches no specific dispatch entry
pub const UNCLASSIFIED_SHORT_CODE: &str = "S500";

/// Short-code prefix for upstream 4xx responses
pub const CLIENT_PREFIX: &str = "C";

/// Short-code prefix for upstream 5xx responses
pub const SERVER_PREFIX: &str = "S";
