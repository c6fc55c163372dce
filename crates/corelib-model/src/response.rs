use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Envelope for non-failure responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime>,
    pub status: ResponseStatus,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessResponse<T> {
    /// Successful outcome, stamped with the local time
    pub fn success(code: impl Into<String>, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            timestamp: Some(jiff::Zoned::now().datetime()),
            status: ResponseStatus::Success,
            code: code.into(),
            message: message.into(),
            data,
        }
    }

    /// Soft failure reported in the success shape; carries no timestamp
    pub fn error(code: impl Into<String>, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            timestamp: None,
            status: ResponseStatus::Error,
            code: code.into(),
            message: message.into(),
            data,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.status, ResponseStatus::Success)
    }
}
