//! Backend call failures.

use drive_model::{ApiErrorBody, ErrorSource};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure of a backend request.
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend summary message.
        message: Option<String>,
        /// Field-level failures.
        sources: Vec<ErrorSource>,
    },
    /// A response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// The transport is not available on this target.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl ApiError {
    /// Builds a status error from a decoded error body.
    pub fn from_body(status: u16, body: ApiErrorBody) -> Self {
        Self::Status {
            status,
            message: body.message.filter(|m| !m.trim().is_empty()),
            sources: body.error_sources,
        }
    }

    /// Builds a status error carrying only a message.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: Some(message.into()),
            sources: Vec::new(),
        }
    }

    /// Returns the backend message when present, otherwise `default`.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => default.to_string(),
        }
    }

    /// Returns field-level failures reported by the backend.
    pub fn sources(&self) -> &[ErrorSource] {
        match self {
            Self::Status { sources, .. } => sources,
            _ => &[],
        }
    }

    /// Returns `true` for `401 Unauthorized`.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = ApiError::from_body(
            409,
            ApiErrorBody {
                message: Some("Name already taken".into()),
                error_sources: Vec::new(),
            },
        );
        assert_eq!(err.user_message("Failed to create item"), "Name already taken");

        let blank = ApiError::from_body(
            500,
            ApiErrorBody {
                message: Some("  ".into()),
                error_sources: Vec::new(),
            },
        );
        assert_eq!(blank.user_message("Failed to create item"), "Failed to create item");
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Failed to delete item"),
            "Failed to delete item"
        );
    }

    #[test]
    fn unauthorized_is_detected_by_status() {
        assert!(ApiError::status(401, "no").is_unauthorized());
        assert!(!ApiError::status(403, "no").is_unauthorized());
    }
}
