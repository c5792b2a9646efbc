//! Backend response envelope shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Success body: the payload sits under `data`.
pub struct ApiEnvelope<T> {
    /// Response payload.
    pub data: T,
    /// Optional human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single field-level validation failure reported by the backend.
pub struct ErrorSource {
    /// Field path, when the backend provides one.
    #[serde(default)]
    pub path: String,
    /// Failure message.
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Error body returned with non-2xx responses.
pub struct ApiErrorBody {
    /// Summary message.
    #[serde(default)]
    pub message: Option<String>,
    /// Field-level failures.
    #[serde(default)]
    pub error_sources: Vec<ErrorSource>,
}
