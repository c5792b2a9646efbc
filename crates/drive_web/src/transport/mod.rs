//! HTTP transport shared by the browser service adapters.
//!
//! Calls are routed to a `wasm32` implementation over `gloo-net`; other targets get a stub
//! that reports [`ApiError::Unsupported`]. Response decoding is target-independent.

use drive_api::{ApiError, Endpoint, UploadFile, API_PREFIX};
use drive_model::{ApiEnvelope, ApiErrorBody};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Backend location used to resolve endpoints.
pub struct HttpConfig {
    /// Backend origin such as `http://localhost:5000`.
    pub backend_url: String,
    /// Path prefix for API routes.
    pub api_prefix: String,
}

impl HttpConfig {
    /// Creates a config with an explicit API prefix.
    pub fn new(backend_url: impl Into<String>, api_prefix: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            api_prefix: api_prefix.into(),
        }
    }

    /// Creates a config using the default [`API_PREFIX`].
    pub fn with_default_prefix(backend_url: impl Into<String>) -> Self {
        Self::new(backend_url, API_PREFIX)
    }

    /// Resolves `endpoint` to an absolute URL.
    pub fn url(&self, endpoint: &Endpoint) -> String {
        endpoint.url_with_prefix(&self.backend_url, &self.api_prefix)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) enum RequestBody<'a> {
    Empty,
    Json(Value),
    Multipart {
        parent_id: &'a str,
        files: &'a [UploadFile],
    },
}

impl RequestBody<'_> {
    pub(crate) fn json<T: Serialize + ?Sized>(payload: &T) -> Result<Self, ApiError> {
        serde_json::to_value(payload)
            .map(Self::Json)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_error(self) -> ApiError {
        match serde_json::from_str::<ApiErrorBody>(&self.body) {
            Ok(body) => ApiError::from_body(self.status, body),
            Err(_) => ApiError::from_body(self.status, ApiErrorBody::default()),
        }
    }

    /// Unwraps the `data` field of a success body.
    pub(crate) fn data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.into_error());
        }
        serde_json::from_str::<ApiEnvelope<T>>(&self.body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Accepts any success body.
    pub(crate) fn ack(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

pub(crate) async fn send(
    config: &HttpConfig,
    endpoint: &Endpoint,
    body: RequestBody<'_>,
) -> Result<RawResponse, ApiError> {
    imp::send(endpoint.method, &config.url(endpoint), body).await
}

#[cfg(test)]
mod tests {
    use drive_model::FileNode;

    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn success_unwraps_data() {
        let nodes: Vec<FileNode> = response(
            200,
            r#"{"success":true,"data":[{"_id":"a","name":"Docs","type":"folder","parentId":null}]}"#,
        )
        .data()
        .expect("decode");
        assert_eq!(nodes[0].name, "Docs");
    }

    #[test]
    fn error_body_maps_to_status_error() {
        let err = response(
            400,
            r#"{"success":false,"message":"Validation error","errorSources":[{"path":"name","message":"Name is required"}]}"#,
        )
        .data::<Value>()
        .expect_err("status");
        assert_eq!(err.user_message("fallback"), "Validation error");
        assert_eq!(err.sources()[0].path, "name");
    }

    #[test]
    fn non_json_error_body_keeps_status() {
        let err = response(502, "<html>Bad gateway</html>").ack().expect_err("status");
        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                message: None,
                sources: Vec::new(),
            }
        );
        assert_eq!(err.user_message("Failed to delete item"), "Failed to delete item");
    }

    #[test]
    fn ack_accepts_empty_bodies() {
        assert_eq!(response(204, "").ack(), Ok(()));
    }

    #[test]
    fn success_with_wrong_shape_is_a_decode_error() {
        let err = response(200, r#"{"data":{"oops":1}}"#)
            .data::<Vec<FileNode>>()
            .expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn config_resolves_with_prefix() {
        let config = HttpConfig::with_default_prefix("http://localhost:5000/");
        assert_eq!(
            config.url(&Endpoint::all_nodes()),
            "http://localhost:5000/api/v1/filesystem/all"
        );
    }
}
