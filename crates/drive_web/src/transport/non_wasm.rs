use drive_api::{ApiError, HttpMethod};

use super::{RawResponse, RequestBody};

pub async fn send(
    _method: HttpMethod,
    url: &str,
    _body: RequestBody<'_>,
) -> Result<RawResponse, ApiError> {
    Err(ApiError::Unsupported(format!(
        "HTTP requests are only available when compiled for wasm32 ({url})"
    )))
}
