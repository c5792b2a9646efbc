use drive_api::{ApiError, HttpMethod, UploadFile, UPLOAD_FIELD_NAME};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use super::{RawResponse, RequestBody};

fn js_error(context: &str, err: JsValue) -> ApiError {
    ApiError::Network(format!("{context}: {err:?}"))
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn upload_form(parent_id: &str, files: &[UploadFile]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| js_error("FormData", e))?;
    for file in files {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error("Blob", e))?;
        form.append_with_blob_and_filename(UPLOAD_FIELD_NAME, &blob, &file.name)
            .map_err(|e| js_error("FormData append", e))?;
    }
    form.append_with_str("parentId", parent_id)
        .map_err(|e| js_error("FormData append", e))?;
    Ok(form)
}

pub async fn send(
    method: HttpMethod,
    url: &str,
    body: RequestBody<'_>,
) -> Result<RawResponse, ApiError> {
    let builder = match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Patch => Request::patch(url),
        HttpMethod::Delete => Request::delete(url),
    }
    .credentials(RequestCredentials::Include);

    let request = match body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart { parent_id, files } => builder.body(upload_form(parent_id, files)?),
    }
    .map_err(network)?;

    let response = request.send().await.map_err(network)?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(RawResponse { status, body })
}
