//! Reading browser file selections into upload batches.

use drive_api::{ApiError, UploadFile};

/// Reads every file of an `<input type="file">` selection into memory, in selection order.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the browser fails to read a file and
/// [`ApiError::Unsupported`] off `wasm32`.
pub async fn read_upload_files(list: &web_sys::FileList) -> Result<Vec<UploadFile>, ApiError> {
    #[cfg(target_arch = "wasm32")]
    {
        let mut files = Vec::with_capacity(list.length() as usize);
        for index in 0..list.length() {
            let Some(file) = list.get(index) else {
                continue;
            };
            let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
                .await
                .map_err(|e| ApiError::Network(format!("reading {} failed: {e:?}", file.name())))?;
            files.push(UploadFile {
                name: file.name(),
                mime_type: file.type_(),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            });
        }
        Ok(files)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = list;
        Err(ApiError::Unsupported(
            "file selections can only be read when compiled for wasm32".to_string(),
        ))
    }
}
