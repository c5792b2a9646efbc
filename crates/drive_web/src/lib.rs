//! Browser (`wasm32`) implementations of the [`drive_api`] service contracts.
//!
//! - [`HttpDriveApi`] / [`HttpAuthApi`]: REST transport over `gloo-net` with cookie credentials
//! - [`WebPersistStore`]: `localStorage` persistence for state slices
//! - [`read_upload_files`]: reads an `<input type="file">` selection into upload batches
//!
//! Off `wasm32` the transport reports [`drive_api::ApiError::Unsupported`] and storage is a
//! no-op, so dependent crates still build and test natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod drive;
pub mod files;
pub mod storage;
mod transport;

pub use auth::{google_login_url, start_google_login, HttpAuthApi};
pub use drive::HttpDriveApi;
pub use files::read_upload_files;
pub use storage::WebPersistStore;
pub use transport::HttpConfig;
