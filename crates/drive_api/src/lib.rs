//! Typed service contracts for the OrbitDrive backend plus the client-side query cache.
//!
//! This crate is the API-first boundary between the runtime and transport. It exposes the
//! object-safe [`DriveApi`] / [`AuthApi`] / [`PersistStore`] contracts, the tag-invalidated
//! [`QueryCache`], the [`DriveClient`] facade that ties them together, and in-memory adapters
//! used by tests and offline builds. Browser transport lives in `drive_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod cache;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod persist;
pub mod service;

pub use cache::{CacheTag, QueryCache, QueryKey};
pub use client::DriveClient;
pub use endpoint::{Endpoint, HttpMethod, API_PREFIX};
pub use error::ApiError;
pub use memory::{MemoryAuthApi, MemoryDriveApi};
pub use persist::{
    load_slice_with, save_slice_with, MemoryPersistStore, PersistFuture, PersistStore,
    PersistedSlice,
};
pub use service::{AuthApi, DriveApi, DriveFuture, UploadFile, UPLOAD_FIELD_NAME};
