//! Shared data model for the OrbitDrive client.
//!
//! Everything in this crate is plain serde data plus pure helpers: file-system nodes and their
//! payloads, user/auth models, the backend response envelope, the in-memory tree index used by
//! the sidebar and grid, and auth-form validation rules. Transport lives in `drive_api` /
//! `drive_web`; reactive state lives in `drive_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod envelope;
pub mod node;
pub mod tree;
pub mod user;
pub mod validation;

pub use envelope::{ApiEnvelope, ApiErrorBody, ErrorSource};
pub use node::{
    is_root_folder, Breadcrumb, ContextMenuState, CreateNodeKind, CreateNodePayload, FileNode,
    NodeKind, UpdateNodePayload, ROOT_FOLDER_ID,
};
pub use tree::{NodeTree, TreeRow};
pub use user::{
    AuthResponse, EmailRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, User,
};
pub use validation::{
    validate_confirm_password, validate_email, validate_login_password, validate_name,
    validate_new_password, FieldError, FormErrors,
};
