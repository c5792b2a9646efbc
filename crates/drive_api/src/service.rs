//! Backend service contracts.

use std::{future::Future, pin::Pin};

use drive_model::{
    AuthResponse, Breadcrumb, CreateNodePayload, EmailRequest, FileNode, LoginRequest,
    RegisterRequest, ResetPasswordRequest, UpdateNodePayload, User,
};

use crate::error::ApiError;

/// Object-safe boxed future used by [`DriveApi`] and [`AuthApi`] async methods.
pub type DriveFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file selected for upload, already read into memory.
pub struct UploadFile {
    /// Original file name.
    pub name: String,
    /// Browser-reported MIME type (may be empty).
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Multipart field carrying each uploaded file.
///
/// The field repeats once per file, including single-file batches.
pub const UPLOAD_FIELD_NAME: &str = "files";

/// File-system operations served by the backend.
///
/// Folder arguments accept the root sentinel; implementations translate it to the wire form.
pub trait DriveApi {
    /// Lists every node owned by the user.
    fn all_nodes<'a>(&'a self) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>>;

    /// Lists the direct children of `parent_id`.
    fn nodes_by_parent<'a>(
        &'a self,
        parent_id: &'a str,
    ) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>>;

    /// Creates a folder or text file.
    fn create_node<'a>(
        &'a self,
        payload: &'a CreateNodePayload,
    ) -> DriveFuture<'a, Result<FileNode, ApiError>>;

    /// Uploads files into `parent_id`.
    fn upload_files<'a>(
        &'a self,
        parent_id: &'a str,
        files: &'a [UploadFile],
    ) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>>;

    /// Renames a node and/or replaces text content.
    fn update_node<'a>(
        &'a self,
        id: &'a str,
        patch: &'a UpdateNodePayload,
    ) -> DriveFuture<'a, Result<FileNode, ApiError>>;

    /// Deletes a node (and, for folders, its subtree).
    fn delete_node<'a>(&'a self, id: &'a str) -> DriveFuture<'a, Result<(), ApiError>>;

    /// Returns the ancestor trail of `folder_id`, top-level folder first.
    fn breadcrumbs<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> DriveFuture<'a, Result<Vec<Breadcrumb>, ApiError>>;
}

/// Account operations served by the backend.
pub trait AuthApi {
    /// Creates an account and signs it in.
    fn register<'a>(
        &'a self,
        request: &'a RegisterRequest,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>>;

    /// Signs in with email and password.
    fn login<'a>(
        &'a self,
        request: &'a LoginRequest,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>>;

    /// Ends the backend session.
    fn logout<'a>(&'a self) -> DriveFuture<'a, Result<(), ApiError>>;

    /// Confirms an email address from a mailed token and signs the account in.
    fn verify_email<'a>(
        &'a self,
        token: &'a str,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>>;

    /// Sends a fresh verification email.
    fn resend_verification_email<'a>(
        &'a self,
        request: &'a EmailRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>>;

    /// Starts the password-reset flow.
    fn forgot_password<'a>(
        &'a self,
        request: &'a EmailRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>>;

    /// Completes the password-reset flow.
    fn reset_password<'a>(
        &'a self,
        token: &'a str,
        request: &'a ResetPasswordRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>>;

    /// Returns the signed-in account.
    fn me<'a>(&'a self) -> DriveFuture<'a, Result<User, ApiError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_uploads_use_the_repeated_files_field() {
        assert_eq!(UPLOAD_FIELD_NAME, "files");
    }
}
