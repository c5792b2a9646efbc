//! Cached client facade over the drive and auth services.

use std::{future::Future, rc::Rc};

use drive_model::{
    is_root_folder, AuthResponse, Breadcrumb, CreateNodePayload, EmailRequest, FileNode,
    LoginRequest, RegisterRequest, ResetPasswordRequest, UpdateNodePayload, User,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    cache::{CacheTag, QueryCache, QueryKey},
    error::ApiError,
    service::{AuthApi, DriveApi, UploadFile},
};

const NODE_MUTATION_TAGS: &[CacheTag] = &[CacheTag::Nodes];

#[derive(Clone)]
/// Query/mutation entry point used by the runtime.
///
/// Queries are served from the shared [`QueryCache`] until a mutation invalidates their tags.
/// Mutations invalidate after they settle, whether or not they succeeded, since a failed batch
/// may still have changed server state.
pub struct DriveClient {
    drive: Rc<dyn DriveApi>,
    auth: Rc<dyn AuthApi>,
    cache: QueryCache,
}

impl DriveClient {
    /// Wraps the given services with an empty cache.
    pub fn new(drive: Rc<dyn DriveApi>, auth: Rc<dyn AuthApi>) -> Self {
        Self {
            drive,
            auth,
            cache: QueryCache::default(),
        }
    }

    /// Returns the shared cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn query<T, Fut>(&self, key: QueryKey, fetch: Fut) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache.get::<T>(&key) {
            return Ok(hit);
        }
        let started = self.cache.generation();
        let value = fetch.await?;
        self.cache.put_if_current(key, &value, started)?;
        Ok(value)
    }

    fn settle<T>(&self, tags: &[CacheTag], result: Result<T, ApiError>) -> Result<T, ApiError> {
        self.cache.invalidate(tags);
        result
    }

    /// `getAllNodes`
    pub async fn all_nodes(&self) -> Result<Vec<FileNode>, ApiError> {
        self.query(QueryKey::AllNodes, self.drive.all_nodes()).await
    }

    /// `getNodesByParent`
    pub async fn nodes_by_parent(&self, parent_id: &str) -> Result<Vec<FileNode>, ApiError> {
        self.query(
            QueryKey::NodesByParent(parent_id.to_string()),
            self.drive.nodes_by_parent(parent_id),
        )
        .await
    }

    /// `getBreadcrumbs`; the root has an empty trail and is never requested.
    pub async fn breadcrumbs(&self, folder_id: &str) -> Result<Vec<Breadcrumb>, ApiError> {
        if is_root_folder(folder_id) {
            return Ok(Vec::new());
        }
        self.query(
            QueryKey::Breadcrumbs(folder_id.to_string()),
            self.drive.breadcrumbs(folder_id),
        )
        .await
    }

    /// `createNode`
    pub async fn create_node(&self, payload: &CreateNodePayload) -> Result<FileNode, ApiError> {
        let result = self.drive.create_node(payload).await;
        self.settle(NODE_MUTATION_TAGS, result)
    }

    /// `uploadFiles`; an empty selection is a no-op.
    pub async fn upload_files(
        &self,
        parent_id: &str,
        files: &[UploadFile],
    ) -> Result<Vec<FileNode>, ApiError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        let result = self.drive.upload_files(parent_id, files).await;
        self.settle(NODE_MUTATION_TAGS, result)
    }

    /// `updateNode`
    pub async fn update_node(
        &self,
        id: &str,
        patch: &UpdateNodePayload,
    ) -> Result<FileNode, ApiError> {
        let result = self.drive.update_node(id, patch).await;
        self.settle(NODE_MUTATION_TAGS, result)
    }

    /// `deleteNode`
    pub async fn delete_node(&self, id: &str) -> Result<(), ApiError> {
        let result = self.drive.delete_node(id).await;
        self.settle(NODE_MUTATION_TAGS, result)
    }

    /// `register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let result = self.auth.register(request).await;
        self.settle(&[CacheTag::User], result)
    }

    /// `login`; a new session starts from an empty cache.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self.auth.login(request).await?;
        self.cache.clear();
        Ok(response)
    }

    /// `logout`; cached data is dropped even when the request fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.auth.logout().await;
        self.cache.clear();
        result
    }

    /// `verifyEmail`
    pub async fn verify_email(&self, token: &str) -> Result<AuthResponse, ApiError> {
        let result = self.auth.verify_email(token).await;
        self.settle(&[CacheTag::User], result)
    }

    /// `resendVerificationEmail`
    pub async fn resend_verification_email(&self, request: &EmailRequest) -> Result<(), ApiError> {
        self.auth.resend_verification_email(request).await
    }

    /// `forgotPassword`
    pub async fn forgot_password(&self, request: &EmailRequest) -> Result<(), ApiError> {
        self.auth.forgot_password(request).await
    }

    /// `resetPassword`
    pub async fn reset_password(
        &self,
        token: &str,
        request: &ResetPasswordRequest,
    ) -> Result<(), ApiError> {
        self.auth.reset_password(token, request).await
    }

    /// `getMe`
    pub async fn me(&self) -> Result<User, ApiError> {
        self.query(QueryKey::Me, self.auth.me()).await
    }
}
