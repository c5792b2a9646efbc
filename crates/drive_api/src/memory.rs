//! In-memory service adapters for tests and offline builds.
//!
//! The adapters follow the backend contract closely enough for the runtime to be exercised
//! end to end: root-level nodes have no parent, deletes are soft and cover the whole subtree,
//! and sibling names are unique per folder.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use drive_model::{
    is_root_folder, AuthResponse, Breadcrumb, CreateNodeKind, CreateNodePayload, EmailRequest,
    FileNode, LoginRequest, NodeKind, NodeTree, RegisterRequest, ResetPasswordRequest,
    UpdateNodePayload, User,
};

use crate::{
    error::ApiError,
    service::{AuthApi, DriveApi, DriveFuture, UploadFile},
};

const MEMORY_TIMESTAMP: &str = "1970-01-01T00:00:00.000Z";

#[derive(Debug, Default)]
struct DriveInner {
    nodes: Vec<FileNode>,
    next_id: u64,
    requests: HashMap<&'static str, usize>,
    fail_next: Option<ApiError>,
}

impl DriveInner {
    fn begin(&mut self, op: &'static str) -> Result<(), ApiError> {
        *self.requests.entry(op).or_default() += 1;
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn live(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.iter().filter(|node| !node.is_deleted)
    }

    fn live_mut(&mut self, id: &str) -> Option<&mut FileNode> {
        self.nodes
            .iter_mut()
            .find(|node| !node.is_deleted && node.id == id)
    }

    fn parent_for(&self, parent_id: &str) -> Result<Option<String>, ApiError> {
        if is_root_folder(parent_id) {
            return Ok(None);
        }
        match self.live().find(|node| node.id == parent_id) {
            Some(node) if node.is_folder() => Ok(Some(node.id.clone())),
            Some(_) => Err(ApiError::status(400, "Parent is not a folder")),
            None => Err(ApiError::status(404, "Parent folder not found")),
        }
    }

    fn ensure_unique_name(
        &self,
        parent: Option<&str>,
        name: &str,
        except: Option<&str>,
    ) -> Result<(), ApiError> {
        let clash = self.live().any(|node| {
            node.parent_id.as_deref() == parent
                && node.name == name
                && Some(node.id.as_str()) != except
        });
        if clash {
            Err(ApiError::status(
                409,
                "An item with this name already exists in this folder",
            ))
        } else {
            Ok(())
        }
    }

    fn insert(&mut self, name: &str, kind: NodeKind, parent_id: Option<String>) -> FileNode {
        self.next_id += 1;
        let node = FileNode {
            id: format!("node-{}", self.next_id),
            name: name.to_string(),
            kind,
            parent_id,
            content: None,
            url: None,
            size: None,
            mime_type: None,
            is_deleted: false,
            created_at: MEMORY_TIMESTAMP.to_string(),
            updated_at: MEMORY_TIMESTAMP.to_string(),
        };
        self.nodes.push(node.clone());
        node
    }
}

/// Maps an upload MIME type to the node kind the backend would assign.
pub fn kind_for_mime(mime_type: &str) -> NodeKind {
    let mime = mime_type.to_ascii_lowercase();
    if mime.starts_with("image/") {
        NodeKind::Image
    } else if mime.starts_with("text/") {
        NodeKind::Text
    } else if mime.starts_with("audio/") {
        NodeKind::Audio
    } else if mime.starts_with("video/") {
        NodeKind::Video
    } else if mime == "application/pdf"
        || mime.contains("msword")
        || mime.contains("officedocument")
    {
        NodeKind::Document
    } else if mime.contains("zip") || mime.contains("tar") || mime.contains("compressed") {
        NodeKind::Archive
    } else {
        NodeKind::Other
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory [`DriveApi`] keeping nodes in insertion order.
pub struct MemoryDriveApi {
    inner: Rc<RefCell<DriveInner>>,
}

impl MemoryDriveApi {
    /// Creates an adapter pre-populated with `nodes`.
    pub fn with_nodes(nodes: Vec<FileNode>) -> Self {
        let api = Self::default();
        {
            let mut inner = api.inner.borrow_mut();
            inner.next_id = nodes.len() as u64;
            inner.nodes = nodes;
        }
        api
    }

    /// Makes the next request fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.inner.borrow_mut().fail_next = Some(err);
    }

    /// Returns how many times operation `op` (method name) was requested.
    pub fn request_count(&self, op: &str) -> usize {
        self.inner.borrow().requests.get(op).copied().unwrap_or(0)
    }

    /// Returns a snapshot of every stored node, soft-deleted ones included.
    pub fn stored_nodes(&self) -> Vec<FileNode> {
        self.inner.borrow().nodes.clone()
    }
}

impl DriveApi for MemoryDriveApi {
    fn all_nodes<'a>(&'a self) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("all_nodes")?;
            Ok(inner.live().cloned().collect())
        })
    }

    fn nodes_by_parent<'a>(
        &'a self,
        parent_id: &'a str,
    ) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("nodes_by_parent")?;
            Ok(inner
                .live()
                .filter(|node| node.is_child_of(parent_id))
                .cloned()
                .collect())
        })
    }

    fn create_node<'a>(
        &'a self,
        payload: &'a CreateNodePayload,
    ) -> DriveFuture<'a, Result<FileNode, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("create_node")?;
            let name = payload.name.trim();
            if name.is_empty() {
                return Err(ApiError::status(400, "Name is required"));
            }
            let parent = inner.parent_for(&payload.parent_id)?;
            inner.ensure_unique_name(parent.as_deref(), name, None)?;
            let kind = match payload.kind {
                CreateNodeKind::Folder => NodeKind::Folder,
                CreateNodeKind::Text => NodeKind::Text,
            };
            let mut node = inner.insert(name, kind, parent);
            if kind == NodeKind::Text {
                node.content = Some(payload.content.clone().unwrap_or_default());
                if let Some(stored) = inner.live_mut(&node.id) {
                    stored.content = node.content.clone();
                }
            }
            Ok(node)
        })
    }

    fn upload_files<'a>(
        &'a self,
        parent_id: &'a str,
        files: &'a [UploadFile],
    ) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("upload_files")?;
            if files.is_empty() {
                return Err(ApiError::status(400, "No files uploaded"));
            }
            let parent = inner.parent_for(parent_id)?;
            let mut created = Vec::with_capacity(files.len());
            for file in files {
                inner.ensure_unique_name(parent.as_deref(), &file.name, None)?;
                let kind = kind_for_mime(&file.mime_type);
                let mut node = inner.insert(&file.name, kind, parent.clone());
                node.size = Some(file.bytes.len() as u64);
                node.mime_type = Some(file.mime_type.clone()).filter(|m| !m.is_empty());
                if kind == NodeKind::Text {
                    node.content = Some(String::from_utf8_lossy(&file.bytes).into_owned());
                } else {
                    node.url = Some(format!("memory://{}/{}", node.id, file.name));
                }
                if let Some(stored) = inner.live_mut(&node.id) {
                    *stored = node.clone();
                }
                created.push(node);
            }
            Ok(created)
        })
    }

    fn update_node<'a>(
        &'a self,
        id: &'a str,
        patch: &'a UpdateNodePayload,
    ) -> DriveFuture<'a, Result<FileNode, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("update_node")?;
            let (parent, kind) = inner
                .live()
                .find(|node| node.id == id)
                .map(|node| (node.parent_id.clone(), node.kind))
                .ok_or_else(|| ApiError::status(404, "Item not found"))?;
            if patch.content.is_some() && kind != NodeKind::Text {
                return Err(ApiError::status(400, "Only text files have editable content"));
            }
            if let Some(name) = patch.name.as_deref() {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ApiError::status(400, "Name is required"));
                }
                inner.ensure_unique_name(parent.as_deref(), name, Some(id))?;
            }
            let node = inner
                .live_mut(id)
                .ok_or_else(|| ApiError::status(404, "Item not found"))?;
            if let Some(name) = patch.name.as_deref() {
                node.name = name.trim().to_string();
            }
            if let Some(content) = patch.content.as_ref() {
                node.content = Some(content.clone());
                node.size = Some(content.len() as u64);
            }
            Ok(node.clone())
        })
    }

    fn delete_node<'a>(&'a self, id: &'a str) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("delete_node")?;
            let tree = NodeTree::new(inner.nodes.clone());
            if tree.get(id).is_none() {
                return Err(ApiError::status(404, "Item not found"));
            }
            let doomed: Vec<String> = tree
                .nodes()
                .iter()
                .filter(|node| tree.is_within(&node.id, id))
                .map(|node| node.id.clone())
                .collect();
            for node in inner.nodes.iter_mut() {
                if doomed.contains(&node.id) {
                    node.is_deleted = true;
                }
            }
            Ok(())
        })
    }

    fn breadcrumbs<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> DriveFuture<'a, Result<Vec<Breadcrumb>, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin("breadcrumbs")?;
            let tree = NodeTree::new(inner.nodes.clone());
            if tree.get(folder_id).is_none() {
                return Err(ApiError::status(404, "Folder not found"));
            }
            Ok(tree.breadcrumbs(folder_id))
        })
    }
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct AuthInner {
    accounts: Vec<Account>,
    session: Option<String>,
    verification_tokens: HashMap<String, String>,
    reset_tokens: HashMap<String, String>,
    next_id: u64,
    fail_next: Option<ApiError>,
}

impl AuthInner {
    fn begin(&mut self) -> Result<(), ApiError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_token(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn sign_in(&mut self, email: &str) -> Result<AuthResponse, ApiError> {
        let user = self
            .accounts
            .iter()
            .find(|account| account.user.email == email)
            .map(|account| account.user.clone())
            .ok_or_else(|| ApiError::status(404, "User not found"))?;
        self.session = Some(email.to_string());
        Ok(AuthResponse {
            user,
            access_token: self.next_token("access"),
            refresh_token: self.next_token("refresh"),
        })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory [`AuthApi`] with mailed tokens exposed for inspection.
pub struct MemoryAuthApi {
    inner: Rc<RefCell<AuthInner>>,
}

impl MemoryAuthApi {
    /// Makes the next request fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.inner.borrow_mut().fail_next = Some(err);
    }

    /// Returns the most recent verification token mailed to `email`.
    pub fn verification_token_for(&self, email: &str) -> Option<String> {
        latest_token(&self.inner.borrow().verification_tokens, email)
    }

    /// Returns the most recent reset token mailed to `email`.
    pub fn reset_token_for(&self, email: &str) -> Option<String> {
        latest_token(&self.inner.borrow().reset_tokens, email)
    }

    /// Returns the email of the signed-in account.
    pub fn session_email(&self) -> Option<String> {
        self.inner.borrow().session.clone()
    }
}

fn latest_token(tokens: &HashMap<String, String>, email: &str) -> Option<String> {
    tokens
        .iter()
        .filter(|(_, owner)| owner.as_str() == email)
        .map(|(token, _)| token.clone())
        .max_by_key(|token| {
            token
                .rsplit('-')
                .next()
                .and_then(|n| n.parse::<u64>().ok())
                .unwrap_or(0)
        })
}

impl AuthApi for MemoryAuthApi {
    fn register<'a>(
        &'a self,
        request: &'a RegisterRequest,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            if request.password != request.confirm_password {
                return Err(ApiError::status(400, "Passwords do not match"));
            }
            if inner
                .accounts
                .iter()
                .any(|account| account.user.email == request.email)
            {
                return Err(ApiError::status(409, "User already exists"));
            }
            let id = inner.next_token("user");
            inner.accounts.push(Account {
                user: User {
                    id,
                    name: request.name.trim().to_string(),
                    email: request.email.clone(),
                    avatar: None,
                    google_id: None,
                    is_email_verified: false,
                    created_at: MEMORY_TIMESTAMP.to_string(),
                    updated_at: MEMORY_TIMESTAMP.to_string(),
                },
                password: request.password.clone(),
            });
            let token = inner.next_token("verify");
            inner
                .verification_tokens
                .insert(token, request.email.clone());
            inner.sign_in(&request.email)
        })
    }

    fn login<'a>(
        &'a self,
        request: &'a LoginRequest,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            let valid = inner.accounts.iter().any(|account| {
                account.user.email == request.email && account.password == request.password
            });
            if !valid {
                return Err(ApiError::status(401, "Invalid email or password"));
            }
            inner.sign_in(&request.email)
        })
    }

    fn logout<'a>(&'a self) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            inner.session = None;
            Ok(())
        })
    }

    fn verify_email<'a>(
        &'a self,
        token: &'a str,
    ) -> DriveFuture<'a, Result<AuthResponse, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            let email = inner
                .verification_tokens
                .remove(token)
                .ok_or_else(|| ApiError::status(400, "Invalid or expired verification token"))?;
            if let Some(account) = inner
                .accounts
                .iter_mut()
                .find(|account| account.user.email == email)
            {
                account.user.is_email_verified = true;
            }
            inner.sign_in(&email)
        })
    }

    fn resend_verification_email<'a>(
        &'a self,
        request: &'a EmailRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            let account = inner
                .accounts
                .iter()
                .find(|account| account.user.email == request.email)
                .ok_or_else(|| ApiError::status(404, "User not found"))?;
            if account.user.is_email_verified {
                return Err(ApiError::status(400, "Email is already verified"));
            }
            let token = inner.next_token("verify");
            inner
                .verification_tokens
                .insert(token, request.email.clone());
            Ok(())
        })
    }

    fn forgot_password<'a>(
        &'a self,
        request: &'a EmailRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            let known = inner
                .accounts
                .iter()
                .any(|account| account.user.email == request.email);
            if known {
                let token = inner.next_token("reset");
                inner.reset_tokens.insert(token, request.email.clone());
            }
            Ok(())
        })
    }

    fn reset_password<'a>(
        &'a self,
        token: &'a str,
        request: &'a ResetPasswordRequest,
    ) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            if request.password != request.confirm_password {
                return Err(ApiError::status(400, "Passwords do not match"));
            }
            let email = inner
                .reset_tokens
                .remove(token)
                .ok_or_else(|| ApiError::status(400, "Invalid or expired reset token"))?;
            if let Some(account) = inner
                .accounts
                .iter_mut()
                .find(|account| account.user.email == email)
            {
                account.password = request.password.clone();
            }
            Ok(())
        })
    }

    fn me<'a>(&'a self) -> DriveFuture<'a, Result<User, ApiError>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.begin()?;
            let email = inner
                .session
                .clone()
                .ok_or_else(|| ApiError::status(401, "You are not authorized"))?;
            inner
                .accounts
                .iter()
                .find(|account| account.user.email == email)
                .map(|account| account.user.clone())
                .ok_or_else(|| ApiError::status(401, "You are not authorized"))
        })
    }
}

#[cfg(test)]
mod tests {
    use drive_model::ROOT_FOLDER_ID;
    use futures::executor::block_on;

    use super::*;

    fn folder(api: &MemoryDriveApi, name: &str, parent: &str) -> FileNode {
        block_on(api.create_node(&CreateNodePayload::new(
            name,
            CreateNodeKind::Folder,
            parent,
        )))
        .expect("create folder")
    }

    #[test]
    fn root_children_have_no_parent() {
        let api = MemoryDriveApi::default();
        let docs = folder(&api, "Docs", ROOT_FOLDER_ID);
        assert_eq!(docs.parent_id, None);
        let nested = folder(&api, "Work", &docs.id);
        assert_eq!(nested.parent_id.as_deref(), Some(docs.id.as_str()));

        let root = block_on(api.nodes_by_parent(ROOT_FOLDER_ID)).expect("list root");
        assert_eq!(root.len(), 1);
        let inside = block_on(api.nodes_by_parent(&docs.id)).expect("list docs");
        assert_eq!(inside[0].id, nested.id);
    }

    #[test]
    fn sibling_names_must_be_unique() {
        let api = MemoryDriveApi::default();
        folder(&api, "Docs", ROOT_FOLDER_ID);
        let err = block_on(api.create_node(&CreateNodePayload::new(
            "Docs",
            CreateNodeKind::Text,
            ROOT_FOLDER_ID,
        )))
        .expect_err("duplicate");
        assert_eq!(
            err.user_message("x"),
            "An item with this name already exists in this folder"
        );
    }

    #[test]
    fn delete_soft_deletes_subtree() {
        let api = MemoryDriveApi::default();
        let docs = folder(&api, "Docs", ROOT_FOLDER_ID);
        let work = folder(&api, "Work", &docs.id);
        let keep = folder(&api, "Keep", ROOT_FOLDER_ID);

        block_on(api.delete_node(&docs.id)).expect("delete");
        let live: Vec<_> = block_on(api.all_nodes())
            .expect("list")
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(live, vec![keep.id]);
        let stored = api.stored_nodes();
        assert!(stored.iter().find(|n| n.id == work.id).unwrap().is_deleted);
    }

    #[test]
    fn uploads_classify_by_mime() {
        let api = MemoryDriveApi::default();
        let files = vec![
            UploadFile {
                name: "a.png".into(),
                mime_type: "image/png".into(),
                bytes: vec![1, 2, 3],
            },
            UploadFile {
                name: "b.txt".into(),
                mime_type: "text/plain".into(),
                bytes: b"hello".to_vec(),
            },
        ];
        let created = block_on(api.upload_files(ROOT_FOLDER_ID, &files)).expect("upload");
        assert_eq!(created[0].kind, NodeKind::Image);
        assert!(created[0].url.is_some());
        assert_eq!(created[1].kind, NodeKind::Text);
        assert_eq!(created[1].content.as_deref(), Some("hello"));
        assert_eq!(kind_for_mime("application/zip"), NodeKind::Archive);
        assert_eq!(kind_for_mime("application/pdf"), NodeKind::Document);
    }

    #[test]
    fn content_updates_only_apply_to_text() {
        let api = MemoryDriveApi::default();
        let docs = folder(&api, "Docs", ROOT_FOLDER_ID);
        let err = block_on(api.update_node(&docs.id, &UpdateNodePayload::content("x")))
            .expect_err("folder content");
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
    }

    #[test]
    fn register_verify_and_reset_flow() {
        let auth = MemoryAuthApi::default();
        let registered = block_on(auth.register(&RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
        }))
        .expect("register");
        assert!(!registered.user.is_email_verified);

        let token = auth.verification_token_for("ada@example.com").expect("token");
        let verified = block_on(auth.verify_email(&token)).expect("verify");
        assert!(verified.user.is_email_verified);
        assert!(block_on(auth.verify_email(&token)).is_err());

        block_on(auth.forgot_password(&EmailRequest {
            email: "ada@example.com".into(),
        }))
        .expect("forgot");
        let reset = auth.reset_token_for("ada@example.com").expect("reset token");
        block_on(auth.reset_password(
            &reset,
            &ResetPasswordRequest {
                password: "password2".into(),
                confirm_password: "password2".into(),
            },
        ))
        .expect("reset");

        block_on(auth.logout()).expect("logout");
        assert!(block_on(auth.me()).expect_err("signed out").is_unauthorized());
        let login = block_on(auth.login(&LoginRequest {
            email: "ada@example.com".into(),
            password: "password2".into(),
        }))
        .expect("login with new password");
        assert_eq!(login.user.name, "Ada");
        assert_eq!(auth.session_email().as_deref(), Some("ada@example.com"));
    }
}
