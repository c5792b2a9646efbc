//! Backend-backed [`DriveApi`] implementation.

use drive_api::{ApiError, DriveApi, DriveFuture, Endpoint, UploadFile};
use drive_model::{Breadcrumb, CreateNodePayload, FileNode, UpdateNodePayload};
use serde::Deserialize;

use crate::transport::{send, HttpConfig, RequestBody};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UploadedNodes {
    Many(Vec<FileNode>),
    One(FileNode),
}

impl From<UploadedNodes> for Vec<FileNode> {
    fn from(value: UploadedNodes) -> Self {
        match value {
            UploadedNodes::Many(nodes) => nodes,
            UploadedNodes::One(node) => vec![node],
        }
    }
}

#[derive(Debug, Clone)]
/// File-system service talking to the OrbitDrive REST API with cookie credentials.
pub struct HttpDriveApi {
    config: HttpConfig,
}

impl HttpDriveApi {
    /// Creates a service for the given backend.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }
}

impl DriveApi for HttpDriveApi {
    fn all_nodes<'a>(&'a self) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>> {
        Box::pin(async move {
            send(&self.config, &Endpoint::all_nodes(), RequestBody::Empty)
                .await?
                .data()
        })
    }

    fn nodes_by_parent<'a>(
        &'a self,
        parent_id: &'a str,
    ) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>> {
        Box::pin(async move {
            send(
                &self.config,
                &Endpoint::nodes_by_parent(parent_id),
                RequestBody::Empty,
            )
            .await?
            .data()
        })
    }

    fn create_node<'a>(
        &'a self,
        payload: &'a CreateNodePayload,
    ) -> DriveFuture<'a, Result<FileNode, ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(payload)?;
            send(&self.config, &Endpoint::create_node(), body)
                .await?
                .data()
        })
    }

    fn upload_files<'a>(
        &'a self,
        parent_id: &'a str,
        files: &'a [UploadFile],
    ) -> DriveFuture<'a, Result<Vec<FileNode>, ApiError>> {
        Box::pin(async move {
            let body = RequestBody::Multipart { parent_id, files };
            send(&self.config, &Endpoint::upload_files(), body)
                .await?
                .data::<UploadedNodes>()
                .map(Vec::from)
        })
    }

    fn update_node<'a>(
        &'a self,
        id: &'a str,
        patch: &'a UpdateNodePayload,
    ) -> DriveFuture<'a, Result<FileNode, ApiError>> {
        Box::pin(async move {
            let body = RequestBody::json(patch)?;
            send(&self.config, &Endpoint::update_node(id), body)
                .await?
                .data()
        })
    }

    fn delete_node<'a>(&'a self, id: &'a str) -> DriveFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            send(&self.config, &Endpoint::delete_node(id), RequestBody::Empty)
                .await?
                .ack()
        })
    }

    fn breadcrumbs<'a>(
        &'a self,
        folder_id: &'a str,
    ) -> DriveFuture<'a, Result<Vec<Breadcrumb>, ApiError>> {
        Box::pin(async move {
            send(
                &self.config,
                &Endpoint::breadcrumbs(folder_id),
                RequestBody::Empty,
            )
            .await?
            .data()
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn upload_response_accepts_single_node() {
        let one: UploadedNodes = serde_json::from_str(
            r#"{"_id":"a","name":"a.txt","type":"text","parentId":null}"#,
        )
        .expect("one");
        assert_eq!(Vec::from(one).len(), 1);
        let many: UploadedNodes = serde_json::from_str("[]").expect("many");
        assert!(Vec::from(many).is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_target_reports_unsupported_transport() {
        let api = HttpDriveApi::new(HttpConfig::with_default_prefix("http://localhost:5000"));
        let err = block_on(api.all_nodes()).expect_err("no transport");
        assert!(matches!(err, ApiError::Unsupported(_)));
    }
}
