//! File-system node types exchanged with the backend.

use serde::{Deserialize, Serialize};

/// Sentinel folder id the client uses for the top of the tree.
///
/// Root-level nodes carry `parentId: null` on the wire; the sentinel never appears as a real
/// node id.
pub const ROOT_FOLDER_ID: &str = "root";

/// Returns `true` when `folder_id` addresses the tree root (sentinel or empty).
pub fn is_root_folder(folder_id: &str) -> bool {
    folder_id.is_empty() || folder_id == ROOT_FOLDER_ID
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Node kind reported by the backend.
pub enum NodeKind {
    /// Folder that can contain other nodes.
    Folder,
    /// Inline-editable plain text file.
    Text,
    /// Image stored in object storage.
    Image,
    /// Audio file.
    Audio,
    /// Video file.
    Video,
    /// Office/PDF style document.
    Document,
    /// Compressed archive.
    Archive,
    /// Anything else, including kinds this client does not know yet.
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Returns `true` for folders.
    pub fn is_folder(self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Returns the lowercase wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
            Self::Archive => "archive",
            Self::Other => "other",
        }
    }

    /// Returns `true` when the file viewer can render this kind from its URL.
    pub fn has_media_preview(self) -> bool {
        matches!(self, Self::Image | Self::Audio | Self::Video)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A folder or file in the user's drive.
pub struct FileNode {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Parent folder id, `None` for root-level nodes.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Inline text content (text files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Object storage URL for uploaded media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Size in bytes when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type recorded at upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Soft-delete marker.
    #[serde(default)]
    pub is_deleted: bool,
    /// Creation timestamp (ISO-8601 string as sent by the backend).
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

impl FileNode {
    /// Returns `true` for folders.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Returns `true` when this node is a direct child of `folder_id` (sentinel-aware).
    pub fn is_child_of(&self, folder_id: &str) -> bool {
        match self.parent_id.as_deref() {
            None => is_root_folder(folder_id),
            Some(parent) => !is_root_folder(folder_id) && parent == folder_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of a folder's ancestor trail.
pub struct Breadcrumb {
    /// Folder id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Folder name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Position and target of the open context menu.
pub struct ContextMenuState {
    /// Client x coordinate in pixels.
    pub x: i32,
    /// Client y coordinate in pixels.
    pub y: i32,
    /// Targeted node, `None` for the folder background.
    pub item_id: Option<String>,
}

impl ContextMenuState {
    /// Menu opened on the folder background.
    pub fn background(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            item_id: None,
        }
    }

    /// Menu opened on a specific node.
    pub fn item(x: i32, y: i32, item_id: impl Into<String>) -> Self {
        Self {
            x,
            y,
            item_id: Some(item_id.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Node kinds the client can create directly.
pub enum CreateNodeKind {
    /// New empty folder.
    Folder,
    /// New empty text file.
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /filesystem`.
pub struct CreateNodePayload {
    /// Node name (already trimmed).
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: CreateNodeKind,
    /// Parent folder id; the root sentinel is sent verbatim.
    pub parent_id: String,
    /// Initial content, present for text files only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl CreateNodePayload {
    /// Builds a create payload, normalizing the name and parent.
    ///
    /// Text files start with empty content; folders carry none.
    pub fn new(name: &str, kind: CreateNodeKind, parent_id: &str) -> Self {
        let parent_id = if parent_id.is_empty() {
            ROOT_FOLDER_ID.to_string()
        } else {
            parent_id.to_string()
        };
        Self {
            name: name.trim().to_string(),
            kind,
            parent_id,
            content: match kind {
                CreateNodeKind::Text => Some(String::new()),
                CreateNodeKind::Folder => None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Body of `PATCH /filesystem/{id}`.
pub struct UpdateNodePayload {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateNodePayload {
    /// Rename-only patch.
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.trim().to_string()),
            content: None,
        }
    }

    /// Content-only patch.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: Some(content.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn file_node_reads_backend_shape() {
        let node: FileNode = serde_json::from_value(json!({
            "_id": "n1",
            "name": "photos",
            "type": "folder",
            "parentId": null,
            "isDeleted": false,
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }))
        .expect("deserialize");
        assert_eq!(node.id, "n1");
        assert!(node.is_folder());
        assert_eq!(node.parent_id, None);
        assert!(node.is_child_of(ROOT_FOLDER_ID));
        assert!(!node.is_child_of("n1"));
    }

    #[test]
    fn unknown_node_kind_falls_back_to_other() {
        let kind: NodeKind = serde_json::from_str("\"spreadsheet\"").expect("deserialize");
        assert_eq!(kind, NodeKind::Other);
        assert_eq!(
            serde_json::to_string(&NodeKind::Document).expect("serialize"),
            "\"document\""
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let node: FileNode = serde_json::from_value(json!({
            "_id": "n2",
            "name": "a.txt",
            "type": "text",
            "parentId": "n1"
        }))
        .expect("deserialize");
        assert!(!node.is_deleted);
        assert!(node.content.is_none());
        assert!(node.is_child_of("n1"));
        assert!(!node.is_child_of(ROOT_FOLDER_ID));
    }

    #[test]
    fn create_payload_trims_and_sets_text_content() {
        let payload = CreateNodePayload::new("  notes.txt ", CreateNodeKind::Text, "");
        assert_eq!(
            serde_json::to_value(&payload).expect("serialize"),
            json!({ "name": "notes.txt", "type": "text", "parentId": "root", "content": "" })
        );

        let folder = CreateNodePayload::new("docs", CreateNodeKind::Folder, "f9");
        assert_eq!(
            serde_json::to_value(&folder).expect("serialize"),
            json!({ "name": "docs", "type": "folder", "parentId": "f9" })
        );
    }

    #[test]
    fn update_payload_omits_absent_fields() {
        assert_eq!(
            serde_json::to_value(UpdateNodePayload::rename(" b ")).expect("serialize"),
            json!({ "name": "b" })
        );
        assert_eq!(
            serde_json::to_value(UpdateNodePayload::content("hi")).expect("serialize"),
            json!({ "content": "hi" })
        );
    }
}
