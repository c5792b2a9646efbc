use drive_api::UploadFile;
use drive_model::{
    is_root_folder, ContextMenuState, CreateNodeKind, CreateNodePayload, FileNode, User,
    ROOT_FOLDER_ID,
};
use serde::{Deserialize, Serialize};

pub const FILE_SYSTEM_SCHEMA_VERSION: u32 = 1;
pub const AUTH_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
/// Navigation and selection state of the file manager.
pub struct FileSystemState {
    pub current_folder_id: String,
    /// Expanded sidebar folders in expansion order, without duplicates.
    pub expanded_folders: Vec<String>,
    pub context_menu: Option<ContextMenuState>,
    pub open_file: Option<FileNode>,
    pub sidebar_open: bool,
}

impl Default for FileSystemState {
    fn default() -> Self {
        Self {
            current_folder_id: ROOT_FOLDER_ID.to_string(),
            expanded_folders: vec![ROOT_FOLDER_ID.to_string()],
            context_menu: None,
            open_file: None,
            sidebar_open: true,
        }
    }
}

impl FileSystemState {
    pub fn is_expanded(&self, folder_id: &str) -> bool {
        self.expanded_folders.iter().any(|id| id == folder_id)
    }

    pub fn is_at_root(&self) -> bool {
        is_root_folder(&self.current_folder_id)
    }

    pub fn snapshot(&self) -> FileSystemSnapshot {
        FileSystemSnapshot {
            current_folder_id: self.current_folder_id.clone(),
            expanded_folders: self.expanded_folders.clone(),
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: FileSystemSnapshot) {
        self.current_folder_id = if snapshot.current_folder_id.is_empty() {
            ROOT_FOLDER_ID.to_string()
        } else {
            snapshot.current_folder_id
        };
        self.expanded_folders = dedupe(snapshot.expanded_folders);
    }
}

pub(crate) fn dedupe(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Persisted subset of [`FileSystemState`].
pub struct FileSystemSnapshot {
    pub current_folder_id: String,
    pub expanded_folders: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Session state of the signed-in account.
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl AuthState {
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: AuthSnapshot) {
        self.is_authenticated = snapshot.is_authenticated && snapshot.user.is_some();
        self.user = snapshot.user;
        self.token = snapshot.token;
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Guest User")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Persisted subset of [`AuthState`].
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Durable client state: the persisted slices plus the boot marker.
pub struct DriveState {
    pub file_system: FileSystemState,
    pub auth: AuthState,
    /// Set once persisted slices have been restored.
    pub boot_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKind {
    CreateFolder,
    CreateText,
    Rename { id: String },
    Delete { id: String },
}

impl ModalKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CreateFolder => "Create New Folder",
            Self::CreateText => "Create New Text File",
            Self::Rename { .. } => "Rename Item",
            Self::Delete { .. } => "Delete Item",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Self::CreateFolder | Self::CreateText => "Create",
            Self::Rename { .. } => "Rename",
            Self::Delete { .. } => "Delete",
        }
    }

    pub fn requires_name(&self) -> bool {
        !matches!(self, Self::Delete { .. })
    }

    pub fn mutation_kind(&self) -> MutationKind {
        match self {
            Self::CreateFolder | Self::CreateText => MutationKind::Create,
            Self::Rename { .. } => MutationKind::Rename,
            Self::Delete { .. } => MutationKind::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Open dialog with its text input.
pub struct ModalState {
    pub kind: ModalKind,
    pub value: String,
}

impl ModalState {
    pub fn new(kind: ModalKind) -> Self {
        Self {
            kind,
            value: String::new(),
        }
    }

    pub fn can_confirm(&self) -> bool {
        !self.kind.requires_name() || !self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Rename,
    Delete,
    Upload,
    SaveContent,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Rename => "rename",
            Self::Delete => "delete",
            Self::Upload => "upload",
            Self::SaveContent => "save",
        }
    }

    /// Label shown by the dashboard busy overlay. Renames report inside the modal.
    pub fn overlay_label(self) -> Option<&'static str> {
        match self {
            Self::Create => Some("Creating..."),
            Self::Delete => Some("Deleting..."),
            Self::Upload => Some("Uploading..."),
            Self::SaveContent => Some("Saving..."),
            Self::Rename => None,
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create item",
            Self::Rename => "Failed to rename item",
            Self::Delete => "Failed to delete item",
            Self::Upload => "Failed to upload files",
            Self::SaveContent => "Failed to save changes",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Backend mutation requested by the dashboard.
pub enum PendingMutation {
    Create(CreateNodePayload),
    Rename { id: String, name: String },
    Delete { id: String },
    Upload { parent_id: String, files: Vec<UploadFile> },
    SaveContent { id: String, content: String },
}

impl PendingMutation {
    pub fn create(name: &str, kind: CreateNodeKind, parent_id: &str) -> Self {
        Self::Create(CreateNodePayload::new(name, kind, parent_id))
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::Create,
            Self::Rename { .. } => MutationKind::Rename,
            Self::Delete { .. } => MutationKind::Delete,
            Self::Upload { .. } => MutationKind::Upload,
            Self::SaveContent { .. } => MutationKind::SaveContent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Transient dashboard UI state. Never persisted.
pub struct DashboardState {
    pub modal: Option<ModalState>,
    /// Mutations in flight, one entry per request.
    pub busy: Vec<MutationKind>,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

impl DashboardState {
    pub fn is_busy(&self, kind: MutationKind) -> bool {
        self.busy.contains(&kind)
    }

    pub fn overlay_label(&self) -> Option<&'static str> {
        self.busy.iter().find_map(|kind| kind.overlay_label())
    }

    pub(crate) fn push_toast(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_at_root() {
        let state = FileSystemState::default();
        assert!(state.is_at_root());
        assert!(state.is_expanded(ROOT_FOLDER_ID));
        assert!(state.sidebar_open);
    }

    #[test]
    fn snapshot_restore_dedupes_and_defaults_blank_folder() {
        let mut state = FileSystemState::default();
        state.apply_snapshot(FileSystemSnapshot {
            current_folder_id: String::new(),
            expanded_folders: vec!["root".into(), "a".into(), "root".into()],
        });
        assert_eq!(state.current_folder_id, ROOT_FOLDER_ID);
        assert_eq!(state.expanded_folders, vec!["root".to_string(), "a".to_string()]);
    }

    #[test]
    fn auth_snapshot_without_user_is_signed_out() {
        let mut auth = AuthState::default();
        auth.apply_snapshot(AuthSnapshot {
            user: None,
            token: Some("t".into()),
            is_authenticated: true,
        });
        assert!(!auth.is_authenticated);
        assert_eq!(auth.display_name(), "Guest User");
    }

    #[test]
    fn delete_modal_confirms_without_name() {
        assert!(ModalState::new(ModalKind::Delete { id: "x".into() }).can_confirm());
        let mut create = ModalState::new(ModalKind::CreateFolder);
        assert!(!create.can_confirm());
        create.value = "   ".into();
        assert!(!create.can_confirm());
        create.value = "Docs".into();
        assert!(create.can_confirm());
    }

    #[test]
    fn overlay_label_skips_inline_mutations() {
        let dashboard = DashboardState {
            busy: vec![MutationKind::Rename, MutationKind::Upload],
            ..DashboardState::default()
        };
        assert_eq!(dashboard.overlay_label(), Some("Uploading..."));
    }
}
