//! Reducer actions, side-effect intents, and transition logic for the drive runtime.

mod dashboard;

use drive_api::UploadFile;
use drive_model::{is_root_folder, ContextMenuState, FileNode, NodeTree, User, ROOT_FOLDER_ID};
use thiserror::Error;

use crate::model::{
    dedupe, AuthSnapshot, DashboardState, DriveState, FileSystemSnapshot, FileSystemState,
    MutationKind, PendingMutation, ToastLevel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Entries of the folder context menu.
pub enum ContextMenuCommand {
    /// Background menu: open the create-folder dialog.
    NewFolder,
    /// Background menu: open the create-text-file dialog.
    NewTextFile,
    /// Background menu: open the browser file picker.
    Upload,
    /// Item menu: open the rename dialog for the targeted node.
    Rename,
    /// Item menu: open the delete confirmation for the targeted node.
    Delete,
}

impl ContextMenuCommand {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NewFolder => "New Folder",
            Self::NewTextFile => "New Text File",
            Self::Upload => "Upload Files",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
        }
    }

    /// Commands offered for a menu with or without a targeted node.
    pub fn for_target(has_item: bool) -> &'static [ContextMenuCommand] {
        if has_item {
            &[Self::Rename, Self::Delete]
        } else {
            &[Self::NewFolder, Self::NewTextFile, Self::Upload]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_drive`].
pub enum DriveAction {
    /// Navigate to a folder.
    SetCurrentFolder {
        /// Folder id, `"root"` for the top of the tree.
        folder_id: String,
    },
    /// Collapse an expanded sidebar folder or expand a collapsed one.
    ToggleFolderExpansion {
        /// Folder id.
        folder_id: String,
    },
    /// Replace the expanded folder set.
    SetExpandedFolders {
        /// Folder ids in expansion order.
        folder_ids: Vec<String>,
    },
    /// Navigate into a folder from the grid, expanding it in the sidebar.
    OpenFolder {
        /// Folder id.
        folder_id: String,
    },
    /// Navigate into a folder node or open a file node in the viewer.
    ActivateNode {
        /// Clicked node.
        node: FileNode,
    },
    /// Show or hide the context menu.
    SetContextMenu {
        /// Menu position and target, `None` to hide.
        menu: Option<ContextMenuState>,
    },
    /// Hide the context menu if open.
    CloseContextMenu,
    /// Open a file in the viewer or close the viewer.
    SetOpenFile {
        /// File to show.
        file: Option<FileNode>,
    },
    /// Show or hide the sidebar.
    SetSidebarOpen {
        /// Whether the sidebar is visible.
        open: bool,
    },
    /// Flip sidebar visibility.
    ToggleSidebar,
    /// Bring selection state in line with a freshly fetched node list.
    ReconcileWithNodes {
        /// Every live node of the user.
        nodes: Vec<FileNode>,
    },
    /// Restore the persisted file-system slice.
    HydrateFileSystem {
        /// Persisted snapshot.
        snapshot: FileSystemSnapshot,
    },
    /// Store a freshly authenticated session.
    SetCredentials {
        /// Signed-in account.
        user: User,
        /// Access token issued by the backend.
        access_token: String,
    },
    /// Drop the session and reset the file-system slice.
    Logout,
    /// Mark the auth slice as loading or idle.
    SetAuthLoading {
        /// Loading flag.
        loading: bool,
    },
    /// Replace the signed-in account with a newer copy.
    UpdateUser {
        /// Account returned by the backend.
        user: User,
    },
    /// Restore the persisted auth slice.
    HydrateAuth {
        /// Persisted snapshot.
        snapshot: AuthSnapshot,
    },
    /// Marks persisted slices as restored.
    BootHydrationComplete,
    /// Run a context menu entry against the open menu.
    ContextMenuCommand(ContextMenuCommand),
    /// Update the dialog input.
    SetModalValue {
        /// Current input text.
        value: String,
    },
    /// Confirm the open dialog.
    ConfirmModal,
    /// Dismiss the open dialog.
    CancelModal,
    /// Upload files picked by the user into the current folder.
    StartUpload {
        /// Files already read into memory.
        files: Vec<UploadFile>,
    },
    /// Save edited content of the open text file.
    SaveFileContent {
        /// New file content.
        content: String,
    },
    /// Report the outcome of a mutation started through [`RuntimeEffect::RunMutation`].
    MutationSettled {
        /// Settled mutation.
        kind: MutationKind,
        /// User-facing failure message, `None` on success.
        error: Option<String>,
    },
    /// Show a toast.
    PushToast {
        /// Toast severity.
        level: ToastLevel,
        /// Toast text.
        message: String,
    },
    /// Remove a toast.
    DismissToast {
        /// Toast id.
        id: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_drive`] for the host to execute.
pub enum RuntimeEffect {
    /// Persist the file-system slice.
    PersistFileSystem,
    /// Persist the auth slice.
    PersistAuth,
    /// Drop every cached query result.
    ClearQueryCache,
    /// Open the browser file picker for uploads.
    OpenUploadPicker,
    /// Send a mutation to the backend and report back with [`DriveAction::MutationSettled`].
    RunMutation(PendingMutation),
    /// Remove a toast after the configured timeout.
    ScheduleToastDismiss {
        /// Toast id.
        id: u64,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not apply to the current state.
pub enum ReducerError {
    /// A dialog action arrived with no dialog open.
    #[error("no dialog is open")]
    NoModal,
    /// An item command arrived without a targeted node.
    #[error("context menu has no target item")]
    NoContextTarget,
    /// A viewer action arrived with no file open.
    #[error("no file is open")]
    NoOpenFile,
    /// Content was saved for a node that is not a text file.
    #[error("node {0} is not an editable text file")]
    NotEditable(String),
}

/// Applies a [`DriveAction`] to durable and dashboard state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action does not apply to the current state. On error the
/// caller discards both states.
pub fn reduce_drive(
    state: &mut DriveState,
    dashboard: &mut DashboardState,
    action: DriveAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    if dashboard::reduce_dashboard_action(state, dashboard, &action, &mut effects)? {
        return Ok(effects);
    }

    let fs = &mut state.file_system;
    match action {
        DriveAction::SetCurrentFolder { folder_id } => {
            set_current_folder(fs, folder_id, &mut effects);
        }
        DriveAction::ToggleFolderExpansion { folder_id } => {
            if let Some(index) = fs.expanded_folders.iter().position(|id| *id == folder_id) {
                fs.expanded_folders.remove(index);
            } else {
                fs.expanded_folders.push(folder_id);
            }
            effects.push(RuntimeEffect::PersistFileSystem);
        }
        DriveAction::SetExpandedFolders { folder_ids } => {
            fs.expanded_folders = dedupe(folder_ids);
            effects.push(RuntimeEffect::PersistFileSystem);
        }
        DriveAction::OpenFolder { folder_id } => {
            if !fs.is_expanded(&folder_id) {
                fs.expanded_folders.push(folder_id.clone());
            }
            set_current_folder(fs, folder_id, &mut effects);
        }
        DriveAction::ActivateNode { node } => {
            if node.is_folder() {
                set_current_folder(fs, node.id, &mut effects);
            } else {
                fs.open_file = Some(node);
            }
        }
        DriveAction::SetContextMenu { menu } => {
            fs.context_menu = menu;
        }
        DriveAction::CloseContextMenu => {
            fs.context_menu = None;
        }
        DriveAction::SetOpenFile { file } => {
            fs.open_file = file;
        }
        DriveAction::SetSidebarOpen { open } => {
            fs.sidebar_open = open;
        }
        DriveAction::ToggleSidebar => {
            fs.sidebar_open = !fs.sidebar_open;
        }
        DriveAction::ReconcileWithNodes { nodes } => {
            reconcile_with_nodes(fs, &nodes, &mut effects);
        }
        DriveAction::HydrateFileSystem { snapshot } => {
            fs.apply_snapshot(snapshot);
        }
        DriveAction::SetCredentials { user, access_token } => {
            state.auth.user = Some(user);
            state.auth.token = Some(access_token);
            state.auth.is_authenticated = true;
            state.auth.is_loading = false;
            effects.push(RuntimeEffect::PersistAuth);
        }
        DriveAction::Logout => {
            state.auth.user = None;
            state.auth.token = None;
            state.auth.is_authenticated = false;
            state.auth.is_loading = false;
            state.file_system = FileSystemState::default();
            dashboard.modal = None;
            effects.push(RuntimeEffect::PersistAuth);
            effects.push(RuntimeEffect::PersistFileSystem);
            effects.push(RuntimeEffect::ClearQueryCache);
        }
        DriveAction::SetAuthLoading { loading } => {
            state.auth.is_loading = loading;
        }
        DriveAction::UpdateUser { user } => {
            if state.auth.user.as_ref() != Some(&user) {
                state.auth.user = Some(user);
                effects.push(RuntimeEffect::PersistAuth);
            }
        }
        DriveAction::HydrateAuth { snapshot } => {
            state.auth.apply_snapshot(snapshot);
        }
        DriveAction::BootHydrationComplete => {
            state.boot_complete = true;
        }
        DriveAction::ContextMenuCommand(_)
        | DriveAction::SetModalValue { .. }
        | DriveAction::ConfirmModal
        | DriveAction::CancelModal
        | DriveAction::StartUpload { .. }
        | DriveAction::SaveFileContent { .. }
        | DriveAction::MutationSettled { .. }
        | DriveAction::PushToast { .. }
        | DriveAction::DismissToast { .. } => {}
    }
    Ok(effects)
}

fn set_current_folder(fs: &mut FileSystemState, folder_id: String, effects: &mut Vec<RuntimeEffect>) {
    fs.current_folder_id = if is_root_folder(&folder_id) {
        ROOT_FOLDER_ID.to_string()
    } else {
        folder_id
    };
    fs.context_menu = None;
    effects.push(RuntimeEffect::PersistFileSystem);
}

fn reconcile_with_nodes(
    fs: &mut FileSystemState,
    nodes: &[FileNode],
    effects: &mut Vec<RuntimeEffect>,
) {
    // Soft-deleted nodes count as gone.
    let tree = NodeTree::new(nodes.to_vec());
    let before = fs.snapshot();

    if !tree.contains_folder(&fs.current_folder_id) {
        fs.current_folder_id = ROOT_FOLDER_ID.to_string();
    }
    fs.expanded_folders.retain(|id| tree.contains_folder(id));

    if let Some(open) = fs.open_file.as_ref() {
        fs.open_file = tree.get(&open.id).filter(|node| !node.is_folder()).cloned();
    }
    let target_gone = fs
        .context_menu
        .as_ref()
        .and_then(|menu| menu.item_id.as_deref())
        .is_some_and(|item| tree.get(item).is_none());
    if target_gone {
        fs.context_menu = None;
    }

    if fs.snapshot() != before {
        effects.push(RuntimeEffect::PersistFileSystem);
    }
}

#[cfg(test)]
mod tests {
    use drive_model::NodeKind;
    use pretty_assertions::assert_eq;

    use super::*;

    pub(super) fn node(id: &str, kind: NodeKind, parent: Option<&str>) -> FileNode {
        FileNode {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            parent_id: parent.map(str::to_string),
            content: (kind == NodeKind::Text).then(String::new),
            url: None,
            size: None,
            mime_type: None,
            is_deleted: false,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    pub(super) fn user() -> User {
        User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            avatar: None,
            google_id: None,
            is_email_verified: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn run(state: &mut DriveState, dashboard: &mut DashboardState, action: DriveAction) -> Vec<RuntimeEffect> {
        reduce_drive(state, dashboard, action).expect("reduce")
    }

    #[test]
    fn toggle_expansion_appends_then_removes() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        let toggle = || DriveAction::ToggleFolderExpansion {
            folder_id: "a".into(),
        };

        let effects = run(&mut state, &mut dashboard, toggle());
        assert_eq!(state.file_system.expanded_folders, vec!["root", "a"]);
        assert_eq!(effects, vec![RuntimeEffect::PersistFileSystem]);

        run(&mut state, &mut dashboard, toggle());
        assert_eq!(state.file_system.expanded_folders, vec!["root"]);
    }

    #[test]
    fn set_expanded_folders_drops_duplicates_in_order() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        run(
            &mut state,
            &mut dashboard,
            DriveAction::SetExpandedFolders {
                folder_ids: vec!["b".into(), "a".into(), "b".into()],
            },
        );
        assert_eq!(state.file_system.expanded_folders, vec!["b", "a"]);
    }

    #[test]
    fn set_current_folder_closes_context_menu() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        state.file_system.context_menu = Some(ContextMenuState::background(4, 4));
        run(
            &mut state,
            &mut dashboard,
            DriveAction::SetCurrentFolder {
                folder_id: "f1".into(),
            },
        );
        assert_eq!(state.file_system.current_folder_id, "f1");
        assert_eq!(state.file_system.context_menu, None);
    }

    #[test]
    fn open_folder_expands_without_collapsing() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        let open = || DriveAction::OpenFolder {
            folder_id: "f1".into(),
        };
        run(&mut state, &mut dashboard, open());
        run(&mut state, &mut dashboard, open());
        assert_eq!(state.file_system.current_folder_id, "f1");
        assert_eq!(state.file_system.expanded_folders, vec!["root", "f1"]);
    }

    #[test]
    fn activate_node_navigates_folders_and_opens_files() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        run(
            &mut state,
            &mut dashboard,
            DriveAction::ActivateNode {
                node: node("f1", NodeKind::Folder, None),
            },
        );
        assert_eq!(state.file_system.current_folder_id, "f1");
        assert_eq!(state.file_system.open_file, None);

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ActivateNode {
                node: node("t1", NodeKind::Text, Some("f1")),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            state.file_system.open_file.as_ref().map(|f| f.id.as_str()),
            Some("t1")
        );
        assert_eq!(state.file_system.current_folder_id, "f1");
    }

    #[test]
    fn reconcile_falls_back_to_root_and_prunes_vanished_ids() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        state.file_system.current_folder_id = "gone".into();
        state.file_system.expanded_folders = vec!["root".into(), "gone".into(), "f1".into()];
        state.file_system.open_file = Some(node("t-old", NodeKind::Text, None));
        state.file_system.context_menu = Some(ContextMenuState::item(1, 1, "t-old"));

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ReconcileWithNodes {
                nodes: vec![node("f1", NodeKind::Folder, None)],
            },
        );

        assert_eq!(state.file_system.current_folder_id, ROOT_FOLDER_ID);
        assert_eq!(state.file_system.expanded_folders, vec!["root", "f1"]);
        assert_eq!(state.file_system.open_file, None);
        assert_eq!(state.file_system.context_menu, None);
        assert_eq!(effects, vec![RuntimeEffect::PersistFileSystem]);
    }

    #[test]
    fn reconcile_refreshes_open_file_and_keeps_valid_state_quiet() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        state.file_system.open_file = Some(node("t1", NodeKind::Text, None));
        let mut renamed = node("t1", NodeKind::Text, None);
        renamed.name = "notes.txt".into();

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ReconcileWithNodes {
                nodes: vec![renamed.clone()],
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.file_system.open_file, Some(renamed));
    }

    #[test]
    fn reconcile_treats_soft_deleted_nodes_as_gone() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        state.file_system.current_folder_id = "f1".into();
        state.file_system.expanded_folders = vec!["root".into(), "f1".into()];
        state.file_system.open_file = Some(node("t1", NodeKind::Text, Some("f1")));
        state.file_system.context_menu = Some(ContextMenuState::item(2, 2, "t1"));
        let mut folder = node("f1", NodeKind::Folder, None);
        folder.is_deleted = true;
        let mut file = node("t1", NodeKind::Text, Some("f1"));
        file.is_deleted = true;

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ReconcileWithNodes {
                nodes: vec![folder, file],
            },
        );

        assert_eq!(state.file_system.current_folder_id, ROOT_FOLDER_ID);
        assert_eq!(state.file_system.expanded_folders, vec!["root"]);
        assert_eq!(state.file_system.open_file, None);
        assert_eq!(state.file_system.context_menu, None);
        assert_eq!(effects, vec![RuntimeEffect::PersistFileSystem]);
    }

    #[test]
    fn reconcile_persists_when_expanded_contents_change_at_equal_length() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        state.file_system.expanded_folders = vec!["f1".into(), "gone".into()];

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ReconcileWithNodes {
                nodes: vec![node("f1", NodeKind::Folder, None)],
            },
        );

        assert_eq!(state.file_system.expanded_folders, vec!["f1"]);
        assert_eq!(effects, vec![RuntimeEffect::PersistFileSystem]);
    }

    #[test]
    fn reconcile_keeps_root_collapsed_when_user_collapsed_it() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        run(
            &mut state,
            &mut dashboard,
            DriveAction::ToggleFolderExpansion {
                folder_id: ROOT_FOLDER_ID.into(),
            },
        );
        assert!(state.file_system.expanded_folders.is_empty());

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ReconcileWithNodes {
                nodes: vec![node("f1", NodeKind::Folder, None)],
            },
        );

        assert!(state.file_system.expanded_folders.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn sidebar_open_flag_is_set_and_toggled() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        assert!(state.file_system.sidebar_open);

        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::SetSidebarOpen { open: false },
        );
        assert!(!state.file_system.sidebar_open);
        assert!(effects.is_empty());

        run(&mut state, &mut dashboard, DriveAction::ToggleSidebar);
        assert!(state.file_system.sidebar_open);
        run(&mut state, &mut dashboard, DriveAction::SetSidebarOpen { open: true });
        assert!(state.file_system.sidebar_open);
    }

    #[test]
    fn logout_resets_file_system_and_clears_cache() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        run(
            &mut state,
            &mut dashboard,
            DriveAction::SetCredentials {
                user: user(),
                access_token: "tok".into(),
            },
        );
        run(
            &mut state,
            &mut dashboard,
            DriveAction::OpenFolder {
                folder_id: "f1".into(),
            },
        );
        assert!(state.auth.is_authenticated);

        let effects = run(&mut state, &mut dashboard, DriveAction::Logout);
        assert_eq!(state.auth, crate::model::AuthState::default());
        assert_eq!(state.file_system, FileSystemState::default());
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistAuth,
                RuntimeEffect::PersistFileSystem,
                RuntimeEffect::ClearQueryCache,
            ]
        );
    }

    #[test]
    fn update_user_persists_only_on_change() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        let effects = run(&mut state, &mut dashboard, DriveAction::UpdateUser { user: user() });
        assert_eq!(effects, vec![RuntimeEffect::PersistAuth]);
        let effects = run(&mut state, &mut dashboard, DriveAction::UpdateUser { user: user() });
        assert!(effects.is_empty());
    }

    #[test]
    fn hydration_restores_slices_without_persisting() {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::HydrateFileSystem {
                snapshot: FileSystemSnapshot {
                    current_folder_id: "f1".into(),
                    expanded_folders: vec!["root".into(), "f1".into()],
                },
            },
        );
        assert!(effects.is_empty());
        run(
            &mut state,
            &mut dashboard,
            DriveAction::HydrateAuth {
                snapshot: AuthSnapshot {
                    user: Some(user()),
                    token: Some("tok".into()),
                    is_authenticated: true,
                },
            },
        );
        run(&mut state, &mut dashboard, DriveAction::BootHydrationComplete);
        assert_eq!(state.file_system.current_folder_id, "f1");
        assert!(state.auth.is_authenticated);
        assert!(state.boot_complete);
    }
}
