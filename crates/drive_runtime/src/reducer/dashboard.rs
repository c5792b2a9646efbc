//! Reducer helpers for dashboard dialogs, uploads, mutation bookkeeping, and toasts.

use drive_model::{CreateNodeKind, NodeKind};

use crate::{
    model::{
        DashboardState, DriveState, ModalKind, ModalState, MutationKind, PendingMutation, ToastLevel,
    },
    reducer::{ContextMenuCommand, DriveAction, ReducerError, RuntimeEffect},
};

pub(super) fn reduce_dashboard_action(
    state: &mut DriveState,
    dashboard: &mut DashboardState,
    action: &DriveAction,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<bool, ReducerError> {
    let fs = &mut state.file_system;
    match action {
        DriveAction::ContextMenuCommand(command) => {
            let target = fs.context_menu.take().and_then(|menu| menu.item_id);
            match command {
                ContextMenuCommand::NewFolder => {
                    dashboard.modal = Some(ModalState::new(ModalKind::CreateFolder));
                }
                ContextMenuCommand::NewTextFile => {
                    dashboard.modal = Some(ModalState::new(ModalKind::CreateText));
                }
                ContextMenuCommand::Upload => effects.push(RuntimeEffect::OpenUploadPicker),
                ContextMenuCommand::Rename => {
                    let id = target.ok_or(ReducerError::NoContextTarget)?;
                    dashboard.modal = Some(ModalState::new(ModalKind::Rename { id }));
                }
                ContextMenuCommand::Delete => {
                    let id = target.ok_or(ReducerError::NoContextTarget)?;
                    dashboard.modal = Some(ModalState::new(ModalKind::Delete { id }));
                }
            }
        }
        DriveAction::SetModalValue { value } => {
            let modal = dashboard.modal.as_mut().ok_or(ReducerError::NoModal)?;
            modal.value = value.clone();
        }
        DriveAction::ConfirmModal => {
            let modal = dashboard.modal.as_ref().ok_or(ReducerError::NoModal)?;
            let kind = modal.kind.mutation_kind();
            if !modal.can_confirm() || dashboard.is_busy(kind) {
                return Ok(true);
            }
            let name = modal.value.trim();
            let mutation = match &modal.kind {
                ModalKind::CreateFolder => {
                    PendingMutation::create(name, CreateNodeKind::Folder, &fs.current_folder_id)
                }
                ModalKind::CreateText => {
                    PendingMutation::create(name, CreateNodeKind::Text, &fs.current_folder_id)
                }
                ModalKind::Rename { id } => PendingMutation::Rename {
                    id: id.clone(),
                    name: name.to_string(),
                },
                ModalKind::Delete { id } => PendingMutation::Delete { id: id.clone() },
            };
            dashboard.busy.push(kind);
            effects.push(RuntimeEffect::RunMutation(mutation));
        }
        DriveAction::CancelModal => {
            dashboard.modal = None;
        }
        DriveAction::StartUpload { files } => {
            if files.is_empty() {
                return Ok(true);
            }
            let mutation = PendingMutation::Upload {
                parent_id: fs.current_folder_id.clone(),
                files: files.clone(),
            };
            dashboard.busy.push(mutation.kind());
            effects.push(RuntimeEffect::RunMutation(mutation));
        }
        DriveAction::SaveFileContent { content } => {
            let file = fs.open_file.as_ref().ok_or(ReducerError::NoOpenFile)?;
            if file.kind != NodeKind::Text {
                return Err(ReducerError::NotEditable(file.id.clone()));
            }
            let mutation = PendingMutation::SaveContent {
                id: file.id.clone(),
                content: content.clone(),
            };
            if dashboard.is_busy(mutation.kind()) {
                return Ok(true);
            }
            dashboard.busy.push(mutation.kind());
            effects.push(RuntimeEffect::RunMutation(mutation));
        }
        DriveAction::MutationSettled { kind, error } => {
            if let Some(index) = dashboard.busy.iter().position(|busy| busy == kind) {
                dashboard.busy.remove(index);
            }
            match error {
                Some(message) => {
                    let id = dashboard.push_toast(ToastLevel::Error, message.clone());
                    effects.push(RuntimeEffect::ScheduleToastDismiss { id });
                }
                None => {
                    let closes_modal = dashboard
                        .modal
                        .as_ref()
                        .is_some_and(|modal| modal.kind.mutation_kind() == *kind);
                    if closes_modal {
                        dashboard.modal = None;
                    }
                    if *kind == MutationKind::SaveContent {
                        fs.open_file = None;
                    }
                }
            }
        }
        DriveAction::PushToast { level, message } => {
            let id = dashboard.push_toast(*level, message.clone());
            effects.push(RuntimeEffect::ScheduleToastDismiss { id });
        }
        DriveAction::DismissToast { id } => {
            dashboard.toasts.retain(|toast| toast.id != *id);
        }
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use drive_api::UploadFile;
    use drive_model::{ContextMenuState, CreateNodePayload, ROOT_FOLDER_ID};
    use pretty_assertions::assert_eq;

    use crate::reducer::{
        reduce_drive,
        tests::{node, user},
    };

    use super::*;

    fn signed_in() -> (DriveState, DashboardState) {
        let mut state = DriveState::default();
        let mut dashboard = DashboardState::default();
        reduce_drive(
            &mut state,
            &mut dashboard,
            DriveAction::SetCredentials {
                user: user(),
                access_token: "tok".into(),
            },
        )
        .expect("sign in");
        (state, dashboard)
    }

    fn run(
        state: &mut DriveState,
        dashboard: &mut DashboardState,
        action: DriveAction,
    ) -> Vec<RuntimeEffect> {
        reduce_drive(state, dashboard, action).expect("reduce")
    }

    #[test]
    fn background_menu_opens_create_dialog_and_closes_menu() {
        let (mut state, mut dashboard) = signed_in();
        state.file_system.context_menu = Some(ContextMenuState::background(10, 20));

        run(
            &mut state,
            &mut dashboard,
            DriveAction::ContextMenuCommand(ContextMenuCommand::NewFolder),
        );

        assert_eq!(state.file_system.context_menu, None);
        assert_eq!(
            dashboard.modal,
            Some(ModalState::new(ModalKind::CreateFolder))
        );
    }

    #[test]
    fn upload_command_requests_the_picker() {
        let (mut state, mut dashboard) = signed_in();
        state.file_system.context_menu = Some(ContextMenuState::background(0, 0));
        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::ContextMenuCommand(ContextMenuCommand::Upload),
        );
        assert_eq!(effects, vec![RuntimeEffect::OpenUploadPicker]);
        assert_eq!(dashboard.modal, None);
    }

    #[test]
    fn item_command_without_target_is_rejected() {
        let (mut state, mut dashboard) = signed_in();
        state.file_system.context_menu = Some(ContextMenuState::background(0, 0));
        let err = reduce_drive(
            &mut state,
            &mut dashboard,
            DriveAction::ContextMenuCommand(ContextMenuCommand::Rename),
        )
        .expect_err("no target");
        assert_eq!(err, ReducerError::NoContextTarget);
    }

    #[test]
    fn rename_dialog_starts_empty_and_confirms_trimmed_name() {
        let (mut state, mut dashboard) = signed_in();
        state.file_system.context_menu = Some(ContextMenuState::item(0, 0, "n1"));
        run(
            &mut state,
            &mut dashboard,
            DriveAction::ContextMenuCommand(ContextMenuCommand::Rename),
        );
        assert_eq!(
            dashboard.modal.as_ref().map(|m| m.value.as_str()),
            Some("")
        );

        run(
            &mut state,
            &mut dashboard,
            DriveAction::SetModalValue {
                value: "  report.txt ".into(),
            },
        );
        let effects = run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        assert_eq!(
            effects,
            vec![RuntimeEffect::RunMutation(PendingMutation::Rename {
                id: "n1".into(),
                name: "report.txt".into(),
            })]
        );
        assert_eq!(dashboard.busy, vec![MutationKind::Rename]);
    }

    #[test]
    fn blank_name_confirm_is_a_noop() {
        let (mut state, mut dashboard) = signed_in();
        dashboard.modal = Some(ModalState::new(ModalKind::CreateText));
        run(
            &mut state,
            &mut dashboard,
            DriveAction::SetModalValue { value: "   ".into() },
        );
        let effects = run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        assert!(effects.is_empty());
        assert!(dashboard.busy.is_empty());
        assert!(dashboard.modal.is_some());
    }

    #[test]
    fn create_targets_current_folder_and_ignores_repeat_confirms() {
        let (mut state, mut dashboard) = signed_in();
        state.file_system.current_folder_id = "f1".into();
        dashboard.modal = Some(ModalState {
            kind: ModalKind::CreateText,
            value: "notes".into(),
        });

        let effects = run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        assert_eq!(
            effects,
            vec![RuntimeEffect::RunMutation(PendingMutation::Create(
                CreateNodePayload::new("notes", CreateNodeKind::Text, "f1")
            ))]
        );
        let repeat = run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        assert!(repeat.is_empty());
        assert_eq!(dashboard.busy, vec![MutationKind::Create]);
    }

    #[test]
    fn delete_confirms_without_name() {
        let (mut state, mut dashboard) = signed_in();
        dashboard.modal = Some(ModalState::new(ModalKind::Delete { id: "n1".into() }));
        let effects = run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        assert_eq!(
            effects,
            vec![RuntimeEffect::RunMutation(PendingMutation::Delete {
                id: "n1".into()
            })]
        );
        assert_eq!(dashboard.overlay_label(), Some("Deleting..."));
    }

    #[test]
    fn successful_settle_closes_the_dialog() {
        let (mut state, mut dashboard) = signed_in();
        dashboard.modal = Some(ModalState::new(ModalKind::Delete { id: "n1".into() }));
        run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::MutationSettled {
                kind: MutationKind::Delete,
                error: None,
            },
        );
        assert!(effects.is_empty());
        assert_eq!(dashboard.modal, None);
        assert!(dashboard.busy.is_empty());
    }

    #[test]
    fn failed_settle_keeps_dialog_and_raises_toast() {
        let (mut state, mut dashboard) = signed_in();
        dashboard.modal = Some(ModalState {
            kind: ModalKind::CreateFolder,
            value: "Docs".into(),
        });
        run(&mut state, &mut dashboard, DriveAction::ConfirmModal);
        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::MutationSettled {
                kind: MutationKind::Create,
                error: Some("An item with this name already exists in this folder".into()),
            },
        );

        assert!(dashboard.modal.is_some());
        assert_eq!(dashboard.toasts.len(), 1);
        assert_eq!(dashboard.toasts[0].level, ToastLevel::Error);
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleToastDismiss {
                id: dashboard.toasts[0].id
            }]
        );

        let toast_id = dashboard.toasts[0].id;
        run(&mut state, &mut dashboard, DriveAction::DismissToast { id: toast_id });
        assert!(dashboard.toasts.is_empty());
    }

    #[test]
    fn upload_targets_current_folder_and_skips_empty_selection() {
        let (mut state, mut dashboard) = signed_in();
        let empty = run(
            &mut state,
            &mut dashboard,
            DriveAction::StartUpload { files: Vec::new() },
        );
        assert!(empty.is_empty());

        let file = UploadFile {
            name: "a.txt".into(),
            mime_type: "text/plain".into(),
            bytes: b"hi".to_vec(),
        };
        let effects = run(
            &mut state,
            &mut dashboard,
            DriveAction::StartUpload {
                files: vec![file.clone()],
            },
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::RunMutation(PendingMutation::Upload {
                parent_id: ROOT_FOLDER_ID.into(),
                files: vec![file],
            })]
        );
        assert_eq!(dashboard.overlay_label(), Some("Uploading..."));
    }

    #[test]
    fn saving_content_requires_an_open_text_file() {
        let (mut state, mut dashboard) = signed_in();
        let save = || DriveAction::SaveFileContent {
            content: "hello".into(),
        };
        assert_eq!(
            reduce_drive(&mut state, &mut dashboard, save()).expect_err("nothing open"),
            ReducerError::NoOpenFile
        );

        state.file_system.open_file = Some(node("img", NodeKind::Image, None));
        assert_eq!(
            reduce_drive(&mut state, &mut dashboard, save()).expect_err("image"),
            ReducerError::NotEditable("img".into())
        );

        state.file_system.open_file = Some(node("t1", NodeKind::Text, None));
        let effects = run(&mut state, &mut dashboard, save());
        assert_eq!(
            effects,
            vec![RuntimeEffect::RunMutation(PendingMutation::SaveContent {
                id: "t1".into(),
                content: "hello".into(),
            })]
        );
        run(
            &mut state,
            &mut dashboard,
            DriveAction::MutationSettled {
                kind: MutationKind::SaveContent,
                error: None,
            },
        );
        assert_eq!(state.file_system.open_file, None);
    }

    #[test]
    fn logout_drops_open_dialog() {
        let (mut state, mut dashboard) = signed_in();
        dashboard.modal = Some(ModalState::new(ModalKind::CreateFolder));
        run(&mut state, &mut dashboard, DriveAction::Logout);
        assert_eq!(dashboard.modal, None);
    }
}
