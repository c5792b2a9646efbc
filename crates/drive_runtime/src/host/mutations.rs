use drive_api::{ApiError, DriveClient};
use drive_model::UpdateNodePayload;
use leptos::{logging, spawn_local, SignalUpdate};

use crate::{
    host::DriveHostContext,
    model::PendingMutation,
    reducer::DriveAction,
    runtime_context::DriveRuntimeContext,
};

pub(super) fn run_mutation(
    host: DriveHostContext,
    runtime: DriveRuntimeContext,
    mutation: PendingMutation,
) {
    let kind = mutation.kind();
    spawn_local(async move {
        let result = execute(&host.client(), mutation).await;
        // Every mutation invalidates `Nodes`, settled or not.
        runtime.query_generation.update(|generation| *generation += 1);

        let error = match result {
            Ok(()) => None,
            Err(err) => {
                logging::warn!("{} mutation failed: {err}", kind.as_str());
                if err.is_unauthorized() {
                    runtime.dispatch_action(DriveAction::Logout);
                }
                Some(err.user_message(kind.failure_message()))
            }
        };
        runtime.dispatch_action(DriveAction::MutationSettled { kind, error });
    });
}

async fn execute(client: &DriveClient, mutation: PendingMutation) -> Result<(), ApiError> {
    match mutation {
        PendingMutation::Create(payload) => client.create_node(&payload).await.map(drop),
        PendingMutation::Rename { id, name } => client
            .update_node(&id, &UpdateNodePayload::rename(&name))
            .await
            .map(drop),
        PendingMutation::Delete { id } => client.delete_node(&id).await,
        PendingMutation::Upload { parent_id, files } => {
            client.upload_files(&parent_id, &files).await.map(drop)
        }
        PendingMutation::SaveContent { id, content } => client
            .update_node(&id, &UpdateNodePayload::content(content))
            .await
            .map(drop),
    }
}

#[cfg(test)]
mod tests {
    use drive_api::UploadFile;
    use drive_model::{CreateNodeKind, NodeKind, ROOT_FOLDER_ID};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::host::DriveServices;

    #[test]
    fn mutations_round_trip_through_memory_services() {
        let host = DriveHostContext::new(DriveServices::memory());
        let client = host.client();

        block_on(execute(
            &client,
            PendingMutation::create("notes", CreateNodeKind::Text, ROOT_FOLDER_ID),
        ))
        .expect("create");
        let listed = block_on(client.nodes_by_parent(ROOT_FOLDER_ID)).expect("list");
        assert_eq!(listed.len(), 1);
        let id = listed[0].id.clone();

        block_on(execute(
            &client,
            PendingMutation::SaveContent {
                id: id.clone(),
                content: "hello".into(),
            },
        ))
        .expect("save");
        block_on(execute(
            &client,
            PendingMutation::Rename {
                id: id.clone(),
                name: "notes.txt".into(),
            },
        ))
        .expect("rename");
        let listed = block_on(client.nodes_by_parent(ROOT_FOLDER_ID)).expect("list");
        assert_eq!(listed[0].name, "notes.txt");
        assert_eq!(listed[0].content.as_deref(), Some("hello"));

        block_on(execute(&client, PendingMutation::Delete { id })).expect("delete");
        assert!(block_on(client.nodes_by_parent(ROOT_FOLDER_ID))
            .expect("list")
            .is_empty());
    }

    #[test]
    fn single_file_upload_lands_in_target_folder() {
        let host = DriveHostContext::new(DriveServices::memory());
        let client = host.client();

        block_on(execute(
            &client,
            PendingMutation::Upload {
                parent_id: ROOT_FOLDER_ID.into(),
                files: vec![UploadFile {
                    name: "a.txt".into(),
                    mime_type: "text/plain".into(),
                    bytes: b"abc".to_vec(),
                }],
            },
        ))
        .expect("upload");

        let listed = block_on(client.nodes_by_parent(ROOT_FOLDER_ID)).expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].kind, NodeKind::Text);
        assert_eq!(listed[0].size, Some(3));
    }
}
