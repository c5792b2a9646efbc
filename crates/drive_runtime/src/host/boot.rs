use futures::future::join;
use leptos::{create_effect, logging, spawn_local, Callable, Callback};

use crate::{host::DriveHostContext, persistence, reducer::DriveAction};

pub(super) fn install_boot_hydration(host: DriveHostContext, dispatch: Callback<DriveAction>) {
    create_effect(move |_| {
        let dispatch = dispatch;
        let host = host.clone();
        spawn_local(async move {
            let store = host.persist_store();
            let (auth, file_system) = join(
                persistence::load_auth(store.as_ref()),
                persistence::load_file_system(store.as_ref()),
            )
            .await;

            match auth {
                Ok(Some(snapshot)) => dispatch.call(DriveAction::HydrateAuth { snapshot }),
                Ok(None) => {}
                Err(err) => logging::warn!("auth slice load failed: {err}"),
            }
            match file_system {
                Ok(Some(snapshot)) => dispatch.call(DriveAction::HydrateFileSystem { snapshot }),
                Ok(None) => {}
                Err(err) => logging::warn!("file system slice load failed: {err}"),
            }

            dispatch.call(DriveAction::BootHydrationComplete);
        });
    });
}
