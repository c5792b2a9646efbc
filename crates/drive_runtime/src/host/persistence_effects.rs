use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DriveHostContext, persistence, runtime_context::DriveRuntimeContext};

pub(super) fn persist_file_system(host: DriveHostContext, runtime: DriveRuntimeContext) {
    let state = runtime.state.get_untracked();
    // Defaults must not overwrite the stored slice before hydration.
    if !state.boot_complete {
        return;
    }
    spawn_local(async move {
        if let Err(err) = persistence::persist_file_system(host.persist_store().as_ref(), &state).await
        {
            logging::warn!("persist file system slice failed: {err}");
        }
    });
}

pub(super) fn persist_auth(host: DriveHostContext, runtime: DriveRuntimeContext) {
    let state = runtime.state.get_untracked();
    spawn_local(async move {
        if let Err(err) = persistence::persist_auth(host.persist_store().as_ref(), &state).await {
            logging::warn!("persist auth slice failed: {err}");
        }
    });
}
