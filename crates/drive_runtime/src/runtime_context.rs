//! Runtime provider and context wiring for the drive client.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, the query
//! refresh counter, and host bootstrap wiring. UI composition stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use leptos::*;

use crate::{
    effect_executor,
    host::{DriveHostContext, DriveServices},
    model::{DashboardState, DriveState},
    reducer::{reduce_drive, DriveAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading drive state and dispatching [`DriveAction`] values.
pub struct DriveRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DriveHostContext>,
    /// Persisted auth and file-system slices.
    pub state: RwSignal<DriveState>,
    /// Dialog, busy, and toast state of the dashboard.
    pub dashboard: RwSignal<DashboardState>,
    /// Queue of runtime effects emitted by the reducer and processed by the host.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Bumped whenever cached queries were invalidated; resources key on it to refetch.
    pub query_generation: RwSignal<u64>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DriveAction>,
}

impl DriveRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DriveAction) {
        self.dispatch.call(action);
    }
}

fn install_runtime_orchestration(runtime: DriveRuntimeContext) {
    runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`DriveRuntimeContext`] to descendant components and boots persisted state.
pub fn DriveProvider(
    /// Injected backend and storage services assembled by the entry layer.
    services: DriveServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(DriveHostContext::new(services));
    let state = create_rw_signal(DriveState::default());
    let dashboard = create_rw_signal(DashboardState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let query_generation = create_rw_signal(0_u64);

    let dispatch = Callback::new(move |action: DriveAction| {
        let mut drive = state.get_untracked();
        let mut ui = dashboard.get_untracked();
        let previous_drive = drive.clone();
        let previous_ui = ui.clone();

        match reduce_drive(&mut drive, &mut ui, action) {
            Ok(new_effects) => {
                if drive != previous_drive {
                    state.set(drive);
                }
                if ui != previous_ui {
                    dashboard.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("drive reducer error: {err}"),
        }
    });

    let runtime = DriveRuntimeContext {
        host,
        state,
        dashboard,
        effects,
        query_generation,
        dispatch,
    };

    provide_context(runtime.clone());

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DriveRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DriveProvider`].
pub fn use_drive_runtime() -> DriveRuntimeContext {
    use_context::<DriveRuntimeContext>().expect("DriveRuntimeContext not provided")
}
