//! Drains the drive effect queue into the host.

use leptos::*;

use crate::runtime_context::DriveRuntimeContext;

/// Runs queued persistence, cache, mutation, and toast effects in dispatch order.
pub fn install(runtime: DriveRuntimeContext) {
    create_effect(move |_| {
        let batch = runtime.effects.get();
        if batch.is_empty() {
            return;
        }

        // A settled mutation dispatches again; its effects go to the next batch.
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in batch {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
