//! Host-side runtime helpers for executing reducer effects against backend and browser services.
//!
//! The reducer stays pure; everything that talks to the network, `localStorage`, timers, or the
//! DOM runs from here behind the typed [`DriveServices`] bundle the entry layer injects.

mod boot;
mod host_ui;
mod mutations;
mod persistence_effects;

use std::rc::Rc;

use drive_api::{
    AuthApi, DriveApi, DriveClient, MemoryAuthApi, MemoryDriveApi, MemoryPersistStore,
    PersistStore,
};
use drive_web::{HttpAuthApi, HttpConfig, HttpDriveApi, WebPersistStore};
use leptos::{Callback, SignalUpdate};

use crate::{
    config, reducer::DriveAction, reducer::RuntimeEffect, runtime_context::DriveRuntimeContext,
};

#[derive(Clone)]
/// Backend and storage services used by the drive runtime.
pub struct DriveServices {
    /// File-system endpoints.
    pub drive: Rc<dyn DriveApi>,
    /// Account endpoints.
    pub auth: Rc<dyn AuthApi>,
    /// Slice persistence.
    pub persist: Rc<dyn PersistStore>,
    /// Backend location, for redirects that leave the app.
    pub http: HttpConfig,
}

impl DriveServices {
    /// Browser services: REST transport to the configured backend plus `localStorage`.
    pub fn browser() -> Self {
        let http = config::http_config();
        Self {
            drive: Rc::new(HttpDriveApi::new(http.clone())),
            auth: Rc::new(HttpAuthApi::new(http.clone())),
            persist: Rc::new(WebPersistStore),
            http,
        }
    }

    /// In-memory services for offline builds and tests.
    pub fn memory() -> Self {
        Self {
            drive: Rc::new(MemoryDriveApi::default()),
            auth: Rc::new(MemoryAuthApi::default()),
            persist: Rc::new(MemoryPersistStore::default()),
            http: config::http_config(),
        }
    }
}

#[derive(Clone)]
/// Host service bundle for drive runtime side effects.
pub struct DriveHostContext {
    client: DriveClient,
    persist: Rc<dyn PersistStore>,
    http: HttpConfig,
}

impl DriveHostContext {
    /// Wraps injected services with a fresh query cache.
    pub fn new(services: DriveServices) -> Self {
        Self {
            client: DriveClient::new(services.drive, services.auth),
            persist: services.persist,
            http: services.http,
        }
    }

    /// Returns the cached backend client.
    pub fn client(&self) -> DriveClient {
        self.client.clone()
    }

    /// Returns the configured slice store.
    pub fn persist_store(&self) -> Rc<dyn PersistStore> {
        self.persist.clone()
    }

    /// Returns the backend location.
    pub fn http_config(&self) -> &HttpConfig {
        &self.http
    }

    /// Installs boot hydration of the persisted auth and file-system slices.
    pub fn install_boot_hydration(&self, dispatch: Callback<DriveAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DriveRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistFileSystem => {
                persistence_effects::persist_file_system(self.clone(), runtime)
            }
            RuntimeEffect::PersistAuth => persistence_effects::persist_auth(self.clone(), runtime),
            RuntimeEffect::ClearQueryCache => {
                self.client.cache().clear();
                runtime.query_generation.update(|generation| *generation += 1);
            }
            RuntimeEffect::OpenUploadPicker => host_ui::open_upload_picker(),
            RuntimeEffect::RunMutation(mutation) => {
                mutations::run_mutation(self.clone(), runtime, mutation)
            }
            RuntimeEffect::ScheduleToastDismiss { id } => {
                host_ui::schedule_toast_dismiss(runtime, id)
            }
        }
    }
}
