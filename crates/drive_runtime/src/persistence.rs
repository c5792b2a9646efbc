//! Load/save helpers for the persisted auth and file-system slices.

use drive_api::{load_slice_with, save_slice_with, PersistStore};

use crate::{
    config::{AUTH_PREFS_KEY, FILE_SYSTEM_PREFS_KEY},
    model::{
        AuthSnapshot, DriveState, FileSystemSnapshot, AUTH_SCHEMA_VERSION,
        FILE_SYSTEM_SCHEMA_VERSION,
    },
};

/// Loads the persisted file-system slice.
///
/// # Errors
///
/// Returns an error when the store fails. Missing or incompatible snapshots load as `None`.
pub async fn load_file_system(
    store: &dyn PersistStore,
) -> Result<Option<FileSystemSnapshot>, String> {
    load_slice_with(store, FILE_SYSTEM_PREFS_KEY, FILE_SYSTEM_SCHEMA_VERSION).await
}

/// Loads the persisted auth slice.
///
/// # Errors
///
/// Returns an error when the store fails.
pub async fn load_auth(store: &dyn PersistStore) -> Result<Option<AuthSnapshot>, String> {
    load_slice_with(store, AUTH_PREFS_KEY, AUTH_SCHEMA_VERSION).await
}

/// Saves the file-system slice of `state`.
///
/// # Errors
///
/// Returns an error when serialization or the store fails.
pub async fn persist_file_system(store: &dyn PersistStore, state: &DriveState) -> Result<(), String> {
    save_slice_with(
        store,
        FILE_SYSTEM_PREFS_KEY,
        FILE_SYSTEM_SCHEMA_VERSION,
        &state.file_system.snapshot(),
    )
    .await
}

/// Saves the auth slice of `state`. A signed-out session clears the stored slice.
///
/// # Errors
///
/// Returns an error when serialization or the store fails.
pub async fn persist_auth(store: &dyn PersistStore, state: &DriveState) -> Result<(), String> {
    if !state.auth.is_authenticated {
        return store.clear_slice(AUTH_PREFS_KEY).await;
    }
    save_slice_with(
        store,
        AUTH_PREFS_KEY,
        AUTH_SCHEMA_VERSION,
        &state.auth.snapshot(),
    )
    .await
}
