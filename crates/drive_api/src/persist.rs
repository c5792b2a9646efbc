//! Persisted client-state contracts, the versioned slice wrapper, and helpers.
//!
//! The browser keeps the auth and file-system slices across reloads. Stores work on raw
//! JSON text per key; [`PersistedSlice`] tags each payload with a schema version so an
//! incompatible snapshot is ignored instead of partially applied.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Object-safe boxed future used by [`PersistStore`] async methods.
pub type PersistFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host storage for persisted state slices (JSON stored as text per key).
pub trait PersistStore {
    /// Loads the raw JSON stored under `key`.
    fn load_slice<'a>(&'a self, key: &'a str) -> PersistFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON stored under `key`.
    fn save_slice<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PersistFuture<'a, Result<(), String>>;

    /// Removes `key`.
    fn clear_slice<'a>(&'a self, key: &'a str) -> PersistFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Default)]
/// In-memory persist store keyed by string.
pub struct MemoryPersistStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPersistStore {
    /// Returns the raw JSON stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl PersistStore for MemoryPersistStore {
    fn load_slice<'a>(&'a self, key: &'a str) -> PersistFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_slice<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PersistFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn clear_slice<'a>(&'a self, key: &'a str) -> PersistFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Versioned wrapper around a persisted slice payload.
pub struct PersistedSlice<T> {
    /// Schema version of `payload`.
    pub version: u32,
    /// Slice snapshot.
    pub payload: T,
}

/// Loads a typed slice, returning `None` when nothing is stored or the stored version differs
/// from `version`.
///
/// # Errors
///
/// Returns an error when the store fails. Undecodable snapshots load as `None`.
pub async fn load_slice_with<S: PersistStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
    version: u32,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_slice(key).await? else {
        return Ok(None);
    };
    let Ok(slice) = serde_json::from_str::<PersistedSlice<T>>(&raw) else {
        return Ok(None);
    };
    Ok((slice.version == version).then_some(slice.payload))
}

/// Serializes and saves a typed slice under `key` at `version`.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_slice_with<S: PersistStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    version: u32,
    payload: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(&PersistedSlice { version, payload })
        .map_err(|e| e.to_string())?;
    store.save_slice(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        open: bool,
    }

    #[test]
    fn slice_roundtrip_through_memory_store() {
        let store = MemoryPersistStore::default();
        block_on(save_slice_with(&store, "k", 1, &Sample { open: true })).expect("save");
        let loaded: Option<Sample> = block_on(load_slice_with(&store, "k", 1)).expect("load");
        assert_eq!(loaded, Some(Sample { open: true }));
        assert_eq!(
            store.raw("k").as_deref(),
            Some(r#"{"version":1,"payload":{"open":true}}"#)
        );
    }

    #[test]
    fn version_mismatch_and_garbage_load_as_none() {
        let store = MemoryPersistStore::default();
        block_on(save_slice_with(&store, "k", 1, &Sample { open: true })).expect("save");
        let loaded: Option<Sample> = block_on(load_slice_with(&store, "k", 2)).expect("load");
        assert_eq!(loaded, None);

        block_on(store.save_slice("k", "not json")).expect("save raw");
        let loaded: Option<Sample> = block_on(load_slice_with(&store, "k", 1)).expect("load");
        assert_eq!(loaded, None);

        block_on(store.clear_slice("k")).expect("clear");
        assert_eq!(store.raw("k"), None);
    }
}
