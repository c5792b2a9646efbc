//! Request cache with tag-based invalidation.
//!
//! Query results are stored as JSON values keyed by [`QueryKey`]. Each entry records the
//! [`CacheTag`]s its query provides; mutations invalidate tags and every matching entry is
//! dropped so the next read refetches. A generation counter lets observers notice invalidation
//! and lets in-flight queries skip storing results that an invalidation has already superseded.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Label attached to cached query results.
pub enum CacheTag {
    /// Every file-system listing.
    Nodes,
    /// The listing of one parent folder.
    NodesOf(String),
    /// The signed-in account.
    User,
}

impl CacheTag {
    fn same_type(&self, other: &CacheTag) -> bool {
        self.type_tag() == other.type_tag()
    }

    fn type_tag(&self) -> CacheTag {
        match self {
            Self::Nodes | Self::NodesOf(_) => Self::Nodes,
            Self::User => Self::User,
        }
    }

    fn is_type_wide(&self) -> bool {
        matches!(self, Self::Nodes | Self::User)
    }

    /// Returns `true` when invalidating `invalidated` must drop an entry providing `self`.
    ///
    /// A type-wide tag hits every tag of its type; an id tag hits the same id tag and the
    /// type-wide tag.
    pub fn is_hit_by(&self, invalidated: &CacheTag) -> bool {
        if !self.same_type(invalidated) {
            return false;
        }
        invalidated.is_type_wide() || self.is_type_wide() || self == invalidated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identity of a cached query.
pub enum QueryKey {
    /// `getAllNodes`
    AllNodes,
    /// `getNodesByParent(parent)`
    NodesByParent(String),
    /// `getBreadcrumbs(folder)`
    Breadcrumbs(String),
    /// `getMe`
    Me,
}

impl QueryKey {
    /// Tags provided by results of this query.
    pub fn provided_tags(&self) -> Vec<CacheTag> {
        match self {
            Self::AllNodes | Self::Breadcrumbs(_) => vec![CacheTag::Nodes],
            Self::NodesByParent(parent) => vec![CacheTag::NodesOf(parent.clone())],
            Self::Me => vec![CacheTag::User],
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    tags: Vec<CacheTag>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<QueryKey, CacheEntry>,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
/// Shared query cache. Clones observe the same entries.
pub struct QueryCache {
    inner: Rc<RefCell<CacheInner>>,
}

impl QueryCache {
    /// Returns the invalidation generation. It increases whenever entries are invalidated.
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    /// Returns `true` when `key` has a live entry.
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns `true` when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads and decodes a cached result. Entries that fail to decode are treated as missing.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.inner.borrow();
        let entry = inner.entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Stores a result under `key` with the tags its query provides.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when `value` cannot be converted to JSON.
    pub fn put<T: Serialize>(&self, key: QueryKey, value: &T) -> Result<(), ApiError> {
        self.put_if_current(key, value, self.generation()).map(|_| ())
    }

    /// Stores a result only when no invalidation happened since `started_at`.
    ///
    /// Returns whether the value was stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when `value` cannot be converted to JSON.
    pub fn put_if_current<T: Serialize>(
        &self,
        key: QueryKey,
        value: &T,
        started_at: u64,
    ) -> Result<bool, ApiError> {
        let value = serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        let mut inner = self.inner.borrow_mut();
        if inner.generation != started_at {
            return Ok(false);
        }
        let tags = key.provided_tags();
        inner.entries.insert(key, CacheEntry { value, tags });
        Ok(true)
    }

    /// Drops every entry hit by any of `tags` and returns how many were removed.
    ///
    /// The generation advances even when nothing is removed so in-flight queries started
    /// before the mutation do not store pre-mutation data.
    pub fn invalidate(&self, tags: &[CacheTag]) -> usize {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| {
            !entry
                .tags
                .iter()
                .any(|provided| tags.iter().any(|tag| provided.is_hit_by(tag)))
        });
        inner.generation = inner.generation.saturating_add(1);
        before - inner.entries.len()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.clear();
        inner.generation = inner.generation.saturating_add(1);
    }
}
