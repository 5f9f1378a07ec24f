//! cache::repository
//!
//! Typed master-list persistence over a raw cache store.
//!
//! # Format
//!
//! The master list is serialized as a JSON array, one object per place:
//! `{id, name, location: {lat, lng}, contact, details}`, with `details`
//! null until populated. There is no versioning or migration scheme; a
//! format change requires clearing the stored blob, and unparseable
//! blobs are reported so callers can fall back to a fresh fetch.
//!
//! # Example
//!
//! ```ignore
//! use venuemap::cache::{FileCacheStore, PlaceRepository};
//!
//! let cache = Arc::new(FileCacheStore::new()?);
//! let repository = PlaceRepository::new(cache, "venues-map");
//!
//! if let Some(records) = repository.load()? {
//!     // rehydrate the store from records
//! }
//! ```

use std::sync::Arc;

use crate::core::types::{Place, RawPlace};

use super::traits::{CacheError, CacheStore};

/// Master-list persistence keyed by a fixed namespace.
///
/// Wraps a raw [`CacheStore`] with the serialization the store needs, so
/// the store itself never touches blobs or JSON.
#[derive(Clone)]
pub struct PlaceRepository {
    cache: Arc<dyn CacheStore>,
    key: String,
}

// Custom Debug because the cache store is a trait object.
impl std::fmt::Debug for PlaceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceRepository")
            .field("key", &self.key)
            .finish()
    }
}

impl PlaceRepository {
    /// Create a repository persisting under `key` in the given store.
    pub fn new(cache: Arc<dyn CacheStore>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// The namespace key entries are persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted seed records, if any.
    ///
    /// Returns `Ok(None)` when nothing is persisted under the key.
    ///
    /// # Errors
    ///
    /// - [`CacheError::ParseError`] if the blob exists but is not valid
    ///   JSON in the expected shape
    /// - Access errors from the underlying store
    pub fn load(&self) -> Result<Option<Vec<RawPlace>>, CacheError> {
        let blob = match self.cache.load(&self.key)? {
            Some(blob) => blob,
            None => return Ok(None),
        };

        let records: Vec<RawPlace> = serde_json::from_str(&blob)
            .map_err(|e| CacheError::ParseError(e.to_string()))?;

        Ok(Some(records))
    }

    /// Persist the full master list.
    ///
    /// # Errors
    ///
    /// - [`CacheError::SerializeError`] if the list cannot be serialized
    /// - Access errors from the underlying store
    pub fn save(&self, places: &[Place]) -> Result<(), CacheError> {
        let blob = serde_json::to_string(places)
            .map_err(|e| CacheError::SerializeError(e.to_string()))?;
        self.cache.save(&self.key, &blob)
    }

    /// Clear the persisted blob.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}
