//! cache::memory
//!
//! In-memory cache store for deterministic testing.
//!
//! # Design
//!
//! Stores entries in a `HashMap` and allows configuring failure
//! scenarios and inspecting recorded operations, so tests can verify
//! both the happy path and the best-effort error discipline (a failing
//! save must be swallowed by the caller, never surfaced).
//!
//! # Example
//!
//! ```
//! use venuemap::cache::{CacheStore, MemoryCacheStore};
//!
//! let store = MemoryCacheStore::new();
//! store.save("venues-map", "[]").unwrap();
//! assert_eq!(store.load("venues-map").unwrap(), Some("[]".to_string()));
//! assert_eq!(store.save_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{CacheError, CacheStore};

/// In-memory cache store for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    inner: Arc<Mutex<MemoryCacheInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MemoryCacheInner {
    /// Stored entries by key.
    entries: HashMap<String, String>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<CacheOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail load with the given error.
    Load(CacheError),
    /// Fail save with the given error.
    Save(CacheError),
    /// Fail delete with the given error.
    Delete(CacheError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOperation {
    Load { key: String },
    Save { key: String },
    Delete { key: String },
}

impl MemoryCacheStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries(entries: Vec<(String, String)>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryCacheInner {
                entries: entries.into_iter().collect(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the store to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use venuemap::cache::{CacheError, CacheStore, MemoryCacheStore};
    /// use venuemap::cache::memory::FailOn;
    ///
    /// let store = MemoryCacheStore::new()
    ///     .fail_on(FailOn::Save(CacheError::WriteError("quota".into())));
    /// assert!(store.save("key", "blob").is_err());
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<CacheOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Count of recorded save operations.
    pub fn save_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, CacheOperation::Save { .. }))
            .count()
    }

    /// Get an entry without recording a load (for test verification).
    pub fn entry(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.entries.get(key).cloned()
    }

    /// Record an operation.
    fn record(&self, op: CacheOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<CacheError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::Load(e)) if expected == "load" => Some(e.clone()),
            Some(FailOn::Save(e)) if expected == "save" => Some(e.clone()),
            Some(FailOn::Delete(e)) if expected == "delete" => Some(e.clone()),
            _ => None,
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.record(CacheOperation::Load {
            key: key.to_string(),
        });
        if let Some(err) = self.check_fail("load") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        Ok(inner.entries.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), CacheError> {
        self.record(CacheOperation::Save {
            key: key.to_string(),
        });
        if let Some(err) = self.check_fail("save") {
            return Err(err);
        }

        let mut inner = self.inner.lock().unwrap();
        inner.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.record(CacheOperation::Delete {
            key: key.to_string(),
        });
        if let Some(err) = self.check_fail("delete") {
            return Err(err);
        }

        let mut inner = self.inner.lock().unwrap();
        inner.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load() {
        let store = MemoryCacheStore::new();
        store.save("key", "blob").unwrap();
        assert_eq!(store.load("key").unwrap(), Some("blob".to_string()));
    }

    #[test]
    fn load_missing_returns_none() {
        let store = MemoryCacheStore::new();
        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn with_entries_prepopulates() {
        let store =
            MemoryCacheStore::with_entries(vec![("venues-map".to_string(), "[]".to_string())]);
        assert_eq!(store.load("venues-map").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryCacheStore::new();
        let clone = store.clone();

        store.save("key", "blob").unwrap();
        assert_eq!(clone.load("key").unwrap(), Some("blob".to_string()));
    }

    #[test]
    fn fail_on_save_leaves_entries_untouched() {
        let store = MemoryCacheStore::new()
            .fail_on(FailOn::Save(CacheError::WriteError("quota".into())));

        assert!(store.save("key", "blob").is_err());
        assert!(store.entry("key").is_none());

        store.clear_fail_on();
        store.save("key", "blob").unwrap();
        assert_eq!(store.entry("key"), Some("blob".to_string()));
    }

    #[test]
    fn operations_are_recorded() {
        let store = MemoryCacheStore::new();
        store.save("a", "1").unwrap();
        store.load("a").unwrap();
        store.delete("a").unwrap();

        assert_eq!(
            store.operations(),
            vec![
                CacheOperation::Save { key: "a".into() },
                CacheOperation::Load { key: "a".into() },
                CacheOperation::Delete { key: "a".into() },
            ]
        );
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn failed_operations_are_still_recorded() {
        let store =
            MemoryCacheStore::new().fail_on(FailOn::Load(CacheError::ReadError("gone".into())));

        assert!(store.load("key").is_err());
        assert_eq!(store.operations().len(), 1);
    }
}
