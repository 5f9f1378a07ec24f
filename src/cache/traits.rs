//! cache::traits
//!
//! Cache store trait definition.
//!
//! # Design
//!
//! The `CacheStore` trait is a simple key-value interface over string
//! blobs. Keys are namespaced strings (e.g. "venues-map"); values are
//! whatever the caller serialized. The trait is synchronous: backing
//! stores are local (a file, browser-local storage behind FFI, memory),
//! and writes are small.
//!
//! # Error discipline
//!
//! Callers on the hot path treat every error from this trait as
//! best-effort: a failed save is logged and swallowed, never surfaced.
//! Only the startup rehydration path inspects load errors, and it falls
//! back to a fresh fetch.

use thiserror::Error;

/// Errors from cache store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The key contains characters the store cannot represent.
    #[error("invalid cache key: {0}")]
    InvalidKey(String),

    /// Failed to read from the backing store.
    #[error("failed to read cache: {0}")]
    ReadError(String),

    /// Failed to write to the backing store.
    #[error("failed to write cache: {0}")]
    WriteError(String),

    /// Failed to delete from the backing store.
    #[error("failed to delete cache entry: {0}")]
    DeleteError(String),

    /// A stored blob could not be parsed. The format has no migration
    /// scheme; callers treat this as an absent entry.
    #[error("failed to parse cached blob: {0}")]
    ParseError(String),

    /// A value could not be serialized for storage.
    #[error("failed to serialize for cache: {0}")]
    SerializeError(String),
}

/// Trait for persistent key-value stores.
///
/// Implementations must be thread-safe (`Send + Sync`). Keys are stored
/// as-is without interpretation beyond the store's own key restrictions.
///
/// # Example
///
/// ```ignore
/// use venuemap::cache::{CacheStore, FileCacheStore};
///
/// let store = FileCacheStore::new()?;
/// store.save("venues-map", "[{\"id\":\"a\"}]")?;
///
/// match store.load("venues-map")? {
///     Some(blob) => println!("{} bytes cached", blob.len()),
///     None => println!("nothing cached"),
/// }
/// ```
pub trait CacheStore: Send + Sync {
    /// Load the blob stored under `key`.
    ///
    /// Returns `Ok(Some(blob))` if an entry exists, `Ok(None)` if it does
    /// not, and `Err` only for access failures.
    fn load(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `blob` under `key`, overwriting any existing entry.
    fn save(&self, key: &str, blob: &str) -> Result<(), CacheError>;

    /// Delete the entry under `key`.
    ///
    /// Returns `Ok(())` even if the entry did not exist; delete is
    /// idempotent.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether an entry exists under `key`.
    ///
    /// Default implementation uses `load()` and checks for `Some`.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.load(key)?.is_some())
    }
}
