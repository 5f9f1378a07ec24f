//! cache::file_store
//!
//! JSON-file-backed cache storage.
//!
//! # Layout
//!
//! - Entries live under `~/.venuemap/`, one file per key (`<key>.json`)
//! - All writes are atomic (write to temp file, then rename)
//! - Keys are restricted to `[A-Za-z0-9._-]` so they map safely to file
//!   names
//!
//! # Example
//!
//! ```ignore
//! use venuemap::cache::{CacheStore, FileCacheStore};
//!
//! let store = FileCacheStore::new()?;
//! store.save("venues-map", blob)?;
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use super::traits::{CacheError, CacheStore};

/// File-backed cache storage.
///
/// Stores each key as a JSON file under a single directory, by default
/// `~/.venuemap/`. This is the default cache store.
///
/// # Example
///
/// ```ignore
/// use venuemap::cache::{CacheStore, FileCacheStore};
///
/// let store = FileCacheStore::new()?;
///
/// store.save("venues-map", "[]")?;
/// assert!(store.exists("venues-map")?);
/// store.delete("venues-map")?;
/// ```
#[derive(Debug)]
pub struct FileCacheStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl FileCacheStore {
    /// Create a file cache store at the default location, `~/.venuemap/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CacheError> {
        let home = dirs::home_dir()
            .ok_or_else(|| CacheError::ReadError("cannot determine home directory".into()))?;
        Ok(Self {
            dir: home.join(".venuemap"),
        })
    }

    /// Create a file cache store over a custom directory.
    ///
    /// This is primarily useful for testing.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Get the directory entries are stored under.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Resolve a key to its file path, rejecting keys that do not map
    /// safely to a file name.
    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CacheError::ReadError(format!(
                "cannot read cache entry: {}",
                err
            ))),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| CacheError::WriteError(format!("cannot create directory: {}", e)))?;

        // Write to a temp file first for atomicity
        let temp_path = path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| CacheError::WriteError(format!("cannot create temp file: {}", e)))?;

            file.write_all(blob.as_bytes())
                .map_err(|e| CacheError::WriteError(format!("cannot write cache entry: {}", e)))?;

            file.sync_all()
                .map_err(|e| CacheError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &path)
            .map_err(|e| CacheError::WriteError(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CacheError::DeleteError(format!(
                "cannot delete cache entry: {}",
                err
            ))),
        }
    }
}
