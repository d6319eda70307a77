//! Durable key-to-string storage for the settings cache.
//!
//! `CacheStore` persists each key as its own file in a flat directory.
//! Reads are forgiving: a missing or unreadable entry is simply absent,
//! because the cache is an accelerator and the remote store remains the
//! system of record.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A key→string mapping backed by one file per key.
///
/// Directory layout:
/// ```text
/// base_dir/
/// ├── site-name.txt
/// ├── praise-mode.txt
/// └── chats.txt
/// ```
pub struct CacheStore {
    base_dir: PathBuf,
}

impl CacheStore {
    /// Creates a new `CacheStore` rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).context("Failed to create cache directory")?;
        Ok(Self { base_dir })
    }

    /// Reads the value stored under a key.
    ///
    /// Returns `None` when the entry is missing or unreadable; read
    /// failures are logged, never propagated.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read cache entry, treating as absent");
                None
            }
        }
    }

    /// Writes a value under a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        fs::write(&path, value).context(format!("Failed to write cache entry: {:?}", path))?;
        Ok(())
    }

    /// Removes the entry stored under a key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be deleted.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path).context(format!("Failed to delete cache entry: {:?}", path))?;
        }
        Ok(())
    }

    /// Returns the file path for a given key.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.txt", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path()).unwrap();

        store.put("site-name", "Praiser").unwrap();
        assert_eq!(store.get("site-name").as_deref(), Some("Praiser"));
    }

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path()).unwrap();
        assert_eq!(store.get("nothing-here"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path()).unwrap();

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("second"));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path()).unwrap();

        store.put("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);

        // Removing a missing key is fine
        store.remove("k").unwrap();
    }
}
