//! File-backed key-value store.
//!
//! Each key lives at `<root>/<key>.json`. Every write lands in its own
//! sibling temp file that is renamed over the target, so concurrent writers
//! resolve to whichever rename lands last and a crash mid-write leaves the
//! previous value intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use super::{KeyValueStore, StorageError, validate_key};

const EXTENSION: &str = "json";

/// A key-value store persisted under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let tmp = self
            .root
            .join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));
        if let Err(e) = write_and_rename(&tmp, &path, value).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
            }
            return Err(e.into());
        }

        debug!(path = %path.display(), "Wrote storage key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_and_rename(tmp: &Path, path: &Path, value: String) -> std::io::Result<()> {
    tokio::fs::write(tmp, value).await?;
    tokio::fs::rename(tmp, path).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store.set("cart", "[]".to_string()).await.unwrap();

        assert_eq!(entries(store.root()), vec!["cart.json"]);
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("cart", "[1]".to_string()).await.unwrap();
        store.set("cart", "[2]".to_string()).await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[2]"));

        store.remove("cart").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap(), None);
        // Second remove is a no-op
        store.remove("cart").await.unwrap();
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.get("../etc/passwd").await,
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_writers_leave_one_complete_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let values: Vec<String> = (0..200)
            .map(|n| serde_json::json!([{ "writer": n, "padding": "x".repeat(n * 20) }]).to_string())
            .collect();
        let handles: Vec<_> = values
            .iter()
            .cloned()
            .map(|value| {
                let store = store.clone();
                tokio::spawn(async move { store.set("cart", value).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.get("cart").await.unwrap().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&stored).is_ok());
        let written: HashSet<&String> = values.iter().collect();
        assert!(written.contains(&stored));
        assert_eq!(entries(dir.path()), vec!["cart.json"]);
    }
}
