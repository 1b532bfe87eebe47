//! In-process key-value store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError, validate_key};

/// A key-value store held in memory.
///
/// Clones share the same map, so a test can hand one clone to a
/// `CartRepository` and inspect what was written through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").await.unwrap(), None);

        store.set("cart", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[]"));

        store.set("cart", "[1]".to_string()).await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[1]"));

        store.remove("cart").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("cart").await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("cart", "[]".to_string()).await.unwrap();
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn test_rejects_invalid_key() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.set("a b", String::new()).await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
