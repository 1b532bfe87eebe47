//! Durable key-value storage.
//!
//! The cart only ever needs three string operations against device-local
//! storage, so that is the whole port. Implementations:
//!
//! - [`FileStore`] - one JSON file per key under a data directory
//! - [`MemoryStore`] - in-process map, shared between clones

mod file;
mod memory;

use std::future::Future;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters that cannot be stored.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend refused the operation (quota, revoked access, etc.).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage operations for string values under string keys.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `set` overwrites any previous value (last writer wins)
/// - `remove` of a missing key is not an error
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete the value stored under `key`.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Check that a key is non-empty ASCII alphanumerics, `-` or `_`.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("cart_v2-backup").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../cart").is_err());
        assert!(validate_key("my cart").is_err());
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InvalidKey("a/b".to_string());
        assert_eq!(err.to_string(), "invalid storage key: \"a/b\"");
    }
}
