//! Cart persistence adapter.
//!
//! The whole cart is stored as a single JSON array of product records under
//! one key (`"cart"` by default). Only product fields are written: quantity
//! and checkout selection are session state and come back as defaults on
//! every load.
//!
//! Reads never fail from the caller's point of view. A storage error, a
//! missing key, or a value that is not a JSON array all load as an empty
//! cart; individual records that fail validation are quarantined and the
//! rest of the cart survives.

use serde_json::Value;
use storecart_core::{Product, ProductBatch};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::storage::{KeyValueStore, StorageError, validate_key};

/// Storage key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Errors that can occur when writing the cart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads and writes the cart collection through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartRepository<S> {
    /// Create a repository using [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_CART_KEY.to_string(),
        }
    }

    /// Create a repository persisting under a custom key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if the key cannot be stored.
    pub fn with_key(store: S, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self { store, key })
    }

    /// The storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored cart, or an empty one if nothing usable is stored.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Vec<Product> {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => decode_cart(&raw),
            Ok(None) => {
                debug!("No stored cart");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "Failed to read stored cart");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored cart with `products`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the storage write fails.
    #[instrument(skip(self, products), fields(key = %self.key))]
    pub async fn save<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
    ) -> Result<(), PersistenceError> {
        let products: Vec<&Product> = products.into_iter().collect();
        let encoded = serde_json::to_string(&products)?;
        self.store.set(&self.key, encoded).await?;
        debug!(count = products.len(), "Saved cart");
        Ok(())
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage delete fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key).await?;
        debug!("Cleared stored cart");
        Ok(())
    }
}

/// Decode a stored cart value, quarantining invalid records.
fn decode_cart(raw: &str) -> Vec<Product> {
    let records: Vec<Value> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Stored cart is not a JSON array, starting empty");
            return Vec::new();
        }
    };

    let batch = ProductBatch::from_values(records);
    for rejected in &batch.quarantined {
        warn!(
            index = rejected.index,
            error = %rejected.error,
            "Dropped invalid product from stored cart"
        );
    }
    batch.products
}
