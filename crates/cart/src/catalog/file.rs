//! Catalog snapshot stored as a local JSON file.
//!
//! Shape:
//!
//! ```json
//! {
//!   "categories": ["electronics", "jewelery"],
//!   "products": [{ "id": 1, "title": "...", "price": 9.99, "image": "...", "category": "..." }]
//! }
//! ```
//!
//! `categories` may be omitted, in which case the distinct categories of
//! `products` are listed in first-seen order.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use storecart_core::ProductId;

use super::filter::{record_has_id, record_in_category};
use super::{CatalogError, CatalogSource};

#[derive(Debug, Default, Deserialize)]
struct CatalogSnapshot {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    products: Vec<Value>,
}

/// A [`CatalogSource`] backed by a snapshot file, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl CatalogSource for JsonFileCatalog {
    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let snapshot = self.snapshot().await?;
        if !snapshot.categories.is_empty() {
            return Ok(snapshot.categories);
        }
        let mut categories: Vec<String> = Vec::new();
        for category in snapshot
            .products
            .iter()
            .filter_map(|r| r.get("category").and_then(Value::as_str))
        {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        Ok(categories)
    }

    async fn fetch_products(&self) -> Result<Vec<Value>, CatalogError> {
        Ok(self.snapshot().await?.products)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Value>, CatalogError> {
        Ok(self
            .snapshot()
            .await?
            .products
            .into_iter()
            .find(|r| record_has_id(r, id)))
    }

    async fn fetch_category(&self, category: &str) -> Result<Vec<Value>, CatalogError> {
        Ok(self
            .snapshot()
            .await?
            .products
            .into_iter()
            .filter(|r| record_in_category(r, category))
            .collect())
    }
}
