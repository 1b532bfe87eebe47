//! Catalog access.
//!
//! The product catalog is an external collaborator. [`CatalogSource`] is the
//! port it is reached through; [`Catalog`] sits in front of it and is what
//! screens use:
//!
//! - every record is validated into a [`Product`], invalid ones are logged
//!   and dropped
//! - a failed fetch is logged and reads as "no data" (empty list / `None`)
//!
//! Sources:
//!
//! - [`JsonFileCatalog`] - local snapshot file
//! - [`StaticCatalog`] - in-memory records

mod file;
mod filter;
mod memory;

use std::future::Future;

use serde_json::Value;
use storecart_core::{Product, ProductBatch, ProductId};
use thiserror::Error;
use tracing::{error, instrument, warn};

pub use file::JsonFileCatalog;
pub use filter::{filter_by_category, related_to, search};
pub use memory::StaticCatalog;

/// Number of related products shown on a detail view.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Errors that can occur when fetching from a catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source returned something that is not JSON of the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Source could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Raw catalog fetches. Records are returned unvalidated.
pub trait CatalogSource: Send + Sync {
    /// All category names.
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    /// Every product record.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Value>, CatalogError>> + Send;

    /// A single product record, if the id exists.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Value>, CatalogError>> + Send;

    /// Product records in one category.
    fn fetch_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Value>, CatalogError>> + Send;
}

/// Validating, failure-absorbing front for a [`CatalogSource`].
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    source: S,
    related_limit: usize,
}

impl<S: CatalogSource> Catalog<S> {
    /// Wrap a source, showing [`DEFAULT_RELATED_LIMIT`] related products.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    /// Override how many related products [`related`](Self::related) returns.
    #[must_use]
    pub const fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    /// Category names, or empty if the fetch fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Vec<String> {
        self.source.fetch_categories().await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to fetch categories");
            Vec::new()
        })
    }

    /// All valid products, or empty if the fetch fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Vec<Product> {
        match self.source.fetch_products().await {
            Ok(records) => validate("products", records),
            Err(e) => {
                error!(error = %e, "Failed to fetch products");
                Vec::new()
            }
        }
    }

    /// One product, or `None` if missing, invalid, or the fetch fails.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Option<Product> {
        match self.source.fetch_product(id).await {
            Ok(Some(record)) => Product::from_value(record)
                .inspect_err(|e| warn!(error = %e, "Catalog returned an invalid product"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                error!(error = %e, "Failed to fetch product");
                None
            }
        }
    }

    /// Valid products in one category, or empty if the fetch fails.
    #[instrument(skip(self))]
    pub async fn category(&self, category: &str) -> Vec<Product> {
        match self.source.fetch_category(category).await {
            Ok(records) => validate("category", records),
            Err(e) => {
                error!(error = %e, "Failed to fetch category");
                Vec::new()
            }
        }
    }

    /// Other products from the same category, up to the related limit.
    ///
    /// Products without a category have no related items.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn related(&self, product: &Product) -> Vec<Product> {
        if product.category.is_empty() {
            return Vec::new();
        }
        let siblings = self.category(&product.category).await;
        related_to(product, siblings, self.related_limit)
    }
}

fn validate(listing: &str, records: Vec<Value>) -> Vec<Product> {
    let batch = ProductBatch::from_values(records);
    for rejected in &batch.quarantined {
        warn!(
            listing,
            index = rejected.index,
            error = %rejected.error,
            "Quarantined invalid catalog record"
        );
    }
    batch.products
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> StaticCatalog {
        StaticCatalog::new(
            vec!["electronics".to_string(), "jewelery".to_string()],
            vec![
                json!({ "id": 1, "title": "Monitor", "price": 199.99, "image": "m.png", "category": "electronics" }),
                json!({ "id": 2, "title": "SSD", "price": 79, "image": "s.png", "category": "electronics" }),
                json!({ "id": 3, "title": "Ring", "price": 9.99, "image": "r.png", "category": "jewelery" }),
                json!({ "id": 4, "title": "Broken", "image": "b.png", "category": "electronics" }),
                json!({ "id": 5, "title": "Cable", "price": "4.5", "image": "c.png", "category": "electronics" }),
                json!({ "id": 6, "title": "Mouse", "price": 25, "image": "mo.png", "category": "electronics" }),
            ],
        )
    }

    #[tokio::test]
    async fn test_products_quarantines_invalid_records() {
        let catalog = Catalog::new(sample());
        let ids: Vec<i32> = catalog
            .products()
            .await
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 6]);
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let catalog = Catalog::new(sample());
        assert_eq!(catalog.product(ProductId::new(3)).await.unwrap().title, "Ring");
        assert!(catalog.product(ProductId::new(4)).await.is_none());
        assert!(catalog.product(ProductId::new(99)).await.is_none());
    }

    #[tokio::test]
    async fn test_related_excludes_self_and_caps() {
        let catalog = Catalog::new(sample());
        let monitor = catalog.product(ProductId::new(1)).await.unwrap();

        let related: Vec<i32> = catalog
            .related(&monitor)
            .await
            .iter()
            .map(|p| p.id.as_i32())
            .collect();

        assert_eq!(related, vec![2, 5, 6]);
    }

    #[tokio::test]
    async fn test_related_limit_override() {
        let catalog = Catalog::new(sample()).with_related_limit(1);
        let monitor = catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(catalog.related(&monitor).await.len(), 1);
    }

    #[tokio::test]
    async fn test_related_without_category() {
        let catalog = Catalog::new(sample());
        let loose = Product::new(
            ProductId::new(50),
            "Loose",
            storecart_core::Price::ZERO,
            "l.png",
        );
        assert!(catalog.related(&loose).await.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_source_reads_as_no_data() {
        let catalog = Catalog::new(StaticCatalog::unavailable("offline"));
        assert!(catalog.categories().await.is_empty());
        assert!(catalog.products().await.is_empty());
        assert!(catalog.product(ProductId::new(1)).await.is_none());
        assert!(catalog.category("electronics").await.is_empty());
    }

    #[tokio::test]
    async fn test_categories() {
        let catalog = Catalog::new(sample());
        assert_eq!(catalog.categories().await, vec!["electronics", "jewelery"]);
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Unavailable("timeout".to_string());
        assert_eq!(err.to_string(), "catalog unavailable: timeout");
    }
}
