//! In-memory catalog source.

use serde_json::Value;
use storecart_core::ProductId;

use super::filter::{record_has_id, record_in_category};
use super::{CatalogError, CatalogSource};

/// Catalog records held in memory, or a source that is always down.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<String>,
    products: Vec<Value>,
    outage: Option<String>,
}

impl StaticCatalog {
    /// Serve the given categories and raw product records.
    #[must_use]
    pub const fn new(categories: Vec<String>, products: Vec<Value>) -> Self {
        Self {
            categories,
            products,
            outage: None,
        }
    }

    /// A source whose every fetch fails with `reason`.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outage: Some(reason.into()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), CatalogError> {
        self.outage
            .as_ref()
            .map_or(Ok(()), |reason| Err(CatalogError::Unavailable(reason.clone())))
    }
}

impl CatalogSource for StaticCatalog {
    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn fetch_products(&self) -> Result<Vec<Value>, CatalogError> {
        self.check()?;
        Ok(self.products.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Value>, CatalogError> {
        self.check()?;
        Ok(self.products.iter().find(|r| record_has_id(r, id)).cloned())
    }

    async fn fetch_category(&self, category: &str) -> Result<Vec<Value>, CatalogError> {
        self.check()?;
        Ok(self
            .products
            .iter()
            .filter(|r| record_in_category(r, category))
            .cloned()
            .collect())
    }
}
