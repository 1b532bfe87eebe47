//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! storecart catalog categories
//! storecart catalog search "jacket"
//! storecart catalog category "men's clothing"
//! storecart catalog related 1
//! ```

use storecart::CartConfig;
use storecart::catalog::search as search_products;
use storecart_core::ProductId;
use tracing::info;

use super::{CommandError, log_product, open_catalog};

/// List category names.
pub async fn categories(config: &CartConfig) {
    let categories = open_catalog(config).categories().await;
    info!("Categories ({}):", categories.len());
    for category in categories {
        info!("  {category}");
    }
}

/// List products whose title matches `query`.
pub async fn search(config: &CartConfig, query: &str) {
    let products = open_catalog(config).products().await;
    let matches = search_products(&products, query);
    info!("{} of {} products match {query:?}", matches.len(), products.len());
    for product in matches {
        log_product(product);
    }
}

/// List products in one category.
pub async fn category(config: &CartConfig, name: &str) {
    let products = open_catalog(config).category(name).await;
    info!("{} products in {name:?}", products.len());
    for product in &products {
        log_product(product);
    }
}

/// Show a product with its related items.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` if the id is not in the catalog.
pub async fn related(config: &CartConfig, id: ProductId) -> Result<(), CommandError> {
    let catalog = open_catalog(config);
    let product = catalog
        .product(id)
        .await
        .ok_or(CommandError::ProductNotFound(id))?;

    log_product(&product);
    if let Some(rating) = product.rating {
        info!("  rating: {}/5 ({} reviews)", rating.stars(), rating.count);
    }

    let related = catalog.related(&product).await;
    info!("Related products ({}):", related.len());
    for item in &related {
        log_product(item);
    }
    Ok(())
}
