//! CLI command implementations.

pub mod cart;
pub mod catalog;

use storecart::{
    Catalog, CartConfig, CartRepository, CartService, FileStore, JsonFileCatalog, RemovalError,
    StorageError,
};
use storecart_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Product id does not exist in the catalog.
    #[error("Product {0} not found in catalog")]
    ProductNotFound(ProductId),

    /// Product id is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Removal could not be confirmed.
    #[error("Removal failed: {0}")]
    Removal(#[from] RemovalError),
}

/// Open the persisted cart described by `config`, hydrated.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the configured cart key is invalid.
pub async fn open_cart(config: &CartConfig) -> Result<CartService<FileStore>, CommandError> {
    let store = FileStore::new(&config.data_dir);
    let repository = CartRepository::with_key(store, config.cart_key.clone())?;
    let mut service = CartService::new(repository);
    service.load().await;
    Ok(service)
}

/// Open the catalog snapshot described by `config`.
#[must_use]
pub fn open_catalog(config: &CartConfig) -> Catalog<JsonFileCatalog> {
    Catalog::new(JsonFileCatalog::new(&config.catalog_file))
        .with_related_limit(config.related_limit)
}

/// Log one product listing line.
fn log_product(product: &Product) {
    tracing::info!(
        "  [{}] {} - {} ({})",
        product.id,
        product.title,
        product.price,
        if product.category.is_empty() {
            "uncategorized"
        } else {
            &product.category
        }
    );
}
