//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # List the stored cart
//! storecart cart show
//!
//! # Add product 3 from the catalog snapshot
//! storecart cart add 3
//!
//! # Remove product 3 (without --yes the removal is requested, then cancelled)
//! storecart cart remove 3 --yes
//!
//! # Total of products 1 and 3, with three units of product 1
//! storecart cart total --select 1,3 --quantity 1=3
//!
//! # Empty the cart and delete the stored copy
//! storecart cart reset
//! ```
//!
//! Quantities and selections are session state, so `total` takes them as
//! arguments rather than reading them from storage.

use storecart::{AddOutcome, CartConfig, Persisted};
use storecart_core::ProductId;
use tracing::{info, warn};

use super::{CommandError, log_product, open_cart, open_catalog};

/// List the stored cart.
///
/// # Errors
///
/// Returns an error if the cart storage cannot be opened.
pub async fn show(config: &CartConfig) -> Result<(), CommandError> {
    let service = open_cart(config).await?;
    if service.cart().is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    info!("Cart ({} items):", service.cart().len());
    for entry in service.entries() {
        log_product(&entry.product);
    }
    Ok(())
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog or the cart
/// storage cannot be opened.
pub async fn add(config: &CartConfig, id: ProductId) -> Result<(), CommandError> {
    let product = open_catalog(config)
        .product(id)
        .await
        .ok_or(CommandError::ProductNotFound(id))?;
    let mut service = open_cart(config).await?;

    let result = service.add(product).await;
    match result.outcome {
        AddOutcome::Added => info!("Added product {id} to cart"),
        AddOutcome::AlreadyInCart => info!("Product {id} is already in the cart"),
    }
    warn_if_unsaved(result.persisted);
    Ok(())
}

/// Remove a product, confirming only when `confirmed` is set.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or the cart storage
/// cannot be opened.
pub async fn remove(config: &CartConfig, id: ProductId, confirmed: bool) -> Result<(), CommandError> {
    let mut service = open_cart(config).await?;
    let token = service
        .request_removal(id)
        .ok_or(CommandError::NotInCart(id))?;

    if !confirmed {
        service.cancel_removal(token);
        info!("Removal of product {id} not confirmed; re-run with --yes to remove it");
        return Ok(());
    }

    let removed = service.confirm_removal(token).await?;
    info!("Removed {} from cart", removed.entry.product.title);
    warn_if_unsaved(removed.persisted);
    Ok(())
}

/// Compute the checkout total for the selected products.
///
/// # Errors
///
/// Returns an error if the cart storage cannot be opened.
pub async fn total(
    config: &CartConfig,
    select: &[ProductId],
    quantities: &[(ProductId, u32)],
) -> Result<(), CommandError> {
    let mut service = open_cart(config).await?;

    for &(id, quantity) in quantities {
        if service.set_quantity(id, quantity).is_none() {
            warn!("Product {id} is not in the cart, quantity ignored");
        }
    }
    for &id in select {
        if !service.set_selected(id, true) {
            warn!("Product {id} is not in the cart, selection ignored");
        }
    }

    for entry in service.entries().iter().filter(|e| e.is_selected()) {
        info!(
            "  [{}] {} x{}",
            entry.product.id,
            entry.product.title,
            entry.quantity()
        );
    }
    let total = service.total();
    for id in &total.skipped {
        warn!("Product {id} left out of the total: amount too large");
    }
    info!("Total: {}", total.amount.normalize());
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart storage cannot be opened.
pub async fn reset(config: &CartConfig) -> Result<(), CommandError> {
    let mut service = open_cart(config).await?;
    let persisted = service.reset().await;
    warn_if_unsaved(persisted);
    info!("Cart reset");
    Ok(())
}

fn warn_if_unsaved(persisted: Persisted) {
    if persisted == Persisted::Failed {
        warn!("Cart change was not saved; it will be lost on restart");
    }
}
