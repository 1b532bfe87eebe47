//! Integration tests for storecart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storecart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_restart` - Cart state across simulated app restarts on disk
//! - `catalog_browse` - Catalog snapshot browsing into the cart
//!
//! Tests run against temporary directories and need no external services.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use storecart::{CartRepository, CartService, FileStore};

/// Raw catalog records in the shape the product API returns.
#[must_use]
pub fn sample_records() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://example.com/img/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style, contrast raglan long sleeve.",
            "category": "men's clothing",
            "image": "https://example.com/img/2.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        }),
        json!({
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "description": "Great outerwear jackets for Spring/Autumn/Winter.",
            "category": "men's clothing",
            "image": "https://example.com/img/3.jpg"
        }),
        json!({
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection.",
            "category": "jewelery",
            "image": "https://example.com/img/5.jpg"
        }),
        json!({
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": "64",
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://example.com/img/9.jpg"
        }),
        // Quarantined by validation: no price
        json!({
            "id": 10,
            "title": "SanDisk SSD PLUS 1TB",
            "category": "electronics",
            "image": "https://example.com/img/10.jpg"
        }),
    ]
}

/// Write a catalog snapshot into `dir`, returning its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn write_catalog(dir: &Path, products: &[Value]) -> PathBuf {
    let path = dir.join("catalog.json");
    let snapshot = json!({ "products": products });
    std::fs::write(&path, serde_json::to_vec_pretty(&snapshot).unwrap()).unwrap();
    path
}

/// A freshly hydrated cart over the file store at `dir`, as on app start.
pub async fn open_cart(dir: &Path) -> CartService<FileStore> {
    let mut service = CartService::new(CartRepository::new(FileStore::new(dir)));
    service.load().await;
    service
}
