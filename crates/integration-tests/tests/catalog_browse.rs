//! Integration tests for browsing a catalog snapshot into the cart.

#![allow(clippy::unwrap_used)]

use storecart::catalog::search;
use storecart::{Catalog, CommentThread, JsonFileCatalog, StaticCatalog};
use storecart_core::ProductId;
use storecart_integration_tests::{open_cart, sample_records, write_catalog};

fn snapshot_catalog(dir: &std::path::Path) -> Catalog<JsonFileCatalog> {
    Catalog::new(JsonFileCatalog::new(write_catalog(dir, &sample_records())))
}

#[tokio::test]
async fn test_categories_derived_from_products() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = snapshot_catalog(dir.path());

    assert_eq!(
        catalog.categories().await,
        vec!["men's clothing", "jewelery", "electronics"]
    );
}

#[tokio::test]
async fn test_invalid_records_are_left_out_of_listings() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = snapshot_catalog(dir.path());

    let products = catalog.products().await;
    assert_eq!(products.len(), 5);
    assert!(products.iter().all(|p| p.id != ProductId::new(10)));
    assert!(catalog.product(ProductId::new(10)).await.is_none());

    let electronics = catalog.category("electronics").await;
    assert_eq!(electronics.len(), 1);
}

#[tokio::test]
async fn test_search_then_add_to_cart() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = snapshot_catalog(dir.path());
    let products = catalog.products().await;

    let hits = search(&products, "MENS");
    assert_eq!(hits.len(), 2);

    let mut cart = open_cart(dir.path()).await;
    for product in hits {
        cart.add(product.clone()).await;
    }

    let cart = open_cart(dir.path()).await;
    assert_eq!(cart.cart().len(), 2);
    assert!(cart.cart().contains(ProductId::new(2)));
    assert!(cart.cart().contains(ProductId::new(3)));
}

#[tokio::test]
async fn test_related_products_share_category() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = snapshot_catalog(dir.path()).with_related_limit(1);

    let backpack = catalog.product(ProductId::new(1)).await.unwrap();
    let related = catalog.related(&backpack).await;
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, ProductId::new(2));
    assert_eq!(related[0].category, backpack.category);
}

#[tokio::test]
async fn test_missing_snapshot_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::new(JsonFileCatalog::new(dir.path().join("absent.json")));

    assert!(catalog.categories().await.is_empty());
    assert!(catalog.products().await.is_empty());
    assert!(catalog.product(ProductId::new(1)).await.is_none());
}

#[tokio::test]
async fn test_outage_leaves_cart_usable() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::new(StaticCatalog::unavailable("connection refused"));
    assert!(catalog.products().await.is_empty());

    let snapshot = snapshot_catalog(dir.path());
    let mut cart = open_cart(dir.path()).await;
    cart.add(snapshot.product(ProductId::new(5)).await.unwrap())
        .await;
    assert_eq!(cart.cart().len(), 1);
}

#[tokio::test]
async fn test_detail_view_comments_are_session_only() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = snapshot_catalog(dir.path());
    let product = catalog.product(ProductId::new(3)).await.unwrap();

    let mut thread = CommentThread::new();
    assert!(thread.add_own("Fits well"));
    assert!(!thread.add_own("   "));
    assert_eq!(thread.len(), 1);

    // Comments never reach the stored cart
    let mut cart = open_cart(dir.path()).await;
    cart.add(product).await;
    let stored = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    assert!(!stored.contains("Fits well"));
}
