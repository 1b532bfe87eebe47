//! Listing filters applied to already-fetched products.

use serde_json::Value;
use storecart_core::{Product, ProductId};

/// Products whose title contains `query`, ignoring case.
///
/// The query is matched as typed, surrounding whitespace included. An empty
/// query matches everything.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.iter().collect();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}

/// Products in `category` (exact match).
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.category == category).collect()
}

/// Up to `limit` of `candidates`, excluding `product` itself.
#[must_use]
pub fn related_to(product: &Product, candidates: Vec<Product>, limit: usize) -> Vec<Product> {
    candidates
        .into_iter()
        .filter(|p| p.id != product.id)
        .take(limit)
        .collect()
}

/// Whether a raw record carries `id`.
pub(crate) fn record_has_id(record: &Value, id: ProductId) -> bool {
    record.get("id").and_then(Value::as_i64) == Some(i64::from(id.as_i32()))
}

/// Whether a raw record belongs to `category`.
pub(crate) fn record_in_category(record: &Value, category: &str) -> bool {
    record.get("category").and_then(Value::as_str) == Some(category)
}
