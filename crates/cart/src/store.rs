//! In-memory cart state.
//!
//! [`CartStore`] is the authoritative list of cart entries for the current
//! session. It performs no I/O; `CartService` wraps it with write-through
//! persistence.

use rust_decimal::Decimal;
use storecart_core::{Product, ProductId};
use tracing::warn;

/// Smallest quantity an entry can hold.
pub const MIN_QUANTITY: u32 = 1;

/// A product in the cart with its session-only quantity and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub product: Product,
    quantity: u32,
    selected: bool,
}

impl CartEntry {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: MIN_QUANTITY,
            selected: false,
        }
    }

    /// Units of this product in the cart. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether the entry counts toward the checkout total.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// `price × quantity`, or `None` on decimal overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_times(self.quantity)
    }
}

/// Result of adding a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A product with the same id was already present; nothing changed.
    AlreadyInCart,
}

/// Checkout total over selected entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartTotal {
    pub amount: Decimal,
    /// Selected entries left out because their amount overflowed.
    pub skipped: Vec<ProductId>,
}

impl CartTotal {
    /// Whether every selected entry contributed to the amount.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Ordered cart entries keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    entries: Vec<CartEntry>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from loaded products. Later duplicates of an id are dropped.
    #[must_use]
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut store = Self::new();
        store.replace_products(products);
        store
    }

    /// Replace all entries with `products`, resetting quantity and selection.
    pub fn replace_products(&mut self, products: impl IntoIterator<Item = Product>) {
        self.entries.clear();
        for product in products {
            self.add(product);
        }
    }

    /// Add a product unless its id is already present (first add wins).
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if self.contains(product.id) {
            return AddOutcome::AlreadyInCart;
        }
        self.entries.push(CartEntry::new(product));
        AddOutcome::Added
    }

    /// Increment the quantity. Returns the new quantity, or `None` if absent.
    pub fn increase(&mut self, id: ProductId) -> Option<u32> {
        let entry = self.entry_mut(id)?;
        entry.quantity = entry.quantity.saturating_add(1);
        Some(entry.quantity)
    }

    /// Decrement the quantity, never below [`MIN_QUANTITY`].
    ///
    /// Returns the resulting quantity, or `None` if absent.
    pub fn decrease(&mut self, id: ProductId) -> Option<u32> {
        let entry = self.entry_mut(id)?;
        if entry.quantity > MIN_QUANTITY {
            entry.quantity -= 1;
        }
        Some(entry.quantity)
    }

    /// Set the quantity directly, raising anything below [`MIN_QUANTITY`].
    ///
    /// Returns the stored quantity, or `None` if absent.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Option<u32> {
        let entry = self.entry_mut(id)?;
        entry.quantity = quantity.max(MIN_QUANTITY);
        Some(entry.quantity)
    }

    /// Remove an entry, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.product.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Set the checkout flag. Returns `false` if the id is not in the cart.
    pub fn set_selected(&mut self, id: ProductId, selected: bool) -> bool {
        self.entry_mut(id).is_some_and(|entry| {
            entry.selected = selected;
            true
        })
    }

    /// Sum of `price × quantity` over selected entries.
    #[must_use]
    pub fn total(&self) -> CartTotal {
        let mut total = CartTotal::default();
        for entry in self.entries.iter().filter(|e| e.selected) {
            let id = entry.product.id;
            match entry
                .line_total()
                .and_then(|line| total.amount.checked_add(line))
            {
                Some(sum) => total.amount = sum,
                None => {
                    warn!(product_id = %id, "Cart line amount overflowed, excluded from total");
                    total.skipped.push(id);
                }
            }
        }
        total
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.entries.iter().map(|e| &e.product)
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == id)
    }

    /// Quantity for `id`, if it is in the cart.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> Option<u32> {
        self.get(id).map(CartEntry::quantity)
    }

    /// Whether `id` is in the cart and selected.
    #[must_use]
    pub fn is_selected(&self, id: ProductId) -> bool {
        self.get(id).is_some_and(CartEntry::is_selected)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product.id == id)
    }
}
