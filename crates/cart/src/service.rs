//! Cart service with write-through persistence.
//!
//! [`CartService`] is the one object screens are handed to work with the
//! cart. It owns the in-memory [`CartStore`] and a [`CartRepository`], and
//! writes the full product list through on every mutation that must
//! survive a restart:
//!
//! | Operation          | Persists |
//! |--------------------|----------|
//! | `add`              | yes, when a product was added |
//! | `confirm_removal`  | yes |
//! | `reset`            | yes (deletes the key) |
//! | `increase`/`decrease`/`set_selected` | no |
//!
//! Storage failures are logged and absorbed. The in-memory change always
//! stands and the returned [`Persisted`] reports whether the write landed.
//!
//! Removal is two-phase: `request_removal` hands back a [`RemovalToken`]
//! for the UI to confirm or cancel.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use storecart_core::{Product, ProductId};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::persistence::CartRepository;
use crate::storage::KeyValueStore;
use crate::store::{AddOutcome, CartEntry, CartStore, CartTotal};

/// Whether a mutation reached durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    /// The write succeeded.
    Saved,
    /// The write failed and was logged; memory and storage now differ.
    Failed,
    /// Nothing needed writing.
    Skipped,
}

/// Result of [`CartService::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddResult {
    pub outcome: AddOutcome,
    pub persisted: Persisted,
}

/// Result of a confirmed removal.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub entry: CartEntry,
    pub persisted: Persisted,
}

/// Handle for a removal awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemovalToken(Uuid);

impl RemovalToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RemovalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when confirming a removal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemovalError {
    /// The token was never issued, was cancelled, or was already used.
    #[error("unknown removal token: {0}")]
    UnknownToken(RemovalToken),

    /// The product left the cart after the removal was requested.
    #[error("product {0} is no longer in the cart")]
    NotInCart(ProductId),
}

/// The cart as seen by the UI.
#[derive(Debug)]
pub struct CartService<S> {
    cart: CartStore,
    repository: CartRepository<S>,
    pending: HashMap<RemovalToken, ProductId>,
}

impl<S: KeyValueStore> CartService<S> {
    /// Create a service with an empty cart. Call [`load`](Self::load) to hydrate.
    #[must_use]
    pub fn new(repository: CartRepository<S>) -> Self {
        Self {
            cart: CartStore::new(),
            repository,
            pending: HashMap::new(),
        }
    }

    /// Replace in-memory state with the stored cart.
    ///
    /// Quantities reset to 1 and selections to `false`; pending removals
    /// are dropped. Returns the number of entries loaded.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> usize {
        let products = self.repository.load().await;
        self.cart.replace_products(products);
        self.pending.clear();
        info!(count = self.cart.len(), "Hydrated cart");
        self.cart.len()
    }

    /// Add a product, persisting the cart if it was not already present.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&mut self, product: Product) -> AddResult {
        let title = product.title.clone();
        let outcome = self.cart.add(product);
        let persisted = match outcome {
            AddOutcome::Added => {
                info!(%title, "Added product to cart");
                self.persist().await
            }
            AddOutcome::AlreadyInCart => {
                info!(%title, "Product already in cart");
                Persisted::Skipped
            }
        };
        AddResult { outcome, persisted }
    }

    /// Increment an entry's quantity. Session-only.
    pub fn increase(&mut self, id: ProductId) -> Option<u32> {
        self.cart.increase(id)
    }

    /// Decrement an entry's quantity, never below 1. Session-only.
    pub fn decrease(&mut self, id: ProductId) -> Option<u32> {
        self.cart.decrease(id)
    }

    /// Set an entry's quantity, never below 1. Session-only.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Option<u32> {
        self.cart.set_quantity(id, quantity)
    }

    /// Toggle whether an entry counts toward the total. Session-only.
    pub fn set_selected(&mut self, id: ProductId, selected: bool) -> bool {
        self.cart.set_selected(id, selected)
    }

    /// Checkout total over selected entries.
    #[must_use]
    pub fn total(&self) -> CartTotal {
        self.cart.total()
    }

    /// Start removing a product. Returns `None` if it is not in the cart.
    pub fn request_removal(&mut self, id: ProductId) -> Option<RemovalToken> {
        if !self.cart.contains(id) {
            return None;
        }
        let token = RemovalToken::new();
        self.pending.insert(token, id);
        Some(token)
    }

    /// Drop a pending removal without changing the cart.
    ///
    /// Returns `false` if the token was not pending.
    pub fn cancel_removal(&mut self, token: RemovalToken) -> bool {
        self.pending.remove(&token).is_some()
    }

    /// Carry out a pending removal and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `RemovalError::UnknownToken` if the token is not pending, or
    /// `RemovalError::NotInCart` if the product has since left the cart.
    #[instrument(skip(self, token), fields(token = %token))]
    pub async fn confirm_removal(&mut self, token: RemovalToken) -> Result<Removed, RemovalError> {
        let id = self
            .pending
            .remove(&token)
            .ok_or(RemovalError::UnknownToken(token))?;
        let entry = self.cart.remove(id).ok_or(RemovalError::NotInCart(id))?;
        info!(product_id = %id, "Removed product from cart");
        let persisted = self.persist().await;
        Ok(Removed { entry, persisted })
    }

    /// Empty the cart and delete the stored copy.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) -> Persisted {
        self.cart.clear();
        self.pending.clear();
        match self.repository.clear().await {
            Ok(()) => {
                info!("Cart reset");
                Persisted::Saved
            }
            Err(e) => {
                error!(error = %e, "Failed to clear stored cart");
                Persisted::Failed
            }
        }
    }

    /// Read access to the in-memory cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn repository(&self) -> &CartRepository<S> {
        &self.repository
    }

    /// Number of removals awaiting confirmation.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    async fn persist(&self) -> Persisted {
        match self.repository.save(self.cart.products()).await {
            Ok(()) => Persisted::Saved,
            Err(e) => {
                error!(error = %e, "Failed to save cart");
                Persisted::Failed
            }
        }
    }
}

/// A [`CartService`] shared between screens.
///
/// Cheaply cloneable via `Arc`. Holding the lock across a mutation also
/// orders its write-through relative to every other mutation.
#[derive(Debug)]
pub struct SharedCart<S> {
    inner: Arc<Mutex<CartService<S>>>,
}

impl<S> Clone for SharedCart<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedCart<S> {
    /// Wrap a service for sharing.
    #[must_use]
    pub fn new(service: CartService<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Lock the service for exclusive use.
    pub async fn lock(&self) -> MutexGuard<'_, CartService<S>> {
        self.inner.lock().await
    }
}
