//! storecart - Client-side shopping cart with local persistence.
//!
//! # Architecture
//!
//! - [`store::CartStore`] holds the session's cart entries in memory
//! - [`persistence::CartRepository`] saves/loads the product list as one
//!   JSON array under a single key in a [`storage::KeyValueStore`]
//! - [`service::CartService`] ties the two together with write-through
//!   persistence and is the object handed to each screen
//! - [`catalog::Catalog`] validates records from the external catalog and
//!   absorbs fetch failures
//!
//! Quantity and checkout selection are session state. Only product fields
//! are persisted, so both reset to defaults whenever the cart is reloaded.
//!
//! # Example
//!
//! ```rust,ignore
//! use storecart::{CartRepository, CartService, FileStore};
//!
//! let mut cart = CartService::new(CartRepository::new(FileStore::new("./data")));
//! cart.load().await;
//!
//! cart.add(product).await;
//! cart.increase(product_id);
//! cart.set_selected(product_id, true);
//! let total = cart.total();
//!
//! if let Some(token) = cart.request_removal(product_id) {
//!     // show the confirm prompt, then:
//!     cart.confirm_removal(token).await?;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod comments;
pub mod config;
pub mod persistence;
pub mod service;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogError, CatalogSource, JsonFileCatalog, StaticCatalog};
pub use comments::{Comment, CommentThread};
pub use config::{CartConfig, ConfigError, LogFormat};
pub use persistence::{CartRepository, DEFAULT_CART_KEY, PersistenceError};
pub use service::{
    AddResult, CartService, Persisted, RemovalError, RemovalToken, Removed, SharedCart,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{AddOutcome, CartEntry, CartStore, CartTotal};
pub use storecart_core::{Price, Product, ProductId};
