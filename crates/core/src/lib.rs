//! storecart core - Shared product types.
//!
//! This crate provides the types every storecart component agrees on:
//! - `storecart` - Cart store, persistence, and catalog helpers
//! - `storecart-cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no HTTP clients. Records from the catalog API are validated here, at the
//! boundary, so nothing downstream ever touches a loosely-typed product.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the validated `Product` schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
