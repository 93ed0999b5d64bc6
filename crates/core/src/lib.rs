//! Steppe Market Core - Shared types library.
//!
//! This crate provides the types used by both Steppe Market front-ends:
//! - `storefront` - Public catalog, search and cart
//! - `admin` - Password-gated catalog management console
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no sessions, no HTTP clients. Both front-ends fetch data from the REST API
//! and hand it to these types for filtering, cart bookkeeping and formatting.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and tenge price formatting
//! - [`catalog`] - Categories, products and the in-memory catalog snapshot
//! - [`filter`] - Category + search filtering for the product grid
//! - [`cart`] - The persisted shopping cart and its stock-checked mutations
//! - [`notice`] - Blocking alerts and transient toasts shown to the visitor

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod filter;
pub mod notice;
pub mod types;

pub use cart::{Cart, CartError, CartItem, CheckoutSummary, QuantityChange};
pub use catalog::{Catalog, Category, Product};
pub use filter::{CategoryFilter, ProductFilter};
pub use notice::{Notice, NoticeKind};
pub use types::*;
