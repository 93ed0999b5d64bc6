//! Storefront services.
//!
//! - [`cart_store`] - Reads and writes the cart in the visitor's session
//! - [`catalog`] - Loads categories and products, turning failures into a
//!   visitor-facing message instead of an error page

pub mod cart_store;
pub mod catalog;
