//! Business logic services for admin.
//!
//! # Services
//!
//! - `snapshot` - Last loaded categories and products, refreshed after writes

pub mod snapshot;

pub use snapshot::CatalogSnapshot;
