//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Page shell (sidebar, search, grid, cart badge)
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (catalog API reachable)
//!
//! # Products (fragments)
//! GET  /products?category=&q=  - Filtered product grid
//! GET  /products/{id}          - Product detail modal
//!
//! # Cart (fragments)
//! GET  /cart                   - Cart modal, open
//! GET  /cart/count             - Cart count badge
//!
//! # Interactions
//! POST /actions                - Delegated dispatcher (form field action=<verb>:<id>)
//! ```

pub mod actions;
pub mod cart;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;
use steppe_market_core::{CategoryFilter, ProductFilter};

use crate::state::AppState;

/// Grid filter as carried in query strings and form fields.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub q: String,
}

impl FilterParams {
    /// The selected category. Unparseable values fall back to all.
    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.category.parse().unwrap_or_default()
    }

    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(self.category(), &self.q)
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
}

/// Create all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/actions", post(actions::dispatch))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use steppe_market_core::CategoryId;

    #[test]
    fn test_filter_params_fall_back_to_all() {
        let params = FilterParams {
            category: "bogus".to_string(),
            q: String::new(),
        };
        assert_eq!(params.category(), CategoryFilter::All);

        let params = FilterParams {
            category: "4".to_string(),
            q: "Tea".to_string(),
        };
        assert_eq!(params.category(), CategoryFilter::Only(CategoryId::new(4)));
        assert_eq!(params.filter().query(), "tea");
    }
}
