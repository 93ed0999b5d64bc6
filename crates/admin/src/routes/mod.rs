//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /login                 - Login page
//! POST /login                 - Check password, set the session flag
//! POST /logout                - Clear the session flag
//! GET  /health                - Liveness
//! GET  /health/ready          - Readiness (admin API reachable)
//!
//! # Requires login
//! GET  /?tab=categories|products  - Panel with both tables
//! GET  /categories/table      - Category table fragment
//! GET  /products/table        - Product table fragment
//! POST /actions               - Delegated dispatcher (action=<verb>[:<id>])
//! POST /categories/save       - Category modal submit
//! POST /products/save         - Product modal submit
//! POST /upload                - Forward an image to the API
//! ```

pub mod actions;
pub mod auth;
pub mod health;
pub mod panel;
pub mod save;
pub mod upload;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/table", get(panel::categories_table))
        .route("/save", post(save::save_category))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/table", get(panel::products_table))
        .route("/save", post(save::save_product))
}

/// Create all admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(panel::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/actions", post(actions::dispatch))
        .route("/upload", post(upload::upload))
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
}
