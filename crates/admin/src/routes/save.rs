//! Modal form submits.
//!
//! On success the modal closes and the tables re-render from a fresh load.
//! Validation and API failures leave the modal open and raise an alert.

use axum::{Form, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::forms::{self, CategoryForm, ProductForm};
use crate::htmx::HtmxResponse;
use crate::middleware::RequireAdminAuth;
use crate::routes::actions::refreshed_tables;
use crate::state::AppState;

/// Alert after a failed category save.
pub const SAVE_CATEGORY_FAILED: &str = "Failed to save category";

/// Alert after a failed product save.
pub const SAVE_PRODUCT_FAILED: &str = "Failed to save product";

/// POST /categories/save
#[instrument(skip_all, fields(category_id = %form.id))]
pub async fn save_category(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<HtmxResponse> {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(e) => return Ok(HtmxResponse::alert(e.to_string())),
    };

    let saved = match payload.id {
        Some(id) => state.api().update_category(id, &payload).await,
        None => state.api().create_category(&payload).await,
    };
    match saved {
        Ok(category) => tracing::info!(category_id = %category.id, "Category saved"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save category");
            return Ok(HtmxResponse::alert(SAVE_CATEGORY_FAILED));
        }
    }

    // Product rows show category names, so both tables re-render
    state.snapshot().refresh_categories(state.api()).await;
    refreshed_tables(&state).await
}

/// POST /products/save
#[instrument(skip_all, fields(product_id = ?forms::product_id(&form)))]
pub async fn save_product(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<HtmxResponse> {
    let payload = {
        let catalog = state.snapshot().read().await;
        form.into_payload(&catalog)
    };
    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => return Ok(HtmxResponse::alert(e.to_string())),
    };

    let saved = match payload.id {
        Some(id) => state.api().update_product(id, &payload).await,
        None => state.api().create_product(&payload).await,
    };
    match saved {
        Ok(product) => tracing::info!(product_id = %product.id, "Product saved"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save product");
            return Ok(HtmxResponse::alert(SAVE_PRODUCT_FAILED));
        }
    }

    state.snapshot().refresh_products(state.api()).await;
    refreshed_tables(&state).await
}
