//! The management panel and its table fragments.
//!
//! Each of these reloads from the API before rendering.

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::middleware::RequireAdminAuth;
use crate::state::AppState;
use crate::views::{CategoriesTableTemplate, PanelTemplate, ProductsTableTemplate, Tab};

/// `?tab=` query.
#[derive(Debug, Default, Deserialize)]
pub struct PanelParams {
    #[serde(default)]
    pub tab: String,
}

/// GET /?tab=categories|products
pub async fn index(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<PanelParams>,
) -> PanelTemplate {
    state.snapshot().refresh(state.api()).await;
    let catalog = state.snapshot().read().await;
    PanelTemplate::new(Tab::from(params.tab.as_str()), &catalog)
}

/// GET /categories/table
pub async fn categories_table(
    _: RequireAdminAuth,
    State(state): State<AppState>,
) -> CategoriesTableTemplate {
    state.snapshot().refresh_categories(state.api()).await;
    CategoriesTableTemplate::new(&*state.snapshot().read().await)
}

/// GET /products/table
pub async fn products_table(
    _: RequireAdminAuth,
    State(state): State<AppState>,
) -> ProductsTableTemplate {
    state.snapshot().refresh_products(state.api()).await;
    ProductsTableTemplate::new(&*state.snapshot().read().await)
}
