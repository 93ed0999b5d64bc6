//! Product fragment handlers.

use axum::extract::{Path, Query, State};
use steppe_market_core::ProductId;
use tracing::instrument;

use crate::routes::FilterParams;
use crate::services::catalog;
use crate::state::AppState;
use crate::views::{ProductDetailView, ProductGridTemplate, ProductModalTemplate};

/// Filtered product grid.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> ProductGridTemplate {
    let loaded = catalog::load_products(state.catalog()).await;
    ProductGridTemplate::new(&loaded.catalog, &params.filter(), loaded.error)
}

/// Product detail modal. Closed when the product cannot be loaded.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ProductModalTemplate {
    let detail = catalog::load_detail(state.catalog(), id).await;
    ProductModalTemplate {
        product: detail.map(|(product, catalog)| ProductDetailView::new(&product, &catalog)),
    }
}
