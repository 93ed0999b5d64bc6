//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::routes::FilterParams;
use crate::services::{cart_store, catalog};
use crate::state::AppState;
use crate::views::{
    CartView, CategoryNavTemplate, ProductCardView, ProductDetailView, ProductGridTemplate,
    SectionTitleTemplate,
};

/// Full storefront page.
///
/// Field names match the variables the included partials expect.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub categories: Vec<crate::views::CategoryNavView>,
    pub title: String,
    pub show_back: bool,
    pub category: String,
    pub query: String,
    pub products: Vec<ProductCardView>,
    pub error: Option<String>,
    pub count: u32,
    pub cart: CartView,
    pub open: bool,
    pub product: Option<ProductDetailView>,
}

/// Display the storefront.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<FilterParams>,
) -> Result<HomeTemplate> {
    let loaded = catalog::load(state.catalog()).await;
    let cart = cart_store::load(&session).await?;
    let selected = params.category();

    let nav = CategoryNavTemplate::new(&loaded.catalog, selected);
    let heading = SectionTitleTemplate::new(&loaded.catalog, selected);
    let grid = ProductGridTemplate::new(&loaded.catalog, &params.filter(), loaded.error);

    Ok(HomeTemplate {
        categories: nav.categories,
        title: heading.title,
        show_back: heading.show_back,
        category: selected.to_string(),
        query: params.q,
        products: grid.products,
        error: grid.error,
        count: cart.item_count(),
        cart: CartView::from(&cart),
        open: false,
        product: None,
    })
}
