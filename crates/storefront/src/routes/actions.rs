//! Delegated action dispatcher.
//!
//! The whole page sits inside one `<form id="actions">`. Controls are submit
//! buttons named `action` whose value is `verb` or `verb:id`; the search box
//! posts the same form with no action. Each request is parsed into an
//! [`Action`], dispatched, and answered with out-of-band fragments.

use std::str::FromStr;

use axum::{Form, extract::State};
use serde::Deserialize;
use steppe_market_core::{Cart, CategoryFilter, Notice, ProductFilter, ProductId};
use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::htmx::HtmxResponse;
use crate::routes::FilterParams;
use crate::services::{cart_store, catalog};
use crate::state::AppState;
use crate::views::{
    CartBodyTemplate, CartCountTemplate, CartModalTemplate, CartView, CategoryNavTemplate,
    FilterStateTemplate, ProductDetailView, ProductGridTemplate, ProductModalTemplate,
    SectionTitleTemplate,
};

/// Toast shown after a successful add.
pub const ADDED_TO_CART: &str = "Added to cart";

/// A visitor interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddToCart(ProductId),
    /// Add from the detail modal, then close it.
    AddFromDetails(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Checkout,
    ShowDetails(ProductId),
    CloseDetails,
    OpenCart,
    CloseCart,
    SelectCategory(CategoryFilter),
    /// No action field: re-filter the grid with the current query.
    Search,
}

/// Malformed `action` values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown action '{0}'")]
    Unknown(String),

    #[error("invalid id in action '{0}'")]
    InvalidId(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = s.split_once(':').map_or((s, None), |(v, a)| (v, Some(a)));

        let id = || -> std::result::Result<ProductId, ActionParseError> {
            arg.ok_or_else(|| ActionParseError::InvalidId(s.to_string()))?
                .parse()
                .map_err(|_| ActionParseError::InvalidId(s.to_string()))
        };

        let action = match (verb, arg) {
            ("", None) => Self::Search,
            ("add", _) => Self::AddToCart(id()?),
            ("add-from-details", _) => Self::AddFromDetails(id()?),
            ("inc", _) => Self::Increment(id()?),
            ("dec", _) => Self::Decrement(id()?),
            ("remove", _) => Self::Remove(id()?),
            ("details", _) => Self::ShowDetails(id()?),
            ("category", Some(value)) => Self::SelectCategory(
                value
                    .parse()
                    .map_err(|_| ActionParseError::InvalidId(s.to_string()))?,
            ),
            ("checkout", None) => Self::Checkout,
            ("close-details", None) => Self::CloseDetails,
            ("open-cart", None) => Self::OpenCart,
            ("close-cart", None) => Self::CloseCart,
            _ => return Err(ActionParseError::Unknown(s.to_string())),
        };
        Ok(action)
    }
}

/// The actions form: the pressed button plus the current filter fields.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub q: String,
}

impl ActionForm {
    fn filter_params(self) -> FilterParams {
        FilterParams {
            category: self.category,
            q: self.q,
        }
    }
}

/// Dispatch one interaction.
#[instrument(skip(state, session, form), fields(action = %form.action))]
pub async fn dispatch(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ActionForm>,
) -> Result<HtmxResponse> {
    let action: Action = form
        .action
        .parse()
        .map_err(|e: ActionParseError| AppError::BadRequest(e.to_string()))?;

    let params = form.filter_params();

    match action {
        Action::AddToCart(id) => add_to_cart(&state, &session, id, false).await,
        Action::AddFromDetails(id) => add_to_cart(&state, &session, id, true).await,
        Action::Increment(id) => update_quantity(&state, &session, id, 1).await,
        Action::Decrement(id) => update_quantity(&state, &session, id, -1).await,
        Action::Remove(id) => remove_from_cart(&session, id).await,
        Action::Checkout => checkout(&session).await,
        Action::ShowDetails(id) => show_details(&state, id).await,
        Action::CloseDetails => {
            Ok(HtmxResponse::new().fragment(&ProductModalTemplate { product: None })?)
        }
        Action::OpenCart => cart_modal(&session, true).await,
        Action::CloseCart => cart_modal(&session, false).await,
        Action::SelectCategory(selected) => select_category(&state, selected, &params.q).await,
        Action::Search => search(&state, &params).await,
    }
}

// =============================================================================
// Cart Actions
// =============================================================================

/// Badge and cart body, re-rendered after every cart mutation.
fn cart_fragments(cart: &Cart) -> Result<HtmxResponse> {
    Ok(HtmxResponse::new()
        .fragment(&CartCountTemplate {
            count: cart.item_count(),
        })?
        .fragment(&CartBodyTemplate {
            cart: CartView::from(cart),
        })?)
}

async fn add_to_cart(
    state: &AppState,
    session: &Session,
    id: ProductId,
    close_details: bool,
) -> Result<HtmxResponse> {
    // Stock is checked against a fresh product list
    let loaded = catalog::load_products(state.catalog()).await;
    let mut cart = cart_store::load(session).await?;

    let mut response = match cart.add(loaded.catalog.product(id)) {
        Ok(()) => {
            cart_store::save(session, &cart).await?;
            let product_id = id.to_string();
            add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
            cart_fragments(&cart)?.notice(Notice::toast(ADDED_TO_CART))
        }
        Err(e) => {
            tracing::info!(product_id = %id, reason = %e, "Add to cart rejected");
            HtmxResponse::new().notice(Notice::alert(e.to_string()))
        }
    };
    // The detail modal closes whether or not the add went through
    if close_details {
        response = response.fragment(&ProductModalTemplate { product: None })?;
    }
    Ok(response)
}

async fn update_quantity(
    state: &AppState,
    session: &Session,
    id: ProductId,
    delta: i32,
) -> Result<HtmxResponse> {
    let loaded = catalog::load_products(state.catalog()).await;
    let mut cart = cart_store::load(session).await?;

    match cart.update_quantity(id, delta, loaded.catalog.product(id)) {
        Ok(change) => {
            tracing::debug!(product_id = %id, ?change, "Cart quantity changed");
            cart_store::save(session, &cart).await?;
            cart_fragments(&cart)
        }
        Err(e) => Ok(HtmxResponse::new().notice(Notice::alert(e.to_string()))),
    }
}

async fn remove_from_cart(session: &Session, id: ProductId) -> Result<HtmxResponse> {
    let mut cart = cart_store::load(session).await?;
    cart.remove(id);
    cart_store::save(session, &cart).await?;
    cart_fragments(&cart)
}

async fn checkout(session: &Session) -> Result<HtmxResponse> {
    let mut cart = cart_store::load(session).await?;

    let summary = match cart.checkout() {
        Ok(summary) => summary,
        Err(e) => return Ok(HtmxResponse::new().notice(Notice::alert(e.to_string()))),
    };
    cart_store::save(session, &cart).await?;
    tracing::info!(
        item_count = summary.item_count,
        total = %summary.total.amount(),
        "Checkout completed"
    );
    add_breadcrumb("cart", "Checkout", None);

    Ok(HtmxResponse::new()
        .fragment(&CartCountTemplate {
            count: cart.item_count(),
        })?
        .fragment(&CartModalTemplate {
            cart: CartView::from(&cart),
            open: false,
        })?
        .notice(Notice::alert(summary.message())))
}

async fn cart_modal(session: &Session, open: bool) -> Result<HtmxResponse> {
    let cart = cart_store::load(session).await?;
    Ok(HtmxResponse::new().fragment(&CartModalTemplate {
        cart: CartView::from(&cart),
        open,
    })?)
}

// =============================================================================
// Catalog Actions
// =============================================================================

/// Open the detail modal. Failures are logged and nothing is shown.
async fn show_details(state: &AppState, id: ProductId) -> Result<HtmxResponse> {
    let Some((product, catalog)) = catalog::load_detail(state.catalog(), id).await else {
        return Ok(HtmxResponse::new());
    };
    Ok(HtmxResponse::new().fragment(&ProductModalTemplate {
        product: Some(ProductDetailView::new(&product, &catalog)),
    })?)
}

async fn select_category(
    state: &AppState,
    selected: CategoryFilter,
    query: &str,
) -> Result<HtmxResponse> {
    let loaded = catalog::load(state.catalog()).await;
    let filter = ProductFilter::new(selected, query);

    Ok(HtmxResponse::new()
        .fragment(&FilterStateTemplate {
            category: selected.to_string(),
        })?
        .fragment(&CategoryNavTemplate::new(&loaded.catalog, selected))?
        .fragment(&SectionTitleTemplate::new(&loaded.catalog, selected))?
        .fragment(&ProductGridTemplate::new(
            &loaded.catalog,
            &filter,
            loaded.error,
        ))?)
}

async fn search(state: &AppState, params: &FilterParams) -> Result<HtmxResponse> {
    let loaded = catalog::load_products(state.catalog()).await;
    Ok(HtmxResponse::new().fragment(&ProductGridTemplate::new(
        &loaded.catalog,
        &params.filter(),
        loaded.error,
    ))?)
}
