//! Cart fragment handlers.
//!
//! Cart mutations go through the action dispatcher; these routes only read.

use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::cart_store;
use crate::views::{CartCountTemplate, CartModalTemplate, CartView};

/// Cart modal, opened.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartModalTemplate> {
    let cart = cart_store::load(&session).await?;
    Ok(CartModalTemplate {
        cart: CartView::from(&cart),
        open: true,
    })
}

/// Cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = cart_store::load(&session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}
