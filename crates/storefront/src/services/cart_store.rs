//! Cart persistence in the visitor's session.
//!
//! The cart is written back in full after every mutation, so the stored
//! value always equals the in-memory cart serialized.

use steppe_market_core::Cart;
use tower_sessions::{Session, session};

use crate::models::session_keys;

/// Read the visitor's cart. A missing or unreadable value is an empty cart.
///
/// # Errors
///
/// Returns the session store error if the store itself fails.
pub async fn load(session: &Session) -> Result<Cart, session::Error> {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => Ok(cart.unwrap_or_default()),
        Err(session::Error::SerdeJson(e)) => {
            tracing::warn!(error = %e, "Discarding unreadable cart");
            Ok(Cart::new())
        }
        Err(e) => Err(e),
    }
}

/// Persist the full cart.
///
/// # Errors
///
/// Returns the session error if the value cannot be stored.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), session::Error> {
    session.insert(session_keys::CART, cart).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use steppe_market_core::{Price, Product, ProductId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn product(id: i64, quantity: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::new(Decimal::from(1000)),
            quantity,
            category_id: None,
            image_path: None,
        }
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() {
        let session = session();
        assert!(load(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_value_tracks_every_mutation() {
        let session = session();
        let tea = product(1, 3);
        let mut cart = load(&session).await.unwrap();

        cart.add(Some(&tea)).unwrap();
        save(&session, &cart).await.unwrap();
        let stored: serde_json::Value = session.get(session_keys::CART).await.unwrap().unwrap();
        assert_eq!(stored, serde_json::to_value(&cart).unwrap());

        cart.update_quantity(tea.id, 1, Some(&tea)).unwrap();
        save(&session, &cart).await.unwrap();
        let reloaded = load(&session).await.unwrap();
        assert_eq!(reloaded, cart);
        assert_eq!(reloaded.item_count(), 2);

        cart.checkout().unwrap();
        save(&session, &cart).await.unwrap();
        let stored: serde_json::Value = session.get(session_keys::CART).await.unwrap().unwrap();
        assert_eq!(stored, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unreadable_cart_is_discarded() {
        let session = session();
        session
            .insert(session_keys::CART, "not a cart")
            .await
            .unwrap();
        assert!(load(&session).await.unwrap().is_empty());
    }
}
