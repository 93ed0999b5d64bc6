//! Shopping cart model.
//!
//! The cart is an ordered list of line items, unique by product ID, and is
//! persisted as a plain JSON array. Stock checks are soft: they compare
//! against whatever product data the caller currently holds and never
//! reserve inventory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Cart mutation failures. Each one leaves the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product is unknown or has no stock.
    #[error("Product is unavailable")]
    Unavailable,

    /// The cart already holds every unit in stock.
    #[error("Maximum available quantity reached")]
    MaxQuantityReached,

    /// A quantity change would exceed the stock.
    #[error("Not enough stock")]
    InsufficientStock,

    /// Checkout with nothing in the cart.
    #[error("Your cart is empty")]
    Empty,
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
    /// The product was not in the cart.
    Unchanged,
}

/// What was bought at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub item_count: u32,
    pub total: Price,
}

impl CheckoutSummary {
    /// Confirmation text shown to the visitor.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Order placed!\n\nItems: {}\nTotal: {}\n\nThank you for your purchase!",
            self.item_count,
            self.total.display()
        )
    }
}

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Badge count: total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add one unit of `product`.
    ///
    /// `None` means the product is not in the caller's catalog.
    ///
    /// # Errors
    ///
    /// [`CartError::Unavailable`] for an unknown or out-of-stock product,
    /// [`CartError::MaxQuantityReached`] when the cart already holds the
    /// whole stock.
    pub fn add(&mut self, product: Option<&Product>) -> Result<(), CartError> {
        let product = product
            .filter(|p| p.in_stock())
            .ok_or(CartError::Unavailable)?;

        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            if item.quantity >= product.quantity {
                return Err(CartError::MaxQuantityReached);
            }
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Change a line's quantity by `delta`.
    ///
    /// The line is removed when the result drops to zero or below. When
    /// `product` is `None` the stock check is skipped.
    ///
    /// # Errors
    ///
    /// [`CartError::InsufficientStock`] if the new quantity exceeds the
    /// product's stock.
    pub fn update_quantity(
        &mut self,
        id: ProductId,
        delta: i32,
        product: Option<&Product>,
    ) -> Result<QuantityChange, CartError> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return Ok(QuantityChange::Unchanged);
        };
        let Some(item) = self.items.get_mut(index) else {
            return Ok(QuantityChange::Unchanged);
        };

        let next = i64::from(item.quantity) + i64::from(delta);
        if next <= 0 {
            self.items.remove(index);
            return Ok(QuantityChange::Removed);
        }

        let next = u32::try_from(next).map_err(|_| CartError::InsufficientStock)?;
        if product.is_some_and(|p| next > p.quantity) {
            return Err(CartError::InsufficientStock);
        }
        item.quantity = next;
        Ok(QuantityChange::Updated(next))
    }

    /// Remove a line unconditionally. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Summarise and empty the cart.
    ///
    /// # Errors
    ///
    /// [`CartError::Empty`] when there is nothing to check out.
    pub fn checkout(&mut self) -> Result<CheckoutSummary, CartError> {
        if self.items.is_empty() {
            return Err(CartError::Empty);
        }
        let summary = CheckoutSummary {
            item_count: self.item_count(),
            total: self.total(),
        };
        self.items.clear();
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, price: i64, quantity: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::new(Decimal::from(price)),
            quantity,
            category_id: None,
            image_path: None,
        }
    }

    #[test]
    fn test_add_out_of_stock_is_rejected() {
        let mut cart = Cart::new();
        let sold_out = product(1, 500, 0);

        assert_eq!(cart.add(Some(&sold_out)), Err(CartError::Unavailable));
        assert_eq!(cart.add(None), Err(CartError::Unavailable));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 3);
        let kurt = product(2, 250, 5);

        cart.add(Some(&tea)).unwrap();
        cart.add(Some(&kurt)).unwrap();
        cart.add(Some(&tea)).unwrap();

        let ids: Vec<i64> = cart.items().iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(cart.get(tea.id).unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_stops_at_stock() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 2);

        cart.add(Some(&tea)).unwrap();
        cart.add(Some(&tea)).unwrap();
        assert_eq!(cart.add(Some(&tea)), Err(CartError::MaxQuantityReached));
        assert_eq!(cart.get(tea.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrement_sequence_empties_cart() {
        let mut cart: Cart =
            serde_json::from_str(r#"[{"id":1,"name":"Tea","price":1000,"quantity":2}]"#).unwrap();
        let tea = product(1, 1000, 10);

        let change = cart.update_quantity(tea.id, -1, Some(&tea)).unwrap();
        assert_eq!(change, QuantityChange::Updated(1));
        assert_eq!(cart.get(tea.id).unwrap().quantity, 1);
        assert_eq!(cart.get(tea.id).unwrap().price, Price::new(Decimal::from(1000)));

        let change = cart.update_quantity(tea.id, -1, Some(&tea)).unwrap();
        assert_eq!(change, QuantityChange::Removed);
        assert!(cart.is_empty());
        assert_eq!(serde_json::to_string(&cart).unwrap(), "[]");
    }

    #[test]
    fn test_large_negative_delta_removes() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 10);
        cart.add(Some(&tea)).unwrap();
        cart.add(Some(&tea)).unwrap();

        let change = cart.update_quantity(tea.id, -5, Some(&tea)).unwrap();
        assert_eq!(change, QuantityChange::Removed);
        assert!(cart.get(tea.id).is_none());
    }

    #[test]
    fn test_increment_past_stock_is_rejected() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 1);
        cart.add(Some(&tea)).unwrap();

        assert_eq!(
            cart.update_quantity(tea.id, 1, Some(&tea)),
            Err(CartError::InsufficientStock)
        );
        assert_eq!(cart.get(tea.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_unknown_product_skips_stock_check() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 1);
        cart.add(Some(&tea)).unwrap();

        let change = cart.update_quantity(tea.id, 4, None).unwrap();
        assert_eq!(change, QuantityChange::Updated(5));
    }

    #[test]
    fn test_update_missing_item_is_noop() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 3);
        cart.add(Some(&tea)).unwrap();
        let before = cart.clone();

        let change = cart.update_quantity(ProductId::new(99), 1, None).unwrap();
        assert_eq!(change, QuantityChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_is_unconditional() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 3);
        cart.add(Some(&tea)).unwrap();

        assert!(cart.remove(tea.id));
        assert!(!cart.remove(tea.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_summarises_and_clears() {
        let mut cart = Cart::new();
        let tea = product(1, 1000, 5);
        let kurt = product(2, 250, 5);
        cart.add(Some(&tea)).unwrap();
        cart.add(Some(&tea)).unwrap();
        cart.add(Some(&kurt)).unwrap();

        let summary = cart.checkout().unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, Price::new(Decimal::from(2250)));
        assert!(summary.message().starts_with("Order placed!"));
        assert!(summary.message().contains("Items: 3"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let mut cart = Cart::new();
        assert_eq!(cart.checkout(), Err(CartError::Empty));
    }

    #[test]
    fn test_cart_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add(Some(&product(3, 1500, 2))).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": 3, "name": "Product 3", "price": 1500.0, "quantity": 1}])
        );
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
