//! Session keys for the visitor's durable state.

/// Session keys.
pub mod keys {
    /// Key for the cart, stored as a JSON array of cart items.
    pub const CART: &str = "cart";
}
