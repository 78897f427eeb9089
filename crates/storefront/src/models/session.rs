//! Session-related types.
//!
//! Each visitor owns one cart and one order history. Both are serialized
//! into the session and handed to handlers explicitly.

/// Session keys for per-visitor state.
pub mod keys {
    /// Key for the visitor's [`stark_core::CartStore`].
    pub const CART: &str = "cart";

    /// Key for the visitor's [`stark_core::OrderStore`].
    pub const ORDERS: &str = "orders";

    /// Key for the signed-in [`stark_core::UserProfile`].
    pub const CURRENT_USER: &str = "current_user";
}
