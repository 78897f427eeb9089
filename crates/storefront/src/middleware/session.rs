//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions, and loads and saves the
//! per-visitor cart and order history.

use stark_core::{CartStore, OrderStore};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::ServerConfig;
use crate::models::session_keys;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "stark_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &ServerConfig) -> SessionManagerLayer<MemoryStore> {
    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Get the visitor's cart, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_cart(session: &Session) -> Result<CartStore, tower_sessions::session::Error> {
    Ok(session
        .get::<CartStore>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &CartStore,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Get the visitor's order history, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_orders(session: &Session) -> Result<OrderStore, tower_sessions::session::Error> {
    Ok(session
        .get::<OrderStore>(session_keys::ORDERS)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's order history.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_orders(
    session: &Session,
    orders: &OrderStore,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ORDERS, orders).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use stark_core::{Product, ProductId, Rating};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_fresh_session_has_empty_stores() {
        let session = session();
        assert!(load_cart(&session).await.unwrap().is_empty());
        assert_eq!(load_orders(&session).await.unwrap().order_count(), 0);
    }

    #[tokio::test]
    async fn test_cart_round_trips_through_session() {
        let session = session();
        let mut cart = CartStore::new();
        cart.add_to_cart(&Product {
            id: ProductId::new(3),
            title: "Jacket".to_string(),
            price: Decimal::new(5_599, 2),
            description: String::new(),
            category: "men's clothing".to_string(),
            image: String::new(),
            rating: Rating::default(),
        });
        save_cart(&session, &cart).await.unwrap();

        let restored = load_cart(&session).await.unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total(), Decimal::new(5_599, 2));
    }
}
