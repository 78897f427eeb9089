//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Filtered listing (category, q, min_price, max_price, min_rating, sort)
//! GET  /products/{id}          - Product detail with reviews
//! GET  /products/{id}/reviews  - Reviews, newest first
//! POST /products/{id}/reviews  - Submit review (signed in)
//!
//! # Cart
//! GET  /cart                   - Cart view
//! POST /cart/add               - Add one unit {product_id}
//! POST /cart/update            - Set quantity {product_id, quantity}
//! POST /cart/remove            - Remove line {product_id}
//! POST /cart/toggle            - Open or close the cart drawer
//!
//! # Checkout & orders
//! POST /checkout               - Place order from cart
//! GET  /orders                 - Order history, most recent first
//! GET  /orders/{id}            - One order
//!
//! # Auth
//! GET  /auth/session           - Current sign-in state
//! POST /auth/session           - Identity provider hands over the signed-in profile
//! POST /auth/logout            - Sign out
//!
//! # Account (requires sign-in)
//! GET  /account                - Account overview
//!
//! # Config
//! GET  /config/public          - Publishable keys for the browser
//! ```

pub mod account;
pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route(
            "/{id}/reviews",
            get(products::reviews).post(products::submit_review),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/toggle", post(cart::toggle))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/session",
            get(account::session_state).post(account::sign_in),
        )
        .route("/logout", post(account::sign_out))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/orders", order_routes())
        .nest("/auth", auth_routes())
        .route("/account", get(account::show))
        .route("/config/public", get(account::public_config))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
