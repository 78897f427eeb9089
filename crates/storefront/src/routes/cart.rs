//! Cart and checkout route handlers.
//!
//! The cart lives in the visitor's session. Every handler loads it, applies
//! one operation and writes it back before answering with the new cart.
//!
//! The load and the save are not atomic. Two requests racing on the same
//! session each start from the same cart, and the later save wins, so one
//! of the two updates is lost. Checkout has the same window between the
//! order history and the cart. Clients are expected to send one cart request
//! at a time per session.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stark_core::{CartLine, CartStore, Price, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{load_cart, load_orders, save_cart, save_orders};
use crate::routes::orders::OrderView;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: Decimal,
    pub display_price: String,
    pub display_line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let line_total = line.line_total();
        Self {
            line: line.clone(),
            line_total,
            display_price: Price::usd(line.price).display(),
            display_line_total: Price::usd(line_total).display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub total: Decimal,
    pub subtotal: String,
    pub is_open: bool,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            item_count: cart.item_count(),
            total: cart.total(),
            subtotal: cart.subtotal().display(),
            is_open: cart.is_open(),
        }
    }
}

/// Add to cart body.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update cart body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add one unit of a catalog product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product = state.catalog().fetch_product(form.product_id).await?;

    let mut cart = load_cart(&session).await?;
    cart.add_to_cart(&product);
    save_cart(&session, &cart).await?;

    let product_id = product.id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    Ok(Json(CartView::from(&cart)))
}

/// Set the quantity of a cart line. Zero or less removes it.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(form): Json<UpdateCartForm>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(form.product_id, form.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_from_cart(form.product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Open or close the cart drawer.
#[instrument(skip(session))]
pub async fn toggle(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.toggle_cart();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Place an order from the current cart and empty it.
///
/// No payment is taken.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<(StatusCode, Json<OrderView>)> {
    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let mut orders = load_orders(&session).await?;
    let order = orders.add_order(cart.lines().to_vec(), cart.total());
    cart.clear();

    save_orders(&session, &orders).await?;
    save_cart(&session, &cart).await?;

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order.id.as_str())]));

    Ok((StatusCode::CREATED, Json(OrderView::from(order))))
}
