//! Order history route handlers.

use axum::{Json, extract::Path};
use serde::Serialize;
use stark_core::Order;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::load_orders;

/// Order display data.
#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub item_count: u64,
    pub display_total: String,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            item_count: order.item_count(),
            display_total: order.total_price().display(),
            order,
        }
    }
}

/// List the visitor's orders, most recent first.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Result<Json<Vec<OrderView>>> {
    let orders = load_orders(&session).await?;
    Ok(Json(
        orders.orders().iter().cloned().map(OrderView::from).collect(),
    ))
}

/// Display one order.
#[instrument(skip(session))]
pub async fn show(session: Session, Path(id): Path<String>) -> Result<Json<OrderView>> {
    let orders = load_orders(&session).await?;
    let order = orders
        .get_order(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(OrderView::from(order)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use stark_core::{CartLine, OrderStore, ProductId};

    use super::*;

    #[test]
    fn test_order_view() {
        let mut store = OrderStore::new();
        let order = store.add_order(
            vec![CartLine {
                product_id: ProductId::new(1),
                title: "Backpack".to_string(),
                price: Decimal::TEN,
                image: String::new(),
                quantity: 2,
            }],
            Decimal::new(20, 0),
        );

        let view = OrderView::from(order);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.display_total, "$20.00");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json["id"].as_str().unwrap().starts_with("ORD-"));
    }
}
