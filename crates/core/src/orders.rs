//! Append-only order store.
//!
//! Orders are built from a snapshot of cart lines and kept most recent
//! first. There is no update or delete.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::types::{OrderId, OrderStatus, Price};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    /// Copy of the cart lines at placement time.
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub status: OrderStatus,
}

impl Order {
    /// The total with currency, for display.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::usd(self.total)
    }

    /// Number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// The shopper's order history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderStore {
    orders: Vec<Order>,
    /// Millisecond stamp of the last issued id.
    last_issued: Option<i64>,
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pending order placed now.
    pub fn add_order(&mut self, items: Vec<CartLine>, total: Decimal) -> Order {
        self.add_order_at(items, total, Utc::now())
    }

    /// Record a new pending order placed at `now`.
    ///
    /// The id is derived from `now` but never repeats or goes backwards
    /// within this store, even if the clock does.
    pub fn add_order_at(&mut self, items: Vec<CartLine>, total: Decimal, now: DateTime<Utc>) -> Order {
        let millis = match self.last_issued {
            Some(last) if now.timestamp_millis() <= last => last.saturating_add(1),
            _ => now.timestamp_millis(),
        };
        self.last_issued = Some(millis);

        let order = Order {
            id: OrderId::from_millis(millis),
            created_at: now,
            items,
            total,
            status: OrderStatus::Pending,
        };
        self.orders.insert(0, order.clone());
        order
    }

    /// Look up an order by id.
    #[must_use]
    pub fn get_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id.as_str() == id)
    }

    /// All orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
