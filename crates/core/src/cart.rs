//! Cart store.
//!
//! One [`CartStore`] per shopper. Lines keep insertion order, there is at
//! most one line per product, and a line never has a quantity below 1.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// One product in the cart with the display fields captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// A fresh line with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    is_open: bool,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add_to_cart(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Drop the line for `product_id`. Absent ids are ignored.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Set the quantity of an existing line. A quantity of 0 or less removes it.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Flip the visibility flag of the cart drawer.
    pub const fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Empty the cart, leaving the drawer state alone.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The total with currency, for display.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::usd(self.total())
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }
}
