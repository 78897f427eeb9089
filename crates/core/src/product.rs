//! Catalog products.
//!
//! Products are owned by the external catalog source. They are immutable
//! once fetched and replaced wholesale when the selected category changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// A product record as served by the catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Non-negative unit price in USD.
    pub price: Decimal,
    pub description: String,
    /// Category label exactly as the source reports it.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Missing upstream ratings read as "no reviews yet".
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// The unit price with currency, for display.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// True if `needle` (already lowercased) occurs in the title,
    /// description or category, ignoring case.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.category]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Aggregate customer rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average rate in `[0, 5]`.
    pub rate: f64,
    /// Number of ratings behind the average.
    pub count: u32,
}

/// The closed set of catalog categories a shopper can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// No restriction: the whole (page-bounded) catalog.
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "electronics")]
    Electronics,
    #[serde(rename = "jewelery")]
    Jewelery,
    #[serde(rename = "men's clothing")]
    MensClothing,
    #[serde(rename = "women's clothing")]
    WomensClothing,
}

impl Category {
    /// Every category, in the order the storefront lists them.
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::MensClothing,
        Self::Jewelery,
        Self::Electronics,
        Self::WomensClothing,
    ];

    /// The label used by the catalog source.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Electronics => "electronics",
            Self::Jewelery => "jewelery",
            Self::MensClothing => "men's clothing",
            Self::WomensClothing => "women's clothing",
        }
    }

    /// The label a product must carry to belong to this category, or `None`
    /// for [`Category::All`].
    #[must_use]
    pub const fn restriction(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            other => Some(other.label()),
        }
    }

    /// True if `product` belongs to this category.
    #[must_use]
    pub fn contains(self, product: &Product) -> bool {
        self.restriction()
            .is_none_or(|label| product.category == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a category label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
