//! Catalog filter/sort pipeline.
//!
//! [`apply`] is a pure function of a product list and a [`FilterState`]. It
//! runs four stages in a fixed order:
//!
//! 1. free-text search over title, description and category (OR),
//! 2. inclusive price range,
//! 3. minimum rating (skipped when the threshold is 0),
//! 4. stable sort by the selected [`SortOption`].
//!
//! Stages 1-3 are conjunctive. The category is not a pipeline stage: it
//! selects which product list gets fetched in the first place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::{Category, Product};

/// Upper price bound of a freshly reset filter.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/// Highest rating a product can have.
pub const MAX_RATING: f64 = 5.0;

/// Invalid filter input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("price bounds must not be negative (got {0})")]
    NegativePrice(Decimal),
    #[error("minimum price {min} is above maximum price {max}")]
    InvertedPriceRange { min: Decimal, max: Decimal },
    #[error("minimum rating must be between 0 and 5 (got {0})")]
    RatingOutOfRange(f64),
    #[error("unknown sort option: {0}")]
    UnknownSort(String),
}

/// An inclusive, validated price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Create a range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if a bound is negative or `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, FilterError> {
        if min.is_sign_negative() && !min.is_zero() {
            return Err(FilterError::NegativePrice(min));
        }
        if max.is_sign_negative() && !max.is_zero() {
            return Err(FilterError::NegativePrice(max));
        }
        if min > max {
            return Err(FilterError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range that admits every non-negative price.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    /// True if `price` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep the source order.
    #[default]
    Featured,
    /// Ascending by price.
    PriceLow,
    /// Descending by price.
    PriceHigh,
    /// Descending by average rating.
    Rating,
}

impl SortOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    /// Stable in-place sort of `products` by this option.
    pub fn sort(self, products: &mut [Product]) {
        match self {
            Self::Featured => {}
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Rating => products.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate)),
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOption {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            other => Err(FilterError::UnknownSort(other.to_string())),
        }
    }
}

/// Everything a shopper controls about the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FilterState {
    category: Category,
    price_range: PriceRange,
    min_rating: f64,
    sort: SortOption,
    query: String,
}

impl FilterState {
    /// Select the category to fetch.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    /// Set the minimum rating; 0 disables the rating stage.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RatingOutOfRange` unless `0 <= min_rating <= 5`.
    pub fn with_min_rating(mut self, min_rating: f64) -> Result<Self, FilterError> {
        if !(0.0..=MAX_RATING).contains(&min_rating) {
            return Err(FilterError::RatingOutOfRange(min_rating));
        }
        self.min_rating = min_rating;
        Ok(self)
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set the search text, kept exactly as given. Empty disables search.
    #[must_use]
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        query.as_ref().clone_into(&mut self.query);
        self
    }

    /// Clicking the active rating threshold again clears it.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::RatingOutOfRange` for a threshold outside `[0, 5]`.
    pub fn toggle_min_rating(&mut self, rating: f64) -> Result<(), FilterError> {
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(FilterError::RatingOutOfRange(rating));
        }
        #[allow(clippy::float_cmp)] // thresholds are picked from a fixed set, not computed
        let active = self.min_rating == rating;
        self.min_rating = if active { 0.0 } else { rating };
        Ok(())
    }

    /// Clear price, rating, sort and search. The category stays selected.
    pub fn reset(&mut self) {
        *self = Self::default().with_category(self.category);
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn price_range(&self) -> PriceRange {
        self.price_range
    }

    #[must_use]
    pub const fn min_rating(&self) -> f64 {
        self.min_rating
    }

    #[must_use]
    pub const fn sort(&self) -> SortOption {
        self.sort
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Run the pipeline over `products`.
///
/// The input is left untouched; the result preserves input order except
/// where the sort option reorders it.
#[must_use]
pub fn apply(products: &[Product], state: &FilterState) -> Vec<Product> {
    let needle = state.query.to_lowercase();
    let price_range = state.price_range;
    let min_rating = state.min_rating;

    let mut result: Vec<Product> = products
        .iter()
        .filter(|product| needle.is_empty() || product.matches_text(&needle))
        .filter(|product| price_range.contains(product.price))
        .filter(|product| min_rating <= 0.0 || product.rating.rate >= min_rating)
        .cloned()
        .collect();

    state.sort.sort(&mut result);
    result
}
