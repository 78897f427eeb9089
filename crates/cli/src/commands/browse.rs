//! Filtered catalog listing.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use rust_decimal::Decimal;
use stark_core::{Category, FilterState, PriceRange, Product, SortOption, filter};

use super::{CommandError, catalog_client};

/// Options for `stark-cli browse`.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    pub category: Category,
    pub query: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: f64,
    pub sort: SortOption,
}

impl BrowseOptions {
    /// Build the filter state. A missing price bound keeps its default.
    fn filter_state(&self) -> Result<FilterState, CommandError> {
        let defaults = PriceRange::default();
        let price_range = PriceRange::new(
            self.min_price.unwrap_or_else(|| defaults.min()),
            self.max_price.unwrap_or_else(|| defaults.max()),
        )?;

        Ok(FilterState::default()
            .with_category(self.category)
            .with_price_range(price_range)
            .with_min_rating(self.min_rating)?
            .with_sort(self.sort)
            .with_query(&self.query))
    }
}

/// Fetch the category, run the filter pipeline and print the result.
///
/// # Errors
///
/// Returns `CommandError` if the options are invalid or the catalog fails.
pub async fn run(options: BrowseOptions) -> Result<(), CommandError> {
    let state = options.filter_state()?;
    let client = catalog_client()?;

    let products = client.fetch_products(state.category()).await?;
    let listing = filter::apply(&products, &state);
    tracing::info!(
        fetched = products.len(),
        shown = listing.len(),
        category = %state.category(),
        "Filtered catalog"
    );

    print!("{}", format_listing(&listing));
    Ok(())
}

/// One line per product: id, price, rating, title and category.
fn format_listing(products: &[Product]) -> String {
    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {:.1}★ ({:>3})  {}  [{}]",
            product.id.as_i32(),
            product.unit_price().display(),
            product.rating.rate,
            product.rating.count,
            product.title,
            product.category,
        );
    }
    if products.is_empty() {
        out.push_str("No products match these filters.\n");
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stark_core::{ProductId, Rating};

    use super::*;

    fn options() -> BrowseOptions {
        BrowseOptions {
            category: Category::All,
            query: String::new(),
            min_price: None,
            max_price: None,
            min_rating: 0.0,
            sort: SortOption::Featured,
        }
    }

    #[test]
    fn test_default_options_are_default_state() {
        assert_eq!(options().filter_state().unwrap(), FilterState::default());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let opts = BrowseOptions {
            min_price: Some(Decimal::ONE_HUNDRED),
            max_price: Some(Decimal::TEN),
            ..options()
        };
        assert!(matches!(opts.filter_state(), Err(CommandError::Filter(_))));
    }

    #[test]
    fn test_format_listing() {
        let listing = format_listing(&[Product {
            id: ProductId::new(9),
            title: "Hard Drive".to_string(),
            price: Decimal::new(64, 0),
            description: String::new(),
            category: "electronics".to_string(),
            image: String::new(),
            rating: Rating {
                rate: 3.3,
                count: 203,
            },
        }]);
        assert_eq!(listing, "   9      $64.00  3.3★ (203)  Hard Drive  [electronics]\n");
    }

    #[test]
    fn test_format_empty_listing() {
        assert_eq!(format_listing(&[]), "No products match these filters.\n");
    }
}
