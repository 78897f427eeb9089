//! Single product lookup.

#![allow(clippy::print_stdout)]

use stark_core::{Product, ProductId};

use super::{CommandError, catalog_client};

/// Fetch one product and print it.
///
/// # Errors
///
/// Returns `CommandError` if the product does not exist or the catalog fails.
pub async fn run(id: ProductId) -> Result<(), CommandError> {
    let client = catalog_client()?;
    let product = client.fetch_product(id).await?;
    print!("{}", format_product(&product));
    Ok(())
}

fn format_product(product: &Product) -> String {
    format!(
        "{title}\n{price} · {category} · {rate:.1}★ from {count} ratings\n{image}\n\n{description}\n",
        title = product.title,
        price = product.unit_price().display(),
        category = product.category,
        rate = product.rating.rate,
        count = product.rating.count,
        image = product.image,
        description = product.description,
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use stark_core::Rating;

    use super::*;

    #[test]
    fn test_format_product() {
        let text = format_product(&Product {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Decimal::new(10_995, 2),
            description: "Fits a 15 inch laptop".to_string(),
            category: "men's clothing".to_string(),
            image: "https://img.test/1.jpg".to_string(),
            rating: Rating {
                rate: 3.9,
                count: 120,
            },
        });

        assert!(text.starts_with("Backpack\n$109.95 · men's clothing · 3.9★ from 120 ratings\n"));
        assert!(text.ends_with("Fits a 15 inch laptop\n"));
    }
}
