//! Stark CLI - Catalog browsing from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Electronics under $100, cheapest first
//! stark-cli browse --category electronics --max-price 100 --sort price-low
//!
//! # Search the whole catalog
//! stark-cli browse --query jacket --min-rating 4
//!
//! # Show one product
//! stark-cli product 9
//! ```
//!
//! # Commands
//!
//! - `browse` - Print the filtered listing
//! - `product` - Print one product
//!
//! Reads `CATALOG_API_URL` and `CATALOG_PAGE_SIZE` like the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use stark_core::{Category, ProductId, SortOption};

mod commands;

#[derive(Parser)]
#[command(name = "stark-cli")]
#[command(author, version, about = "Stark storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered product listing
    Browse {
        /// Category (`all`, `electronics`, `jewelery`, `men's clothing`, `women's clothing`)
        #[arg(short, long, default_value = "all")]
        category: Category,

        /// Case-insensitive search in title, description and category
        #[arg(short, long)]
        query: Option<String>,

        /// Lowest price to include
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Highest price to include
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Minimum average rating (0 disables)
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,

        /// Sort order (`featured`, `price-low`, `price-high`, `rating`)
        #[arg(short, long, default_value = "featured")]
        sort: SortOption,
    },
    /// Print one product
    Product {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), commands::CommandError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Browse {
            category,
            query,
            min_price,
            max_price,
            min_rating,
            sort,
        } => {
            let options = commands::browse::BrowseOptions {
                category,
                query: query.unwrap_or_default(),
                min_price,
                max_price,
                min_rating,
                sort,
            };
            commands::browse::run(options).await?;
        }
        Commands::Product { id } => commands::product::run(id).await?,
    }
    Ok(())
}
