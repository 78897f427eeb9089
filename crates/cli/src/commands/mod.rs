//! CLI subcommands.

pub mod browse;
pub mod product;

use stark_core::FilterError;
use stark_storefront::catalog::{CatalogClient, CatalogError};
use stark_storefront::config::{CatalogConfig, ConfigError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Catalog settings are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog source failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Filter options are invalid.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),
}

/// Build a catalog client from the environment.
fn catalog_client() -> Result<CatalogClient, CommandError> {
    let config = CatalogConfig::from_env()?;
    tracing::info!(catalog = %config.base_url, "Using catalog source");
    Ok(CatalogClient::new(&config))
}
