//! Catalog source adapter.
//!
//! # Architecture
//!
//! - [`CatalogClient`] talks to the external catalog over HTTP (`reqwest`)
//!   and caches single-product lookups (`moka`, 5-minute TTL)
//! - [`CatalogFeed`] holds the storefront's current listing and discards
//!   responses that were overtaken by a newer refresh

mod client;
mod feed;

pub use client::CatalogClient;
pub use feed::{CatalogFeed, Commit, Snapshot, Ticket};

use stark_core::ProductId;
use thiserror::Error;

/// Errors that can occur when talking to the catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("Catalog returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The source has no product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::NotFound(ProductId::new(7)).to_string(),
            "Product not found: 7"
        );
        assert_eq!(CatalogError::Status(503).to_string(), "Catalog returned HTTP 503");
    }
}
