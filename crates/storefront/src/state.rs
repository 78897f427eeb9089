//! Application state shared across handlers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stark_core::ReviewStore;

use crate::catalog::{CatalogClient, CatalogFeed};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the shared review store and configuration. Carts and orders are
/// per visitor and live in the session instead.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    feed: CatalogFeed,
    reviews: RwLock<ReviewStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                feed: CatalogFeed::new(),
                reviews: RwLock::new(ReviewStore::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog source client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the current catalog listing.
    #[must_use]
    pub fn feed(&self) -> &CatalogFeed {
        &self.inner.feed
    }

    /// Read access to product reviews.
    pub fn reviews(&self) -> RwLockReadGuard<'_, ReviewStore> {
        self.inner
            .reviews
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to product reviews.
    pub fn reviews_mut(&self) -> RwLockWriteGuard<'_, ReviewStore> {
        self.inner
            .reviews
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
