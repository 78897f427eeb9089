//! HTTP client for the external catalog source.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use stark_core::{Category, Product, ProductId};
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use crate::config::CatalogConfig;

/// Client for the catalog source.
///
/// Single-product lookups are cached for 5 minutes. Listings are not cached;
/// the [`super::CatalogFeed`] keeps the current one.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    page_size: u32,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                page_size: config.page_size,
                cache,
            }),
        }
    }

    /// Build `{base}/{segments...}`, keeping any path prefix of the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        // Base URLs are validated as non-opaque when configuration loads.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issue one GET and return the raw body of a successful response.
    async fn execute(&self, url: Url) -> Result<Option<String>, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(Some(body))
    }

    fn parse<T: DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Fetch the products of one category.
    ///
    /// `All` returns the first page of the whole catalog. Any other category
    /// returns only products whose category label matches exactly.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails, the source answers with a
    /// non-success status, or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, category: Category) -> Result<Vec<Product>, CatalogError> {
        let url = match category.restriction() {
            None => {
                let mut url = self.endpoint(&["products"]);
                url.query_pairs_mut()
                    .append_pair("limit", &self.inner.page_size.to_string());
                url
            }
            Some(label) => self.endpoint(&["products", "category", label]),
        };

        // A missing listing is an outage here, not an empty catalog.
        let body = self
            .execute(url)
            .await?
            .ok_or(CatalogError::Status(reqwest::StatusCode::NOT_FOUND.as_u16()))?;
        let mut products: Vec<Product> = Self::parse(&body)?;
        products.retain(|product| category.contains(product));

        debug!(count = products.len(), "Fetched catalog listing");
        Ok(products)
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the source answers 404, an empty
    /// body or `null`; any other failure as in [`Self::fetch_products`].
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let url = self.endpoint(&["products", &id.to_string()]);
        let body = self.execute(url).await?.ok_or(CatalogError::NotFound(id))?;
        if body.trim().is_empty() {
            return Err(CatalogError::NotFound(id));
        }

        let product: Product =
            Self::parse::<Option<Product>>(&body)?.ok_or(CatalogError::NotFound(id))?;

        self.inner.cache.insert(id, product.clone()).await;
        Ok(product)
    }
}
