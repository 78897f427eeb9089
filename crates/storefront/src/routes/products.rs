//! Product route handlers.

use std::fmt::Display;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use stark_core::{
    Category, FilterState, PriceRange, Product, ProductId, Review, SortOption, filter,
};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Listing query parameters. Empty values count as absent.
///
/// Category and sort stay raw until [`ListingQuery::into_filter_state`] so an
/// unknown value is reported like every other invalid filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub min_rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort: Option<String>,
}

impl ListingQuery {
    /// Build the filter state. A missing price bound keeps its default.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown category or sort key, an
    /// inverted or negative price range, or a rating threshold outside `[0, 5]`.
    pub fn into_filter_state(self) -> Result<FilterState> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?
            .unwrap_or_default();
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortOption>)
            .transpose()?
            .unwrap_or_default();

        let defaults = PriceRange::default();
        let price_range = PriceRange::new(
            self.min_price.unwrap_or_else(|| defaults.min()),
            self.max_price.unwrap_or_else(|| defaults.max()),
        )?;

        Ok(FilterState::default()
            .with_category(category)
            .with_price_range(price_range)
            .with_min_rating(self.min_rating.unwrap_or(0.0))?
            .with_sort(sort)
            .with_query(self.q.unwrap_or_default()))
    }
}

/// Treat `?field=` like a missing field and parse the rest with `FromStr`.
fn empty_string_as_none<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Product with its display price.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            display_price: product.unit_price().display(),
            product,
        }
    }
}

/// Filtered listing response.
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub filters: FilterState,
    pub categories: Vec<Category>,
    pub count: usize,
    pub products: Vec<ProductView>,
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub product: ProductView,
    pub reviews: Vec<Review>,
}

/// Review submission body.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub text: String,
    pub rating: u8,
}

/// Display the filtered product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    let filters = query.into_filter_state()?;
    let snapshot = state
        .feed()
        .load(state.catalog(), filters.category())
        .await?;

    let products: Vec<ProductView> = filter::apply(&snapshot.products, &filters)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(Json(ListingView {
        filters,
        categories: Category::ALL.to_vec(),
        count: products.len(),
        products,
    }))
}

/// Display one product with its reviews.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailView>> {
    let product = state.catalog().fetch_product(id).await?;
    let reviews = state.reviews().for_product(id).to_vec();

    Ok(Json(ProductDetailView {
        product: product.into(),
        reviews,
    }))
}

/// List the reviews of one product, newest first.
#[instrument(skip(state))]
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Json<Vec<Review>> {
    Json(state.reviews().for_product(id).to_vec())
}

/// Submit a review as the signed-in user.
#[instrument(skip(state, user, form), fields(user_id = %user.id))]
pub async fn submit_review(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<ProductId>,
    Json(form): Json<ReviewForm>,
) -> Result<(StatusCode, Json<Review>)> {
    // Reviews only attach to products the catalog knows.
    state.catalog().fetch_product(id).await?;

    let review = state
        .reviews_mut()
        .submit(id, &user, &form.text, form.rating)?;
    tracing::info!(review_id = %review.id, "Review submitted");

    Ok((StatusCode::CREATED, Json(review)))
}
