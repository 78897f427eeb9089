//! Product reviews.
//!
//! Reviews live in memory only and are gone on restart. A durable review
//! service would replace [`ReviewStore`] behind the same two operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::UserProfile;
use crate::types::{ProductId, ReviewId};

/// Lowest star rating a review can give.
pub const MIN_STARS: u8 = 1;
/// Highest star rating a review can give.
pub const MAX_STARS: u8 = 5;

/// Rejected review submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("review text must not be empty")]
    EmptyText,
    #[error("rating must be between 1 and 5 stars (got {0})")]
    RatingOutOfRange(u8),
}

/// A shopper's review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author_id: String,
    pub author_name: String,
    pub text: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

/// Reviews grouped by product, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    by_product: HashMap<ProductId, Vec<Review>>,
}

impl ReviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a review written by `author` now.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError` if the text is blank or the rating is not 1-5.
    pub fn submit(
        &mut self,
        product_id: ProductId,
        author: &UserProfile,
        text: &str,
        rating: u8,
    ) -> Result<Review, ReviewError> {
        self.submit_at(product_id, author, text, rating, Utc::now())
    }

    /// Add a review written by `author` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError` if the text is blank or the rating is not 1-5.
    pub fn submit_at(
        &mut self,
        product_id: ProductId,
        author: &UserProfile,
        text: &str,
        rating: u8,
        now: DateTime<Utc>,
    ) -> Result<Review, ReviewError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ReviewError::EmptyText);
        }
        if !(MIN_STARS..=MAX_STARS).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }

        let review = Review {
            id: ReviewId::generate(),
            product_id,
            author_id: author.id.clone(),
            author_name: author.display_name(),
            text: text.to_string(),
            rating,
            created_at: now,
        };

        self.by_product
            .entry(product_id)
            .or_default()
            .insert(0, review.clone());
        Ok(review)
    }

    /// Reviews for one product, newest first.
    #[must_use]
    pub fn for_product(&self, product_id: ProductId) -> &[Review] {
        self.by_product
            .get(&product_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of reviews across all products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_product.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_product.values().all(Vec::is_empty)
    }
}
