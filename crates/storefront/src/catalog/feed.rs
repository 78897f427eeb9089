//! The storefront's current catalog listing.
//!
//! Every refresh takes a [`Ticket`] before it starts fetching. When the fetch
//! completes, its result is committed only if no newer ticket has been issued
//! in the meantime, so a slow response for an old category can never replace
//! the listing for the category the shopper picked after it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use stark_core::{Category, Product};
use tracing::{debug, instrument};

use super::{CatalogClient, CatalogError};

/// Committed listings older than this are fetched again.
const LISTING_TTL: Duration = Duration::from_secs(300);

/// Sequence number handed to one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    category: Category,
}

/// Outcome of committing a fetched listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The listing is now current.
    Applied,
    /// A newer refresh was started after this one; the listing was dropped.
    Stale,
}

/// A listing together with the category it was fetched for.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub category: Category,
    pub products: Arc<Vec<Product>>,
    fetched_at: Instant,
}

impl Snapshot {
    fn new(category: Category, products: Vec<Product>) -> Self {
        Self {
            category,
            products: Arc::new(products),
            fetched_at: Instant::now(),
        }
    }

    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < LISTING_TTL
    }
}

#[derive(Debug, Default)]
struct FeedState {
    issued: u64,
    current: Option<Snapshot>,
}

/// Shared holder of the current listing.
///
/// The lock is only taken for bookkeeping and never held across a fetch.
#[derive(Debug, Clone, Default)]
pub struct CatalogFeed {
    state: Arc<Mutex<FeedState>>,
}

impl CatalogFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a refresh for `category`, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self, category: Category) -> Ticket {
        let mut state = self.lock();
        state.issued += 1;
        Ticket {
            seq: state.issued,
            category,
        }
    }

    /// Commit the listing fetched under `ticket` if it is still the latest.
    pub fn commit(&self, ticket: Ticket, products: Vec<Product>) -> Commit {
        self.commit_snapshot(ticket, Snapshot::new(ticket.category, products))
    }

    fn commit_snapshot(&self, ticket: Ticket, snapshot: Snapshot) -> Commit {
        let mut state = self.lock();
        if ticket.seq != state.issued {
            debug!(
                ticket = ticket.seq,
                latest = state.issued,
                category = %ticket.category,
                "Discarding stale catalog response"
            );
            return Commit::Stale;
        }

        state.current = Some(snapshot);
        Commit::Applied
    }

    /// The last committed listing, if any.
    #[must_use]
    pub fn current(&self) -> Option<Snapshot> {
        self.lock().current.clone()
    }

    /// The listing for `category`, fetching it unless a fresh one is current.
    ///
    /// A failed fetch leaves the current listing untouched. A fetch that was
    /// overtaken by a newer refresh still answers this caller but is not
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fetch fails.
    #[instrument(skip(self, client))]
    pub async fn load(
        &self,
        client: &CatalogClient,
        category: Category,
    ) -> Result<Snapshot, CatalogError> {
        if let Some(snapshot) = self.current()
            && snapshot.category == category
            && snapshot.is_fresh()
        {
            return Ok(snapshot);
        }

        let ticket = self.begin(category);
        let products = client.fetch_products(category).await?;
        let snapshot = Snapshot::new(category, products);
        self.commit_snapshot(ticket, snapshot.clone());
        Ok(snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use stark_core::{ProductId, Rating};
    use url::Url;

    use super::*;
    use crate::config::CatalogConfig;

    fn product(id: i32, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(1_000, 2),
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    fn ids(snapshot: &Snapshot) -> Vec<i32> {
        snapshot.products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_empty_feed_has_no_listing() {
        assert!(CatalogFeed::new().current().is_none());
    }

    #[test]
    fn test_latest_ticket_commits() {
        let feed = CatalogFeed::new();
        let ticket = feed.begin(Category::Electronics);
        assert_eq!(feed.commit(ticket, vec![product(9, "electronics")]), Commit::Applied);

        let current = feed.current().unwrap();
        assert_eq!(current.category, Category::Electronics);
        assert_eq!(ids(&current), vec![9]);
    }

    #[test]
    fn test_overtaken_response_is_discarded() {
        let feed = CatalogFeed::new();
        let slow = feed.begin(Category::All);
        let fast = feed.begin(Category::Jewelery);

        assert_eq!(feed.commit(fast, vec![product(5, "jewelery")]), Commit::Applied);
        assert_eq!(feed.commit(slow, vec![product(1, "men's clothing")]), Commit::Stale);

        let current = feed.current().unwrap();
        assert_eq!(current.category, Category::Jewelery);
        assert_eq!(ids(&current), vec![5]);
    }

    #[test]
    fn test_outstanding_refresh_keeps_previous_listing_visible() {
        let feed = CatalogFeed::new();
        let first = feed.begin(Category::All);
        feed.commit(first, vec![product(1, "men's clothing")]);

        let older = feed.begin(Category::Electronics);
        let _newer = feed.begin(Category::Jewelery);
        assert_eq!(ids(&feed.current().unwrap()), vec![1]);

        // Completes before the newer refresh, but was still superseded by it.
        assert_eq!(feed.commit(older, vec![product(9, "electronics")]), Commit::Stale);
        assert_eq!(ids(&feed.current().unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_listing() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            page_size: 20,
        });

        let feed = CatalogFeed::new();
        let ticket = feed.begin(Category::All);
        feed.commit(ticket, vec![product(1, "men's clothing")]);

        let result = feed.load(&client, Category::Electronics).await;
        assert!(result.is_err());

        let current = feed.current().unwrap();
        assert_eq!(current.category, Category::All);
        assert_eq!(ids(&current), vec![1]);
    }

    #[tokio::test]
    async fn test_load_reuses_fresh_listing_for_same_category() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        // Unreachable: any fetch would fail.
        let client = CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            page_size: 20,
        });

        let feed = CatalogFeed::new();
        let ticket = feed.begin(Category::Electronics);
        feed.commit(ticket, vec![product(9, "electronics")]);

        let snapshot = feed.load(&client, Category::Electronics).await.unwrap();
        assert_eq!(ids(&snapshot), vec![9]);
    }
}
