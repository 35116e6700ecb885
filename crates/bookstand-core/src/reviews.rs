// Review read/write paths with tag-based cache invalidation
use std::sync::Arc;

use bookstand_cache::{review_tag, TagCache, REVIEW_REVALIDATE};
use tracing::{debug, info, warn};

use crate::error::{ReadError, WriteError};
use crate::models::{NewReview, Review, ReviewListing};
use crate::provider::CatalogProvider;

/// Cached review reads plus the mutations that keep the cache honest.
///
/// Listings are cached under the tag from [`review_tag`] for one hour.
/// Every successful mutation invalidates exactly that tag before it reports
/// success, so a read issued right after a write always re-fetches. Failed
/// mutations leave the cache alone.
pub struct ReviewService {
    provider: Arc<dyn CatalogProvider>,
    cache: Arc<dyn TagCache>,
}

impl ReviewService {
    pub fn new(provider: Arc<dyn CatalogProvider>, cache: Arc<dyn TagCache>) -> Self {
        Self { provider, cache }
    }

    /// List the reviews for a book, cache-first.
    ///
    /// A live cache entry under the book's tag short-circuits the network
    /// call; otherwise the listing is fetched and the entry (re)populated.
    /// No retry on failure - the caller renders the error inline.
    pub async fn list_reviews(&self, book_id: i64) -> Result<ReviewListing, ReadError> {
        let tag = review_tag(book_id);

        if let Some(payload) = self.cache.get(&tag) {
            match serde_json::from_value(payload) {
                Ok(listing) => {
                    debug!("serving reviews for book {} from cache", book_id);
                    return Ok(listing);
                }
                Err(e) => warn!("discarding undecodable cache entry for {}: {}", tag, e),
            }
        }

        debug!("fetching reviews for book {}", book_id);
        let listing = self.provider.fetch_reviews(book_id).await?;

        match serde_json::to_value(&listing) {
            Ok(payload) => self.cache.set(&tag, payload, REVIEW_REVALIDATE),
            Err(e) => warn!("not caching reviews for {}: {}", tag, e),
        }

        Ok(listing)
    }

    /// Create a review for a book.
    ///
    /// Author and content must be non-empty; the server stays authoritative
    /// but there is no point shipping a request we know is invalid. On
    /// success the book's tag is invalidated before returning, so the new
    /// review shows up on the very next listing read.
    pub async fn create_review(
        &self,
        book_id: i64,
        author: &str,
        content: &str,
    ) -> Result<(), WriteError> {
        if author.trim().is_empty() {
            return Err(WriteError::ValidationFailure(
                "review author must not be empty".to_string(),
            ));
        }
        if content.trim().is_empty() {
            return Err(WriteError::ValidationFailure(
                "review content must not be empty".to_string(),
            ));
        }

        let review = NewReview {
            book_id,
            author: author.to_string(),
            content: content.to_string(),
        };
        self.provider.create_review(&review).await?;

        self.cache.invalidate(&review_tag(book_id));
        info!("created review for book {}", book_id);

        Ok(())
    }

    /// Delete a review.
    ///
    /// `book_id` is supplied by the caller, not read back from the deleted
    /// review, and it decides which tag gets invalidated: pass the same book
    /// identifier the review was listed under or the stale listing will keep
    /// being served. When the review's own data is at hand, prefer
    /// [`ReviewService::delete_review_checked`], which verifies the pair.
    pub async fn delete_review(
        &self,
        review_id: Option<i64>,
        book_id: i64,
    ) -> Result<(), WriteError> {
        let Some(review_id) = review_id else {
            return Err(WriteError::MissingIdentifier);
        };

        self.provider.delete_review(review_id).await?;

        self.cache.invalidate(&review_tag(book_id));
        info!("deleted review {} for book {}", review_id, book_id);

        Ok(())
    }

    /// Delete a review, first checking that it actually belongs to the book
    /// whose tag will be invalidated.
    pub async fn delete_review_checked(
        &self,
        review: &Review,
        book_id: i64,
    ) -> Result<(), WriteError> {
        if review.book_id != book_id {
            return Err(WriteError::ValidationFailure(format!(
                "review {} belongs to book {}, not book {}",
                review.id, review.book_id, book_id
            )));
        }

        self.delete_review(Some(review.id), book_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use bookstand_cache::MemoryCache;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    fn review(id: i64, book_id: i64, content: &str) -> Review {
        Review {
            id,
            book_id,
            author: "tester".to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    /// What the fake remote answers to a review listing fetch
    enum Fetch {
        Reviews(Vec<Review>),
        NoReviews,
        Fail(u16),
    }

    struct FakeCatalog {
        fetch: Mutex<Fetch>,
        fetch_calls: AtomicU32,
        create_calls: AtomicU32,
        delete_calls: AtomicU32,
        /// `Some(status)` makes every mutation fail with that status
        write_status: Option<u16>,
    }

    impl FakeCatalog {
        fn returning(fetch: Fetch) -> Self {
            Self {
                fetch: Mutex::new(fetch),
                fetch_calls: AtomicU32::new(0),
                create_calls: AtomicU32::new(0),
                delete_calls: AtomicU32::new(0),
                write_status: None,
            }
        }

        fn failing_writes(status: u16, fetch: Fetch) -> Self {
            Self {
                write_status: Some(status),
                ..Self::returning(fetch)
            }
        }

        fn set_fetch(&self, fetch: Fetch) {
            *self.fetch.lock().unwrap() = fetch;
        }

        fn fetches(&self) -> u32 {
            self.fetch_calls.load(Ordering::SeqCst)
        }

        fn write_result(&self) -> Result<(), WriteError> {
            match self.write_status {
                None => Ok(()),
                Some(status) => Err(WriteError::RemoteFailure {
                    status,
                    message: "rejected".to_string(),
                }),
            }
        }
    }

    #[async_trait::async_trait]
    impl CatalogProvider for FakeCatalog {
        async fn list_books(&self) -> Result<Vec<Book>, ReadError> {
            Ok(vec![])
        }

        async fn get_book(&self, id: i64) -> Result<Book, ReadError> {
            Err(ReadError::NotFound(format!("book {}", id)))
        }

        async fn search_books(&self, _query: &str) -> Result<Vec<Book>, ReadError> {
            Ok(vec![])
        }

        async fn fetch_reviews(&self, _book_id: i64) -> Result<ReviewListing, ReadError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            match &*self.fetch.lock().unwrap() {
                Fetch::Reviews(reviews) => Ok(ReviewListing::Reviews(reviews.clone())),
                Fetch::NoReviews => Ok(ReviewListing::NoReviews),
                Fetch::Fail(status) => Err(ReadError::RemoteFailure {
                    status: *status,
                    message: "server error".to_string(),
                }),
            }
        }

        async fn create_review(&self, _review: &NewReview) -> Result<(), WriteError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.write_result()
        }

        async fn delete_review(&self, _review_id: i64) -> Result<(), WriteError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.write_result()
        }
    }

    fn setup(provider: &Arc<FakeCatalog>) -> (ReviewService, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new());
        let service = ReviewService::new(provider.clone(), cache.clone());
        (service, cache)
    }

    #[tokio::test]
    async fn test_cached_listing_serves_repeat_reads() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![review(
            1, 7, "great",
        )])));
        let (service, _cache) = setup(&provider);

        let first = service.list_reviews(7).await.unwrap();
        let second = service.list_reviews(7).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_listings_are_cached_per_book() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![])));
        let (service, _cache) = setup(&provider);

        service.list_reviews(1).await.unwrap();
        service.list_reviews(2).await.unwrap();

        // Different tags, so neither read could serve the other
        assert_eq!(provider.fetches(), 2);
    }

    #[tokio::test]
    async fn test_read_after_create_refetches() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![review(
            1, 7, "great",
        )])));
        let (service, _cache) = setup(&provider);

        // Seed the cache entry for book 7
        service.list_reviews(7).await.unwrap();
        assert_eq!(provider.fetches(), 1);

        provider.set_fetch(Fetch::Reviews(vec![
            review(1, 7, "great"),
            review(2, 7, "even better"),
        ]));
        service.create_review(7, "kim", "even better").await.unwrap();

        // The very next read must not come from the pre-mutation entry
        let listing = service.list_reviews(7).await.unwrap();
        assert_eq!(provider.fetches(), 2);
        assert_eq!(listing.reviews().len(), 2);
    }

    #[tokio::test]
    async fn test_create_validates_author_and_content() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::NoReviews));
        let (service, _cache) = setup(&provider);

        let err = service.create_review(7, "  ", "fine").await.unwrap_err();
        assert!(matches!(err, WriteError::ValidationFailure(_)));

        let err = service.create_review(7, "kim", "").await.unwrap_err();
        assert!(matches!(err, WriteError::ValidationFailure(_)));

        // Validation happens before any network call
        assert_eq!(provider.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_cache_untouched() {
        let provider = Arc::new(FakeCatalog::failing_writes(
            500,
            Fetch::Reviews(vec![review(1, 7, "great")]),
        ));
        let (service, _cache) = setup(&provider);

        service.list_reviews(7).await.unwrap();

        let err = service.create_review(7, "kim", "nope").await.unwrap_err();
        assert!(matches!(err, WriteError::RemoteFailure { status: 500, .. }));

        // The entry is still live, so no re-fetch happens
        service.list_reviews(7).await.unwrap();
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_identifier_skips_network() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::NoReviews));
        let (service, _cache) = setup(&provider);

        let err = service.delete_review(None, 7).await.unwrap_err();

        assert!(matches!(err, WriteError::MissingIdentifier));
        assert_eq!(provider.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_invalidates_the_book_tag() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![review(
            1, 42, "gone soon",
        )])));
        let (service, cache) = setup(&provider);

        // Seed the entry under review-42
        service.list_reviews(42).await.unwrap();
        assert!(cache.get("review-42").is_some());

        service.delete_review(Some(1), 42).await.unwrap();
        assert!(cache.get("review-42").is_none());

        // The next read goes back to the network and sees the fresh state
        provider.set_fetch(Fetch::Reviews(vec![]));
        let listing = service.list_reviews(42).await.unwrap();
        assert_eq!(provider.fetches(), 2);
        assert_eq!(listing, ReviewListing::Reviews(vec![]));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache_untouched() {
        let provider = Arc::new(FakeCatalog::failing_writes(
            500,
            Fetch::Reviews(vec![review(1, 42, "staying")]),
        ));
        let (service, _cache) = setup(&provider);

        service.list_reviews(42).await.unwrap();

        let err = service.delete_review(Some(1), 42).await.unwrap_err();
        assert!(matches!(err, WriteError::RemoteFailure { status: 500, .. }));

        service.list_reviews(42).await.unwrap();
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_missing_listing_reads_as_no_reviews() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::NoReviews));
        let (service, _cache) = setup(&provider);

        let listing = service.list_reviews(9).await.unwrap();

        assert_eq!(listing, ReviewListing::NoReviews);
        assert!(listing.is_empty());

        // The translated 404 is a successful read and caches like one
        service.list_reviews(9).await.unwrap();
        assert_eq!(provider.fetches(), 1);
    }

    #[tokio::test]
    async fn test_read_failures_are_not_cached() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Fail(503)));
        let (service, _cache) = setup(&provider);

        let err = service.list_reviews(7).await.unwrap_err();
        assert!(matches!(err, ReadError::RemoteFailure { status: 503, .. }));

        provider.set_fetch(Fetch::Reviews(vec![review(1, 7, "recovered")]));
        let listing = service.list_reviews(7).await.unwrap();

        assert_eq!(provider.fetches(), 2);
        assert_eq!(listing.reviews().len(), 1);
    }

    #[tokio::test]
    async fn test_double_invalidation_refetches_once() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![])));
        let (service, cache) = setup(&provider);

        service.list_reviews(7).await.unwrap();

        cache.invalidate("review-7");
        cache.invalidate("review-7");

        service.list_reviews(7).await.unwrap();
        service.list_reviews(7).await.unwrap();

        // Two invalidations cost exactly one re-fetch
        assert_eq!(provider.fetches(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_deletes_are_idempotent() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![
            review(1, 7, "one"),
            review(2, 7, "two"),
        ])));
        let (service, cache) = setup(&provider);

        service.list_reviews(7).await.unwrap();

        let (a, b) = tokio::join!(
            service.delete_review(Some(1), 7),
            service.delete_review(Some(2), 7)
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(provider.delete_calls.load(Ordering::SeqCst), 2);
        assert!(cache.get("review-7").is_none());
    }

    #[tokio::test]
    async fn test_checked_delete_rejects_parent_mismatch() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::NoReviews));
        let (service, _cache) = setup(&provider);

        let stray = review(5, 7, "filed under the wrong book");
        let err = service.delete_review_checked(&stray, 9).await.unwrap_err();

        assert!(matches!(err, WriteError::ValidationFailure(_)));
        assert_eq!(provider.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_checked_delete_accepts_matching_parent() {
        let provider = Arc::new(FakeCatalog::returning(Fetch::Reviews(vec![review(
            5, 7, "short lived",
        )])));
        let (service, cache) = setup(&provider);

        service.list_reviews(7).await.unwrap();

        let target = review(5, 7, "short lived");
        service.delete_review_checked(&target, 7).await.unwrap();

        assert_eq!(provider.delete_calls.load(Ordering::SeqCst), 1);
        assert!(cache.get("review-7").is_none());
    }
}
