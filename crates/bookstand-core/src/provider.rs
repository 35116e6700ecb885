use crate::error::{ReadError, WriteError};
use crate::models::{Book, NewReview, ReviewListing};

/// Trait for the remote catalogue - makes testing easier and keeps things flexible
///
/// The real implementation talks HTTP (see [`crate::providers::RemoteCatalog`]);
/// tests swap in fakes so the read/write paths can be exercised without a
/// server. Implementations do the raw fetch only - caching and invalidation
/// live in the services on top.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ReadError>;

    async fn get_book(&self, id: i64) -> Result<Book, ReadError>;

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, ReadError>;

    /// Fetch the review listing for a book. A remote 404 is already
    /// translated to [`ReviewListing::NoReviews`] here, never an error.
    async fn fetch_reviews(&self, book_id: i64) -> Result<ReviewListing, ReadError>;

    async fn create_review(&self, review: &NewReview) -> Result<(), WriteError>;

    async fn delete_review(&self, review_id: i64) -> Result<(), WriteError>;
}
