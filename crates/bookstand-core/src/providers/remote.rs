use bookstand_api::{ApiError, CatalogClient};

use crate::error::{ReadError, WriteError};
use crate::models::{Book, NewReview, ReviewListing};
use crate::provider::CatalogProvider;

/// The HTTP-backed provider used in production.
pub struct RemoteCatalog {
    client: CatalogClient,
}

impl RemoteCatalog {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for RemoteCatalog {
    async fn list_books(&self) -> Result<Vec<Book>, ReadError> {
        Ok(self.client.list_books().await?)
    }

    async fn get_book(&self, id: i64) -> Result<Book, ReadError> {
        Ok(self.client.get_book(id).await?)
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, ReadError> {
        Ok(self.client.search_books(query).await?)
    }

    async fn fetch_reviews(&self, book_id: i64) -> Result<ReviewListing, ReadError> {
        match self.client.list_reviews(book_id).await {
            Ok(reviews) => Ok(ReviewListing::Reviews(reviews)),
            // The review endpoint 404s for books nobody has reviewed yet;
            // that is an answer, not a failure.
            Err(ApiError::NotFound(_)) => Ok(ReviewListing::NoReviews),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_review(&self, review: &NewReview) -> Result<(), WriteError> {
        Ok(self.client.create_review(review).await?)
    }

    async fn delete_review(&self, review_id: i64) -> Result<(), WriteError> {
        Ok(self.client.delete_review(review_id).await?)
    }
}
