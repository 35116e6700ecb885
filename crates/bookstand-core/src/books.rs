use std::sync::Arc;

use tracing::debug;

use crate::error::ReadError;
use crate::models::Book;
use crate::provider::CatalogProvider;

/// Catalogue reads. Books are immutable on this side, and listing them is
/// cheap, so there is no caching layer here - the review cache is the only
/// cache in the system.
pub struct BookService {
    provider: Arc<dyn CatalogProvider>,
}

impl BookService {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, ReadError> {
        self.provider.list_books().await
    }

    /// One book by id; a missing book is [`ReadError::NotFound`].
    pub async fn get_book(&self, id: i64) -> Result<Book, ReadError> {
        debug!("loading book {}", id);
        self.provider.get_book(id).await
    }

    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, ReadError> {
        debug!("searching books for '{}'", query);
        self.provider.search_books(query).await
    }
}
