use thiserror::Error;
use tracing::debug;

use crate::models::{Book, NewReview, Review};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Thin wrapper around the book/review HTTP API
///
/// One method per endpoint, no retries, no caching - status handling only.
/// Anything smarter (cache, invalidation) lives a layer up.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("bookstand/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /book - the whole catalogue
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let url = format!("{}/book", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, || "book list".to_string()).await?;

        Ok(response.json().await?)
    }

    /// GET /book/{id} - one book, 404 when it doesn't exist
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        let url = format!("{}/book/{}", self.base_url, id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, || format!("book {}", id)).await?;

        Ok(response.json().await?)
    }

    /// GET /book/search?q= - title/author substring search
    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        let url = format!("{}/book/search", self.base_url);
        debug!("GET {} q={}", url, query);

        let response = self.client.get(&url).query(&[("q", query)]).send().await?;
        let response = check_status(response, || format!("search '{}'", query)).await?;

        Ok(response.json().await?)
    }

    /// GET /review/book/{bookId} - reviews for one book
    ///
    /// The server answers 404 for a book with no review history; callers
    /// decide whether that is an error or an empty listing.
    pub async fn list_reviews(&self, book_id: i64) -> Result<Vec<Review>> {
        let url = format!("{}/review/book/{}", self.base_url, book_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, || format!("reviews for book {}", book_id)).await?;

        Ok(response.json().await?)
    }

    /// POST /review - create a review
    pub async fn create_review(&self, review: &NewReview) -> Result<()> {
        let url = format!("{}/review", self.base_url);
        debug!("POST {} for book {}", url, review.book_id);

        let response = self.client.post(&url).json(review).send().await?;
        check_status(response, || format!("create review for book {}", review.book_id)).await?;

        Ok(())
    }

    /// DELETE /review/{reviewId} - delete a review
    pub async fn delete_review(&self, review_id: i64) -> Result<()> {
        let url = format!("{}/review/{}", self.base_url, review_id);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        check_status(response, || format!("review {}", review_id)).await?;

        Ok(())
    }
}

/// Map a non-2xx response into a structured error, keeping the body around
/// since the server puts its complaint there.
async fn check_status(
    response: reqwest::Response,
    what: impl FnOnce() -> String,
) -> Result<reqwest::Response> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(what()));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::RequestFailed { status, body });
    }

    Ok(response)
}
