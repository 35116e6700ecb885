// HTTP client for the remote book/review API

pub mod client;
pub mod models;

// Re-export common types
pub use client::{ApiError, CatalogClient};
pub use models::{Book, NewReview, Review};
