use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book as the catalogue API serves it
///
/// Books are owned by the remote service; this side only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub sub_title: String,
    pub description: String,
    pub author: String,
    pub publisher: String,
    pub cover_img_url: String,
}

/// A reader review attached to a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    /// Parent book this review was written for
    pub book_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a review
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub book_id: i64,
    pub author: String,
    pub content: String,
}
