use serde::{Deserialize, Serialize};

// Wire models come straight from the API crate; the core adds only the
// outcome types layered on top of them.
pub use bookstand_api::{Book, NewReview, Review};

/// Outcome of a review listing read.
///
/// The remote answers a book with no review history with a 404, which is not
/// a failure - it renders exactly like a 200 with an empty array. The two
/// stay distinct here so tests can tell a translated 404 from a genuinely
/// empty listing. Serializable because the whole outcome is what gets cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReviewListing {
    /// The server returned a listing (possibly empty).
    Reviews(Vec<Review>),
    /// The server has never seen a review for this book (404).
    NoReviews,
}

impl ReviewListing {
    /// The reviews to render; empty for both `Reviews([])` and `NoReviews`.
    pub fn reviews(&self) -> &[Review] {
        match self {
            ReviewListing::Reviews(reviews) => reviews,
            ReviewListing::NoReviews => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reviews().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reviews_and_empty_listing_render_the_same() {
        assert_eq!(ReviewListing::NoReviews.reviews(), &[] as &[Review]);
        assert_eq!(ReviewListing::Reviews(vec![]).reviews(), &[] as &[Review]);

        // ...but remain distinguishable
        assert_ne!(ReviewListing::NoReviews, ReviewListing::Reviews(vec![]));
    }

    #[test]
    fn test_listing_survives_a_cache_round_trip() {
        let listing = ReviewListing::NoReviews;
        let value = serde_json::to_value(&listing).unwrap();
        let back: ReviewListing = serde_json::from_value(value).unwrap();

        assert_eq!(back, ReviewListing::NoReviews);
    }
}
