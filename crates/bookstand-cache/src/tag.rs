use std::fmt::Display;
use std::time::Duration;

/// How long a cached review listing stays fresh absent an explicit
/// invalidation. External cache infrastructure knows this value, so it is a
/// constant rather than configuration.
pub const REVIEW_REVALIDATE: Duration = Duration::from_secs(3600);

/// Derive the invalidation tag for a book's reviews.
///
/// This is the single place a tag is ever derived. Readers cache under it,
/// writers invalidate through it; if the two ever computed tags separately
/// they could drift apart and mutations would stop being visible.
///
/// Pure and deterministic: `review-<bookId>`, same input, same tag. The
/// pattern is shared with external cache infrastructure and must not change.
pub fn review_tag(book_id: impl Display) -> String {
    format!("review-{}", book_id)
}
