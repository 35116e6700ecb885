// Tag-keyed caching layer
// Keeps review reads off the network until something actually changes

pub mod store;
pub mod tag;

pub use store::{MemoryCache, TagCache};
pub use tag::{review_tag, REVIEW_REVALIDATE};
