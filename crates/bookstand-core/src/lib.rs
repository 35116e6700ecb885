// Read and write paths over the remote catalogue - the brain of the operation

pub mod books;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod providers;
pub mod reviews;

pub use books::BookService;
pub use config::Config;
pub use error::{ReadError, WriteError};
pub use models::ReviewListing;
pub use provider::CatalogProvider;
pub use reviews::ReviewService;
