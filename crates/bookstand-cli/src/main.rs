use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstand_api::{Book, CatalogClient, Review};
use bookstand_cache::MemoryCache;
use bookstand_core::providers::RemoteCatalog;
use bookstand_core::{BookService, Config, ReviewService};

#[derive(Parser)]
#[command(name = "bookstand")]
#[command(version, about = "Command-line front end for a book catalogue and its reviews", long_about = None)]
struct Cli {
    /// Base URL of the book API (overrides the config file)
    #[arg(long, env = "BOOKSTAND_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the whole catalogue
    Books,
    /// Show one book together with its reviews
    Show {
        /// Book id
        id: i64,
    },
    /// Search books
    Search {
        /// Search query
        query: String,
    },
    /// List the reviews for a book
    Reviews {
        /// Book id
        book_id: i64,
    },
    /// Create or delete reviews
    #[command(subcommand)]
    Review(ReviewCommand),
}

#[derive(clap::Subcommand)]
enum ReviewCommand {
    /// Add a review to a book
    Add {
        /// Book id the review is for
        book_id: i64,
        /// Your name
        #[arg(long)]
        author: String,
        /// The review text
        #[arg(long)]
        content: String,
    },
    /// Delete a review
    Delete {
        /// Review id to delete
        review_id: i64,
        /// Book the review was listed under (drives cache invalidation)
        #[arg(long = "book")]
        book_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstand=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    tracing::debug!("using API at {}", config.api.base_url);

    let provider = Arc::new(RemoteCatalog::new(CatalogClient::new(
        config.api.base_url.as_str(),
    )));
    let books = BookService::new(provider.clone());
    let reviews = ReviewService::new(provider, Arc::new(MemoryCache::new()));

    match cli.command {
        Commands::Books => match books.list_books().await {
            Ok(catalogue) if catalogue.is_empty() => println!("The catalogue is empty."),
            Ok(catalogue) => {
                for book in &catalogue {
                    print_book_line(book);
                }
            }
            Err(e) => println!("The catalogue is unavailable right now: {}", e),
        },
        Commands::Show { id } => {
            let (book, listing) = tokio::join!(books.get_book(id), reviews.list_reviews(id));
            let book = book.with_context(|| format!("could not load book {}", id))?;
            print_book(&book);

            // A failed review read renders inline under the book rather
            // than taking the whole view down
            println!();
            match listing {
                Ok(listing) if listing.is_empty() => println!("No reviews yet."),
                Ok(listing) => {
                    for review in listing.reviews() {
                        print_review(review);
                    }
                }
                Err(e) => println!("Reviews are unavailable right now: {}", e),
            }
        }
        Commands::Search { query } => match books.search_books(&query).await {
            Ok(hits) if hits.is_empty() => println!("Nothing matched '{}'.", query),
            Ok(hits) => {
                for book in &hits {
                    print_book_line(book);
                }
            }
            Err(e) => println!("Search is unavailable right now: {}", e),
        },
        Commands::Reviews { book_id } => match reviews.list_reviews(book_id).await {
            Ok(listing) if listing.is_empty() => println!("No reviews yet."),
            Ok(listing) => {
                for review in listing.reviews() {
                    print_review(review);
                }
            }
            Err(e) => println!("Reviews are unavailable right now: {}", e),
        },
        Commands::Review(ReviewCommand::Add {
            book_id,
            author,
            content,
        }) => {
            reviews
                .create_review(book_id, &author, &content)
                .await
                .context("the review was not saved")?;
            println!("Review saved for book {}.", book_id);
        }
        Commands::Review(ReviewCommand::Delete { review_id, book_id }) => {
            reviews
                .delete_review(Some(review_id), book_id)
                .await
                .context("the review was not deleted")?;
            println!("Review {} deleted.", review_id);
        }
    }

    Ok(())
}

fn print_book_line(book: &Book) {
    println!("{:>4}  {} - {}", book.id, book.title, book.author);
}

fn print_book(book: &Book) {
    println!("{} ({})", book.title, book.publisher);
    if !book.sub_title.is_empty() {
        println!("{}", book.sub_title);
    }
    println!("by {}", book.author);
    println!();
    println!("{}", book.description);
}

fn print_review(review: &Review) {
    println!(
        "#{} {} on {}: {}",
        review.id,
        review.author,
        review.created_at.format("%Y-%m-%d %H:%M"),
        review.content
    );
}
