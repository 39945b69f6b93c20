mod fetcher;
mod filter;
mod models;

pub use fetcher::{NewsFetcher, NewsQuery, NewsSource};
pub use filter::{Category, FeedKey, FilterState};
pub use models::{Article, FeedPage, NO_DESCRIPTION, PAGE_SIZE, SUMMARY_UNAVAILABLE};
