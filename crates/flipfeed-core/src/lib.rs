pub mod account;
pub mod ai;
pub mod config;
pub mod error;
pub mod feed;
pub mod loader;

mod http;

pub use config::AppConfig;
pub use error::{Error, Result, LOAD_FAILED_MESSAGE};
pub use feed::{Article, Category, FeedKey, FeedPage, FilterState};
pub use loader::{FeedLoader, FeedSession, FeedUpdate};
