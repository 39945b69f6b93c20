mod cache;
mod merge;
mod retry;
mod service;
mod session;

#[cfg(test)]
mod test_support;

pub use cache::FeedCache;
pub use merge::{attach_summaries, summary_inputs};
pub use retry::{load_with_retry, RETRY_LIMIT};
pub use service::FeedLoader;
pub use session::{FeedSession, FeedUpdate};
