use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::service::FeedLoader;
use crate::feed::{FeedKey, FeedPage};
use crate::Result;

/// Result of one background load, tagged with the request that produced it
#[derive(Debug)]
pub struct FeedUpdate {
    pub generation: u64,
    pub key: FeedKey,
    pub outcome: Result<FeedPage>,
}

/// Runs loads in the background for a single view.
///
/// Every request gets a new generation number. Only the update carrying the
/// latest generation may be shown; anything older is dropped in [`accept`].
///
/// [`accept`]: FeedSession::accept
pub struct FeedSession {
    loader: Arc<FeedLoader>,
    latest: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<FeedUpdate>,
}

impl FeedSession {
    pub fn new(loader: Arc<FeedLoader>) -> (Self, mpsc::UnboundedReceiver<FeedUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            loader,
            latest: Arc::new(AtomicU64::new(0)),
            tx,
        };
        (session, rx)
    }

    /// Start loading `key` and return the generation of this request
    pub fn request(&self, key: FeedKey) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let loader = self.loader.clone();
        let tx = self.tx.clone();

        tracing::debug!(generation, page = key.page, "Requesting feed page");

        tokio::spawn(async move {
            let outcome = loader.load_key(&key).await;
            // The receiver is gone once the view shuts down
            let _ = tx.send(FeedUpdate {
                generation,
                key,
                outcome,
            });
        });

        generation
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, update: &FeedUpdate) -> bool {
        update.generation == self.latest()
    }

    /// Unwrap an update if it answers the most recent request
    pub fn accept(&self, update: FeedUpdate) -> Option<Result<FeedPage>> {
        if !self.is_current(&update) {
            tracing::debug!(
                generation = update.generation,
                latest = self.latest(),
                "Discarding superseded feed update"
            );
            return None;
        }
        Some(update.outcome)
    }

    pub fn loader(&self) -> &Arc<FeedLoader> {
        &self.loader
    }
}
