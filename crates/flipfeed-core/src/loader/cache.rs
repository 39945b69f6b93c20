use std::collections::HashMap;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::feed::{FeedKey, FeedPage};

struct CachedPage {
    page: FeedPage,
    fetched_at: Instant,
}

/// Loaded pages keyed by (filters, page, search), reusable while fresh
pub struct FeedCache {
    freshness: Duration,
    entries: Mutex<HashMap<FeedKey, CachedPage>>,
}

impl FeedCache {
    pub fn new(freshness: Duration) -> Self {
        Self {
            freshness,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, entry: &CachedPage, now: Instant) -> bool {
        now.duration_since(entry.fetched_at) < self.freshness
    }

    /// A copy of the cached page, if it is still fresh
    pub async fn get(&self, key: &FeedKey) -> Option<FeedPage> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        if self.is_fresh(entry, Instant::now()) {
            Some(entry.page.clone())
        } else {
            None
        }
    }

    /// Store a page, dropping any expired entries on the way
    pub async fn insert(&self, key: FeedKey, page: FeedPage) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| now.duration_since(entry.fetched_at) < self.freshness);
        entries.insert(
            key,
            CachedPage {
                page,
                fetched_at: now,
            },
        );
    }

    pub async fn invalidate(&self, key: &FeedKey) {
        self.entries.lock().await.remove(key);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FilterState;

    fn key(page: u32) -> FeedKey {
        FeedKey::new(FilterState::default(), page, None)
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_window() {
        let cache = FeedCache::new(Duration::from_secs(300));
        cache.insert(key(1), FeedPage::empty(1)).await;

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(cache.get(&key(1)).await.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get(&key(1)).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_purges_expired_entries() {
        let cache = FeedCache::new(Duration::from_secs(10));
        cache.insert(key(1), FeedPage::empty(1)).await;
        tokio::time::advance(Duration::from_secs(11)).await;
        cache.insert(key(2), FeedPage::empty(2)).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&key(2)).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = FeedCache::new(Duration::from_secs(300));
        cache.insert(key(1), FeedPage::empty(1)).await;
        cache.insert(key(2), FeedPage::empty(2)).await;

        cache.invalidate(&key(1)).await;
        assert!(cache.get(&key(1)).await.is_none());
        assert!(cache.get(&key(2)).await.is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_zero_freshness_disables_reuse() {
        let cache = FeedCache::new(Duration::ZERO);
        cache.insert(key(1), FeedPage::empty(1)).await;
        assert!(cache.get(&key(1)).await.is_none());
    }
}
