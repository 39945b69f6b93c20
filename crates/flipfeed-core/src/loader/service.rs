use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex;

use super::cache::FeedCache;
use super::merge::{attach_summaries, summary_inputs};
use super::retry::{load_with_retry, RETRY_LIMIT};
use crate::ai::{Summarizer, SummarySource};
use crate::config::AppConfig;
use crate::feed::{FeedKey, FeedPage, FilterState, NewsFetcher, NewsQuery, NewsSource};
use crate::{Error, Result};

type GateMap = HashMap<FeedKey, Arc<Mutex<()>>>;

/// Holds a key's single-flight gate. Dropping it (also when the load is
/// cancelled) removes the gate once nobody else is waiting on it.
struct GateGuard<'a> {
    inflight: &'a StdMutex<GateMap>,
    key: &'a FeedKey,
    gate: Arc<Mutex<()>>,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this guard still hold the gate
        let is_current = inflight
            .get(self.key)
            .is_some_and(|g| Arc::ptr_eq(g, &self.gate));
        if is_current && Arc::strong_count(&self.gate) <= 2 {
            inflight.remove(self.key);
        }
    }
}

/// Loads feed pages: articles first, then one batched summarization call,
/// merged into a single page. Pages are cached per key and at most one
/// fetch per key runs at a time.
pub struct FeedLoader {
    news: Arc<dyn NewsSource>,
    summarizer: Arc<dyn SummarySource>,
    cache: FeedCache,
    inflight: StdMutex<GateMap>,
    call_timeout: Duration,
    retry_delay: Duration,
}

impl FeedLoader {
    /// Create a loader talking to the configured HTTP backends
    pub fn new(config: &AppConfig) -> Result<Self> {
        let news: Arc<dyn NewsSource> = Arc::new(NewsFetcher::new(config)?);
        let summarizer: Arc<dyn SummarySource> = Arc::new(Summarizer::new(config)?);
        Ok(Self::with_sources(news, summarizer, config))
    }

    /// Create a loader over arbitrary backends
    pub fn with_sources(
        news: Arc<dyn NewsSource>,
        summarizer: Arc<dyn SummarySource>,
        config: &AppConfig,
    ) -> Self {
        Self {
            news,
            summarizer,
            cache: FeedCache::new(config.freshness()),
            inflight: StdMutex::new(HashMap::new()),
            call_timeout: config.request_timeout(),
            retry_delay: config.retry_delay(),
        }
    }

    /// Load one page of the feed for the given filters and search
    pub async fn load(
        &self,
        filters: &FilterState,
        page: u32,
        search: Option<&str>,
    ) -> Result<FeedPage> {
        self.load_key(&FeedKey::new(*filters, page, search)).await
    }

    pub async fn load_key(&self, key: &FeedKey) -> Result<FeedPage> {
        if let Some(page) = self.cache.get(key).await {
            tracing::debug!(page = key.page, "Serving feed page from cache");
            return Ok(page);
        }

        let guard = self.gate(key);
        let _in_flight = guard.gate.lock().await;

        // Another caller may have filled the cache while we waited
        match self.cache.get(key).await {
            Some(page) => Ok(page),
            None => self.fetch_and_store(key).await,
        }
    }

    /// Forget the cached page so the next load hits the network
    pub async fn invalidate(&self, key: &FeedKey) {
        self.cache.invalidate(key).await;
    }

    fn gate<'a>(&'a self, key: &'a FeedKey) -> GateGuard<'a> {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        let gate = inflight.entry(key.clone()).or_default().clone();
        GateGuard {
            inflight: &self.inflight,
            key,
            gate,
        }
    }

    async fn fetch_and_store(&self, key: &FeedKey) -> Result<FeedPage> {
        match load_with_retry(RETRY_LIMIT, self.retry_delay, move || self.fetch_page(key)).await {
            Ok(page) => {
                self.cache.insert(key.clone(), page.clone()).await;
                Ok(page)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    page = key.page,
                    search = key.search.as_deref().unwrap_or(""),
                    "Failed to load feed page"
                );
                Err(Error::LoadFailed)
            }
        }
    }

    async fn fetch_page(&self, key: &FeedKey) -> Result<FeedPage> {
        let query = NewsQuery::for_key(key);
        let page = self.bounded("news request", self.news.fetch_page(&query)).await?;

        if page.is_empty() {
            tracing::info!(page = key.page, "No articles for the selected filters");
            return Ok(FeedPage::empty(key.page));
        }

        let texts = summary_inputs(&page.articles);
        let results = self
            .bounded("summarization request", self.summarizer.summarize(&texts))
            .await?;

        let FeedPage {
            articles,
            total,
            page: number,
            limit,
            total_pages,
        } = page;
        let articles = attach_summaries(articles, &results);

        tracing::info!("Rendered {} articles with summaries", articles.len());

        Ok(FeedPage {
            articles,
            total,
            page: number,
            limit,
            total_pages,
        })
    }

    async fn bounded<T, F>(&self, what: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| Error::Timeout(format!("{} exceeded {:?}", what, self.call_timeout)))?
    }
}
