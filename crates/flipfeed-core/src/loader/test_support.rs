//! In-memory backends for loader tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ai::{SummaryResult, SummarySource};
use crate::feed::{Article, FeedPage, NewsQuery, NewsSource, PAGE_SIZE};
use crate::{Error, Result};

pub fn article(id: &str, description: &str) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Title {}", id),
        description: description.to_string(),
        url: format!("https://example.com/{}", id),
        source: "BBC".to_string(),
        published_at: "Tue, 14 Oct 2025 09:30:00 GMT".to_string(),
        category: Some("sports".to_string()),
        summary: None,
    }
}

pub fn page_of(articles: Vec<Article>, page: u32) -> FeedPage {
    let total = articles.len() as u32;
    FeedPage {
        articles,
        total,
        page,
        limit: PAGE_SIZE,
        total_pages: total.div_ceil(PAGE_SIZE),
    }
}

type PageFn = Box<dyn Fn(&NewsQuery) -> FeedPage + Send + Sync>;
type DelayFn = Box<dyn Fn(&NewsQuery) -> Duration + Send + Sync>;

pub struct FakeNews {
    page_for: PageFn,
    delay_for: DelayFn,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
    queries: Mutex<Vec<NewsQuery>>,
}

impl FakeNews {
    pub fn serving(page_for: impl Fn(&NewsQuery) -> FeedPage + Send + Sync + 'static) -> Self {
        Self {
            page_for: Box::new(page_for),
            delay_for: Box::new(|_| Duration::ZERO),
            failures_left: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self::serving(move |q| page_of(articles.clone(), q.page))
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    pub fn delayed(mut self, delay_for: impl Fn(&NewsQuery) -> Duration + Send + Sync + 'static) -> Self {
        self.delay_for = Box::new(delay_for);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<NewsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for FakeNews {
    async fn fetch_page(&self, query: &NewsQuery) -> Result<FeedPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        let delay = (self.delay_for)(query);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Error::Status {
                status: 503,
                url: "http://fake/api/news".to_string(),
            });
        }

        Ok((self.page_for)(query))
    }
}

pub struct FakeSummarizer {
    limit: Option<usize>,
    delay: Duration,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
    texts: Mutex<Vec<Vec<String>>>,
}

impl FakeSummarizer {
    /// Answers "summary of <text>" for every text
    pub fn echoing() -> Self {
        Self {
            limit: None,
            delay: Duration::ZERO,
            failures_left: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Answers only the first `limit` texts
    pub fn truncated(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::echoing()
        }
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_texts(&self) -> Option<Vec<String>> {
        self.texts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SummarySource for FakeSummarizer {
    async fn summarize(&self, texts: &[String]) -> Result<Vec<SummaryResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(texts.to_vec());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Error::MalformedBody("truncated JSON".to_string()));
        }

        let count = self.limit.unwrap_or(texts.len()).min(texts.len());
        Ok(texts[..count]
            .iter()
            .map(|t| SummaryResult::new(format!("summary of {}", t)))
            .collect())
    }
}
