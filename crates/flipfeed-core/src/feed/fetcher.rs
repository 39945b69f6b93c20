use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

use super::filter::{FeedKey, FilterState};
use super::models::{FeedPage, PAGE_SIZE};
use crate::config::AppConfig;
use crate::http::{build_client, endpoint, read_json};
use crate::Result;

/// Parameters of one news request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub filters: FilterState,
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl NewsQuery {
    pub fn for_key(key: &FeedKey) -> Self {
        Self {
            filters: key.filters,
            page: key.page,
            limit: PAGE_SIZE,
            search: key.search.clone(),
        }
    }
}

/// A backend that serves pages of articles
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_page(&self, query: &NewsQuery) -> Result<FeedPage>;
}

/// HTTP client for the news and search endpoints
pub struct NewsFetcher {
    client: Client,
    news_url: Url,
    search_url: Url,
}

impl NewsFetcher {
    /// Create a new news fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = build_client(config.request_timeout(), &config.api.proxy_url)?;

        Ok(Self {
            client,
            news_url: endpoint(&config.api.base_url, &config.api.news_path)?,
            search_url: endpoint(&config.api.base_url, &config.api.search_path)?,
        })
    }

    /// Full request URL for a query.
    ///
    /// Listing: `categories` (only when a filter is active), `page`, `limit`.
    /// Search: `q`, `page`, `limit`; the search endpoint ignores categories.
    pub fn request_url(&self, query: &NewsQuery) -> Url {
        match query.search {
            Some(ref q) => {
                let mut url = self.search_url.clone();
                url.query_pairs_mut()
                    .append_pair("q", q)
                    .append_pair("page", &query.page.to_string())
                    .append_pair("limit", &query.limit.to_string());
                url
            }
            None => {
                let mut url = self.news_url.clone();
                {
                    let mut pairs = url.query_pairs_mut();
                    if let Some(categories) = query.filters.categories_param() {
                        pairs.append_pair("categories", &categories);
                    }
                    pairs
                        .append_pair("page", &query.page.to_string())
                        .append_pair("limit", &query.limit.to_string());
                }
                url
            }
        }
    }
}

/// The search endpoint returns every match regardless of category or page,
/// so narrow its result to the requested filters and page window here.
fn narrow_search_results(page: FeedPage, query: &NewsQuery) -> FeedPage {
    let matching: Vec<_> = page
        .articles
        .into_iter()
        .filter(|a| query.filters.matches(a.category.as_deref()))
        .collect();

    FeedPage::window(matching, query.page, query.limit)
}

#[async_trait]
impl NewsSource for NewsFetcher {
    async fn fetch_page(&self, query: &NewsQuery) -> Result<FeedPage> {
        let url = self.request_url(query);

        tracing::debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let page: FeedPage = read_json(response).await?;

        if query.search.is_some() {
            return Ok(narrow_search_results(page, query));
        }

        tracing::info!(
            "Fetched {} articles for page {}, filters: {}",
            page.articles.len(),
            query.page,
            query.filters.categories_param().as_deref().unwrap_or("none")
        );

        Ok(page)
    }
}
