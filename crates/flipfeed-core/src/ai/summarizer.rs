use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::AppConfig;
use crate::http::{build_client, endpoint, read_json};
use crate::Result;

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    texts: &'a [String],
}

#[derive(Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// One entry of the summarizer's result list, positionally aligned with the
/// submitted texts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryResult {
    pub summary: Option<String>,
}

impl SummaryResult {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
        }
    }

    /// Read one entry of the result list. Anything other than an object
    /// with a string `summary` counts as a missing summary.
    fn from_entry(entry: &Value) -> Self {
        Self {
            summary: entry
                .get("summary")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// A backend that turns article texts into short summaries
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Summarize all texts in one batched call.
    /// The result list may be shorter than the input.
    async fn summarize(&self, texts: &[String]) -> Result<Vec<SummaryResult>>;
}

/// HTTP client for the summarization endpoint
pub struct Summarizer {
    client: Client,
    url: Url,
}

impl Summarizer {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = build_client(config.request_timeout(), &config.api.proxy_url)?;

        Ok(Self {
            client,
            url: endpoint(&config.api.base_url, &config.api.summarize_path)?,
        })
    }
}

#[async_trait]
impl SummarySource for Summarizer {
    async fn summarize(&self, texts: &[String]) -> Result<Vec<SummaryResult>> {
        tracing::debug!("Summarizing {} texts via {}", texts.len(), self.url);

        let response = self
            .client
            .post(self.url.clone())
            .json(&SummarizeRequest { texts })
            .send()
            .await?;

        let body: SummarizeResponse = read_json(response).await?;

        Ok(body
            .results
            .iter()
            .map(SummaryResult::from_entry)
            .collect())
    }
}
