use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::Category;

/// Articles per page; the backend is always asked for this many
pub const PAGE_SIZE: u32 = 10;

/// Placeholder the backend uses for entries without a description
pub const NO_DESCRIPTION: &str = "No description available";

/// Summary attached when the summarizer returned nothing for an article
pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate summary";

/// One news item, as returned by the news endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    pub url: String,
    pub source: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

impl Article {
    /// Text sent to the summarizer: the description, or the title when the
    /// description is the backend placeholder
    pub fn summary_input(&self) -> &str {
        if self.description == NO_DESCRIPTION {
            &self.title
        } else {
            &self.description
        }
    }

    /// Summary for display, falling back to the placeholder
    pub fn summary_text(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(SUMMARY_UNAVAILABLE)
    }

    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    /// Best-effort parse of the publication timestamp (RSS feeds use RFC 2822)
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

/// One paginated batch of articles plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub articles: Vec<Article>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl FeedPage {
    /// The "no matches" page
    pub fn empty(page: u32) -> Self {
        Self {
            articles: Vec::new(),
            total: 0,
            page,
            limit: PAGE_SIZE,
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Cut one page out of an unpaginated result list
    pub fn window(articles: Vec<Article>, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let total = articles.len() as u32;
        let total_pages = total.div_ceil(limit);
        let start = ((page - 1) as usize).saturating_mul(limit as usize);

        let articles = articles
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();

        Self {
            articles,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
