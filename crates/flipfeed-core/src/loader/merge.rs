use crate::ai::SummaryResult;
use crate::feed::{Article, SUMMARY_UNAVAILABLE};

/// One summarizer input per article, in article order
pub fn summary_inputs(articles: &[Article]) -> Vec<String> {
    articles
        .iter()
        .map(|a| a.summary_input().to_string())
        .collect()
}

/// Bind result `i` to article `i`. Articles without a usable result get the
/// placeholder; surplus results are dropped.
pub fn attach_summaries(articles: Vec<Article>, results: &[SummaryResult]) -> Vec<Article> {
    if results.len() != articles.len() {
        tracing::warn!(
            articles = articles.len(),
            summaries = results.len(),
            "Summary count does not match article count"
        );
    }

    articles
        .into_iter()
        .enumerate()
        .map(|(idx, mut article)| {
            let summary = results
                .get(idx)
                .and_then(|r| r.summary.as_deref())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(SUMMARY_UNAVAILABLE);
            article.summary = Some(summary.to_string());
            article
        })
        .collect()
}
