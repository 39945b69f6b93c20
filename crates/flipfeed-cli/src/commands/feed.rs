use anyhow::Result;

use flipfeed_core::{AppConfig, FeedLoader, FeedPage, FilterState};

pub async fn run(
    config: &AppConfig,
    filters: FilterState,
    page: u32,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let loader = FeedLoader::new(config)?;
    let page = loader.load(&filters, page, search).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    print_page(&page, config.ui.show_timestamps);
    Ok(())
}

fn print_page(page: &FeedPage, show_timestamps: bool) {
    if page.is_empty() {
        println!("No articles found for the selected filters.");
        return;
    }

    println!(
        "Latest News (page {} of {}, {} articles)\n",
        page.page,
        page.total_pages.max(1),
        page.total
    );

    for (i, article) in page.articles.iter().enumerate() {
        println!("{:>2}. {}", i + 1, article.title);

        let mut meta = article.source.clone();
        if show_timestamps {
            if let Some(published) = article.published() {
                meta.push_str(&format!(" | {}", published.format("%Y-%m-%d %H:%M")));
            }
        }
        if let Some(category) = article.category() {
            meta.push_str(&format!(" | #{}", category));
        }
        println!("    {}", meta);
        println!("    Summary: {}", article.summary_text());
        println!("    {}", article.url);
        println!();
    }
}
