use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use hearth_core::clock::SystemClock;
use hearth_core::fetch::HttpFetcher;
use hearth_core::news::NewsAggregator;
use hearth_core::store::FileStore;
use hearth_core::AppConfig;

pub async fn run(store: Arc<FileStore>, config: &AppConfig, fresh: bool) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
        config.fetch.request_timeout_secs,
    ))?);
    let aggregator = NewsAggregator::new(fetcher, store, Arc::new(SystemClock), config.news.clone());

    let articles = if fresh {
        println!("Fetching headlines from every source...\n");
        aggregator
            .fetch_articles(config.news.max_per_source, config.news.max_total)
            .await
    } else {
        aggregator.cached_articles().await
    };

    if articles.is_empty() {
        println!("No headlines right now.");
        return Ok(());
    }

    println!("Headlines ({}):\n", articles.len());

    for article in &articles {
        println!("  [{}] {}", article.source, article.title);
        println!("    {}", article.link);
        if !article.published.is_empty() {
            println!("    Published: {}", article.published);
        }
        println!();
    }

    Ok(())
}
