use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use hearth_core::clock::SystemClock;
use hearth_core::fetch::HttpFetcher;
use hearth_core::news::{Digest, NewsAggregator};
use hearth_core::store::FileStore;
use hearth_core::AppConfig;

pub async fn run(store: Arc<FileStore>, config: &AppConfig, regenerate: bool) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
        config.fetch.request_timeout_secs,
    ))?);
    let aggregator = NewsAggregator::new(fetcher, store, Arc::new(SystemClock), config.news.clone());

    let digest = if regenerate {
        println!("Rebuilding the digest...\n");
        aggregator.regenerate_digest().await
    } else {
        aggregator.cached_digest().await
    };

    print_digest(&digest);

    Ok(())
}

fn print_digest(digest: &Digest) {
    if digest.themes.is_empty() {
        println!("Nothing in the digest.");
        println!("\nTo rebuild it from fresh headlines, run:");
        println!("  hearth digest --regenerate");
        return;
    }

    for block in &digest.themes {
        println!("{}", block.theme);
        for headline in &block.headlines {
            println!("  - {} ({})", headline.title, headline.source);
        }
        println!();
    }
}
