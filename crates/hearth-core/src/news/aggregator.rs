use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use super::models::{ellipsize, Article, CachedArticles, CachedDigest, Digest};
use super::parser::{parse_feed, parse_published, ParseLimits};
use super::sources::{SourceConfig, SourceKind};
use super::themes::build_digest;
use crate::clock::Clock;
use crate::config::NewsConfig;
use crate::fetch::Fetch;
use crate::store::{self, BlobStore};
use crate::{Error, Result};

/// Blob name for the hourly article-cache slot.
pub const ARTICLE_CACHE_FILE: &str = "news_cache.json";
/// Blob name for the regenerate-only digest artifact.
pub const DIGEST_CACHE_FILE: &str = "digest_cache.json";

/// What to do with entries whose published timestamp cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndatedPolicy {
    Keep,
    Drop,
}

/// Keep only articles published within the last day of `now`.
///
/// The window is a whole-day count over naive timestamps: 23 hours old
/// passes, 25 hours old does not, and a timestamp from the future passes
/// too (clock skew between sources is routine).
pub fn filter_recent(
    articles: &[Article],
    now: NaiveDateTime,
    undated: UndatedPolicy,
) -> Vec<Article> {
    articles
        .iter()
        .filter(|article| match parse_published(&article.published) {
            Some(published) => now.signed_duration_since(published).num_days() < 1,
            None => undated == UndatedPolicy::Keep,
        })
        .cloned()
        .collect()
}

#[derive(Deserialize)]
struct HnStory {
    title: Option<String>,
    url: Option<String>,
    #[serde(default)]
    score: u32,
    #[serde(default)]
    descendants: u32,
}

#[derive(Deserialize)]
struct JsonItem {
    title: Option<String>,
    url: Option<String>,
    link: Option<String>,
    published: Option<String>,
    description: Option<String>,
}

/// Derive the per-item lookup URL from the configured story-list URL, so
/// a stubbed or mirrored API base keeps working.
fn hn_item_url(list_url: &str, id: u64) -> String {
    match list_url.strip_suffix("topstories.json") {
        Some(base) => format!("{}item/{}.json", base, id),
        None => format!("https://hacker-news.firebaseio.com/v0/item/{}.json", id),
    }
}

/// Fetch, normalize and dedupe across the configured sources, with the
/// two cache levels layered in front.
pub struct NewsAggregator {
    fetcher: Arc<dyn Fetch>,
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    config: NewsConfig,
}

impl NewsAggregator {
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        config: NewsConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            clock,
            config,
        }
    }

    fn limits(&self) -> ParseLimits {
        ParseLimits {
            title_chars: self.config.title_limit,
            summary_chars: self.config.summary_limit,
        }
    }

    /// Fetch every enabled source and merge the results.
    ///
    /// Sources are fetched one after another; a failing source contributes
    /// nothing and can never abort the batch. Merged articles are deduped
    /// by exact (already truncated) title, first occurrence wins, and the
    /// batch is capped at `max_total` in insertion order.
    pub async fn fetch_articles(&self, max_per_source: usize, max_total: usize) -> Vec<Article> {
        let mut merged: Vec<Article> = Vec::new();
        let mut seen_titles: HashSet<String> = HashSet::new();

        for source in self.config.sources.iter().filter(|s| s.enabled) {
            let articles = match self.fetch_source(source, max_per_source).await {
                Ok(articles) => articles,
                Err(e) => {
                    tracing::warn!("Failed to fetch source '{}': {}", source.name, e);
                    continue;
                }
            };

            for article in articles {
                if !self.config.keep_placeholders && article.is_placeholder() {
                    continue;
                }
                if seen_titles.insert(article.title.clone()) {
                    merged.push(article);
                }
            }
        }

        merged.truncate(max_total);
        merged
    }

    async fn fetch_source(&self, source: &SourceConfig, max_items: usize) -> Result<Vec<Article>> {
        match source.kind {
            SourceKind::Rss => {
                let body = self.fetcher.get_text(&source.url).await?;
                Ok(parse_feed(&body, source, max_items, self.limits()))
            }
            SourceKind::HackerNews => self.fetch_hacker_news(source, max_items).await,
            SourceKind::JsonList => self.fetch_json_list(source, max_items).await,
        }
    }

    /// Two-stage Hacker News fetch: the story-id list, then each item.
    async fn fetch_hacker_news(
        &self,
        source: &SourceConfig,
        max_items: usize,
    ) -> Result<Vec<Article>> {
        let body = self.fetcher.get_text(&source.url).await?;
        let ids: Vec<u64> = serde_json::from_str(&body)?;
        let limits = self.limits();

        let mut articles = Vec::new();
        for id in ids.into_iter().take(max_items) {
            let item_url = hn_item_url(&source.url, id);
            let fetched = self.fetcher.get_text(&item_url).await.and_then(|item| {
                serde_json::from_str::<HnStory>(&item).map_err(Error::from)
            });
            // One bad story never sinks the rest of the list.
            let story = match fetched {
                Ok(story) => story,
                Err(e) => {
                    tracing::debug!("Skipping story {}: {}", id, e);
                    continue;
                }
            };

            let title = match story.title {
                Some(title) if !title.trim().is_empty() => title,
                _ => continue,
            };

            articles.push(Article {
                title: ellipsize(title.trim(), limits.title_chars),
                link: story
                    .url
                    .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", id)),
                source: source.badge(),
                category: source.category.clone(),
                published: String::new(),
                summary: format!("{} points · {} comments", story.score, story.descendants),
            });
        }

        Ok(articles)
    }

    /// Generic JSON array source: `{title, url|link, published, description}`.
    async fn fetch_json_list(
        &self,
        source: &SourceConfig,
        max_items: usize,
    ) -> Result<Vec<Article>> {
        let body = self.fetcher.get_text(&source.url).await?;
        let items: Vec<JsonItem> = serde_json::from_str(&body)?;
        let limits = self.limits();

        Ok(items
            .into_iter()
            .take(max_items)
            .map(|item| {
                let title = match item.title.as_deref().map(str::trim) {
                    Some(title) if !title.is_empty() => ellipsize(title, limits.title_chars),
                    _ => Article::NO_TITLE.to_string(),
                };
                Article {
                    title,
                    link: item
                        .url
                        .or(item.link)
                        .unwrap_or_else(|| Article::NO_LINK.to_string()),
                    source: source.badge(),
                    category: source.category.clone(),
                    published: item.published.unwrap_or_default(),
                    summary: ellipsize(item.description.as_deref().unwrap_or(""), limits.summary_chars),
                }
            })
            .collect())
    }

    /// Read the article cache, refreshing it when the slot is older than
    /// the configured TTL.
    ///
    /// A hit returns the cached payload untouched (capped to the batch
    /// limit), so two reads inside the TTL are identical and cost no
    /// network traffic.
    pub async fn cached_articles(&self) -> Vec<Article> {
        let now = self.clock.now();
        let ttl = Duration::seconds(self.config.cache_ttl_secs as i64);

        if let Some(cached) =
            store::load_json::<CachedArticles>(self.store.as_ref(), ARTICLE_CACHE_FILE)
        {
            if now.signed_duration_since(cached.cached_at) < ttl {
                let mut articles = cached.articles;
                articles.truncate(self.config.max_total);
                return articles;
            }
        }

        let articles = self
            .fetch_articles(self.config.max_per_source, self.config.max_total)
            .await;

        let entry = CachedArticles {
            cached_at: now,
            articles: articles.clone(),
        };
        if let Err(e) = store::save_json(self.store.as_ref(), ARTICLE_CACHE_FILE, &entry) {
            tracing::warn!("Failed to write article cache: {}", e);
        }

        articles
    }

    /// Themed digest over the given articles, recency-gated to the last
    /// day. Undated articles are dropped unless configured otherwise.
    pub fn digest_from(&self, articles: &[Article]) -> Digest {
        let undated = if self.config.digest_keep_undated {
            UndatedPolicy::Keep
        } else {
            UndatedPolicy::Drop
        };
        let recent = filter_recent(articles, self.clock.now().naive_local(), undated);
        build_digest(&recent, self.config.max_per_theme, self.config.digest_title_limit)
    }

    /// Rebuild the digest artifact from the current articles and persist
    /// it. This is the only writer of the digest blob.
    pub async fn regenerate_digest(&self) -> Digest {
        let articles = self.cached_articles().await;
        let digest = self.digest_from(&articles);

        let entry = CachedDigest {
            generated_at: self.clock.now(),
            digest: digest.clone(),
        };
        if let Err(e) = store::save_json(self.store.as_ref(), DIGEST_CACHE_FILE, &entry) {
            tracing::warn!("Failed to write digest cache: {}", e);
        }

        digest
    }

    /// Read the digest artifact as-is, however old it is. A missing or
    /// corrupt artifact degrades to computing a fresh digest without
    /// persisting it.
    pub async fn cached_digest(&self) -> Digest {
        if let Some(cached) =
            store::load_json::<CachedDigest>(self.store.as_ref(), DIGEST_CACHE_FILE)
        {
            return cached.digest;
        }

        let articles = self.cached_articles().await;
        self.digest_from(&articles)
    }
}
