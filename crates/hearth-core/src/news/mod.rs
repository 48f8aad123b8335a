mod aggregator;
mod models;
mod parser;
mod sources;
mod themes;

pub use aggregator::{
    filter_recent, NewsAggregator, UndatedPolicy, ARTICLE_CACHE_FILE, DIGEST_CACHE_FILE,
};
pub use models::{ellipsize, Article, CachedArticles, CachedDigest, Digest, ThemeBlock};
pub use parser::{parse_feed, parse_published, ParseLimits};
pub use sources::{default_sources, SourceConfig, SourceKind};
pub use themes::{build_digest, theme_for_title};
