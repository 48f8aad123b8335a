use serde::{Deserialize, Serialize};

/// How a source's payload is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// RSS or Atom XML.
    #[default]
    Rss,
    /// Hacker News Firebase API: a story-id list plus per-item lookups.
    HackerNews,
    /// Generic JSON array of objects with title/url/published/description.
    JsonList,
}

/// One configured news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl SourceConfig {
    pub fn rss(name: &str, url: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
            kind: SourceKind::Rss,
            enabled: true,
        }
    }

    /// Short badge attached to every article from this source.
    pub fn badge(&self) -> String {
        self.name.chars().take(12).collect()
    }
}

fn default_category() -> String {
    "general".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Built-in source registry used when the config file has no `[news]`
/// sources of its own.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        // Tech
        SourceConfig::rss("TechCrunch", "https://techcrunch.com/feed/", "tech"),
        SourceConfig::rss("The Verge", "https://www.theverge.com/rss/index.xml", "tech"),
        SourceConfig::rss("Wired", "https://www.wired.com/feed/rss", "tech"),
        SourceConfig::rss("Ars Technica", "https://feeds.arstechnica.com/arstechnica/index", "tech"),
        SourceConfig {
            name: "Hacker News".to_string(),
            url: "https://hacker-news.firebaseio.com/v0/topstories.json".to_string(),
            category: "tech".to_string(),
            kind: SourceKind::HackerNews,
            enabled: true,
        },
        // World
        SourceConfig::rss("BBC World", "https://feeds.bbci.co.uk/news/world/rss.xml", "world"),
        SourceConfig::rss("NYT World", "https://rss.nytimes.com/services/xml/rss/nyt/World.xml", "world"),
        SourceConfig::rss("Reuters", "https://www.reutersagency.com/feed/?best-topics=tech", "world"),
        // Sports
        SourceConfig::rss("ESPN", "https://www.espn.com/espn/rss/news", "sports"),
        SourceConfig::rss("Yahoo Sports", "https://sports.yahoo.com/rss/", "sports"),
        // Soccer
        SourceConfig::rss("Goal.com", "https://www.goal.com/en-us/feeds/rss/news", "soccer"),
        SourceConfig::rss("ESPN Soccer", "https://www.espn.com/soccer/rss/_/league/all", "soccer"),
    ]
}
