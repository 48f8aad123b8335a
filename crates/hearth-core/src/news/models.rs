use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One normalized headline, whatever shape the source served it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Short badge naming the source.
    pub source: String,
    pub category: String,
    /// Raw timestamp text as published by the source; empty when absent.
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub summary: String,
}

impl Article {
    pub const NO_TITLE: &'static str = "No title";
    pub const NO_LINK: &'static str = "#";

    /// True when the parser had to fill in either placeholder field.
    pub fn is_placeholder(&self) -> bool {
        self.title == Self::NO_TITLE || self.link == Self::NO_LINK
    }
}

/// Headlines grouped under one topical theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeBlock {
    pub theme: String,
    pub headlines: Vec<Article>,
}

/// Themed view over a batch of articles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    pub themes: Vec<ThemeBlock>,
}

/// Persisted article-cache slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedArticles {
    pub cached_at: DateTime<Local>,
    pub articles: Vec<Article>,
}

/// Persisted digest artifact with its generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedDigest {
    pub generated_at: DateTime<Local>,
    pub digest: Digest,
}

/// Cap a string at `max_chars` characters, marking a cut with a trailing
/// ellipsis that stays inside the budget. Counts characters, not bytes,
/// so multi-byte titles never get split mid-character.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 1).collect();
    format!("{}…", kept)
}
