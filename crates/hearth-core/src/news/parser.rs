use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;

use super::models::{ellipsize, Article};
use super::sources::SourceConfig;

/// Character budgets applied while normalizing raw entries.
#[derive(Debug, Clone, Copy)]
pub struct ParseLimits {
    pub title_chars: usize,
    pub summary_chars: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            title_chars: 100,
            summary_chars: 200,
        }
    }
}

// Feeds get treated as text, not XML: a regex scan over entry blocks
// tolerates the undeclared entities, stray markup and encoding lies that
// make strict XML parsers reject real-world feeds outright.
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item(?:\s[^>]*)?>(.*?)</item>").unwrap());
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<entry(?:\s[^>]*)?>(.*?)</entry>").unwrap());
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<title[^>]*><!\[CDATA\[(.*?)\]\]></title>|<title[^>]*>(.*?)</title>").unwrap()
});
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<link[^>]*>(.*?)</link>|<link[^>]*\bhref="([^"]+)""#).unwrap()
});
static PUBLISHED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pubDate>(.*?)</pubDate>|<published>(.*?)</published>").unwrap()
});
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<description><!\[CDATA\[(.*?)\]\]></description>|<description>(.*?)</description>|<summary[^>]*><!\[CDATA\[(.*?)\]\]></summary>|<summary[^>]*>(.*?)</summary>",
    )
    .unwrap()
});

/// Parse an RSS/Atom body into articles for one source.
///
/// Lenient by construction: an entry missing its title or link comes back
/// with the placeholder values rather than being dropped here, and a body
/// that matches nothing is simply an empty batch.
pub fn parse_feed(
    body: &str,
    source: &SourceConfig,
    max_items: usize,
    limits: ParseLimits,
) -> Vec<Article> {
    entry_blocks(body)
        .into_iter()
        .take(max_items)
        .map(|block| parse_entry(block, source, limits))
        .collect()
}

/// Split a feed body into raw entry blocks: RSS `<item>` first, Atom
/// `<entry>` as the fallback.
fn entry_blocks(body: &str) -> Vec<&str> {
    let items: Vec<&str> = ITEM_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    if !items.is_empty() {
        return items;
    }

    ENTRY_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn parse_entry(block: &str, source: &SourceConfig, limits: ParseLimits) -> Article {
    let title = TITLE_RE
        .captures(block)
        .and_then(|caps| first_group(&caps, &[1, 2]))
        .map(|raw| unescape_entities(raw.trim()))
        .filter(|title| !title.is_empty())
        .map(|title| ellipsize(&title, limits.title_chars))
        .unwrap_or_else(|| Article::NO_TITLE.to_string());

    let link = LINK_RE
        .captures(block)
        .and_then(|caps| first_group(&caps, &[1, 2]))
        .map(|raw| raw.trim().to_string())
        .filter(|link| !link.is_empty())
        .unwrap_or_else(|| Article::NO_LINK.to_string());

    let published = PUBLISHED_RE
        .captures(block)
        .and_then(|caps| first_group(&caps, &[1, 2]))
        .map(|raw| raw.trim().to_string())
        .unwrap_or_default();

    let summary = SUMMARY_RE
        .captures(block)
        .and_then(|caps| first_group(&caps, &[1, 2, 3, 4]))
        .map(|raw| clean_summary(raw, limits.summary_chars))
        .unwrap_or_default();

    Article {
        title,
        link,
        source: source.badge(),
        category: source.category.clone(),
        published,
        summary,
    }
}

/// First populated capture group among `indices`.
fn first_group<'t>(caps: &regex::Captures<'t>, indices: &[usize]) -> Option<&'t str> {
    indices.iter().find_map(|&i| caps.get(i).map(|m| m.as_str()))
}

/// Undo the handful of entities feeds actually escape titles with.
/// `&amp;` goes last so double-escaped text only unescapes one level.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

/// Flatten an HTML description into one plain-text line within budget.
fn clean_summary(html: &str, max_chars: usize) -> String {
    let unescaped = unescape_entities(html.trim());
    let text =
        html2text::from_read(unescaped.as_bytes(), 80).unwrap_or_else(|_| unescaped.clone());
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    ellipsize(&flattened, max_chars)
}

/// Interpret a published timestamp, trying the formats feeds actually use:
/// RFC 822 (RSS), RFC 3339 (Atom), then ISO 8601 without an offset.
///
/// The offset is stripped rather than converted; comparisons downstream
/// work on the literal clock time the source printed.
pub fn parse_published(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.naive_local());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SourceConfig {
        SourceConfig::rss("Test Feed", "https://feed.test/rss", "tech")
    }

    const RSS_BODY: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
<channel>
<title>Feed Title</title>
<item>
<title><![CDATA[First story & more]]></title>
<link>https://feed.test/1</link>
<pubDate>Mon, 24 Aug 2026 10:00:00 GMT</pubDate>
<description><![CDATA[<p>Rich HTML body</p> <p>second paragraph</p>]]></description>
</item>
<item>
<title>Second &amp; third</title>
<link>https://feed.test/2</link>
</item>
</channel>
</rss>"#;

    const ATOM_BODY: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
<title>Feed Title</title>
<entry>
<title type="html">Atom story</title>
<link rel="alternate" href="https://feed.test/atom/1"/>
<published>2026-08-24T10:00:00Z</published>
<summary>Plain atom summary</summary>
</entry>
</feed>"#;

    #[test]
    fn parses_rss_items_with_cdata_and_entities() {
        let articles = parse_feed(RSS_BODY, &source(), 10, ParseLimits::default());

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "First story & more");
        assert_eq!(articles[0].link, "https://feed.test/1");
        assert_eq!(articles[0].published, "Mon, 24 Aug 2026 10:00:00 GMT");
        assert_eq!(articles[0].summary, "Rich HTML body second paragraph");
        assert_eq!(articles[0].source, "Test Feed");
        assert_eq!(articles[1].title, "Second & third");
        assert_eq!(articles[1].published, "");
    }

    #[test]
    fn falls_back_to_atom_entries() {
        let articles = parse_feed(ATOM_BODY, &source(), 10, ParseLimits::default());

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Atom story");
        assert_eq!(articles[0].link, "https://feed.test/atom/1");
        assert_eq!(articles[0].published, "2026-08-24T10:00:00Z");
        assert_eq!(articles[0].summary, "Plain atom summary");
    }

    #[test]
    fn missing_title_and_link_become_placeholders() {
        let body = "<rss><item><description>only text</description></item></rss>";
        let articles = parse_feed(body, &source(), 10, ParseLimits::default());

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, Article::NO_TITLE);
        assert_eq!(articles[0].link, Article::NO_LINK);
        assert!(articles[0].is_placeholder());
    }

    #[test]
    fn respects_max_items() {
        let articles = parse_feed(RSS_BODY, &source(), 1, ParseLimits::default());
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn truncates_long_titles_to_the_budget() {
        let long_title = "word ".repeat(60);
        let body = format!(
            "<rss><item><title>{}</title><link>https://feed.test/x</link></item></rss>",
            long_title.trim()
        );
        let articles = parse_feed(&body, &source(), 10, ParseLimits::default());

        assert_eq!(articles[0].title.chars().count(), 100);
        assert!(articles[0].title.ends_with('…'));
    }

    #[test]
    fn unclosed_entry_is_not_an_entry() {
        let body = "<rss><item><title>half open</title>";
        assert!(parse_feed(body, &source(), 10, ParseLimits::default()).is_empty());
    }

    #[test]
    fn parse_published_format_ladder() {
        let rfc822 = parse_published("Mon, 24 Aug 2026 10:00:00 +0200").unwrap();
        assert_eq!(rfc822.to_string(), "2026-08-24 10:00:00");

        let rfc3339 = parse_published("2026-08-24T10:00:00-07:00").unwrap();
        assert_eq!(rfc3339.to_string(), "2026-08-24 10:00:00");

        let bare = parse_published("2026-08-24T10:00:00").unwrap();
        assert_eq!(bare.to_string(), "2026-08-24 10:00:00");

        assert!(parse_published("yesterday-ish").is_none());
        assert!(parse_published("").is_none());
    }

    #[test]
    fn offset_is_stripped_not_converted() {
        // Same clock reading in two zones parses to the same naive time.
        let east = parse_published("2026-08-24T10:00:00+09:00").unwrap();
        let west = parse_published("2026-08-24T10:00:00-05:00").unwrap();
        assert_eq!(east, west);
    }
}
