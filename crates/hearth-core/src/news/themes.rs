use super::models::{ellipsize, Article, Digest, ThemeBlock};

/// Bucket for articles no keyword claims. Always ordered last.
pub const OTHER_THEME: &str = "Other";

// Scanned in order; the first theme whose keyword appears in the lowered
// title wins. Keywords are plain substrings, so they are chosen long
// enough not to fire inside unrelated words.
const THEMES: &[(&str, &[&str])] = &[
    (
        "Tech & AI",
        &[
            "apple", "google", "microsoft", "openai", "nvidia", "chip", "software", "startup",
            "iphone", "android", "robot", "crypto", "artificial intelligence",
        ],
    ),
    (
        "World",
        &[
            "election", "ukraine", "china", "russia", "israel", "minister", "president",
            "united nations", "border", "treaty", "sanctions",
        ],
    ),
    (
        "Business",
        &[
            "market", "stocks", "economy", "inflation", "earnings", "bank", "billion", "ipo",
            "merger",
        ],
    ),
    (
        "Science & Health",
        &[
            "nasa", "space", "study", "vaccine", "cancer", "climate", "researchers", "health",
            "telescope",
        ],
    ),
    (
        "Sports",
        &[
            "league", "match", "season", "coach", "playoff", "striker", "transfer", "champions",
            "tournament",
        ],
    ),
];

/// Theme label for a single title.
pub fn theme_for_title(title: &str) -> &'static str {
    let lowered = title.to_lowercase();
    for (theme, keywords) in THEMES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return theme;
        }
    }
    OTHER_THEME
}

/// Group articles into the themed digest view.
///
/// Themes come out in table order with "Other" last, empty themes are
/// omitted, and each theme keeps only its first `max_per_theme` articles
/// in their original relative order. Headline titles are re-capped to the
/// tighter digest budget.
pub fn build_digest(articles: &[Article], max_per_theme: usize, title_limit: usize) -> Digest {
    let mut buckets: Vec<(&'static str, Vec<Article>)> =
        THEMES.iter().map(|(theme, _)| (*theme, Vec::new())).collect();
    buckets.push((OTHER_THEME, Vec::new()));

    for article in articles {
        let theme = theme_for_title(&article.title);
        if let Some((_, bucket)) = buckets.iter_mut().find(|(name, _)| *name == theme) {
            if bucket.len() < max_per_theme {
                let mut headline = article.clone();
                headline.title = ellipsize(&headline.title, title_limit);
                bucket.push(headline);
            }
        }
    }

    Digest {
        themes: buckets
            .into_iter()
            .filter(|(_, headlines)| !headlines.is_empty())
            .map(|(theme, headlines)| ThemeBlock {
                theme: theme.to_string(),
                headlines,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            link: "https://example.test/a".to_string(),
            source: "Feed".to_string(),
            category: "general".to_string(),
            published: String::new(),
            summary: String::new(),
        }
    }

    #[test]
    fn keyword_match_is_case_insensitive_first_wins() {
        assert_eq!(theme_for_title("Apple unveils new chip"), "Tech & AI");
        assert_eq!(theme_for_title("ELECTION results delayed"), "World");
        assert_eq!(theme_for_title("Quiet day in the village"), OTHER_THEME);
    }

    #[test]
    fn earlier_theme_claims_ambiguous_titles() {
        // "google" (Tech & AI) outranks "election" (World) in table order.
        assert_eq!(theme_for_title("Google sued over election ads"), "Tech & AI");
    }

    #[test]
    fn digest_groups_in_table_order_and_skips_empty_themes() {
        let articles = vec![
            article("Champions league final tonight"),
            article("Apple unveils new chip"),
            article("A calm afternoon"),
        ];

        let digest = build_digest(&articles, 3, 80);
        let themes: Vec<&str> = digest.themes.iter().map(|b| b.theme.as_str()).collect();

        assert_eq!(themes, vec!["Tech & AI", "Sports", "Other"]);
    }

    #[test]
    fn digest_caps_each_theme_preserving_order() {
        let articles = vec![
            article("Apple event recap"),
            article("Google IO highlights"),
            article("Nvidia earnings beat"),
            article("Microsoft teams update"),
        ];

        let digest = build_digest(&articles, 3, 80);

        assert_eq!(digest.themes.len(), 1);
        let headlines: Vec<&str> = digest.themes[0]
            .headlines
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(
            headlines,
            vec!["Apple event recap", "Google IO highlights", "Nvidia earnings beat"]
        );
    }

    #[test]
    fn digest_recaps_titles_to_the_tighter_budget() {
        let long = format!("Apple {}", "very ".repeat(30));
        let digest = build_digest(&[article(long.trim())], 3, 80);

        let title = &digest.themes[0].headlines[0].title;
        assert_eq!(title.chars().count(), 80);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn empty_input_is_an_empty_digest() {
        assert!(build_digest(&[], 3, 80).themes.is_empty());
    }
}
