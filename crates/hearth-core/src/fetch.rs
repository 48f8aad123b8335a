use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::{Error, Result};

const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

const HEARTH_USER_AGENT: &str = "Mozilla/5.0 (compatible; hearth/0.1)";

/// Minimal network collaborator: GET a URL, hand back the body as text.
///
/// Everything that talks to the outside world goes through this trait so
/// the pipelines can run against canned bodies in tests.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher with a client-level timeout.
///
/// Requests are not retried; a failed source simply contributes nothing
/// to the current batch and gets another chance on the next fetch.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/rss+xml,application/atom+xml,application/json,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(HEARTH_USER_AGENT));
        headers
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String> {
        // Validate before hitting the network
        Url::parse(url)?;

        let response = self
            .client
            .get(url)
            .headers(Self::build_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!("HTTP {} for URL: {}", status, url)));
        }

        let body: Bytes = response.bytes().await?;
        if body.len() > MAX_BODY_BYTES {
            return Err(Error::Upstream(format!(
                "Response too large ({} bytes) for URL: {}",
                body.len(),
                url
            )));
        }

        // Feeds in the wild lie about their encoding; a lossy decode keeps
        // one bad byte from discarding the whole source.
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
pub use stub::StubFetcher;


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_counts_calls_and_misses() {
        let fetcher = StubFetcher::new().with_body("http://a.test/feed", "<rss/>");

        assert_eq!(fetcher.get_text("http://a.test/feed").await.unwrap(), "<rss/>");
        assert!(fetcher.get_text("http://b.test/feed").await.is_err());
        assert_eq!(fetcher.calls(), 2);
    }

    #[test]
    fn http_fetcher_builds() {
        assert!(HttpFetcher::new(Duration::from_secs(8)).is_ok());
    }
}
