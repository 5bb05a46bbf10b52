//! Google News RSS search backend.
//!
//! Queries the public RSS search feed at `news.google.com/rss/search`. The
//! date window is expressed with Google's `after:`/`before:` query operators
//! and the locale with the `hl`, `gl` and `ceid` parameters.

use crate::error::SearchError;
use crate::models::{Publisher, SearchResult};
use crate::search::{NewsSearch, SearchQuery};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

const GOOGLE_NEWS_SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Google News RSS search client.
#[derive(Debug, Clone)]
pub struct GoogleNews {
    client: Client,
    base_url: String,
}

impl GoogleNews {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: GOOGLE_NEWS_SEARCH_URL.to_string(),
        })
    }

    /// Point the client at a different feed endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the feed URL for `query`.
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let q = format!(
            "{} after:{} before:{}",
            query.text,
            query.start_date.format("%Y-%m-%d"),
            query.end_date.format("%Y-%m-%d"),
        );
        format!(
            "{}?q={}&hl={lang}&gl={country}&ceid={country}:{lang}",
            self.base_url,
            urlencoding::encode(&q),
            lang = query.language,
            country = query.country,
        )
    }
}

impl NewsSearch for GoogleNews {
    #[instrument(level = "info", skip_all, fields(query = %query.text))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.search_url(query);
        debug!(%url, "Fetching Google News RSS");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }
        let body = response.text().await?;

        let results = parse_feed(&body, query.max_results)?;
        info!(
            count = results.len(),
            start = %query.start_date,
            end = %query.end_date,
            "Google News search returned results"
        );
        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(rename = "pubDate", default)]
    pub_date: String,
    #[serde(default)]
    description: String,
    source: Option<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    #[serde(rename = "@url")]
    url: Option<String>,
    #[serde(rename = "$text", default)]
    name: String,
}

/// Parse an RSS 2.0 search feed into at most `limit` results, in feed order.
///
/// Items without a link are skipped.
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;

    let results = rss
        .channel
        .items
        .into_iter()
        .filter(|item| !item.link.trim().is_empty())
        .take(limit)
        .map(|item| SearchResult {
            title: item.title.trim().to_string(),
            url: item.link.trim().to_string(),
            publisher: item.source.map(|s| Publisher {
                name: s.name.trim().to_string(),
                homepage_url: s.url,
            }),
            published_date: item.pub_date.trim().to_string(),
            description: item.description,
        })
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"BBCA" - Google Berita</title>
    <link>https://news.google.com/search?q=BBCA</link>
    <language>id</language>
    <item>
      <title>Saham BBCA Menguat - Kompas</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <guid isPermaLink="false">abc</guid>
      <pubDate>Mon, 13 Oct 2025 07:00:00 GMT</pubDate>
      <description>&lt;a href="https://kompas.com/a"&gt;Saham BBCA&lt;/a&gt;</description>
      <source url="https://kompas.com">Kompas</source>
    </item>
    <item>
      <title>Laba BCA &amp; Dividen - CNBC</title>
      <link>https://news.google.com/rss/articles/def</link>
      <pubDate>Tue, 14 Oct 2025 02:30:00 GMT</pubDate>
      <source url="https://cnbcindonesia.com">CNBC Indonesia</source>
    </item>
    <item>
      <title>Tanpa sumber</title>
      <link>https://news.google.com/rss/articles/ghi</link>
      <pubDate>Tue, 14 Oct 2025 03:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_preserves_order_and_publisher() {
        let results = parse_feed(FEED, 25).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Saham BBCA Menguat - Kompas");
        assert_eq!(results[0].url, "https://news.google.com/rss/articles/abc");
        assert_eq!(results[0].published_date, "Mon, 13 Oct 2025 07:00:00 GMT");
        assert_eq!(
            results[0].publisher,
            Some(Publisher {
                name: "Kompas".to_string(),
                homepage_url: Some("https://kompas.com".to_string()),
            })
        );
        assert_eq!(results[1].title, "Laba BCA & Dividen - CNBC");
        assert_eq!(results[2].publisher, None);
    }

    #[test]
    fn test_parse_feed_truncates_to_limit() {
        let results = parse_feed(FEED, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].url, "https://news.google.com/rss/articles/def");
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        assert!(parse_feed("<html><body>blocked</body></html>", 5).is_err());
    }

    #[test]
    fn test_search_url_encodes_window_and_locale() {
        let client = GoogleNews::new("test-agent", Duration::from_secs(5)).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
        let query = SearchQuery::for_window("BBCA", 3, 5, today, "id", "ID");
        assert_eq!(
            client.search_url(&query),
            "https://news.google.com/rss/search?q=BBCA%20after%3A2025-10-13%20before%3A2025-10-16&hl=id&gl=ID&ceid=ID:id"
        );

        let local = client.with_base_url("http://127.0.0.1:8080/rss");
        assert!(local.search_url(&query).starts_with("http://127.0.0.1:8080/rss?q=BBCA"));
    }
}
