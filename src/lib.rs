//! # ticker_news
//!
//! Fetches news articles about a stock ticker from Google News search,
//! downloads and parses the full text of each article, and normalizes the
//! result into a fixed-schema table.
//!
//! ## Architecture
//!
//! Two stages run strictly in sequence for one ticker:
//! 1. **Fetching** ([`fetcher`]): one search call, then every result is
//!    downloaded and parsed one at a time with a pause in between. Failed
//!    downloads become placeholder rows instead of errors.
//! 2. **Cleaning** ([`cleaner`]): failed rows are dropped, body text is
//!    flattened, publisher and publication date are extracted, and columns are
//!    put in their fixed order.
//!
//! Data flows one way: ticker → search results → raw table → cleaned table.
//! Nothing is cached between calls.
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use ticker_news::{FetchOptions, GoogleNews, HttpArticleExtractor, fetch_and_clean};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let search = GoogleNews::new("ticker_news", Duration::from_secs(7))?;
//! let extractor = HttpArticleExtractor::new("ticker_news", Duration::from_secs(7))?;
//! let options = FetchOptions { n_days: 3, max_articles: 5, ..FetchOptions::default() };
//!
//! let table = fetch_and_clean(&search, &extractor, "BBCA", &options).await?;
//! println!("{}", ticker_news::outputs::table::render(&table));
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod models;
pub mod outputs;
pub mod search;
pub mod utils;

pub use cleaner::clean_fetched_articles;
pub use error::NewsError;
pub use extract::{ArticleExtractor, HttpArticleExtractor};
pub use fetcher::{FetchOptions, Pause, fetch_daily_stock_articles};
pub use models::{CleanArticle, RawArticle};
pub use search::{GoogleNews, NewsSearch};

/// Fetch articles about `ticker` and clean them in one go.
///
/// Either the complete cleaned table comes back or the first fatal error;
/// there is no partial result.
pub async fn fetch_and_clean<S, E>(
    search: &S,
    extractor: &E,
    ticker: &str,
    options: &FetchOptions,
) -> Result<Vec<CleanArticle>, NewsError>
where
    S: NewsSearch,
    E: ArticleExtractor,
{
    let raw = fetch_daily_stock_articles(search, extractor, ticker, options).await?;
    Ok(clean_fetched_articles(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::{FakeExtractor, FakeSearch, quick_options};

    #[tokio::test]
    async fn test_two_unreachable_of_five_leaves_three_clean_rows() {
        let urls = ["http://a", "http://b", "http://c", "http://d", "http://e"];
        let search = FakeSearch::with_urls(&urls);
        let extractor = FakeExtractor::failing_on(&["http://b", "http://e"]);

        let raw = fetch_daily_stock_articles(&search, &extractor, "BBCA", &quick_options(5))
            .await
            .unwrap();
        assert_eq!(raw.len(), 5);

        let cleaned = clean_fetched_articles(&raw).unwrap();
        assert_eq!(cleaned.len(), 3);
        assert_eq!(
            cleaned.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
            vec!["http://a", "http://c", "http://d"]
        );
        assert!(cleaned.iter().all(|r| r.full_text.ends_with("||second line")));
    }

    #[tokio::test]
    async fn test_fetch_and_clean_surfaces_clean_errors() {
        let mut search = FakeSearch::with_urls(&["http://a"]);
        search.results[0].published_date = "not a date".to_string();
        let extractor = FakeExtractor::failing_on(&[]);

        let err = fetch_and_clean(&search, &extractor, "BBCA", &quick_options(5))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::Clean(_)));
    }
}
