//! Fetch news for a ticker and enrich each result with its article text.
//!
//! One search call per invocation, then every result is downloaded and
//! parsed strictly one after another, with a pause between requests so the
//! content hosts don't flag the traffic as scraping.
//!
//! Per-article failures are recorded as [`Extraction::Failed`] rows and never
//! abort the batch. Only a failed search (or an invalid request) is an error.

use crate::error::NewsError;
use crate::extract::ArticleExtractor;
use crate::models::{Extraction, RawArticle, SearchResult};
use crate::search::{NewsSearch, SearchQuery};
use chrono::{Local, NaiveDate};
use futures::stream::{self, StreamExt};
use rand::{Rng, rng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// Delay inserted after every article download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pause {
    pub delay: Duration,
    /// Upper bound of a random extra delay added to `delay`.
    pub jitter: Duration,
}

impl Pause {
    pub const fn none() -> Self {
        Self {
            delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    fn next_delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.delay;
        }
        self.delay + Duration::from_millis(rng().random_range(0..=jitter_ms))
    }

    async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            debug!(?delay, "Pausing before next article");
            sleep(delay).await;
        }
    }
}

impl Default for Pause {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(10),
            jitter: Duration::ZERO,
        }
    }
}

/// Parameters of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Look back this many days from today.
    pub n_days: u32,
    pub max_articles: usize,
    pub language: String,
    pub country: String,
    pub pause: Pause,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            n_days: 2,
            max_articles: 25,
            language: "id".to_string(),
            country: "ID".to_string(),
            pause: Pause::default(),
        }
    }
}

/// Fetch daily articles about `ticker` over the last `options.n_days` days.
///
/// Returns one [`RawArticle`] per search result, in search order, each with
/// `entity` set to `ticker`.
///
/// # Errors
///
/// [`NewsError::InvalidRequest`] for an empty ticker or a zero window/cap,
/// [`NewsError::Search`] when the search call itself fails.
pub async fn fetch_daily_stock_articles<S, E>(
    search: &S,
    extractor: &E,
    ticker: &str,
    options: &FetchOptions,
) -> Result<Vec<RawArticle>, NewsError>
where
    S: NewsSearch,
    E: ArticleExtractor,
{
    let today = Local::now().date_naive();
    fetch_articles_as_of(search, extractor, ticker, options, today).await
}

#[instrument(level = "info", skip(search, extractor, options), fields(n_days = options.n_days, max_articles = options.max_articles))]
async fn fetch_articles_as_of<S, E>(
    search: &S,
    extractor: &E,
    ticker: &str,
    options: &FetchOptions,
    today: NaiveDate,
) -> Result<Vec<RawArticle>, NewsError>
where
    S: NewsSearch,
    E: ArticleExtractor,
{
    validate(ticker, options)?;

    let query = SearchQuery::for_window(
        ticker,
        options.n_days,
        options.max_articles,
        today,
        &options.language,
        &options.country,
    );
    let mut results = search.search(&query).await?;
    results.truncate(options.max_articles);
    info!(count = results.len(), "Fetched search results");

    let articles: Vec<RawArticle> = stream::iter(results.into_iter().enumerate())
        .then(|(index, result): (usize, SearchResult)| async move {
            let extraction = download_and_parse(extractor, &result.url).await;
            debug!(index, url = %result.url, failed = extraction.is_failed(), "Processed article");
            options.pause.wait().await;
            RawArticle::from_search_result(ticker, result, extraction)
        })
        .collect()
        .await;

    let failed = articles.iter().filter(|a| a.extraction.is_failed()).count();
    info!(
        total = articles.len(),
        failed,
        "Fetched article contents"
    );
    Ok(articles)
}

/// Download and parse one article, folding any failure into the result.
async fn download_and_parse<E: ArticleExtractor>(extractor: &E, url: &str) -> Extraction {
    match extractor.extract(url).await {
        Ok(article) => Extraction::Parsed {
            image_url: article.top_image().map(str::to_string),
            text: article.text,
        },
        Err(e) => {
            error!(%url, error = %e, "Error when downloading and parsing article");
            Extraction::Failed {
                url: url.to_string(),
                detail: e.to_string(),
            }
        }
    }
}

fn validate(ticker: &str, options: &FetchOptions) -> Result<(), NewsError> {
    if ticker.trim().is_empty() {
        return Err(NewsError::InvalidRequest("ticker must not be empty".to_string()));
    }
    if options.n_days == 0 {
        return Err(NewsError::InvalidRequest("n_days must be positive".to_string()));
    }
    if options.max_articles == 0 {
        return Err(NewsError::InvalidRequest(
            "max_articles must be positive".to_string(),
        ));
    }
    Ok(())
}
