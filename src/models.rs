//! Data models for search results and the raw and cleaned article tables.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`SearchResult`]: One hit returned by the news-search backend
//! - [`Extraction`]: The per-article outcome of downloading and parsing a page
//! - [`RawArticle`]: A row of the raw table produced by the fetcher
//! - [`CleanArticle`]: A row of the cleaned table produced by the cleaner
//!
//! Both tables are plain `Vec`s of rows. Neither is persisted.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Substring that marks a row whose article could not be fetched.
pub const FAILURE_MARKER: &str = "Error when downloading and parsing article";

/// Column order of the cleaned table.
pub const CLEAN_COLUMNS: [&str; 8] = [
    "entity",
    "source_publisher",
    "title",
    "full_text",
    "url",
    "published_time",
    "published_date",
    "image_url",
];

/// The outlet that published an article.
///
/// Only `name` survives cleaning; the homepage is kept on the raw table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Publisher {
    /// Display name, e.g. `"Kompas"`.
    pub name: String,
    /// Outlet homepage, e.g. `"https://kompas.com"`.
    pub homepage_url: Option<String>,
}

/// One result returned by the news-search backend, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub publisher: Option<Publisher>,
    /// Publication date exactly as the backend emitted it.
    pub published_date: String,
    pub description: String,
}

/// Outcome of downloading and parsing a single article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The page was parsed.
    Parsed {
        text: String,
        image_url: Option<String>,
    },
    /// The download or parse failed. `detail` is the error's display text.
    Failed { url: String, detail: String },
}

impl Extraction {
    pub fn is_failed(&self) -> bool {
        matches!(self, Extraction::Failed { .. })
    }

    /// The `full_text` column: the body text, or a placeholder for failures.
    pub fn full_text(&self) -> Cow<'_, str> {
        match self {
            Extraction::Parsed { text, .. } => Cow::Borrowed(text),
            Extraction::Failed { url, detail } => Cow::Owned(failure_placeholder(url, detail)),
        }
    }

    /// The `image_url` column: the first image, or the same placeholder as
    /// [`full_text`](Self::full_text) for failures.
    pub fn image_url(&self) -> Option<Cow<'_, str>> {
        match self {
            Extraction::Parsed { image_url, .. } => image_url.as_deref().map(Cow::Borrowed),
            Extraction::Failed { url, detail } => {
                Some(Cow::Owned(failure_placeholder(url, detail)))
            }
        }
    }
}

fn failure_placeholder(url: &str, detail: &str) -> String {
    format!("{FAILURE_MARKER} from {url}: {detail}")
}

/// A row of the raw table: one search result enriched with its extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    /// The ticker the search was run for.
    pub entity: String,
    pub title: String,
    pub url: String,
    pub publisher: Option<Publisher>,
    pub published_date: String,
    /// Snippet the search backend returned with the result.
    pub description: String,
    pub extraction: Extraction,
}

impl RawArticle {
    pub fn from_search_result(entity: &str, result: SearchResult, extraction: Extraction) -> Self {
        Self {
            entity: entity.to_string(),
            title: result.title,
            url: result.url,
            publisher: result.publisher,
            published_date: result.published_date,
            description: result.description,
            extraction,
        }
    }

    /// Whether the cleaner must drop this row.
    pub fn is_failed(&self) -> bool {
        self.extraction.is_failed() || self.extraction.full_text().contains(FAILURE_MARKER)
    }
}

/// A row of the cleaned table.
///
/// Field order is the column order ([`CLEAN_COLUMNS`]) and is preserved by
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CleanArticle {
    pub entity: String,
    pub source_publisher: String,
    pub title: String,
    /// Body text with line breaks replaced by `||` and backslashes removed.
    pub full_text: String,
    pub url: String,
    pub published_time: DateTime<FixedOffset>,
    /// Calendar date of `published_time` in its own offset.
    pub published_date: NaiveDate,
    pub image_url: Option<String>,
}

impl CleanArticle {
    /// Column values rendered as strings, in [`CLEAN_COLUMNS`] order.
    pub fn values(&self) -> [String; 8] {
        [
            self.entity.clone(),
            self.source_publisher.clone(),
            self.title.clone(),
            self.full_text.clone(),
            self.url.clone(),
            self.published_time.to_rfc3339(),
            self.published_date.to_string(),
            self.image_url.clone().unwrap_or_default(),
        ]
    }
}

impl From<CleanArticle> for RawArticle {
    fn from(clean: CleanArticle) -> Self {
        Self {
            entity: clean.entity,
            title: clean.title,
            url: clean.url,
            publisher: Some(Publisher {
                name: clean.source_publisher,
                homepage_url: None,
            }),
            published_date: clean.published_time.to_rfc3339(),
            description: String::new(),
            extraction: Extraction::Parsed {
                text: clean.full_text,
                image_url: clean.image_url,
            },
        }
    }
}
