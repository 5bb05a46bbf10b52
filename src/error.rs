//! Error types for the fetch and clean pipeline.
//!
//! Failures are split into two tiers:
//!
//! - **Per-article** failures ([`ExtractError`]) never escape the fetcher.
//!   They are folded into an [`Extraction::Failed`](crate::models::Extraction)
//!   row and the batch keeps going.
//! - **Batch** failures ([`SearchError`], [`CleanError`]) abort the whole
//!   invocation and surface to the caller through [`NewsError`].

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of the single search call made per invocation.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search backend returned status {0}")]
    Status(StatusCode),

    #[error("malformed search feed: {0}")]
    Feed(#[from] quick_xml::DeError),
}

/// Failure to download or parse one article page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download failed with status {status} for url: {url}")]
    Status { status: StatusCode, url: String },

    #[error("invalid article url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Upstream format violations that make a raw table uncleanable.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("article {url} has no publisher")]
    MissingPublisher { url: String },

    #[error("article {url} has an unparseable published date {value:?}")]
    UnparseablePublishedTime { url: String, value: String },
}

/// Failure to load the YAML settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level error for a fetch-and-clean invocation.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Clean(#[from] CleanError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_status_message_names_url() {
        let e = ExtractError::Status {
            status: StatusCode::NOT_FOUND,
            url: "http://x".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "download failed with status 404 Not Found for url: http://x"
        );
    }

    #[test]
    fn test_news_error_is_transparent_over_clean_error() {
        let e: NewsError = CleanError::MissingPublisher {
            url: "http://x".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "article http://x has no publisher");
    }
}
