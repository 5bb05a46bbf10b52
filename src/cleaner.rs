//! Clean a raw article table into the fixed output schema.
//!
//! Cleaning drops failed rows, flattens line breaks in the body text, parses
//! the published date and keeps only the publisher's display name. Any row
//! that survives filtering but violates the upstream format (no publisher,
//! unparseable date) fails the whole call; there is no per-row recovery.

use crate::error::CleanError;
use crate::models::{CleanArticle, RawArticle};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tracing::{debug, info, instrument};

/// Naive timestamp layouts accepted after RFC 2822 and RFC 3339. Taken as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Clean `raw` into the output table, preserving row order.
///
/// # Errors
///
/// [`CleanError::MissingPublisher`] or [`CleanError::UnparseablePublishedTime`]
/// for the first surviving row that violates the upstream format.
#[instrument(level = "info", skip_all, fields(rows = raw.len()))]
pub fn clean_fetched_articles(raw: &[RawArticle]) -> Result<Vec<CleanArticle>, CleanError> {
    let cleaned = raw
        .iter()
        .filter(|row| {
            let failed = row.is_failed();
            if failed {
                debug!(url = %row.url, "Dropping failed article");
            }
            !failed
        })
        .map(clean_row)
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        kept = cleaned.len(),
        dropped = raw.len() - cleaned.len(),
        "Cleaned fetched articles"
    );
    Ok(cleaned)
}

fn clean_row(row: &RawArticle) -> Result<CleanArticle, CleanError> {
    let publisher = row
        .publisher
        .as_ref()
        .ok_or_else(|| CleanError::MissingPublisher {
            url: row.url.clone(),
        })?;

    let published_time = parse_published_time(&row.published_date).ok_or_else(|| {
        CleanError::UnparseablePublishedTime {
            url: row.url.clone(),
            value: row.published_date.clone(),
        }
    })?;

    Ok(CleanArticle {
        entity: row.entity.clone(),
        source_publisher: publisher.name.clone(),
        title: row.title.clone(),
        full_text: normalize_full_text(&row.extraction.full_text()),
        url: row.url.clone(),
        published_time,
        published_date: published_time.date_naive(),
        image_url: row.extraction.image_url().map(|s| s.into_owned()),
    })
}

/// Replace every `\n` and `\r` with `||` and remove every backslash.
///
/// ```
/// assert_eq!(ticker_news::cleaner::normalize_full_text("line1\nline2\r\n"), "line1||line2||||");
/// ```
pub fn normalize_full_text(text: &str) -> String {
    text.replace(['\n', '\r'], "||").replace('\\', "")
}

/// Parse a published-date string as emitted by news-search backends.
///
/// Accepts RFC 2822/1123 (`Mon, 13 Oct 2025 07:00:00 GMT`), RFC 3339, and
/// plain `YYYY-MM-DD[ HH:MM[:SS]]` forms, the latter interpreted as UTC.
pub fn parse_published_time(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
                .map(|naive| naive.and_utc().fixed_offset())
        })
}
