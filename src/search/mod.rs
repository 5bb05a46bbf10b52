//! News-search backends.
//!
//! A backend takes a [`SearchQuery`] (free text plus locale, result cap and a
//! date window) and returns an ordered list of [`SearchResult`]s. The fetcher
//! only talks to the [`NewsSearch`] trait, so tests can substitute a fake.
//!
//! # Supported Backends
//!
//! | Backend | Module | Method |
//! |---------|--------|--------|
//! | Google News | [`google_news`] | RSS search feed |

use crate::error::SearchError;
use crate::models::SearchResult;
use chrono::{Days, NaiveDate};

pub mod google_news;

pub use google_news::GoogleNews;

/// A single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text query, usually the ticker symbol.
    pub text: String,
    /// Interface language, e.g. `"id"`.
    pub language: String,
    /// Region code, e.g. `"ID"`.
    pub country: String,
    pub max_results: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SearchQuery {
    /// Build a query covering `[today - n_days, today]`.
    pub fn for_window(
        text: &str,
        n_days: u32,
        max_results: usize,
        today: NaiveDate,
        language: &str,
        country: &str,
    ) -> Self {
        let start_date = today
            .checked_sub_days(Days::new(u64::from(n_days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            text: text.to_string(),
            language: language.to_string(),
            country: country.to_string(),
            max_results,
            start_date,
            end_date: today,
        }
    }
}

/// A backend that answers news searches.
pub trait NewsSearch {
    /// Run one search. Results come back in backend order, at most
    /// `query.max_results` of them.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_window_spans_n_days_back_from_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let query = SearchQuery::for_window("BBCA", 2, 25, today, "id", "ID");
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2025, 2, 27).unwrap());
        assert_eq!(query.end_date, today);
        assert_eq!(query.text, "BBCA");
        assert_eq!(query.max_results, 25);
    }
}
