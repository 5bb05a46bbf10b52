//! Command-line interface definitions for ticker_news.
//!
//! Flags override values from the optional YAML settings file, which in turn
//! override the built-in defaults.

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Fetch and clean recent news articles about a stock ticker.
///
/// # Examples
///
/// ```sh
/// # Last 3 days, at most 5 articles
/// ticker_news BBCA -n 3 -m 5
///
/// # Also write the cleaned table as JSON
/// ticker_news BBCA -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Ticker symbol to search news for
    pub ticker: String,

    /// Fetch news from the past N days up to today
    #[arg(short, long)]
    pub n_days: Option<u32>,

    /// Maximum number of articles to fetch
    #[arg(short, long)]
    pub max_articles: Option<usize>,

    /// Seconds to wait after each article download
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// Search interface language (e.g. "id")
    #[arg(long)]
    pub language: Option<String>,

    /// Search region code (e.g. "ID")
    #[arg(long)]
    pub country: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long, env = "TICKER_NEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output directory for the cleaned table as JSON
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}

impl Cli {
    /// Apply flags on top of `settings`.
    pub fn merge_into(&self, mut settings: Settings) -> Settings {
        if let Some(n_days) = self.n_days {
            settings.n_days = n_days;
        }
        if let Some(max_articles) = self.max_articles {
            settings.max_articles = max_articles;
        }
        if let Some(delay_secs) = self.delay_secs {
            settings.delay_secs = delay_secs;
        }
        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        if let Some(country) = &self.country {
            settings.country = country.clone();
        }
        settings
    }
}
