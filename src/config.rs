//! YAML settings file.
//!
//! Every key is optional; missing keys take the defaults below. Command-line
//! flags override whatever the file says.
//!
//! ```yaml
//! language: id
//! country: ID
//! n_days: 2
//! max_articles: 25
//! delay_secs: 10
//! jitter_ms: 0
//! request_timeout_secs: 7
//! user_agent: "Mozilla/5.0 (compatible; ticker_news/0.1)"
//! ```

use crate::error::ConfigError;
use crate::fetcher::{FetchOptions, Pause};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: String,
    pub country: String,
    pub n_days: u32,
    pub max_articles: usize,
    pub delay_secs: u64,
    pub jitter_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "id".to_string(),
            country: "ID".to_string(),
            n_days: 2,
            max_articles: 25,
            delay_secs: 10,
            jitter_ms: 0,
            request_timeout_secs: 7,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let path_str = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let settings = Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: path_str.clone(),
            source,
        })?;
        info!(path = %path_str, "Loaded settings");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            n_days: self.n_days,
            max_articles: self.max_articles,
            language: self.language.clone(),
            country: self.country.clone(),
            pause: Pause {
                delay: Duration::from_secs(self.delay_secs),
                jitter: Duration::from_millis(self.jitter_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fetch_defaults() {
        assert_eq!(Settings::default().fetch_options(), FetchOptions::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("max_articles: 5\ndelay_secs: 1\n").unwrap();
        assert_eq!(settings.max_articles, 5);
        assert_eq!(settings.delay_secs, 1);
        assert_eq!(settings.n_days, 2);
        assert_eq!(settings.language, "id");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Settings::from_yaml("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_load_from_file_and_report_bad_yaml() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "country: US\nlanguage: en").unwrap();
        let settings = Settings::load(Some(good.path())).unwrap();
        assert_eq!(settings.country, "US");
        assert_eq!(settings.language, "en");

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "n_days: [not, a, number]").unwrap();
        assert!(matches!(
            Settings::load(Some(bad.path())),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/ticker_news.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
