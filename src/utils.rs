//! Utility functions for string shortening and file system checks.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string to at most `max` characters for display.
///
/// Long strings are cut on a character boundary and get `"…(+N bytes)"`
/// appended, where N is the number of bytes dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_display("short", 100), "short");
/// assert_eq!(truncate_for_display(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_display(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then writes and removes a
/// probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_for_display("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_display(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_for_display("héllo", 2), "hé…(+3 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b");
        let nested = nested.to_str().unwrap();

        ensure_writable_dir(nested).await.unwrap();
        assert!(std::path::Path::new(nested).is_dir());
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_fails_under_a_regular_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let below_file = file.path().join("json");

        assert!(ensure_writable_dir(below_file.to_str().unwrap()).await.is_err());
    }
}
