//! JSON output of the cleaned article table.
//!
//! The table is written as a JSON array of row objects whose keys follow the
//! cleaned column order, one file per ticker per day.

use crate::models::CleanArticle;
use crate::utils::ensure_writable_dir;
use chrono::NaiveDate;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Write `rows` to `{json_output_dir}/{date}/{entity}.json`.
///
/// Returns the path written.
#[instrument(level = "info", skip(rows), fields(rows = rows.len()))]
pub async fn write_table(
    rows: &[CleanArticle],
    json_output_dir: &str,
    entity: &str,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(rows)?;

    let full_json_dir = format!("{}/{}", json_output_dir.trim_end_matches('/'), date);
    ensure_writable_dir(&full_json_dir).await?;

    let path = PathBuf::from(&full_json_dir).join(format!("{entity}.json"));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote cleaned table JSON");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_write_table_under_dated_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
        let rows = vec![CleanArticle {
            entity: "BBCA".to_string(),
            source_publisher: "Kompas".to_string(),
            title: "Saham BBCA".to_string(),
            full_text: "a||b".to_string(),
            url: "https://kompas.com/a".to_string(),
            published_time: DateTime::parse_from_rfc3339("2025-10-13T07:00:00+00:00").unwrap(),
            published_date: NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
            image_url: None,
        }];

        let path = write_table(&rows, dir, "BBCA", date).await.unwrap();
        assert_eq!(path, tmp.path().join("2025-10-16").join("BBCA.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        let back: Vec<CleanArticle> = serde_json::from_str(&written).unwrap();
        assert_eq!(back, rows);
    }
}
