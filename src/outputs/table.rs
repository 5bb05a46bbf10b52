//! Plain-text rendering of the cleaned table.

use crate::models::{CLEAN_COLUMNS, CleanArticle};
use crate::utils::truncate_for_display;
use itertools::Itertools;

/// Widest a single cell may be before it is truncated.
const MAX_CELL_CHARS: usize = 40;

/// Render `rows` as a left-aligned table with a header line, one row per line.
pub fn render(rows: &[CleanArticle]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.values()
                .iter()
                .map(|v| truncate_for_display(v, MAX_CELL_CHARS))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = CLEAN_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = render_line(CLEAN_COLUMNS.iter().copied(), &widths);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out.push_str(&format!("[{} rows x {} columns]\n", rows.len(), CLEAN_COLUMNS.len()));
    out
}

fn render_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(v, &w)| format!("{v:<w$}"))
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    #[test]
    fn test_render_header_rows_and_footer() {
        let row = CleanArticle {
            entity: "BBCA".to_string(),
            source_publisher: "Kompas".to_string(),
            title: "Saham BBCA".to_string(),
            full_text: "x".repeat(100),
            url: "https://kompas.com/a".to_string(),
            published_time: DateTime::parse_from_rfc3339("2025-10-13T07:00:00+00:00").unwrap(),
            published_date: NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
            image_url: None,
        };

        let rendered = render(&[row]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("entity  source_publisher  title"));
        assert!(lines[0].ends_with("image_url"));
        assert!(lines[1].starts_with("BBCA  "));
        assert!(lines[1].contains("…(+60 bytes)"));
        assert_eq!(lines[2], "[1 rows x 8 columns]");
    }

    #[test]
    fn test_render_empty_table() {
        let rendered = render(&[]);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.ends_with("[0 rows x 8 columns]\n"));
    }
}
