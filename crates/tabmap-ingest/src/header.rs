//! Header-row handling: column names, sample data and data offset.

use serde::{Deserialize, Serialize};
use tabmap_model::{FileData, FileRow};

/// Number of rows after the header shown as sample data.
pub const SAMPLE_ROW_COUNT: usize = 3;

/// Rows inspected by [`suggest_header_row`].
const HEADER_PROBE_ROWS: usize = 5;

/// A source column as seen from the chosen header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadColumn {
    /// Source column position.
    pub index: usize,
    /// Header cell text, possibly empty.
    pub name: String,
    /// Up to [`SAMPLE_ROW_COUNT`] values from the rows after the header.
    pub sample_data: Vec<String>,
}

/// First data row for a given header row.
pub fn data_start_offset(header_row: usize) -> usize {
    header_row + 1
}

/// Up to [`SAMPLE_ROW_COUNT`] rows immediately after the header row.
pub fn sample_rows(data: &FileData, header_row: usize) -> &[FileRow] {
    let start = data_start_offset(header_row).min(data.rows.len());
    let end = (start + SAMPLE_ROW_COUNT).min(data.rows.len());
    &data.rows[start..end]
}

/// Header cell texts, one per source column. Empty if the row does not exist.
pub fn source_column_names(data: &FileData, header_row: usize) -> Vec<String> {
    data.row(header_row)
        .map(|row| row.values.clone())
        .unwrap_or_default()
}

/// Source columns with their sample data.
pub fn upload_columns(data: &FileData, header_row: usize) -> Vec<UploadColumn> {
    let samples = sample_rows(data, header_row);
    source_column_names(data, header_row)
        .into_iter()
        .enumerate()
        .map(|(index, name)| UploadColumn {
            index,
            name,
            sample_data: samples
                .iter()
                .map(|row| row.value(index).to_string())
                .collect(),
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
    identifier: usize,
}

impl RowStats {
    fn ratio(self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }

    fn non_empty_ratio(self) -> f64 {
        self.ratio(self.non_empty)
    }

    fn numeric_ratio(self) -> f64 {
        self.ratio(self.numeric)
    }

    fn alpha_ratio(self) -> f64 {
        self.ratio(self.alpha)
    }

    fn identifier_ratio(self) -> f64 {
        self.ratio(self.identifier)
    }

    fn empty_ratio(self) -> f64 {
        1.0 - self.non_empty_ratio()
    }
}

fn row_stats(row: &[String]) -> RowStats {
    let mut stats = RowStats {
        total: row.len(),
        ..RowStats::default()
    };
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if trimmed.parse::<f64>().is_ok() {
            stats.numeric += 1;
        }
        if trimmed.chars().any(|ch| ch.is_alphabetic()) {
            stats.alpha += 1;
        }
        if is_identifier_like(trimmed) {
            stats.identifier += 1;
        }
    }
    stats
}

fn is_identifier_like(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

// Mostly-empty rows (titles, notes) count as neither header nor data.
fn is_data_like(stats: RowStats) -> bool {
    stats.numeric_ratio() >= 0.2 || (stats.empty_ratio() >= 0.2 && stats.non_empty_ratio() >= 0.5)
}

fn is_identifier_row(stats: RowStats) -> bool {
    stats.identifier_ratio() >= 0.6 && stats.numeric_ratio() <= 0.1
}

fn is_header_like(stats: RowStats) -> bool {
    stats.non_empty_ratio() >= 0.8 && stats.alpha_ratio() >= 0.5 && stats.numeric_ratio() <= 0.1
}

/// Guess which row holds the column names.
///
/// Looks at the first few rows, finds where data-like rows begin, and picks
/// the last header-like row before that, preferring identifier-style names.
/// Falls back to row 0.
pub fn suggest_header_row(data: &FileData) -> usize {
    if data.is_empty() {
        return 0;
    }
    let stats: Vec<RowStats> = data
        .rows
        .iter()
        .take(HEADER_PROBE_ROWS)
        .map(|row| row_stats(&row.values))
        .collect();
    let data_index = stats.iter().position(|stat| is_data_like(*stat));
    let search_end = data_index.unwrap_or(1).max(1);

    let mut candidate = 0usize;
    let mut picked_identifier = false;
    for (idx, stat) in stats.iter().take(search_end).enumerate() {
        if is_identifier_row(*stat) {
            candidate = idx;
            picked_identifier = true;
        } else if !picked_identifier && is_header_like(*stat) {
            candidate = idx;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(rows: &[&[&str]]) -> FileData {
        FileData::from_raw_rows(
            "t.csv",
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_upload_columns_with_samples() {
        let data = data(&[
            &["Name", "Email"],
            &["Ada", "ada@example.com"],
            &["Grace"],
            &["Alan", "alan@example.com"],
            &["Edsger", "ed@example.com"],
        ]);
        let columns = upload_columns(&data, 0);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "Name");
        assert_eq!(columns[0].sample_data, vec!["Ada", "Grace", "Alan"]);
        assert_eq!(
            columns[1].sample_data,
            vec!["ada@example.com", "", "alan@example.com"]
        );
    }

    #[test]
    fn test_sample_rows_near_end() {
        let data = data(&[&["junk"], &["Name"], &["Ada"]]);
        assert_eq!(data_start_offset(1), 2);
        assert_eq!(sample_rows(&data, 1).len(), 1);
        assert!(sample_rows(&data, 2).is_empty());
        assert!(sample_rows(&data, 10).is_empty());
    }

    #[test]
    fn test_missing_header_row_has_no_columns() {
        let data = data(&[&["Name"]]);
        assert!(source_column_names(&data, 4).is_empty());
        assert!(upload_columns(&data, 4).is_empty());
    }

    #[test]
    fn test_suggest_header_row_skips_title() {
        let data = data(&[
            &["Customer export", "", ""],
            &["first_name", "last_name", "age"],
            &["Ada", "Lovelace", "36"],
        ]);
        assert_eq!(suggest_header_row(&data), 1);
    }

    #[test]
    fn test_suggest_header_row_defaults_to_first() {
        let data = data(&[&["Name", "Age"], &["Ada", "36"]]);
        assert_eq!(suggest_header_row(&data), 0);
        assert_eq!(suggest_header_row(&FileData::default()), 0);
    }
}
