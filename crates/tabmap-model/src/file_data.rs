//! Uniform tabular representation of an uploaded file.

use serde::{Deserialize, Serialize};

/// One non-blank row of the uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    /// Zero-based position among the non-blank rows.
    pub index: usize,
    /// Raw cell strings, in source-column order.
    pub values: Vec<String>,
}

impl FileRow {
    /// Cell at `column`, or `""` when the row is shorter.
    pub fn value(&self, column: usize) -> &str {
        self.values.get(column).map_or("", String::as_str)
    }
}

/// Decoded file contents.
///
/// Blank rows never appear in `rows`, and row indices are contiguous from 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_name: String,
    pub rows: Vec<FileRow>,
    /// All sheet names for spreadsheet uploads, empty for delimited text.
    pub sheet_list: Vec<String>,
    /// Non-fatal decode warnings.
    pub errors: Vec<String>,
}

impl FileData {
    /// Build file data from raw decoded rows, dropping blank rows and
    /// renumbering the survivors.
    pub fn from_raw_rows(
        file_name: impl Into<String>,
        raw_rows: Vec<Vec<String>>,
        sheet_list: Vec<String>,
        errors: Vec<String>,
    ) -> Self {
        let rows = raw_rows
            .into_iter()
            .filter(|values| !is_blank_row(values))
            .enumerate()
            .map(|(index, values)| FileRow { index, values })
            .collect();
        Self {
            file_name: file_name.into(),
            rows,
            sheet_list,
            errors,
        }
    }

    pub fn row(&self, index: usize) -> Option<&FileRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.values.len())
            .max()
            .unwrap_or(0)
    }

    pub fn has_multiple_sheets(&self) -> bool {
        self.sheet_list.len() > 1
    }
}

/// True if every cell is empty or whitespace-only.
pub fn is_blank_row(values: &[String]) -> bool {
    values.iter().all(|cell| cell.trim().is_empty())
}
