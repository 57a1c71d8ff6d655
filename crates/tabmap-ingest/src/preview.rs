//! Bounded preview of decoded rows for header-row selection.

use serde::{Deserialize, Serialize};
use tabmap_model::{FileData, FileRow};

/// Maximum rows shown in a preview.
pub const PREVIEW_ROW_LIMIT: usize = 50;
/// Maximum values shown per preview row.
pub const PREVIEW_MAX_COLUMNS: usize = 7;

/// Leading rows of a file, each truncated to a fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPreview {
    pub rows: Vec<FileRow>,
    /// Total non-blank rows in the file.
    pub total_rows: usize,
    /// Name of the only imported sheet when the workbook has several.
    pub first_sheet_only: Option<String>,
}

impl RowPreview {
    pub fn new(data: &FileData) -> Self {
        let rows = data
            .rows
            .iter()
            .take(PREVIEW_ROW_LIMIT)
            .map(|row| FileRow {
                index: row.index,
                values: row.values.iter().take(PREVIEW_MAX_COLUMNS).cloned().collect(),
            })
            .collect();
        let first_sheet_only = if data.has_multiple_sheets() {
            data.sheet_list.first().cloned()
        } else {
            None
        };
        Self {
            rows,
            total_rows: data.len(),
            first_sheet_only,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.total_rows > self.rows.len()
    }
}
