//! Import steps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a session in the import flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStep {
    Upload,
    RowSelection,
    MapColumns,
    Complete,
}

impl ImportStep {
    /// Step after `self`. With `skip_header_row_selection`, the header step
    /// is never entered.
    pub fn next(self, skip_header_row_selection: bool) -> Self {
        match self {
            Self::Upload if skip_header_row_selection => Self::MapColumns,
            Self::Upload => Self::RowSelection,
            Self::RowSelection => Self::MapColumns,
            Self::MapColumns | Self::Complete => Self::Complete,
        }
    }

    /// Translation key for the stepper label; `Complete` has none.
    pub fn label_key(self) -> Option<&'static str> {
        match self {
            Self::Upload => Some(crate::i18n::STEP_UPLOAD),
            Self::RowSelection => Some(crate::i18n::STEP_SELECT_HEADER),
            Self::MapColumns => Some(crate::i18n::STEP_MAP_COLUMNS),
            Self::Complete => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::RowSelection => "row-selection",
            Self::MapColumns => "map-columns",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ImportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
