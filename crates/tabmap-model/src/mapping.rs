//! Per-source-column mapping state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping of one source column onto a destination key.
///
/// `include` is only ever true when `key` is non-empty. `selected` marks a
/// column that currently occupies its destination key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub key: String,
    pub include: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub is_multiple: bool,
}

impl ColumnMapping {
    /// A column with no destination.
    pub fn unmapped() -> Self {
        Self::default()
    }

    /// A column claiming `key`.
    pub fn for_key(key: impl Into<String>, is_multiple: bool) -> Self {
        let key = key.into();
        let mapped = !key.is_empty();
        Self {
            key,
            include: mapped,
            selected: mapped,
            is_multiple,
        }
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Mappings keyed by source-column index.
pub type ColumnMappings = BTreeMap<usize, ColumnMapping>;
