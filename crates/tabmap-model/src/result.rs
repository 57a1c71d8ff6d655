//! Normalized output handed to the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A destination column present in the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub key: String,
    pub name: String,
}

impl ResultColumn {
    /// Result columns are named after their key.
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
        }
    }
}

/// One transformed data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedRow {
    /// Zero-based index counted from the first data row.
    pub index: usize,
    /// Combined value per destination key.
    pub values: BTreeMap<String, String>,
}

impl MappedRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Completed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub num_rows: usize,
    pub num_columns: usize,
    /// Always `None` for a successful transform.
    pub error: Option<String>,
    pub columns: Vec<ResultColumn>,
    pub rows: Vec<MappedRow>,
}

impl ImportResult {
    /// Assemble a result, deriving the counts.
    pub fn from_rows(columns: Vec<ResultColumn>, rows: Vec<MappedRow>) -> Self {
        Self {
            num_rows: rows.len(),
            num_columns: columns.len(),
            error: None,
            columns,
            rows,
        }
    }
}
