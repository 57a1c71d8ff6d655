//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The source column index does not exist in the uploaded file.
    #[error("source column {index} is out of range ({columns} columns)")]
    SourceColumnOutOfRange { index: usize, columns: usize },

    /// The destination key is not defined by the template.
    #[error("unknown destination key '{0}'")]
    UnknownDestination(String),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
