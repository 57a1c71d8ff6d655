//! Session error types.

use tabmap_map::MappingError;
use tabmap_model::ModelError;
use thiserror::Error;

use crate::step::ImportStep;

/// Errors surfaced by an [`crate::ImportSession`].
///
/// Only `Initialization` is fatal; every other kind leaves the session
/// usable in its current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The template could not be loaded; no session exists.
    #[error(transparent)]
    Initialization(#[from] ModelError),

    /// The upload's extension is not accepted. `message` is translated.
    #[error("{message}")]
    UnsupportedFormat { extension: String, message: String },

    /// The file could not be read or its container could not be decoded.
    #[error("{0}")]
    Decode(String),

    /// Required destination columns are not mapped. `message` is translated.
    #[error("{message}")]
    Validation {
        missing: Vec<String>,
        message: String,
    },

    /// The operation is not valid in the current step.
    #[error("operation requires step '{expected}' but the session is at '{actual}'")]
    InvalidStep {
        expected: ImportStep,
        actual: ImportStep,
    },

    /// No file has been uploaded yet.
    #[error("no file has been uploaded")]
    NoFile,

    /// A non-multiple destination is already held by another source column.
    #[error("destination '{key}' is already mapped to column {column}")]
    DestinationTaken { key: String, column: usize },

    /// The chosen header row does not exist.
    #[error("header row {row} is out of range ({rows} rows)")]
    HeaderRowOutOfRange { row: usize, rows: usize },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
