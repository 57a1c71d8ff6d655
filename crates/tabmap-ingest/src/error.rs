//! Error types for file ingestion.

use thiserror::Error;

/// Errors that can occur while decoding an upload.
///
/// Malformed delimited rows are not errors; they are reported as warnings
/// in `FileData::errors`.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file extension is not one of csv, tsv, xls or xlsx.
    #[error("unsupported file format '{extension}' for {file_name}")]
    UnsupportedFormat {
        file_name: String,
        extension: String,
    },

    /// The spreadsheet container could not be opened or read.
    #[error("failed to read spreadsheet {file_name}: {message}")]
    Spreadsheet { file_name: String, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
