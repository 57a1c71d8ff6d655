//! Tabular file ingestion.
//!
//! This crate turns uploaded bytes into a uniform [`FileData`] and exposes
//! the read-only views the header-row step needs.
//!
//! # Features
//!
//! - **Decoding**: CSV/TSV via `csv`, XLS/XLSX via `calamine` (first sheet only)
//! - **Blank rows**: rows whose cells are all empty are dropped and the rest renumbered
//! - **Header split**: sample rows and data offset for a chosen header row
//! - **Preview**: bounded row preview with a multi-sheet notice
//! - **Header heuristic**: suggest the most likely header row
//!
//! # Example
//!
//! ```ignore
//! use tabmap_ingest::{decode, upload_columns};
//!
//! let data = decode("people.csv", &bytes)?;
//! let columns = upload_columns(&data, 0);
//! ```
//!
//! [`FileData`]: tabmap_model::FileData

mod decode;
mod error;
mod format;
mod header;
mod preview;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoding ===
pub use decode::{decode, decode_as};
pub use format::FileFormat;

// === Header Rows ===
pub use header::{
    SAMPLE_ROW_COUNT, UploadColumn, data_start_offset, sample_rows, source_column_names,
    suggest_header_row, upload_columns,
};

// === Preview ===
pub use preview::{PREVIEW_MAX_COLUMNS, PREVIEW_ROW_LIMIT, RowPreview};
