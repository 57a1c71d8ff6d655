//! Data model for the tabular import pipeline.
//!
//! - **template**: destination schema ([`Template`]) and its loader
//! - **combiner**: strategies that merge several source cells into one value
//! - **file_data**: decoded file contents ([`FileData`])
//! - **mapping**: per-source-column mapping state ([`ColumnMapping`])
//! - **result**: the normalized row set handed to the host ([`ImportResult`])

pub mod combiner;
pub mod error;
pub mod file_data;
pub mod mapping;
pub mod result;
pub mod template;

pub use combiner::{BuiltinCombiner, Combiner, CombinerRegistry, default_combine};
pub use error::{ModelError, Result};
pub use file_data::{FileData, FileRow, is_blank_row};
pub use mapping::{ColumnMapping, ColumnMappings};
pub use result::{ImportResult, MappedRow, ResultColumn};
pub use template::{
    TEMPLATE_FILE_NAME, Template, TemplateColumn, TemplateSource, sanitize_key,
};
