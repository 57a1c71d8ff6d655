//! Accepted upload formats.

use std::fmt;

use crate::error::{IngestError, Result};

/// Upload format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Tsv,
    Xls,
    Xlsx,
}

impl FileFormat {
    /// Match a lowercased extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "xls" => Some(Self::Xls),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Determine the format from a file name's last extension.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = extension_of(file_name);
        Self::from_extension(&extension).ok_or_else(|| IngestError::UnsupportedFormat {
            file_name: file_name.to_string(),
            extension,
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
        }
    }

    /// Field delimiter for delimited-text formats.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xls | Self::Xlsx => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Lowercased text after the last `.`, or empty when there is none.
fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}
