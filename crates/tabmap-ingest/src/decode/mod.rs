//! Decoding uploads into [`FileData`].

mod delimited;
mod spreadsheet;

use tabmap_model::FileData;
use tracing::{debug, warn};

use crate::error::Result;
use crate::format::FileFormat;

/// Decode an upload, choosing the backend from the file extension.
///
/// Fails with [`crate::IngestError::UnsupportedFormat`] before touching the
/// bytes when the extension is not accepted.
pub fn decode(file_name: &str, bytes: &[u8]) -> Result<FileData> {
    let format = FileFormat::from_file_name(file_name)?;
    decode_as(format, file_name, bytes)
}

/// Decode an upload with an explicit format.
pub fn decode_as(format: FileFormat, file_name: &str, bytes: &[u8]) -> Result<FileData> {
    let (raw_rows, sheet_list, errors) = match format.delimiter() {
        Some(delimiter) => {
            let parsed = delimited::read_rows(bytes, delimiter);
            (parsed.rows, Vec::new(), parsed.warnings)
        }
        None => {
            let sheet = spreadsheet::read_first_sheet(format, file_name, bytes)?;
            (sheet.rows, sheet.sheet_names, Vec::new())
        }
    };

    let raw_count = raw_rows.len();
    let data = FileData::from_raw_rows(file_name, raw_rows, sheet_list, errors);
    if !data.errors.is_empty() {
        warn!(
            file = file_name,
            warnings = data.errors.len(),
            "decode produced warnings"
        );
    }
    debug!(
        file = file_name,
        %format,
        rows = data.len(),
        blank_rows = raw_count - data.len(),
        sheets = data.sheet_list.len(),
        "decoded upload"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = decode("notes.txt", b"a,b").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { ref extension, .. } if extension == "txt"));
    }

    #[test]
    fn test_csv_blank_rows_dropped() {
        let data = decode("people.csv", b"name,age\n,\n\"\",\" \"\nAda,36\n").unwrap();
        assert_eq!(data.file_name, "people.csv");
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[1].index, 1);
        assert_eq!(data.rows[1].values, vec!["Ada", "36"]);
        assert!(data.sheet_list.is_empty());
    }

    #[test]
    fn test_tsv_uses_tab() {
        let data = decode("people.tsv", b"name\tage\nAda, Countess\t36\n").unwrap();
        assert_eq!(data.rows[1].values, vec!["Ada, Countess", "36"]);
    }

    #[test]
    fn test_broken_spreadsheet_is_an_error() {
        let err = decode("book.xlsx", b"definitely not a zip").unwrap_err();
        assert!(matches!(err, IngestError::Spreadsheet { .. }));
    }
}
