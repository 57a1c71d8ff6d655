//! Delimited-text backend (CSV and TSV).

use csv::ReaderBuilder;
use encoding_rs::UTF_8;

/// Rows and warnings produced by a delimited parse.
#[derive(Debug, Default)]
pub(crate) struct DelimitedRows {
    pub rows: Vec<Vec<String>>,
    pub warnings: Vec<String>,
}

/// Parse delimited text with every row treated as data.
///
/// Never fails: malformed records and rows whose field count differs from the
/// first row are reported as warnings and parsing continues.
pub(crate) fn read_rows(bytes: &[u8], delimiter: u8) -> DelimitedRows {
    let mut parsed = DelimitedRows::default();

    // Strips a UTF-8 BOM; invalid sequences become U+FFFD.
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        parsed
            .warnings
            .push("Invalid UTF-8 byte sequences were replaced".to_string());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut expected_fields: Option<usize> = None;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(0, csv::Position::line);
                parsed.warnings.push(format!("Line {line}: {err}"));
                continue;
            }
        };
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        let line = record.position().map_or(0, csv::Position::line);
        match expected_fields {
            None => expected_fields = Some(row.len()),
            Some(expected) if expected != row.len() => {
                let kind = if row.len() < expected {
                    "Too few fields"
                } else {
                    "Too many fields"
                };
                parsed.warnings.push(format!(
                    "Line {line}: {kind}: expected {expected} fields but parsed {}",
                    row.len()
                ));
            }
            Some(_) => {}
        }
        parsed.rows.push(row);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_fields() {
        let parsed = read_rows(b"\"a, b\",\"say \"\"hi\"\"\"\n", b',');
        assert_eq!(parsed.rows, vec![vec!["a, b", "say \"hi\""]]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_bom_removed() {
        let parsed = read_rows(b"\xEF\xBB\xBFname,age\n", b',');
        assert_eq!(parsed.rows[0][0], "name");
    }

    #[test]
    fn test_field_count_anomalies_are_warnings() {
        let parsed = read_rows(b"a,b,c\n1,2\n1,2,3,4\n", b',');
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.warnings.len(), 2);
        assert!(parsed.warnings[0].contains("Too few fields"));
        assert!(parsed.warnings[0].starts_with("Line 2"));
        assert!(parsed.warnings[1].contains("Too many fields"));
    }

    #[test]
    fn test_invalid_utf8_is_a_warning() {
        let parsed = read_rows(b"caf\xE9,x\n", b',');
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0][0], "caf\u{FFFD}");
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_cells_are_not_trimmed() {
        let parsed = read_rows(b" a ,b\n", b',');
        assert_eq!(parsed.rows[0], vec![" a ", "b"]);
    }
}
