//! Spreadsheet backend (XLS and XLSX), first sheet only.

use std::fmt::Display;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_from_rs};

use crate::error::{IngestError, Result};
use crate::format::FileFormat;

/// Rows of the first sheet plus every sheet name in the workbook.
#[derive(Debug, Default)]
pub(crate) struct SheetRows {
    pub sheet_names: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn read_first_sheet(
    format: FileFormat,
    file_name: &str,
    bytes: &[u8],
) -> Result<SheetRows> {
    let cursor = Cursor::new(bytes.to_vec());
    match format {
        FileFormat::Xlsx => {
            let workbook: Xlsx<_> =
                open_workbook_from_rs(cursor).map_err(|err| spreadsheet_error(file_name, &err))?;
            first_sheet(workbook, file_name)
        }
        FileFormat::Xls => {
            let workbook: Xls<_> =
                open_workbook_from_rs(cursor).map_err(|err| spreadsheet_error(file_name, &err))?;
            first_sheet(workbook, file_name)
        }
        FileFormat::Csv | FileFormat::Tsv => Err(IngestError::Spreadsheet {
            file_name: file_name.to_string(),
            message: format!("{format} is not a spreadsheet format"),
        }),
    }
}

fn first_sheet<RS, R>(mut workbook: R, file_name: &str) -> Result<SheetRows>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let sheet_names = workbook.sheet_names().to_vec();
    let rows = match workbook.worksheet_range_at(0) {
        Some(range) => {
            let range = range.map_err(|err| spreadsheet_error(file_name, &err))?;
            range_rows(&range)
        }
        None => Vec::new(),
    };
    Ok(SheetRows { sheet_names, rows })
}

/// Convert a sheet range to string rows anchored at column A.
///
/// The range starts at the first used cell, so rows and columns before it
/// are padded back in to keep source-column indices stable.
fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (start_row, start_col) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let mut rows = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut values = vec![String::new(); start_col];
        values.extend(row.iter().map(cell_to_string));
        rows.push(values);
    }
    rows
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        // Date cells keep their serial number, as raw sheet values do.
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::Error(e) => e.to_string(),
    }
}

/// Integers without a decimal part, everything else as-is.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn spreadsheet_error(file_name: &str, err: &impl Display) -> IngestError {
    IngestError::Spreadsheet {
        file_name: file_name.to_string(),
        message: err.to_string(),
    }
}
