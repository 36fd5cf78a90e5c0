//! Workbook reading: raw upload bytes → [`RawTable`] per sheet.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{Result, SheetVetError};
use crate::schema::SheetRef;
use crate::table::{RawCell, RawTable};

/// Parse one worksheet out of raw workbook bytes.
///
/// The first row is taken as the header row; short rows are padded to the
/// header width. Blank rows inside the data range are kept as all-empty
/// rows so data row indices match the sheet.
pub fn read_sheet(bytes: &[u8], sheet: &SheetRef) -> Result<RawTable> {
    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| SheetVetError::UnreadableWorkbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let name = match sheet {
        SheetRef::Name(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                return Err(SheetVetError::SheetNotFound(sheet.to_string()));
            }
            name.clone()
        }
        SheetRef::Index(index) => sheet_names
            .get(*index)
            .cloned()
            .ok_or_else(|| SheetVetError::SheetNotFound(sheet.to_string()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| SheetVetError::UnreadableWorkbook(e.to_string()))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(header_string).collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<RawCell>> = rows_iter
        .map(|row| row.iter().map(raw_cell).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

/// Render a header cell as a column name.
fn header_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                RawCell::Empty
            } else {
                RawCell::Text(s.clone())
            }
        }
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => RawCell::DateTime(naive),
            None => RawCell::Empty,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}

/// Integral floats print without a trailing `.0`, matching how spreadsheet
/// headers like `2024` are usually meant.
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
