//! Reads a report workbook and normalises its cells into [`SheetData`].

use crate::domain::model::{DayEntry, SheetData};
use crate::utils::error::{ConvertError, Result};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Zero-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Where the report template keeps its metadata and daily rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Worksheet to read; the first one when unset.
    pub sheet: Option<String>,
    pub name_cell: CellRef,
    pub program_cell: CellRef,
    pub year_cell: CellRef,
    pub date_column: u32,
    pub activity_columns: Vec<u32>,
    pub hours_column: u32,
    /// Text in the date column of the header row. Rows below it hold the days.
    pub header_marker: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet: None,
            name_cell: CellRef::new(0, 7),
            program_cell: CellRef::new(1, 7),
            year_cell: CellRef::new(2, 11),
            date_column: 1,
            activity_columns: vec![2],
            hours_column: 11,
            header_marker: "Tag".to_string(),
        }
    }
}

/// Opens the workbook in `bytes` and reads the configured sheet.
pub fn read_workbook(file_name: &str, bytes: Vec<u8>, layout: &SheetLayout) -> Result<SheetData> {
    let workbook_error = |message: String| ConvertError::WorkbookError {
        file: file_name.to_string(),
        message,
    };

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| workbook_error(e.to_string()))?;

    let sheet_name = match &layout.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| workbook_error("workbook has no worksheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_error(format!("sheet '{}': {}", sheet_name, e)))?;

    tracing::debug!(
        "{}: read sheet '{}' ({} rows)",
        file_name,
        sheet_name,
        range.height()
    );

    Ok(normalize_range(file_name, &range, layout))
}

/// Turns the loosely typed cells of `range` into metadata and day entries.
pub fn normalize_range(file_name: &str, range: &Range<Data>, layout: &SheetLayout) -> SheetData {
    let cell = |row: u32, column: u32| range.get_value((row, column));
    let at = |cell_ref: CellRef| cell(cell_ref.row, cell_ref.column);

    let mut data = SheetData {
        trainee_name: at(layout.name_cell).and_then(cell_text),
        program_name: at(layout.program_cell).and_then(cell_text),
        metadata_year: at(layout.year_cell).and_then(cell_year),
        entries: Vec::new(),
    };

    let Some((end_row, _)) = range.end() else {
        return data;
    };

    let first_row = (0..=end_row)
        .find(|&row| {
            cell(row, layout.date_column)
                .and_then(|c| c.get_string())
                .is_some_and(|s| s.contains(layout.header_marker.as_str()))
        })
        .map(|row| row + 1)
        .unwrap_or(0);

    let mut current: Option<DayEntry> = None;

    for row in first_row..=end_row {
        if let Some(date) = cell(row, layout.date_column).and_then(cell_date) {
            data.entries.extend(current.take());
            current = Some(DayEntry {
                date,
                activities: Vec::new(),
                hours: 0.0,
            });
        }

        let Some(day) = current.as_mut() else {
            continue;
        };

        for &column in &layout.activity_columns {
            if let Some(text) = cell(row, column).and_then(cell_text) {
                day.activities.push(text);
            }
        }

        if let Some(hours_cell) = cell(row, layout.hours_column) {
            if hours_cell.is_empty() {
                continue;
            }
            day.hours = match cell_number(hours_cell) {
                Some(hours) if hours >= 0.0 => hours,
                _ => {
                    tracing::warn!(
                        "{}: unusable hours value {:?} on {}, using 0",
                        file_name,
                        hours_cell,
                        day.date.format("%d.%m.%Y")
                    );
                    0.0
                }
            };
            data.entries.extend(current.take());
        }
    }
    data.entries.extend(current);

    data
}

/// Trimmed text with inner whitespace collapsed; `None` for blank cells.
fn cell_text(cell: &Data) -> Option<String> {
    let raw = match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::Empty | Data::Error(_) => return None,
    };
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|dt| dt.date()),
        Data::DateTimeIso(s) => s.get(..10).and_then(|d| d.parse().ok()),
        Data::String(s) => parse_text_date(s.trim()),
        _ => None,
    }
}

fn parse_text_date(text: &str) -> Option<NaiveDate> {
    ["%d.%m.%Y", "%d.%m.%y", "%Y-%m-%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Int(n) => Some(*n as f64),
        Data::String(s) => s.trim().replace(',', ".").parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn cell_year(cell: &Data) -> Option<i32> {
    let year = match cell {
        Data::Float(f) if f.fract() == 0.0 => *f as i64,
        Data::Int(n) => *n,
        Data::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (1900..=2999)
        .contains(&year)
        .then(|| i32::try_from(year).ok())
        .flatten()
}
