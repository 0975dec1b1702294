use crate::core::period::FilenameDates;
use crate::utils::error::ConvertError;
use chrono::{Datelike, NaiveDate};

/// Calendar week a report covers. `year` and `week` follow ISO 8601 and are
/// taken from `start_date`, so a week starting on 2024-12-30 is 2025/KW01.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub year: i32,
    pub week: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportPeriod {
    pub fn from_dates(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let iso = start_date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
            start_date,
            end_date,
        }
    }

    pub fn week_label(&self) -> String {
        format!("KW{:02}", self.week)
    }

    pub fn output_file_name(&self, stem: &str) -> String {
        format!("{}-{}-{}.md", self.year, self.week_label(), stem)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub activities: Vec<String>,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub period: ReportPeriod,
    pub trainee_name: String,
    pub program_name: String,
    pub entries: Vec<DayEntry>,
}

/// Typed contents of one workbook, read before any year resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    pub trainee_name: Option<String>,
    pub program_name: Option<String>,
    pub metadata_year: Option<i32>,
    pub entries: Vec<DayEntry>,
}

#[derive(Debug)]
pub struct FileFailure {
    pub file: String,
    pub error: ConvertError,
}

/// A workbook whose filename matched and whose sheet was read.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub file_name: String,
    pub stem: String,
    pub dates: FilenameDates,
    pub sheet: SheetData,
}

#[derive(Debug, Default)]
pub struct ExtractResult {
    pub reports: Vec<SourceReport>,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub source_name: String,
    pub output_name: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct TransformResult {
    pub documents: Vec<RenderedDocument>,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<String>,
    pub archive_path: Option<String>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn converted(&self) -> usize {
        self.written.len()
    }

    /// Files that produced no document. Metadata warnings are not counted.
    pub fn failed(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| !matches!(failure.error, ConvertError::MetadataMissing { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_week_of_start_date() {
        let period = ReportPeriod::from_dates(date(2025, 1, 6), date(2025, 1, 10));
        assert_eq!(period.week, 2);
        assert_eq!(period.year, 2025);
    }

    #[test]
    fn test_week_belonging_to_next_year() {
        let period = ReportPeriod::from_dates(date(2024, 12, 30), date(2025, 1, 3));
        assert_eq!(period.week, 1);
        assert_eq!(period.year, 2025);
        assert_eq!(
            period.output_file_name("AusbildungsnachweisU27_30.12-03.01"),
            "2025-KW01-AusbildungsnachweisU27_30.12-03.01.md"
        );
    }

    #[test]
    fn test_week_belonging_to_previous_year() {
        // 2021-01-01 is a Friday, still in 2020's week 53
        let period = ReportPeriod::from_dates(date(2021, 1, 1), date(2021, 1, 1));
        assert_eq!(period.year, 2020);
        assert_eq!(period.week_label(), "KW53");
    }
}
