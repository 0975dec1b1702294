//! Derives the report period and calendar week from a report's filename.

use crate::domain::model::ReportPeriod;
use crate::utils::error::{ConvertError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FILENAME_DATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"_(?P<sd>\d{1,2})\.(?P<sm>\d{1,2})(?:\.(?P<sy>\d{4}|\d{2}))?\.?\s*-\s*(?P<ed>\d{1,2})[.\-](?P<em>\d{1,2})(?:\.(?P<ey>\d{4}|\d{2}))?\.?(?:\D|$)",
    )
    .expect("filename date pattern is valid")
});

/// Day and month parts of a filename, plus any year written next to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilenameDates {
    pub start_day: u32,
    pub start_month: u32,
    pub start_year: Option<i32>,
    pub end_day: u32,
    pub end_month: u32,
    pub end_year: Option<i32>,
}

impl FilenameDates {
    /// True when the end (month, day) comes before the start's, i.e. the
    /// period crosses New Year.
    fn wraps_year(&self) -> bool {
        (self.end_month, self.end_day) < (self.start_month, self.start_day)
    }
}

#[derive(Debug, Clone)]
pub struct DateResolver {
    default_year: i32,
}

impl DateResolver {
    pub fn new(default_year: i32) -> Self {
        Self { default_year }
    }

    pub fn parse_filename(file_name: &str) -> Result<FilenameDates> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        let caps = FILENAME_DATES
            .captures(stem)
            .ok_or_else(|| ConvertError::ParseError {
                file: file_name.to_string(),
            })?;

        let number = |name: &str| -> Result<u32> {
            caps[name].parse().map_err(|_| ConvertError::ParseError {
                file: file_name.to_string(),
            })
        };
        let year = |name: &str| -> Option<i32> {
            caps.name(name).and_then(|m| {
                let value: i32 = m.as_str().parse().ok()?;
                Some(if m.as_str().len() == 2 { 2000 + value } else { value })
            })
        };

        Ok(FilenameDates {
            start_day: number("sd")?,
            start_month: number("sm")?,
            start_year: year("sy"),
            end_day: number("ed")?,
            end_month: number("em")?,
            end_year: year("ey"),
        })
    }

    /// Resolves the period of `file_name`. A year read from the sheet wins over
    /// years in the filename, which win over the default year.
    pub fn resolve(&self, file_name: &str, metadata_year: Option<i32>) -> Result<ReportPeriod> {
        let dates = Self::parse_filename(file_name)?;
        self.resolve_dates(file_name, &dates, metadata_year)
    }

    pub fn resolve_dates(
        &self,
        file_name: &str,
        dates: &FilenameDates,
        metadata_year: Option<i32>,
    ) -> Result<ReportPeriod> {
        let (start_year, end_year) = match metadata_year {
            Some(year) => (None, Some(year)),
            None => (dates.start_year, dates.end_year),
        };

        let wrap = i32::from(dates.wraps_year());
        let (start_year, end_year) = match (start_year, end_year) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, start + wrap),
            (None, Some(end)) => (end - wrap, end),
            (None, None) => (self.default_year - wrap, self.default_year),
        };

        let start = calendar_date(file_name, start_year, dates.start_month, dates.start_day)?;
        let end = calendar_date(file_name, end_year, dates.end_month, dates.end_day)?;

        if start > end {
            return Err(ConvertError::InvalidPeriod {
                file: file_name.to_string(),
                start: start.format("%d.%m.%Y").to_string(),
                end: end.format("%d.%m.%Y").to_string(),
            });
        }

        let period = ReportPeriod::from_dates(start, end);
        tracing::debug!(
            "{}: {} - {} ({}/{})",
            file_name,
            period.start_date,
            period.end_date,
            period.year,
            period.week_label()
        );
        Ok(period)
    }
}

fn calendar_date(file_name: &str, year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ConvertError::InvalidDate {
        file: file_name.to_string(),
        value: format!("{:02}.{:02}.{}", day, month, year),
    })
}
