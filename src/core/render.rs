//! Markdown layout of a weekly report.

use crate::domain::model::{ReportDocument, ReportPeriod, SheetData};
use crate::utils::error::ConvertError;

pub const NAME_PLACEHOLDER: &str = "[FEHLT: Name]";
pub const PROGRAM_PLACEHOLDER: &str = "[FEHLT: Ausbildung]";

const DATE_FORMAT: &str = "%d.%m.%Y";

/// A document plus the metadata problem found while assembling it, if any.
#[derive(Debug)]
pub struct Assembled {
    pub document: ReportDocument,
    pub missing: Option<ConvertError>,
}

#[derive(Debug, Clone)]
pub struct DocumentFormatter {
    title: String,
    trainee_name: Option<String>,
    program_name: Option<String>,
}

impl DocumentFormatter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            trainee_name: None,
            program_name: None,
        }
    }

    /// Names used when a sheet leaves the metadata cells empty.
    pub fn with_fallbacks(mut self, trainee_name: Option<&str>, program_name: Option<&str>) -> Self {
        self.trainee_name = trainee_name.map(str::to_string);
        self.program_name = program_name.map(str::to_string);
        self
    }

    pub fn assemble(&self, file_name: &str, period: ReportPeriod, sheet: SheetData) -> Assembled {
        let mut missing_fields = Vec::new();

        let trainee_name = sheet
            .trainee_name
            .or_else(|| self.trainee_name.clone())
            .unwrap_or_else(|| {
                missing_fields.push("Name");
                NAME_PLACEHOLDER.to_string()
            });
        let program_name = sheet
            .program_name
            .or_else(|| self.program_name.clone())
            .unwrap_or_else(|| {
                missing_fields.push("Ausbildung");
                PROGRAM_PLACEHOLDER.to_string()
            });

        let missing = (!missing_fields.is_empty()).then(|| ConvertError::MetadataMissing {
            file: file_name.to_string(),
            fields: missing_fields.join(", "),
        });

        let mut entries = sheet.entries;
        entries.sort_by_key(|entry| entry.date);

        Assembled {
            document: ReportDocument {
                period,
                trainee_name,
                program_name,
                entries,
            },
            missing,
        }
    }

    pub fn render(&self, document: &ReportDocument) -> String {
        let period = &document.period;
        let mut lines = vec![
            format!(
                "# {} - {} ({} - {})",
                period.week_label(),
                self.title,
                period.start_date.format(DATE_FORMAT),
                period.end_date.format(DATE_FORMAT)
            ),
            String::new(),
            format!("**Name:** {}  ", document.trainee_name),
            format!("**Ausbildung:** {}  ", document.program_name),
            format!("**Jahr:** {}  ", period.year),
            String::new(),
            "---".to_string(),
        ];

        let mut days: Vec<_> = document.entries.iter().collect();
        days.sort_by_key(|entry| entry.date);

        for day in days {
            lines.push(String::new());
            lines.push(format!("## {}", day.date.format(DATE_FORMAT)));
            lines.push(String::new());

            let bullets: Vec<String> = day
                .activities
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .map(|a| format!("- {}", a))
                .collect();
            if !bullets.is_empty() {
                lines.extend(bullets);
                lines.push(String::new());
            }
            lines.push(format!("**Stunden:** {}", format_hours(day.hours)));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Hours rounded to two decimals without trailing zeros: `8`, `7.5`, `7.25`.
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 100.0).round() / 100.0;
    // avoid "-0" for tiny negative inputs
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}
