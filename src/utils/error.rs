use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Filename '{file}' does not match the pattern <prefix>_<dd>.<mm>[.<yy>]-<dd>.<mm>[.<yy>]")]
    ParseError { file: String },

    #[error("Invalid date '{value}' in '{file}'")]
    InvalidDate { file: String, value: String },

    #[error("Period in '{file}' ends before it starts ({start} > {end})")]
    InvalidPeriod {
        file: String,
        start: String,
        end: String,
    },

    #[error("Missing report metadata in '{file}': {fields}")]
    MetadataMissing { file: String, fields: String },

    #[error("Cannot read workbook '{file}': {message}")]
    WorkbookError { file: String, message: String },

    #[error("'{file}' would overwrite '{output}' written for another input")]
    DuplicateOutput { file: String, output: String },

    #[error("Input directory '{path}' is not readable: {source}")]
    InputDirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ParseError { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidPeriod { .. }
            | Self::InputDirectoryError { .. } => ErrorCategory::Input,
            Self::MetadataMissing { .. } | Self::WorkbookError { .. } => ErrorCategory::Data,
            Self::DuplicateOutput { .. } | Self::ZipError(_) | Self::IoError(_) => {
                ErrorCategory::Output
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the document is still written with placeholders
            Self::MetadataMissing { .. } => ErrorSeverity::Low,
            Self::ParseError { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidPeriod { .. }
            | Self::WorkbookError { .. }
            | Self::DuplicateOutput { .. } => ErrorSeverity::Medium,
            Self::ZipError(_) | Self::IoError(_) => ErrorSeverity::High,
            Self::InputDirectoryError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ParseError { .. } => {
                "Rename the file to <prefix>_<dd>.<mm>-<dd>.<mm>[.<yy>].xlsx"
            }
            Self::InvalidDate { .. } | Self::InvalidPeriod { .. } => {
                "Check the day and month numbers in the filename"
            }
            Self::MetadataMissing { .. } => {
                "Fill in name and program in the sheet or set [report] trainee_name/program_name"
            }
            Self::WorkbookError { .. } => "Make sure the file is a valid, unlocked spreadsheet",
            Self::InputDirectoryError { .. } => {
                "Create the input directory and place the spreadsheets there"
            }
            Self::DuplicateOutput { .. } => {
                "Keep only one spreadsheet per report name in the input directory"
            }
            Self::ZipError(_) | Self::IoError(_) => {
                "Check that the output directory is writable and has free space"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and CLI flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Data => format!("Spreadsheet problem: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_errors_are_not_critical() {
        let parse = ConvertError::ParseError {
            file: "report_final.xlsx".to_string(),
        };
        assert!(parse.severity() < ErrorSeverity::Critical);
        assert_eq!(parse.category(), ErrorCategory::Input);

        let missing = ConvertError::MetadataMissing {
            file: "a.xlsx".to_string(),
            fields: "Name".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_input_directory_error_is_fatal() {
        let err = ConvertError::InputDirectoryError {
            path: "input".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("Input problem"));
    }

    #[test]
    fn test_duplicate_output_is_an_output_problem() {
        let err = ConvertError::DuplicateOutput {
            file: "A_06.01-10.01.ods".to_string(),
            output: "2025-KW02-A_06.01-10.01.md".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("2025-KW02-A_06.01-10.01.md"));
    }
}
