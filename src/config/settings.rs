use crate::config::toml_config::TomlConfig;
use crate::core::sheet::SheetLayout;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path,
    validate_positive_number, validate_range, Validate,
};

pub const DEFAULT_INPUT: &str = "input";
pub const DEFAULT_OUTPUT: &str = "output";
pub const DEFAULT_TITLE: &str = "Ausbildungsnachweis";
pub const DEFAULT_ARCHIVE: &str = "Ausbildungsnachweise-Markdown.zip";

const SUPPORTED_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Resolved run configuration handed to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_path: String,
    pub output_path: String,
    pub extensions: Vec<String>,
    pub default_year: i32,
    pub title: String,
    pub archive_name: String,
    pub trainee_name: Option<String>,
    pub program_name: Option<String>,
    pub layout: SheetLayout,
}

impl Settings {
    /// Built-in defaults with `default_year` as the fallback year.
    pub fn with_default_year(default_year: i32) -> Self {
        Self {
            input_path: DEFAULT_INPUT.to_string(),
            output_path: DEFAULT_OUTPUT.to_string(),
            extensions: vec!["xlsx".to_string()],
            default_year,
            title: DEFAULT_TITLE.to_string(),
            archive_name: DEFAULT_ARCHIVE.to_string(),
            trainee_name: None,
            program_name: None,
            layout: SheetLayout::default(),
        }
    }

    /// Applies the values present in `config` over the current ones.
    pub fn merge_toml(mut self, config: TomlConfig) -> Self {
        let paths = config.paths();
        let report = config.report();

        if let Some(input) = paths.input {
            self.input_path = input;
        }
        if let Some(output) = paths.output {
            self.output_path = output;
        }
        if let Some(extensions) = paths.extensions {
            self.extensions = extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect();
        }
        if let Some(year) = report.default_year {
            self.default_year = year;
        }
        if let Some(title) = report.title {
            self.title = title;
        }
        if let Some(archive_name) = report.archive_name {
            self.archive_name = archive_name;
        }
        self.trainee_name = report.trainee_name.or(self.trainee_name);
        self.program_name = report.program_name.or(self.program_name);
        if let Some(layout) = config.layout {
            self.layout = layout;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &crate::config::CliConfig) -> Result<Self> {
        use chrono::Datelike;

        let current_year = chrono::Local::now().year();
        let mut settings = Self::with_default_year(current_year);

        if let Some(path) = &cli.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            settings = settings.merge_toml(TomlConfig::from_file(path)?);
        }
        if let Some(input) = &cli.input {
            settings.input_path = input.clone();
        }
        if let Some(output) = &cli.output {
            settings.output_path = output.clone();
        }
        if let Some(year) = cli.default_year {
            settings.default_year = year;
        }
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_extensions(&self) -> &[String] {
        &self.extensions
    }

    fn default_year(&self) -> i32 {
        self.default_year
    }

    fn report_title(&self) -> &str {
        &self.title
    }

    fn archive_name(&self) -> &str {
        &self.archive_name
    }

    fn trainee_name(&self) -> Option<&str> {
        self.trainee_name.as_deref()
    }

    fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    fn layout(&self) -> &SheetLayout {
        &self.layout
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("paths.input", &self.input_path)?;
        validate_path("paths.output", &self.output_path)?;
        validate_positive_number("paths.extensions", self.extensions.len(), 1)?;
        let probes: Vec<String> = self.extensions.iter().map(|ext| format!("x.{}", ext)).collect();
        validate_file_extensions("paths.extensions", &probes, &SUPPORTED_EXTENSIONS)?;

        validate_range("report.default_year", self.default_year, 1900, 2999)?;
        validate_non_empty_string("report.title", &self.title)?;
        validate_non_empty_string("report.archive_name", &self.archive_name)?;
        validate_file_extensions(
            "report.archive_name",
            std::slice::from_ref(&self.archive_name),
            &["zip"],
        )?;

        validate_positive_number(
            "layout.activity_columns",
            self.layout.activity_columns.len(),
            1,
        )?;
        validate_non_empty_string("layout.header_marker", &self.layout.header_marker)?;
        Ok(())
    }
}
