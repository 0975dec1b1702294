use crate::core::sheet::SheetLayout;
use crate::utils::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional configuration file. Every section and key may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: Option<PathsConfig>,
    pub report: Option<ReportConfig>,
    pub layout: Option<SheetLayout>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub title: Option<String>,
    pub default_year: Option<i32>,
    pub archive_name: Option<String>,
    pub trainee_name: Option<String>,
    pub program_name: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value (e.g. `${TRAINEE_NAME}`).
    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn paths(&self) -> PathsConfig {
        self.paths.clone().unwrap_or_default()
    }

    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sheet::CellRef;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[paths]
input = "nachweise"
output = "markdown"
extensions = ["xlsx", "ods"]

[report]
title = "Berichtsheft"
default_year = 2024
archive_name = "berichte.zip"
trainee_name = "Doe, Jane"

[layout]
sheet = "Woche"
name_cell = { row = 1, column = 2 }
activity_columns = [2, 3]
hours_column = 9
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let paths = config.paths();
        assert_eq!(paths.input.as_deref(), Some("nachweise"));
        assert_eq!(paths.extensions.unwrap(), vec!["xlsx", "ods"]);

        let report = config.report();
        assert_eq!(report.default_year, Some(2024));
        assert_eq!(report.program_name, None);

        let layout = config.layout.unwrap();
        assert_eq!(layout.sheet.as_deref(), Some("Woche"));
        assert_eq!(layout.name_cell, CellRef::new(1, 2));
        assert_eq!(layout.activity_columns, vec![2, 3]);
        assert_eq!(layout.hours_column, 9);
        // layout keys left out keep the template defaults
        assert_eq!(layout.date_column, 1);
        assert_eq!(layout.header_marker, "Tag");
    }

    #[test]
    fn test_empty_toml_config() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.paths.is_none());
        assert!(config.report().title.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NACHWEIS_TEST_TRAINEE", "Mustermann, Max");

        let toml_content = r#"
[report]
trainee_name = "${NACHWEIS_TEST_TRAINEE}"
program_name = "${NACHWEIS_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let report = config.report();
        assert_eq!(report.trainee_name.as_deref(), Some("Mustermann, Max"));
        assert_eq!(
            report.program_name.as_deref(),
            Some("${NACHWEIS_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("NACHWEIS_TEST_TRAINEE");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = TomlConfig::from_toml_str("[report]\ndefault_year = \"soon\"").unwrap_err();
        assert!(matches!(err, ConvertError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nachweis.toml");
        std::fs::write(&path, "[paths]\ninput = \"in\"\n").unwrap();

        let config = TomlConfig::from_file(&path).unwrap();
        assert_eq!(config.paths().input.as_deref(), Some("in"));
        assert!(TomlConfig::from_file(temp_dir.path().join("missing.toml")).is_err());
    }
}
