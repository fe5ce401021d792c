//! Writer configuration, loaded from TOML.
//!
//! # Example
//!
//! ```toml
//! [output]
//! pretty = true                 # pretty-print JSON documents
//!
//! [validate]
//! proceed_with_warnings = false # write even when validation reports errors
//! max_reported_values = 10      # values listed per error when printing
//! ```
//!
//! Every section and field is optional. Unknown fields are reported and
//! ignored.

mod error;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::log;
use crate::validate::DEFAULT_MAX_REPORTED_VALUES;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub output: OutputConfig,
    pub validate: ValidateConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// `[validate]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Write the package even when non-fatal validation errors were found.
    pub proceed_with_warnings: bool,
    /// Presentation only: the errors always keep every offending value.
    pub max_reported_values: usize,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            proceed_with_warnings: false,
            max_reported_values: DEFAULT_MAX_REPORTED_VALUES,
        }
    }
}

impl FromStr for WriterConfig {
    type Err = ConfigError;

    /// Parse configuration from a TOML string.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, None);
        }
        config.validate().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }
}

impl WriterConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, Some(path));
        }
        config.validate().map_err(ConfigError::Diagnostics)?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    pub fn validate(&self) -> Result<(), ConfigDiagnostics> {
        let mut diagnostics = ConfigDiagnostics::new();
        if self.validate.max_reported_values == 0 {
            diagnostics.error_with_hint(
                FieldPath("validate.max_reported_values"),
                "must be at least 1",
                format!("remove the field to use the default of {DEFAULT_MAX_REPORTED_VALUES}"),
            );
        }
        diagnostics.into_result()
    }

    fn print_unknown_fields_warning(fields: &[String], path: Option<&Path>) {
        let source = path
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config".to_string());
        log!("warning"; "unknown fields in {}, ignoring:", source);
        for field in fields {
            eprintln!("- {field}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config: WriterConfig = "".parse().unwrap();
        assert!(config.output.pretty);
        assert!(!config.validate.proceed_with_warnings);
        assert_eq!(config.validate.max_reported_values, 10);
        assert_eq!(config, WriterConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let content = "[output]\npretty = false\n\
                       [validate]\nproceed_with_warnings = true\nmax_reported_values = 3\n";
        let config: WriterConfig = content.parse().unwrap();
        assert!(!config.output.pretty);
        assert!(config.validate.proceed_with_warnings);
        assert_eq!(config.validate.max_reported_values, 3);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) =
            WriterConfig::parse_with_ignored("[output]\npretty = true\ncolour = \"red\"\n[extra]\n")
                .unwrap();
        assert!(config.output.pretty);
        assert_eq!(ignored, vec!["output.colour".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_zero_max_reported_values_rejected() {
        let err = "[validate]\nmax_reported_values = 0\n"
            .parse::<WriterConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Diagnostics(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = false").unwrap();
        let config = WriterConfig::load(file.path()).unwrap();
        assert!(!config.output.pretty);

        let missing = WriterConfig::load(Path::new("/nonexistent/csvcube.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(..))));
    }
}
