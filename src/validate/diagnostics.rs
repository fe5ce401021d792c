//! Accumulated validation errors.

use std::fmt;

use owo_colors::OwoColorize;

use super::ValidationError;
use crate::utils::plural_count;

/// Values listed per error before the rest is summarised.
pub const DEFAULT_MAX_REPORTED_VALUES: usize = 10;

/// All errors found by one validation pass.
///
/// The errors themselves are always complete; `max_reported_values` only
/// limits how many offending values `Display` lists per error.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    errors: Vec<ValidationError>,
    max_reported_values: usize,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            max_reported_values: DEFAULT_MAX_REPORTED_VALUES,
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_reported_values(mut self, max: usize) -> Self {
        self.max_reported_values = max;
        self
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(ValidationError::is_fatal)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Number of errors with the given code.
    pub fn count_code(&self, code: &str) -> usize {
        self.errors.iter().filter(|e| e.code() == code).count()
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "cube validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            writeln!(f, "{}{}{}", "[".dimmed(), err.code().cyan(), "]".dimmed())?;
            write!(f, "{} {}", "→".red(), err)?;

            let details = err.details();
            for detail in details.iter().take(self.max_reported_values) {
                write!(f, "\n  - {detail}")?;
            }
            if details.len() > self.max_reported_values {
                let rest = details.len() - self.max_reported_values;
                write!(f, "\n  {} and {rest} more", "…".dimmed())?;
            }

            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{}",
                format!("{} found", plural_count(self.errors.len(), "error")).dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_into_result() {
        assert!(Diagnostics::new().into_result().is_ok());

        let mut diagnostics = Diagnostics::new();
        diagnostics.push(ValidationError::NoDimensionsDefined);
        let err = diagnostics.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(!err.has_fatal());
        assert_eq!(err.count_code("CUBE-E024"), 1);
    }

    #[test]
    fn test_display_truncates_values() {
        let values: BTreeSet<String> = (0..5).map(|i| format!("v{i}")).collect();
        let mut diagnostics = Diagnostics::new().with_max_reported_values(2);
        diagnostics.push(ValidationError::UndefinedUnitUris {
            column: "Unit".into(),
            values,
        });

        let text = diagnostics.to_string();
        assert!(text.contains("v0"));
        assert!(text.contains("v1"));
        assert!(!text.contains("v2"));
        assert!(text.contains("and 3 more"));

        // the error keeps every value
        let ValidationError::UndefinedUnitUris { values, .. } = &diagnostics.errors()[0] else {
            panic!("unexpected error kind");
        };
        assert_eq!(values.len(), 5);
    }
}
