//! Validation error kinds.
//!
//! Every kind has a stable code (`CUBE-Exxx`) that tooling can link to fix-it
//! guidance. Messages stay short; the complete set of offending values is
//! kept in the error and exposed through [`ValidationError::details`] so the
//! presentation layer decides how much of it to show.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{ComponentKind, SerialisationHint};
use crate::utils::plural_count;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    // ------------------------------------------------------------------------
    // Local field errors
    // ------------------------------------------------------------------------
    #[error("{component} `{location}`: `{field}` is not a valid URI: `{value}`")]
    InvalidUri {
        component: ComponentKind,
        location: String,
        field: &'static str,
        value: String,
    },

    #[error("{component} `{location}`: `{field}` is set but `{requires}` is missing")]
    MissingCodependentField {
        component: ComponentKind,
        location: String,
        field: &'static str,
        requires: &'static str,
    },

    #[error("{component} `{location}`: unknown datatype `{data_type}`")]
    InvalidDataType {
        component: ComponentKind,
        location: String,
        data_type: String,
    },

    #[error("{component} in `{location}` has an empty label")]
    EmptyLabel {
        component: ComponentKind,
        location: String,
    },

    #[error("column `{column}`: invalid cell URI template `{template}`: {reason}")]
    InvalidUriTemplate {
        column: String,
        template: String,
        reason: String,
    },

    #[error("{component} `{location}`: triple `{predicate}` uses unsupported hint `{hint}`")]
    InvalidRdfHint {
        component: ComponentKind,
        location: String,
        predicate: String,
        hint: SerialisationHint,
    },

    #[error("column `{column}`: a literal attribute cannot declare new attribute values")]
    LiteralAttributeWithValues { column: String },

    #[error("column title `{title}` is used more than once")]
    DuplicateColumnTitle { title: String },

    // ------------------------------------------------------------------------
    // Structural errors
    // ------------------------------------------------------------------------
    #[error(
        "cube mixes several observation columns with a measure dimension; \
         use either one observation column with a measure column or one column per measure"
    )]
    HybridShape {
        observation_columns: Vec<String>,
        measure_columns: Vec<String>,
    },

    #[error("{component} column `{column}` mixes new and existing members")]
    MixedNewAndExisting {
        component: ComponentKind,
        column: String,
    },

    // ------------------------------------------------------------------------
    // Cardinality errors
    // ------------------------------------------------------------------------
    #[error("no observation value column defined")]
    NoObservedValuesColumnDefined,

    #[error("more than one multi-measure observation column defined")]
    MoreThanOneObservationsColumn { columns: Vec<String> },

    #[error("more than one measure dimension column defined")]
    MoreThanOneMeasureColumn { columns: Vec<String> },

    #[error("more than one units column defined")]
    MoreThanOneUnitsColumn { columns: Vec<String> },

    #[error("no dimensions defined")]
    NoDimensionsDefined,

    #[error("observation column `{observation_column}` has no unit")]
    NoUnitsDefined { observation_column: String },

    #[error("observation column `{observation_column}` has no measure")]
    NoMeasuresDefined { observation_column: String },

    #[error(
        "observation column `{observation_column}` defines a unit and is also described by units column `{units_column}`"
    )]
    BothUnitTypesDefined {
        observation_column: String,
        units_column: String,
    },

    #[error(
        "observation column `{observation_column}` defines a measure and measure column `{measure_column}` also exists"
    )]
    BothMeasureTypesDefined {
        observation_column: String,
        measure_column: String,
    },

    #[error("measure `{measure}` is used by more than one observation column")]
    DuplicateMeasure { measure: String, columns: Vec<String> },

    #[error("{component} column `{column}` must say which observation column it describes")]
    AttributeNotLinked {
        component: ComponentKind,
        column: String,
    },

    #[error("column `{column}` describes `{linked}`, which does not exist")]
    LinkedObsColumnDoesntExist { column: String, linked: String },

    #[error("column `{column}` describes `{linked}`, which is not an observation column")]
    LinkedToNonObsColumn { column: String, linked: String },

    // ------------------------------------------------------------------------
    // Collisions
    // ------------------------------------------------------------------------
    #[error("{component} in `{location}`: {} map to the same identifier", conflicting_labels(.conflicts))]
    ConflictingUriSafeValues {
        component: ComponentKind,
        location: String,
        /// identifier -> distinct labels producing it
        conflicts: BTreeMap<String, BTreeSet<String>>,
    },

    #[error("{component} in `{location}`: {} produce an empty identifier", plural_count(.labels.len(), "label"))]
    EmptyUriSafeIdentifier {
        component: ComponentKind,
        location: String,
        labels: BTreeSet<String>,
    },

    #[error("code list `{code_list}`: concept `{label}` uses reserved identifier `{identifier}`")]
    ReservedUriValue {
        code_list: String,
        label: String,
        identifier: String,
    },

    #[error("code list `{code_list}`: concept `{concept}` has undefined parent `{parent_code}`")]
    UndefinedParentConcept {
        code_list: String,
        concept: String,
        parent_code: String,
    },

    // ------------------------------------------------------------------------
    // Data completeness
    // ------------------------------------------------------------------------
    #[error("column `{column}`: {} not defined as measures", values_count(.values))]
    UndefinedMeasureUris {
        column: String,
        values: BTreeSet<String>,
    },

    #[error("column `{column}`: {} not defined as units", values_count(.values))]
    UndefinedUnitUris {
        column: String,
        values: BTreeSet<String>,
    },

    #[error("column `{column}`: {} not defined as attribute values", values_count(.values))]
    UndefinedAttributeValueUris {
        column: String,
        values: BTreeSet<String>,
    },

    #[error("column `{column}`: {} missing from code list `{code_list}`", values_count(.values))]
    UndefinedCodeListValues {
        column: String,
        code_list: String,
        values: BTreeSet<String>,
    },

    #[error("column `{column}`: {} without observation value or status", plural_count(.row_numbers.len(), "row"))]
    ObservationValuesMissing {
        column: String,
        /// 1-based data row numbers
        row_numbers: Vec<usize>,
    },

    // ------------------------------------------------------------------------
    // External code lists
    // ------------------------------------------------------------------------
    #[error("column `{column}`: cannot inspect code-list package `{}`: {reason}", .path.display())]
    CodeListInspection {
        column: String,
        path: PathBuf,
        reason: String,
    },
}

fn conflicting_labels(conflicts: &BTreeMap<String, BTreeSet<String>>) -> String {
    plural_count(conflicts.values().map(BTreeSet::len).sum(), "label")
}

fn values_count(values: &BTreeSet<String>) -> String {
    plural_count(values.len(), "value")
}

impl ValidationError {
    /// Stable reference identifier.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUri { .. } => "CUBE-E001",
            Self::MissingCodependentField { .. } => "CUBE-E002",
            Self::InvalidDataType { .. } => "CUBE-E003",
            Self::EmptyLabel { .. } => "CUBE-E004",
            Self::InvalidUriTemplate { .. } => "CUBE-E005",
            Self::InvalidRdfHint { .. } => "CUBE-E006",
            Self::LiteralAttributeWithValues { .. } => "CUBE-E007",
            Self::DuplicateColumnTitle { .. } => "CUBE-E008",
            Self::HybridShape { .. } => "CUBE-E010",
            Self::MixedNewAndExisting { .. } => "CUBE-E011",
            Self::NoObservedValuesColumnDefined => "CUBE-E020",
            Self::MoreThanOneObservationsColumn { .. } => "CUBE-E021",
            Self::MoreThanOneMeasureColumn { .. } => "CUBE-E022",
            Self::MoreThanOneUnitsColumn { .. } => "CUBE-E023",
            Self::NoDimensionsDefined => "CUBE-E024",
            Self::NoUnitsDefined { .. } => "CUBE-E025",
            Self::NoMeasuresDefined { .. } => "CUBE-E026",
            Self::BothUnitTypesDefined { .. } => "CUBE-E027",
            Self::BothMeasureTypesDefined { .. } => "CUBE-E028",
            Self::DuplicateMeasure { .. } => "CUBE-E029",
            Self::AttributeNotLinked { .. } => "CUBE-E030",
            Self::LinkedObsColumnDoesntExist { .. } => "CUBE-E031",
            Self::LinkedToNonObsColumn { .. } => "CUBE-E032",
            Self::ConflictingUriSafeValues { .. } => "CUBE-E040",
            Self::ReservedUriValue { .. } => "CUBE-E041",
            Self::UndefinedParentConcept { .. } => "CUBE-E042",
            Self::EmptyUriSafeIdentifier { .. } => "CUBE-E043",
            Self::UndefinedMeasureUris { .. } => "CUBE-E050",
            Self::UndefinedUnitUris { .. } => "CUBE-E051",
            Self::UndefinedAttributeValueUris { .. } => "CUBE-E052",
            Self::UndefinedCodeListValues { .. } => "CUBE-E053",
            Self::ObservationValuesMissing { .. } => "CUBE-E054",
            Self::CodeListInspection { .. } => "CUBE-E060",
        }
    }

    /// Structural contradictions; nothing else is checked or written after one.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::HybridShape { .. } | Self::MixedNewAndExisting { .. }
        )
    }

    /// Offending values, rows or columns behind the message, complete and
    /// in a stable order.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::HybridShape {
                observation_columns,
                measure_columns,
            } => observation_columns
                .iter()
                .map(|c| format!("observation column `{c}`"))
                .chain(measure_columns.iter().map(|c| format!("measure column `{c}`")))
                .collect(),
            Self::MoreThanOneObservationsColumn { columns }
            | Self::MoreThanOneMeasureColumn { columns }
            | Self::MoreThanOneUnitsColumn { columns }
            | Self::DuplicateMeasure { columns, .. } => {
                columns.iter().map(|c| format!("`{c}`")).collect()
            }
            Self::ConflictingUriSafeValues { conflicts, .. } => conflicts
                .iter()
                .map(|(id, labels)| {
                    let labels: Vec<_> = labels.iter().map(|l| format!("`{l}`")).collect();
                    format!("{id}: {}", labels.join(", "))
                })
                .collect(),
            Self::UndefinedMeasureUris { values, .. }
            | Self::UndefinedUnitUris { values, .. }
            | Self::UndefinedAttributeValueUris { values, .. }
            | Self::UndefinedCodeListValues { values, .. } => {
                values.iter().map(|v| format!("`{v}`")).collect()
            }
            Self::EmptyUriSafeIdentifier { labels, .. } => {
                labels.iter().map(|l| format!("`{l}`")).collect()
            }
            Self::ObservationValuesMissing { row_numbers, .. } => {
                row_numbers.iter().map(|r| format!("row {r}")).collect()
            }
            Self::InvalidUri { .. }
            | Self::MissingCodependentField { .. }
            | Self::InvalidDataType { .. }
            | Self::EmptyLabel { .. }
            | Self::InvalidUriTemplate { .. }
            | Self::InvalidRdfHint { .. }
            | Self::LiteralAttributeWithValues { .. }
            | Self::DuplicateColumnTitle { .. }
            | Self::MixedNewAndExisting { .. }
            | Self::NoObservedValuesColumnDefined
            | Self::NoDimensionsDefined
            | Self::NoUnitsDefined { .. }
            | Self::NoMeasuresDefined { .. }
            | Self::BothUnitTypesDefined { .. }
            | Self::BothMeasureTypesDefined { .. }
            | Self::AttributeNotLinked { .. }
            | Self::LinkedObsColumnDoesntExist { .. }
            | Self::LinkedToNonObsColumn { .. }
            | Self::ReservedUriValue { .. }
            | Self::UndefinedParentConcept { .. }
            | Self::CodeListInspection { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ValidationError::NoDimensionsDefined.code(), "CUBE-E024");
        let err = ValidationError::HybridShape {
            observation_columns: vec!["A".into(), "B".into()],
            measure_columns: vec!["Measure".into()],
        };
        assert_eq!(err.code(), "CUBE-E010");
        assert!(err.is_fatal());
        assert_eq!(err.details().len(), 3);
    }

    #[test]
    fn test_conflict_message_and_details() {
        let err = ValidationError::ConflictingUriSafeValues {
            component: ComponentKind::Concept,
            location: "Area".into(),
            conflicts: BTreeMap::from([(
                "a-b".to_string(),
                BTreeSet::from(["A B".to_string(), "a-b".to_string()]),
            )]),
        };
        assert_eq!(
            err.to_string(),
            "concept in `Area`: 2 labels map to the same identifier"
        );
        assert_eq!(err.details(), vec!["a-b: `A B`, `a-b`"]);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_missing_rows_message() {
        let err = ValidationError::ObservationValuesMissing {
            column: "Value".into(),
            row_numbers: vec![2, 5],
        };
        assert_eq!(
            err.to_string(),
            "column `Value`: 2 rows without observation value or status"
        );
        assert_eq!(err.details(), vec!["row 2", "row 5"]);
    }
}
