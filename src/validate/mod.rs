//! Cube validation.
//!
//! # Module Structure
//!
//! ```text
//! validate/
//! ├── error        # ValidationError kinds and codes
//! ├── diagnostics  # Diagnostics accumulator and presentation
//! ├── component    # local field checks
//! ├── shape        # shape detection and cardinality
//! ├── collision    # identifier collisions
//! └── data         # completeness against the source data
//! ```
//!
//! # Order
//!
//! 1. Local checks of every column and the catalog metadata
//! 2. Fatal structural checks (hybrid shape, mixed membership); stop if any
//! 3. Shape and cardinality
//! 4. Identifier collisions
//! 5. Existing code-list packages that need inspection
//! 6. Data completeness, when data is attached
//!
//! Everything found is returned together.

pub mod collision;
pub mod component;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod shape;

pub use diagnostics::{DEFAULT_MAX_REPORTED_VALUES, Diagnostics};
pub use error::ValidationError;

use crate::cube::{Cube, StructuralDefinition};
use crate::model::{CodeList, CodeListResolver};
use crate::utils::plural_count;
use crate::{debug, log};

/// Runs every check over one cube.
pub struct Validator<'a> {
    cube: &'a Cube,
    resolver: Option<&'a dyn CodeListResolver>,
    max_reported_values: usize,
}

impl<'a> Validator<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            resolver: None,
            max_reported_values: DEFAULT_MAX_REPORTED_VALUES,
        }
    }

    /// Resolver used for code lists that live in existing packages.
    pub fn with_resolver(mut self, resolver: &'a dyn CodeListResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_max_reported_values(mut self, max: usize) -> Self {
        self.max_reported_values = max;
        self
    }

    pub fn run(&self) -> Diagnostics {
        let mut errors = Vec::new();
        self.collect(&mut errors);

        let mut diagnostics = Diagnostics::new().with_max_reported_values(self.max_reported_values);
        if errors.is_empty() {
            debug!("validate"; "`{}` is valid", self.cube.metadata.title);
        } else {
            log!(
                "validate";
                "`{}`: {}",
                self.cube.metadata.title,
                plural_count(errors.len(), "error")
            );
        }
        diagnostics.extend(errors);
        diagnostics
    }

    fn collect(&self, errors: &mut Vec<ValidationError>) {
        let cube = self.cube;

        component::check_catalog(&cube.metadata, &cube.metadata.title, errors);
        for column in cube.qb_columns() {
            component::check_column(column, errors);
        }

        let index = cube.index();
        if shape::check_fatal(&index, errors) {
            return;
        }
        shape::check_shape(&index, errors);
        collision::check_collisions(cube, errors);
        self.check_packages(errors);

        if let Some(data) = &cube.data {
            data::check_data(&index, data, errors);
        }
    }

    /// Code lists referenced by inspection must be readable now, not at write time.
    fn check_packages(&self, errors: &mut Vec<ValidationError>) {
        for column in self.cube.qb_columns() {
            let StructuralDefinition::Dimension(dimension) = &column.component else {
                continue;
            };
            let Some(CodeList::InExistingPackage(reference)) = dimension.code_list() else {
                continue;
            };
            if let Err(reason) = reference.resolve(self.resolver) {
                errors.push(ValidationError::CodeListInspection {
                    column: column.title.clone(),
                    path: reference.path().to_path_buf(),
                    reason,
                });
            }
        }
    }
}

/// Validate with default settings.
pub fn validate_cube(cube: &Cube) -> Diagnostics {
    Validator::new(cube).run()
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::cube::{Column, DataTable};
    use crate::model::{
        CatalogMetadata, Dimension, ExplicitPackageFields, Measure, MultiMeasureDimension,
        NewDimension, ObservationValue, PackageReference, Unit,
    };

    fn minimal_cube(unit: Option<Unit>) -> Cube {
        let data = DataTable::new()
            .with_column("Area", ["x", "y", "x"])
            .with_column("Value", ["1", "2", "3"]);
        let values = data_values(&data, "Area");
        Cube::new(
            CatalogMetadata::new("Minimal"),
            vec![
                Column::qb("Area", Dimension::New(NewDimension::from_data("Area", &values)).into()),
                Column::qb(
                    "Value",
                    ObservationValue::single(Measure::new_measure("Count"), unit).into(),
                ),
            ],
        )
        .with_data(data)
    }

    fn data_values(data: &DataTable, title: &str) -> std::collections::BTreeSet<String> {
        use crate::cube::DataSource;
        data.distinct_values(title)
    }

    #[test]
    fn test_minimal_valid_cube() {
        let diagnostics = validate_cube(&minimal_cube(Some(Unit::new_unit("People"))));
        assert!(diagnostics.is_empty(), "{diagnostics}");
    }

    #[test]
    fn test_missing_unit_scenario() {
        let diagnostics = validate_cube(&minimal_cube(None));
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics.errors()[0],
            ValidationError::NoUnitsDefined { .. }
        ));
    }

    #[test]
    fn test_fatal_short_circuits() {
        let cube = Cube::new(
            CatalogMetadata::new("Hybrid"),
            vec![
                Column::qb(
                    "A",
                    ObservationValue::single(Measure::new_measure("A"), None).into(),
                ),
                Column::qb(
                    "B",
                    ObservationValue::single(Measure::new_measure("B"), None).into(),
                ),
                Column::qb(
                    "Measure",
                    MultiMeasureDimension::new(vec![Measure::new_measure("A")]).into(),
                ),
            ],
        );
        let diagnostics = validate_cube(&cube);
        // no NoDimensionsDefined / NoUnitsDefined after the fatal error
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.has_fatal());
    }

    #[test]
    fn test_undefined_measure_completeness() {
        let data = DataTable::new()
            .with_column("Area", ["x", "x", "x"])
            .with_column("Measure", ["A", "B", "C"])
            .with_column("Value", ["1", "2", "3"]);
        let cube = Cube::new(
            CatalogMetadata::new("Measures"),
            vec![
                Column::qb(
                    "Area",
                    Dimension::New(NewDimension::from_data(
                        "Area",
                        &data_values(&data, "Area"),
                    ))
                    .into(),
                ),
                Column::qb(
                    "Measure",
                    MultiMeasureDimension::new(vec![
                        Measure::new_measure("A"),
                        Measure::new_measure("B"),
                    ])
                    .into(),
                ),
                Column::qb(
                    "Value",
                    ObservationValue::multi(Some(Unit::new_unit("People"))).into(),
                ),
            ],
        )
        .with_data(data);

        let diagnostics = validate_cube(&cube);
        assert_eq!(diagnostics.len(), 1, "{diagnostics}");
        let ValidationError::UndefinedMeasureUris { values, .. } = &diagnostics.errors()[0] else {
            panic!("unexpected {:?}", diagnostics.errors()[0]);
        };
        assert_eq!(values.iter().collect::<Vec<_>>(), vec!["C"]);
    }

    struct FixedResolver;

    impl CodeListResolver for FixedResolver {
        fn resolve(&self, metadata_path: &Path) -> Result<ExplicitPackageFields, String> {
            if metadata_path.ends_with("areas.csv-metadata.json") {
                Ok(ExplicitPackageFields {
                    csv_path: PathBuf::from("areas.csv"),
                    concept_scheme_uri: "areas.csv#code-list".into(),
                    concept_uri_template: "areas.csv#{+notation}".into(),
                })
            } else {
                Err(format!("cannot read `{}`", metadata_path.display()))
            }
        }
    }

    #[test]
    fn test_inspection_failure_is_reported() {
        let cube_with = |path: &str| {
            let mut cube = minimal_cube(Some(Unit::new_unit("People")));
            cube.columns[0] = Column::qb(
                "Area",
                Dimension::New(NewDimension::new("Area").with_code_list(
                    CodeList::InExistingPackage(PackageReference::Inspect(path.into())),
                ))
                .into(),
            );
            cube
        };

        let good = cube_with("lists/areas.csv-metadata.json");
        let diagnostics = Validator::new(&good).with_resolver(&FixedResolver).run();
        assert!(diagnostics.is_empty(), "{diagnostics}");

        let bad = cube_with("lists/regions.csv-metadata.json");
        let diagnostics = Validator::new(&bad).with_resolver(&FixedResolver).run();
        assert_eq!(diagnostics.count_code("CUBE-E060"), 1);

        // no resolver at all
        assert_eq!(validate_cube(&good).count_code("CUBE-E060"), 1);
    }
}
