//! Identifier collision detection.
//!
//! Same two phases as everywhere identifiers are minted: first collect
//! identifier -> labels claiming it, then report every identifier claimed by
//! more than one distinct label. Each scope (one code list, one attribute,
//! one measure column, one units column, the cube's columns) is checked on
//! its own. Labels slugging to nothing are reported separately.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;

use super::ValidationError;
use crate::cube::{Cube, StructuralDefinition};
use crate::model::{CodeList, ComponentKind, Identifiable, Measure, NewCodeList, Unit};
use crate::utils::csvw_column_name;

/// Identifier -> distinct labels producing it.
pub type IdentifierSources = BTreeMap<String, BTreeSet<String>>;

/// Concept identifier taken by the code list's own scheme URI (`<cl>.csv#code-list`).
pub const RESERVED_CONCEPT_IDENTIFIER: &str = "code-list";

/// Collect identifier -> labels for a group of components.
pub fn collect_identifiers<'a, T, I>(items: I) -> IdentifierSources
where
    T: Identifiable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sources = IdentifierSources::new();
    for item in items {
        sources
            .entry(item.uri_safe_identifier())
            .or_default()
            .insert(item.label().to_string());
    }
    sources
}

/// Identifiers claimed by more than one distinct label.
pub fn detect_conflicts(sources: IdentifierSources) -> IdentifierSources {
    sources
        .into_iter()
        .filter(|(_, labels)| labels.len() > 1)
        .collect()
}

fn report(
    errors: &mut Vec<ValidationError>,
    component: ComponentKind,
    location: &str,
    mut sources: IdentifierSources,
) {
    if let Some(labels) = sources.remove("") {
        errors.push(ValidationError::EmptyUriSafeIdentifier {
            component,
            location: location.to_string(),
            labels,
        });
    }
    let conflicts = detect_conflicts(sources);
    if !conflicts.is_empty() {
        errors.push(ValidationError::ConflictingUriSafeValues {
            component,
            location: location.to_string(),
            conflicts,
        });
    }
}

/// Check every identifier scope of the cube.
pub fn check_collisions(cube: &Cube, errors: &mut Vec<ValidationError>) {
    check_columns(cube, errors);

    let mut files = IdentifierSources::new();
    files
        .entry(cube.uri_safe_identifier())
        .or_default()
        .insert(cube.metadata.title.clone());

    for column in cube.qb_columns() {
        let location = column.title.as_str();
        match &column.component {
            StructuralDefinition::Dimension(dimension) => {
                if let Some(CodeList::New(list)) = dimension.code_list() {
                    files
                        .entry(list.uri_safe_identifier())
                        .or_default()
                        .insert(list.metadata.title.clone());
                    check_code_list(list, location, errors);
                }
            }
            StructuralDefinition::Attribute(attribute) => report(
                errors,
                ComponentKind::AttributeValue,
                location,
                collect_identifiers(attribute.new_values()),
            ),
            StructuralDefinition::MeasureDimension(measures) => report(
                errors,
                ComponentKind::Measure,
                location,
                collect_identifiers(measures.new_measures()),
            ),
            StructuralDefinition::Units(units) => report(
                errors,
                ComponentKind::Unit,
                location,
                collect_identifiers(units.new_units()),
            ),
            StructuralDefinition::Observation(observation) => {
                if let Some(Measure::New(measure)) = observation.measure() {
                    report(
                        errors,
                        ComponentKind::Measure,
                        location,
                        collect_identifiers([measure]),
                    );
                }
                if let Some(Unit::New(unit)) = observation.unit() {
                    report(errors, ComponentKind::Unit, location, collect_identifiers([unit]));
                }
            }
        }
    }

    // code lists are written next to the cube as `<id>.csv`
    report(errors, ComponentKind::CodeList, &cube.metadata.title, files);
}

/// Column titles must be unique, and so must the CSV-W names derived from them.
///
/// New dimensions and attributes mint their URIs from their own identifier,
/// every other column from the column's; neither may be empty.
fn check_columns(cube: &Cube, errors: &mut Vec<ValidationError>) {
    let mut components = IdentifierSources::new();
    for column in cube.qb_columns() {
        components
            .entry(column.component_identifier())
            .or_default()
            .insert(column.title.clone());
    }
    if let Some(labels) = components.remove("") {
        errors.push(ValidationError::EmptyUriSafeIdentifier {
            component: ComponentKind::Column,
            location: cube.metadata.title.clone(),
            labels,
        });
    }

    let mut seen = FxHashSet::default();
    let mut names = IdentifierSources::new();
    for column in &cube.columns {
        let title = column.title();
        if !seen.insert(title) {
            errors.push(ValidationError::DuplicateColumnTitle {
                title: title.to_string(),
            });
        }
        names
            .entry(csvw_column_name(title))
            .or_default()
            .insert(title.to_string());
    }
    report(errors, ComponentKind::Column, &cube.metadata.title, names);
}

/// Concept identifiers, the reserved identifier and the concept hierarchy.
pub fn check_code_list(list: &NewCodeList, location: &str, errors: &mut Vec<ValidationError>) {
    report(
        errors,
        ComponentKind::Concept,
        location,
        collect_identifiers(&list.concepts),
    );

    let codes: FxHashSet<String> = list.concepts.iter().map(|c| c.code()).collect();
    for concept in &list.concepts {
        let code = concept.code();
        if code == RESERVED_CONCEPT_IDENTIFIER {
            errors.push(ValidationError::ReservedUriValue {
                code_list: list.metadata.title.clone(),
                label: concept.label.clone(),
                identifier: code.clone(),
            });
        }
        if let Some(parent) = &concept.parent_code
            && !codes.contains(parent)
        {
            errors.push(ValidationError::UndefinedParentConcept {
                code_list: list.metadata.title.clone(),
                concept: concept.label.clone(),
                parent_code: parent.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Column;
    use crate::model::{
        Attribute, CatalogMetadata, Concept, Dimension, MultiMeasureDimension, NewAttribute,
        NewAttributeValue, NewDimension, ObservationValue,
    };
    use crate::utils::slug;

    fn code_list(labels: &[&str]) -> NewCodeList {
        NewCodeList::new(
            CatalogMetadata::new("Areas"),
            labels.iter().map(|l| Concept::new(*l)).collect(),
        )
    }

    #[test]
    fn test_collision_symmetry() {
        let (a, b) = ("Rest of World", "rest-of-world");
        assert_eq!(slug(a), slug(b));

        let mut errors = Vec::new();
        check_code_list(&code_list(&[a, b, "Europe"]), "Area", &mut errors);
        assert_eq!(errors.len(), 1);
        let ValidationError::ConflictingUriSafeValues { conflicts, .. } = &errors[0] else {
            panic!("expected a conflict, got {:?}", errors[0]);
        };
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            conflicts["rest-of-world"],
            BTreeSet::from([a.to_string(), b.to_string()])
        );

        let mut errors = Vec::new();
        check_code_list(&code_list(&[a, "Europe"]), "Area", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_reserved_concept_identifier() {
        let mut errors = Vec::new();
        check_code_list(&code_list(&["Code List"]), "Area", &mut errors);
        assert!(matches!(
            &errors[..],
            [ValidationError::ReservedUriValue { identifier, .. }] if identifier == "code-list"
        ));
    }

    #[test]
    fn test_undefined_parent_concept() {
        let list = NewCodeList::new(
            CatalogMetadata::new("Areas"),
            vec![
                Concept::new("UK"),
                Concept::new("England").with_parent("uk"),
                Concept::new("Wales").with_parent("gb"),
            ],
        );
        let mut errors = Vec::new();
        check_code_list(&list, "Area", &mut errors);
        assert!(matches!(
            &errors[..],
            [ValidationError::UndefinedParentConcept { parent_code, .. }] if parent_code == "gb"
        ));
    }

    #[test]
    fn test_cube_scopes() {
        let attribute = NewAttribute::new("Marker").with_values(vec![
            NewAttributeValue::new("Provisional"),
            NewAttributeValue::new("provisional"),
        ]);
        let measures = MultiMeasureDimension::new(vec![
            Measure::new_measure("Count"),
            Measure::new_measure("COUNT"),
        ]);
        let cube = Cube::new(
            CatalogMetadata::new("Population"),
            vec![
                Column::qb("Area", Dimension::New(NewDimension::new("Area")).into()),
                Column::qb("Marker", Attribute::New(attribute).into()),
                Column::qb("Measure", measures.into()),
                Column::suppressed("area"),
            ],
        );

        let mut errors = Vec::new();
        check_collisions(&cube, &mut errors);
        let kinds: Vec<_> = errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::ConflictingUriSafeValues { component, .. } => Some(*component),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Column,
                ComponentKind::AttributeValue,
                ComponentKind::Measure
            ]
        );
    }

    #[test]
    fn test_empty_concept_identifier() {
        let mut errors = Vec::new();
        check_code_list(&code_list(&["???", "North", "!!"]), "Area", &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "CUBE-E043");
        assert!(!errors[0].is_fatal());
        let ValidationError::EmptyUriSafeIdentifier {
            component, labels, ..
        } = &errors[0]
        else {
            panic!("expected an empty identifier, got {:?}", errors[0]);
        };
        assert_eq!(*component, ComponentKind::Concept);
        assert_eq!(labels, &BTreeSet::from(["!!".to_string(), "???".to_string()]));
    }

    #[test]
    fn test_empty_identifiers_across_components() {
        let cube = Cube::new(
            CatalogMetadata::new("Population"),
            vec![
                Column::qb("Area", Dimension::New(NewDimension::new("Area")).into()),
                Column::qb("%", Dimension::existing("http://example.com/dimension/pct").into()),
                Column::qb(
                    "Measure",
                    MultiMeasureDimension::new(vec![
                        Measure::new_measure("Count"),
                        Measure::new_measure("#"),
                    ])
                    .into(),
                ),
                Column::qb("Value", ObservationValue::multi(Some(Unit::new_unit("*"))).into()),
            ],
        );
        let mut errors = Vec::new();
        check_collisions(&cube, &mut errors);
        let kinds: Vec<_> = errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::EmptyUriSafeIdentifier { component, .. } => Some(*component),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::Column, ComponentKind::Measure, ComponentKind::Unit]
        );
    }

    #[test]
    fn test_code_list_file_clashes_with_cube() {
        let cube = Cube::new(
            CatalogMetadata::new("Areas"),
            vec![Column::qb(
                "Area",
                Dimension::New(NewDimension::new("Area").with_code_list(CodeList::New(
                    NewCodeList::new(CatalogMetadata::new("AREAS"), vec![Concept::new("North")]),
                )))
                .into(),
            )],
        );
        let mut errors = Vec::new();
        check_collisions(&cube, &mut errors);
        assert!(matches!(
            &errors[..],
            [ValidationError::ConflictingUriSafeValues {
                component: ComponentKind::CodeList,
                ..
            }]
        ));
    }
}
