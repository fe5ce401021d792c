//! Cube shape and component cardinality.

use super::ValidationError;
use crate::cube::{Column, ColumnIndex, CubeShape, Indexed, StructuralDefinition};
use crate::model::{ComponentKind, ObservationValue};

fn titles<T>(items: &[Indexed<'_, T>]) -> Vec<String> {
    items.iter().map(|i| i.column.title.clone()).collect()
}

/// Contradictions that make every other structural check meaningless.
///
/// Returns `true` when at least one was found.
pub fn check_fatal(index: &ColumnIndex<'_>, errors: &mut Vec<ValidationError>) -> bool {
    let before = errors.len();

    for measures in &index.measure_dimensions {
        if measures.component.all_new().is_none() {
            errors.push(ValidationError::MixedNewAndExisting {
                component: ComponentKind::MeasureDimension,
                column: measures.column.title.clone(),
            });
        }
    }
    for units in &index.units_columns {
        if units.component.all_new().is_none() {
            errors.push(ValidationError::MixedNewAndExisting {
                component: ComponentKind::UnitsColumn,
                column: units.column.title.clone(),
            });
        }
    }

    // Several multi-measure columns without a measure column are a
    // cardinality error, not a shape contradiction.
    let multi_measure = index
        .observations
        .iter()
        .filter(|o| o.component.is_multi_measure())
        .count();
    if index.shape() == CubeShape::Hybrid
        && (!index.measure_dimensions.is_empty() || multi_measure <= 1)
    {
        errors.push(ValidationError::HybridShape {
            observation_columns: titles(&index.observations),
            measure_columns: titles(&index.measure_dimensions),
        });
    }

    errors.len() > before
}

/// Cardinality and shape-specific rules.
pub fn check_shape(index: &ColumnIndex<'_>, errors: &mut Vec<ValidationError>) {
    if index.dimensions.is_empty() {
        errors.push(ValidationError::NoDimensionsDefined);
    }
    if index.measure_dimensions.len() > 1 {
        errors.push(ValidationError::MoreThanOneMeasureColumn {
            columns: titles(&index.measure_dimensions),
        });
    }

    let multi_measure: Vec<_> = index
        .observations
        .iter()
        .filter(|o| o.component.is_multi_measure())
        .copied()
        .collect();
    if multi_measure.len() > 1 {
        errors.push(ValidationError::MoreThanOneObservationsColumn {
            columns: titles(&multi_measure),
        });
        return;
    }

    check_links(index, errors);

    match index.observations.as_slice() {
        [] => errors.push(ValidationError::NoObservedValuesColumnDefined),
        [observation] => check_standard(index, *observation, errors),
        _ => check_pivoted(index, errors),
    }
}

/// An explicit `describes_observations` link must name an observation column.
fn check_links(index: &ColumnIndex<'_>, errors: &mut Vec<ValidationError>) {
    let linked = index
        .attributes
        .iter()
        .map(|a| (a.column, a.component.describes_observations()))
        .chain(
            index
                .units_columns
                .iter()
                .map(|u| (u.column, u.component.describes_observations.as_deref())),
        );

    for (column, link) in linked {
        let Some(link) = link else { continue };
        match index.column(link) {
            None => errors.push(ValidationError::LinkedObsColumnDoesntExist {
                column: column.title.clone(),
                linked: link.to_string(),
            }),
            Some(Column::Qb(target))
                if matches!(target.component, StructuralDefinition::Observation(_)) => {}
            Some(_) => errors.push(ValidationError::LinkedToNonObsColumn {
                column: column.title.clone(),
                linked: link.to_string(),
            }),
        }
    }
}

fn check_standard(
    index: &ColumnIndex<'_>,
    observation: Indexed<'_, ObservationValue>,
    errors: &mut Vec<ValidationError>,
) {
    let title = &observation.column.title;

    if index.units_columns.len() > 1 {
        errors.push(ValidationError::MoreThanOneUnitsColumn {
            columns: titles(&index.units_columns),
        });
    }

    match observation.component {
        ObservationValue::Single(_) => {
            if let Some(measures) = index.measure_dimensions.first() {
                errors.push(ValidationError::BothMeasureTypesDefined {
                    observation_column: title.clone(),
                    measure_column: measures.column.title.clone(),
                });
            }
        }
        // One multi-measure column plus one measure column is the standard
        // measure-type layout, not a hybrid.
        ObservationValue::Multi(_) => {
            let defined = index
                .measure_dimensions
                .first()
                .is_some_and(|m| !m.component.measures.is_empty());
            if !defined {
                errors.push(ValidationError::NoMeasuresDefined {
                    observation_column: title.clone(),
                });
            }
        }
    }

    check_unit_source(index, observation, errors);
}

fn check_pivoted(index: &ColumnIndex<'_>, errors: &mut Vec<ValidationError>) {
    // measure identity -> (display name, observation column titles)
    let mut measures: Vec<(String, &str, Vec<String>)> = Vec::new();
    for observation in &index.observations {
        let Some(measure) = observation.component.measure() else {
            continue;
        };
        let key = measure.identity_key();
        match measures.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, columns)) => columns.push(observation.column.title.clone()),
            None => measures.push((
                key,
                measure.display_name(),
                vec![observation.column.title.clone()],
            )),
        }
    }
    for (_, measure, columns) in measures {
        if columns.len() > 1 {
            errors.push(ValidationError::DuplicateMeasure {
                measure: measure.to_string(),
                columns,
            });
        }
    }

    // every qualifier must say which observation column it belongs to
    for attribute in &index.attributes {
        if attribute.component.describes_observations().is_none() {
            errors.push(ValidationError::AttributeNotLinked {
                component: ComponentKind::Attribute,
                column: attribute.column.title.clone(),
            });
        }
    }
    for units in &index.units_columns {
        if units.component.describes_observations.is_none() {
            errors.push(ValidationError::AttributeNotLinked {
                component: ComponentKind::UnitsColumn,
                column: units.column.title.clone(),
            });
        }
    }

    for observation in &index.observations {
        check_unit_source(index, *observation, errors);
    }
}

/// The unit comes from exactly one of: the observation, a units column.
fn check_unit_source(
    index: &ColumnIndex<'_>,
    observation: Indexed<'_, ObservationValue>,
    errors: &mut Vec<ValidationError>,
) {
    let title = &observation.column.title;
    let units_columns = index.units_columns_for(title);

    if index.shape() == CubeShape::Pivoted && units_columns.len() > 1 {
        errors.push(ValidationError::MoreThanOneUnitsColumn {
            columns: titles(&units_columns),
        });
    }

    match (observation.component.unit(), units_columns.first()) {
        (Some(_), Some(units)) => errors.push(ValidationError::BothUnitTypesDefined {
            observation_column: title.clone(),
            units_column: units.column.title.clone(),
        }),
        (None, None) => errors.push(ValidationError::NoUnitsDefined {
            observation_column: title.clone(),
        }),
        (None, Some(units)) if units.component.units.is_empty() => {
            errors.push(ValidationError::NoUnitsDefined {
                observation_column: title.clone(),
            })
        }
        (Some(_), None) | (None, Some(_)) => {}
    }
}
