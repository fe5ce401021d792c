//! Completeness of the data against the declared components.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use super::ValidationError;
use crate::cube::{ColumnIndex, DataSource, QbColumn};
use crate::model::{CodeList, Identifiable};
use crate::uri::UriTemplate;
use crate::utils::slug;

/// Values a column may legally hold.
#[derive(Debug, Default)]
struct Declared {
    labels: FxHashSet<String>,
    identifiers: FxHashSet<String>,
    uris: FxHashSet<String>,
}

impl Declared {
    fn from_new<'a, T: Identifiable + 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        let mut declared = Self::default();
        for item in items {
            declared.labels.insert(item.label().to_string());
            declared.identifiers.insert(item.uri_safe_identifier());
        }
        declared
    }

    fn from_uris<'a>(uris: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            uris: uris.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// New values match by label or identifier; existing ones by the URI the
    /// cell expands to.
    fn contains(&self, value: &str, cell: &CellExpansion) -> bool {
        self.labels.contains(value)
            || self.identifiers.contains(value)
            || self.identifiers.contains(&slug(value))
            || self.uris.contains(&cell.expand(value))
    }
}

/// How a raw cell becomes a URI.
struct CellExpansion {
    template: Option<UriTemplate>,
    variable: String,
}

impl CellExpansion {
    fn for_column(column: &QbColumn) -> Self {
        Self {
            template: column
                .cell_uri_template
                .as_deref()
                .and_then(|t| UriTemplate::parse(t).ok()),
            variable: column.csvw_name(),
        }
    }

    fn expand(&self, value: &str) -> String {
        match &self.template {
            Some(template) => template.expand_one(&self.variable, value),
            None => value.to_string(),
        }
    }
}

fn undefined(
    data: &dyn DataSource,
    column: &QbColumn,
    declared: &Declared,
) -> Option<BTreeSet<String>> {
    let cell = CellExpansion::for_column(column);
    let missing: BTreeSet<String> = data
        .distinct_values(&column.title)
        .into_iter()
        .filter(|value| !declared.contains(value, &cell))
        .collect();
    (!missing.is_empty()).then_some(missing)
}

/// Check the distinct values of every column with a declared value set, and
/// the rows lacking an observation.
pub fn check_data(
    index: &ColumnIndex<'_>,
    data: &dyn DataSource,
    errors: &mut Vec<ValidationError>,
) {
    for measures in &index.measure_dimensions {
        let declared = if measures.component.all_new() == Some(true) {
            Declared::from_new(measures.component.new_measures())
        } else {
            Declared::from_uris(measures.component.existing_measures().map(|m| m.uri.as_str()))
        };
        if let Some(values) = undefined(data, measures.column, &declared) {
            errors.push(ValidationError::UndefinedMeasureUris {
                column: measures.column.title.clone(),
                values,
            });
        }
    }

    for units in &index.units_columns {
        let declared = if units.component.all_new() == Some(true) {
            Declared::from_new(units.component.new_units())
        } else {
            Declared::from_uris(units.component.existing_units().map(|u| u.uri.as_str()))
        };
        if let Some(values) = undefined(data, units.column, &declared) {
            errors.push(ValidationError::UndefinedUnitUris {
                column: units.column.title.clone(),
                values,
            });
        }
    }

    for attribute in &index.attributes {
        let component = attribute.component;
        if component.literal().is_some() || component.new_values().is_empty() {
            continue;
        }
        let declared = Declared::from_new(component.new_values());
        if let Some(values) = undefined(data, attribute.column, &declared) {
            errors.push(ValidationError::UndefinedAttributeValueUris {
                column: attribute.column.title.clone(),
                values,
            });
        }
    }

    for dimension in &index.dimensions {
        let Some(CodeList::New(list)) = dimension.component.code_list() else {
            continue;
        };
        if dimension.column.cell_uri_template.is_some() {
            continue;
        }
        let declared = Declared::from_new(&list.concepts);
        if let Some(values) = undefined(data, dimension.column, &declared) {
            errors.push(ValidationError::UndefinedCodeListValues {
                column: dimension.column.title.clone(),
                code_list: list.metadata.title.clone(),
                values,
            });
        }
    }

    check_missing_observations(index, data, errors);
}

/// A missing observation is allowed only where an observation-status
/// attribute explains it.
fn check_missing_observations(
    index: &ColumnIndex<'_>,
    data: &dyn DataSource,
    errors: &mut Vec<ValidationError>,
) {
    for observation in &index.observations {
        let title = &observation.column.title;
        let missing = data.missing_rows(title);
        if missing.is_empty() {
            continue;
        }

        let statuses: Vec<&[Option<String>]> = index
            .attributes_for(title)
            .iter()
            .filter(|a| a.component.is_observation_status())
            .filter_map(|a| data.column_values(&a.column.title))
            .collect();

        let row_numbers: Vec<usize> = missing
            .into_iter()
            .filter(|&row| {
                !statuses
                    .iter()
                    .any(|cells| cells.get(row).is_some_and(Option::is_some))
            })
            .map(|row| row + 1)
            .collect();

        if !row_numbers.is_empty() {
            errors.push(ValidationError::ObservationValuesMissing {
                column: title.clone(),
                row_numbers,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Column, DataTable};
    use crate::model::{
        Attribute, Dimension, ExistingAttribute, Measure, MultiMeasureDimension, MultiUnits,
        NewAttribute, NewAttributeValue, NewDimension, ObservationValue, Unit,
    };
    use crate::vocab::sdmx;

    fn run(columns: &[Column], data: &DataTable) -> Vec<ValidationError> {
        let index = ColumnIndex::build(columns);
        let mut errors = Vec::new();
        check_data(&index, data, &mut errors);
        errors
    }

    #[test]
    fn test_undefined_measure() {
        let columns = vec![Column::qb(
            "Measure",
            MultiMeasureDimension::new(vec![Measure::new_measure("A"), Measure::new_measure("B")])
                .into(),
        )];
        let data = DataTable::new().with_column("Measure", ["A", "B", "C", "b"]);
        let errors = run(&columns, &data);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::UndefinedMeasureUris { values, .. }
                if *values == BTreeSet::from(["C".to_string()])
        ));
    }

    #[test]
    fn test_existing_units_expand_through_template() {
        let column = crate::cube::QbColumn::new(
            "Unit",
            MultiUnits::new(vec![Unit::existing("http://qudt.org/vocab/unit/NUM")]).into(),
        )
        .with_cell_uri_template("http://qudt.org/vocab/unit/{+unit}");
        let columns = vec![Column::Qb(column)];
        let data = DataTable::new().with_column("Unit", ["NUM", "GBP"]);
        assert!(matches!(
            &run(&columns, &data)[..],
            [ValidationError::UndefinedUnitUris { values, .. }]
                if *values == BTreeSet::from(["GBP".to_string()])
        ));
    }

    #[test]
    fn test_undefined_attribute_values_and_code_list_values() {
        let attribute =
            NewAttribute::new("Marker").with_values(vec![NewAttributeValue::new("Provisional")]);
        let mut values = BTreeSet::new();
        values.insert("North".to_string());
        let columns = vec![
            Column::qb("Area", Dimension::New(NewDimension::from_data("Area", &values)).into()),
            Column::qb("Marker", Attribute::New(attribute).into()),
        ];
        let data = DataTable::new()
            .with_column("Area", ["North", "South"])
            .with_column("Marker", ["provisional", "Final"]);
        let codes: Vec<_> = run(&columns, &data).iter().map(ValidationError::code).collect();
        assert_eq!(codes, vec!["CUBE-E052", "CUBE-E053"]);
    }

    #[test]
    fn test_missing_observations_need_status() {
        let obs = || {
            ObservationValue::single(Measure::new_measure("Count"), Some(Unit::new_unit("People")))
        };
        let status = Attribute::Existing(ExistingAttribute::new(sdmx::OBS_STATUS));

        let data = DataTable::new()
            .with_column("Value", ["1", "", "", "4"])
            .with_column("Status", ["", "x", "", ""]);

        let without_status = vec![Column::qb("Value", obs().into())];
        assert!(matches!(
            &run(&without_status, &data)[..],
            [ValidationError::ObservationValuesMissing { row_numbers, .. }]
                if *row_numbers == vec![2, 3]
        ));

        let with_status = vec![
            Column::qb("Value", obs().into()),
            Column::qb("Status", status.into()),
        ];
        assert!(matches!(
            &run(&with_status, &data)[..],
            [ValidationError::ObservationValuesMissing { row_numbers, .. }]
                if *row_numbers == vec![3]
        ));
    }
}
