//! The cube's data CSV.
//!
//! Cells of columns whose values are minted locally (new code lists,
//! attribute values, measures and units) are replaced with the minted
//! identifier, so the `valueUrl` templates expand to the generated URIs.

use rustc_hash::FxHashMap;

use super::{WriteContext, WriteError};
use crate::cube::{Column, DataSource, QbColumn, StructuralDefinition};
use crate::model::{CodeList, Identifiable};
use crate::utils::slug;

/// Label to identifier mapping of one column.
#[derive(Debug, Default)]
struct Substitution(FxHashMap<String, String>);

impl Substitution {
    fn from_items<'a, T: Identifiable + 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        let mut map = FxHashMap::default();
        for item in items {
            let identifier = item.uri_safe_identifier();
            map.entry(item.label().to_string())
                .or_insert_with(|| identifier.clone());
            map.entry(identifier.clone()).or_insert(identifier);
        }
        Self(map)
    }

    /// Label first, then identifier, then the slug of the raw value.
    fn apply(&self, value: &str) -> String {
        match self.0.get(value) {
            Some(identifier) => identifier.clone(),
            None => slug(value),
        }
    }
}

fn substitution(column: &QbColumn) -> Option<Substitution> {
    if column.cell_uri_template.is_some() {
        return None;
    }
    match &column.component {
        StructuralDefinition::Dimension(dimension) => match dimension.code_list()? {
            CodeList::New(list) => Some(Substitution::from_items(&list.concepts)),
            CodeList::Existing(_) | CodeList::InExistingPackage(_) => None,
        },
        StructuralDefinition::Attribute(attribute) => {
            if attribute.literal().is_some() || attribute.new_values().is_empty() {
                None
            } else {
                Some(Substitution::from_items(attribute.new_values()))
            }
        }
        StructuralDefinition::MeasureDimension(measures) => (measures.all_new() == Some(true))
            .then(|| Substitution::from_items(measures.new_measures())),
        StructuralDefinition::Units(units) => {
            (units.all_new() == Some(true)).then(|| Substitution::from_items(units.new_units()))
        }
        StructuralDefinition::Observation(_) => None,
    }
}

pub fn write_data(context: &WriteContext<'_>) -> Result<String, WriteError> {
    let columns = &context.cube.columns;
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(Column::title))?;

    let Some(data) = &context.cube.data else {
        return finish_csv(writer);
    };

    let sources: Vec<_> = columns
        .iter()
        .map(|column| {
            let cells = data.column_values(column.title()).unwrap_or_default();
            let substitution = column.as_qb().and_then(substitution);
            (cells, substitution)
        })
        .collect();

    let mut record = Vec::with_capacity(columns.len());
    for row in 0..data.row_count() {
        record.clear();
        for (cells, substitution) in &sources {
            let cell = cells.get(row).and_then(|c| c.as_deref());
            record.push(match (cell, substitution) {
                (Some(value), Some(substitution)) => substitution.apply(value),
                (Some(value), None) => value.to_string(),
                (None, _) => String::new(),
            });
        }
        writer.write_record(&record)?;
    }

    finish_csv(writer)
}

/// Flush an in-memory CSV writer into a string.
pub fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String, WriteError> {
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Cube, DataTable};
    use crate::model::{
        Attribute, CatalogMetadata, Concept, Dimension, Measure, MultiMeasureDimension,
        NewAttribute, NewAttributeValue, NewCodeList, NewDimension, ObservationValue, Unit,
    };
    use crate::writer::tests::minimal_cube;

    fn csv_lines(cube: &Cube) -> Vec<String> {
        let context = WriteContext::new(cube, None).unwrap();
        write_data(&context)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_minimal_data() {
        assert_eq!(
            csv_lines(&minimal_cube()),
            vec!["Area,Value", "x,1", "y,2", "x,3"]
        );
    }

    #[test]
    fn test_labels_replaced_with_identifiers() {
        let data = DataTable::new()
            .with_column("Region", ["North East", "ne", "South"])
            .with_column("Measure", ["Gross Value", "Gross Value", "Net"])
            .with_column("Marker", ["Provisional", "", "Final Figure"])
            .with_column("Note", ["kept as is", "x", "y"])
            .with_column("Value", ["1", "", "3"]);
        let regions = NewCodeList::new(
            CatalogMetadata::new("Regions"),
            vec![Concept::new("North East").with_code("ne"), Concept::new("South")],
        );
        let cube = Cube::new(
            CatalogMetadata::new("Values"),
            vec![
                Column::qb(
                    "Region",
                    Dimension::New(
                        NewDimension::new("Region").with_code_list(CodeList::New(regions)),
                    )
                    .into(),
                ),
                Column::qb(
                    "Measure",
                    MultiMeasureDimension::new(vec![
                        Measure::new_measure("Gross Value"),
                        Measure::new_measure("Net"),
                    ])
                    .into(),
                ),
                Column::qb(
                    "Marker",
                    Attribute::New(NewAttribute::new("Marker").with_values(vec![
                        NewAttributeValue::new("Provisional"),
                        NewAttributeValue::new("Final Figure"),
                    ]))
                    .into(),
                ),
                Column::suppressed("Note"),
                Column::qb("Value", ObservationValue::multi(Some(Unit::new_unit("GBP"))).into()),
            ],
        )
        .with_data(data);

        assert_eq!(
            csv_lines(&cube),
            vec![
                "Region,Measure,Marker,Note,Value",
                "ne,gross-value,provisional,kept as is,1",
                "ne,gross-value,,x,",
                "south,net,final-figure,y,3",
            ]
        );
    }

    #[test]
    fn test_templated_column_passes_through() {
        let mut cube = minimal_cube();
        let Column::Qb(area) = &mut cube.columns[0] else {
            panic!("expected a qb column");
        };
        area.cell_uri_template = Some("http://example.com/area/{area}".into());
        assert_eq!(csv_lines(&cube)[1], "x,1");
    }

    #[test]
    fn test_header_only_without_data() {
        let mut cube = minimal_cube();
        cube.data = None;
        assert_eq!(csv_lines(&cube), vec!["Area,Value"]);
    }
}
