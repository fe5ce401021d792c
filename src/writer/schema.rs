//! Table schema of the cube's data CSV.
//!
//! Standard cubes describe one observation per row: every column hangs off
//! the table-level `aboutUrl`. Pivoted cubes describe one observation per
//! observation column: each such column, its qualifiers and a set of
//! virtual columns per observation carry their own `aboutUrl`, and the real
//! dimension columns are suppressed in favour of per-observation copies.

use serde_json::{Map, Value, json};

use super::WriteContext;
use crate::cube::{Column, CubeShape, Indexed, QbColumn, StructuralDefinition};
use crate::model::{CodeList, ObservationValue};
use crate::uri::variable;
use crate::vocab::{qb, rdf, sdmx};

/// Code-list column the foreign keys of new code lists point at.
pub const CODE_LIST_KEY_COLUMN: &str = "uri_identifier";

pub fn table_schema(context: &WriteContext<'_>) -> Value {
    let shape = context.shape();

    let mut columns: Vec<Value> = context
        .cube
        .columns
        .iter()
        .map(|column| match column {
            Column::Suppressed(c) => json!({
                "titles": c.title,
                "name": column.csvw_name(),
                "suppressOutput": true,
            }),
            Column::Qb(qb) => Value::Object(qb_column(context, qb, shape)),
        })
        .collect();

    match shape {
        CubeShape::Pivoted => {
            for observation in &context.index.observations {
                columns.extend(observation_virtual_columns(context, *observation, true));
            }
        }
        CubeShape::Standard | CubeShape::Hybrid => {
            if let Some(observation) = context.index.observations.first() {
                columns.extend(observation_virtual_columns(context, *observation, false));
            }
        }
    }

    let mut schema = Map::new();
    schema.insert("columns".into(), Value::Array(columns));
    let foreign_keys = foreign_keys(context);
    if !foreign_keys.is_empty() {
        schema.insert("foreignKeys".into(), Value::Array(foreign_keys));
    }
    schema.insert("primaryKey".into(), json!(context.key_columns()));
    if shape != CubeShape::Pivoted
        && let Some(observation) = context.index.observations.first()
    {
        schema.insert("aboutUrl".into(), json!(context.observation_uri(*observation)));
    }
    Value::Object(schema)
}

fn qb_column(
    context: &WriteContext<'_>,
    column: &QbColumn,
    shape: CubeShape,
) -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert("titles".into(), json!(column.title));
    entry.insert("name".into(), json!(column.csvw_name()));

    let value_url = context.value_url(column);
    let pivoted = shape == CubeShape::Pivoted;

    match &column.component {
        StructuralDefinition::Dimension(dimension) => {
            entry.insert(
                "propertyUrl".into(),
                json!(context.dimension_uri(column, dimension)),
            );
            if let Some(url) = value_url {
                entry.insert("valueUrl".into(), json!(url));
            }
            entry.insert("required".into(), json!(true));
            if pivoted {
                entry.insert("suppressOutput".into(), json!(true));
            }
        }
        StructuralDefinition::Attribute(attribute) => {
            if pivoted {
                insert_linked_about_url(context, &mut entry, attribute.describes_observations());
            }
            entry.insert(
                "propertyUrl".into(),
                json!(context.attribute_uri(column, attribute)),
            );
            match (attribute.literal(), value_url) {
                (Some(data_type), _) => {
                    entry.insert("datatype".into(), json!(data_type.name()));
                }
                (None, Some(url)) => {
                    entry.insert("valueUrl".into(), json!(url));
                }
                (None, None) => {}
            }
            entry.insert("required".into(), json!(attribute.is_required()));
        }
        StructuralDefinition::MeasureDimension(_) => {
            entry.insert("propertyUrl".into(), json!(qb::MEASURE_TYPE));
            if let Some(url) = value_url {
                entry.insert("valueUrl".into(), json!(url));
            }
            entry.insert("required".into(), json!(true));
        }
        StructuralDefinition::Units(units) => {
            if pivoted {
                let linked = units.describes_observations.as_deref();
                insert_linked_about_url(context, &mut entry, linked);
            }
            entry.insert("propertyUrl".into(), json!(sdmx::UNIT_MEASURE));
            if let Some(url) = value_url {
                entry.insert("valueUrl".into(), json!(url));
            }
            entry.insert("required".into(), json!(true));
        }
        StructuralDefinition::Observation(observation) => {
            if pivoted && let Some(indexed) = context.index.observation(&column.title) {
                entry.insert("aboutUrl".into(), json!(context.observation_uri(indexed)));
            }
            let property = match observation {
                ObservationValue::Single(single) => Some(context.measure_uri(&single.measure)),
                // the measure comes from the measure column of the same row
                ObservationValue::Multi(_) => context
                    .index
                    .measure_dimension()
                    .and_then(|m| context.value_url(m.column)),
            };
            if let Some(property) = property {
                entry.insert("propertyUrl".into(), json!(property));
            }
            entry.insert("datatype".into(), json!(observation.data_type().name()));
            entry.insert(
                "required".into(),
                json!(!has_status_attribute(context, &column.title)),
            );
        }
    }

    entry
}

/// Missing observations are allowed where an observation-status attribute can explain them.
fn has_status_attribute(context: &WriteContext<'_>, observation: &str) -> bool {
    context
        .index
        .attributes_for(observation)
        .iter()
        .any(|a| a.component.is_observation_status())
}

fn insert_linked_about_url(
    context: &WriteContext<'_>,
    entry: &mut Map<String, Value>,
    linked: Option<&str>,
) {
    if let Some(observation) = linked.and_then(|title| context.index.observation(title)) {
        entry.insert("aboutUrl".into(), json!(context.observation_uri(observation)));
    }
}

fn virtual_column(
    name: String,
    about_url: Option<&str>,
    property_url: &str,
    value_url: &str,
) -> Value {
    let mut entry = Map::new();
    entry.insert("name".into(), json!(name));
    entry.insert("virtual".into(), json!(true));
    if let Some(about) = about_url {
        entry.insert("aboutUrl".into(), json!(about));
    }
    entry.insert("propertyUrl".into(), json!(property_url));
    entry.insert("valueUrl".into(), json!(value_url));
    Value::Object(entry)
}

/// Type, dataset, measure and unit of every observation in a column.
///
/// In pivoted shape the dimension values are repeated per observation too.
fn observation_virtual_columns(
    context: &WriteContext<'_>,
    observation: Indexed<'_, ObservationValue>,
    pivoted: bool,
) -> Vec<Value> {
    let suffix = if pivoted {
        format!("_{}", observation.column.csvw_name())
    } else {
        String::new()
    };
    let about = pivoted.then(|| context.observation_uri(observation));
    let about = about.as_deref();

    let mut columns = vec![
        virtual_column(format!("virt_type{suffix}"), about, rdf::TYPE, qb::OBSERVATION),
        virtual_column(
            format!("virt_dataset{suffix}"),
            about,
            qb::DATA_SET_PROPERTY,
            &context.uris.dataset(),
        ),
    ];

    if let Some(measure) = observation.component.measure() {
        columns.push(virtual_column(
            format!("virt_measure{suffix}"),
            about,
            qb::MEASURE_TYPE,
            &context.measure_uri(measure),
        ));
    }
    if let Some(unit) = observation.component.unit() {
        columns.push(virtual_column(
            format!("virt_unit{suffix}"),
            about,
            sdmx::UNIT_MEASURE,
            &context.unit_uri(unit),
        ));
    }

    if pivoted {
        for dimension in &context.index.dimensions {
            let name = dimension.column.csvw_name();
            let value = context
                .value_url(dimension.column)
                .unwrap_or_else(|| variable(&name, true));
            columns.push(virtual_column(
                format!("virt_dim_{name}{suffix}"),
                about,
                &context.dimension_uri(dimension.column, dimension.component),
                &value,
            ));
        }
    }

    columns
}

/// Dimensions with a new code list reference that list's table.
fn foreign_keys(context: &WriteContext<'_>) -> Vec<Value> {
    context
        .index
        .dimensions
        .iter()
        .filter(|d| d.column.cell_uri_template.is_none())
        .filter_map(|d| match d.component.code_list() {
            Some(CodeList::New(list)) => Some(json!({
                "columnReference": d.column.csvw_name(),
                "reference": {
                    "resource": list.csv_file_name(),
                    "columnReference": CODE_LIST_KEY_COLUMN,
                },
            })),
            _ => None,
        })
        .collect()
}
