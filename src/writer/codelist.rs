//! Package of a new code list, scoped to its own document identity.
//!
//! ```text
//! <id>.csv                 Label, Notation, Parent Notation, Sort Priority, Description[, Same As]
//! <id>.csv-metadata.json   concept scheme + catalog record, table pointing at the schema
//! <id>.table.json          reusable table schema
//! ```

use serde_json::{Value, json};

use super::data::finish_csv;
use super::schema::CODE_LIST_KEY_COLUMN;
use super::structure::{Graph, HintTargets, describe_catalog};
use super::{PackageFile, WriteError, to_json};
use crate::debug;
use crate::model::{ComponentKind, Identifiable, NewCodeList, SerialisationHint};
use crate::uri::{UriHelper, variable};
use crate::utils::plural_count;
use crate::vocab::{self, rdf, rdfs, skos, ui};

const PARENT_KEY_COLUMN: &str = "parent_uri_identifier";
const SAME_AS_COLUMN: &str = "same_as";

pub fn table_file_name(list: &NewCodeList) -> String {
    format!("{}.table.json", list.uri_safe_identifier())
}

fn metadata_file_name(list: &NewCodeList) -> String {
    format!("{}-metadata.json", list.csv_file_name())
}

fn has_same_as(list: &NewCodeList) -> bool {
    list.concepts.iter().any(|c| c.is_duplicated())
}

/// CSV, metadata and table schema of `list`, in that order.
pub fn write_code_list(list: &NewCodeList, pretty: bool) -> Result<Vec<PackageFile>, WriteError> {
    let files = vec![
        PackageFile::new(list.csv_file_name(), code_list_csv(list)?),
        PackageFile::new(metadata_file_name(list), to_json(&metadata(list)?, pretty)?),
        PackageFile::new(table_file_name(list), to_json(&table_schema(list), pretty)?),
    ];
    debug!(
        "codelist";
        "{} ({})",
        list.csv_file_name(),
        plural_count(list.concepts.len(), "concept")
    );
    Ok(files)
}

fn code_list_csv(list: &NewCodeList) -> Result<String, WriteError> {
    let same_as = has_same_as(list);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut headers = vec!["Label", "Notation", "Parent Notation", "Sort Priority", "Description"];
    if same_as {
        headers.push("Same As");
    }
    writer.write_record(&headers)?;

    for (position, concept) in list.concepts.iter().enumerate() {
        let sort_priority = concept.sort_order.unwrap_or(position as i64).to_string();
        let mut record = vec![
            concept.label.clone(),
            concept.code(),
            concept.parent_code.clone().unwrap_or_default(),
            sort_priority,
            concept.description.clone().unwrap_or_default(),
        ];
        if same_as {
            record.push(concept.same_as.clone().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    finish_csv(writer)
}

fn column(title: &str, name: &str, property: &str) -> serde_json::Map<String, Value> {
    let mut entry = serde_json::Map::new();
    entry.insert("titles".into(), json!(title));
    entry.insert("name".into(), json!(name));
    entry.insert("propertyUrl".into(), json!(property));
    entry
}

fn table_schema(list: &NewCodeList) -> Value {
    let uris = UriHelper::for_code_list(list);
    let scheme = uris.code_list_scheme();

    let mut label = column("Label", "label", rdfs::LABEL);
    label.insert("required".into(), json!(true));

    let mut notation = column("Notation", CODE_LIST_KEY_COLUMN, skos::NOTATION);
    notation.insert("required".into(), json!(true));

    let mut parent = column("Parent Notation", PARENT_KEY_COLUMN, skos::BROADER);
    parent.insert(
        "valueUrl".into(),
        json!(uris.concept(&variable(PARENT_KEY_COLUMN, true))),
    );

    let mut sort = column("Sort Priority", "sort_priority", ui::SORT_PRIORITY);
    sort.insert("datatype".into(), json!("integer"));

    let description = column("Description", "description", rdfs::COMMENT);

    let mut columns: Vec<Value> = [label, notation, parent, sort, description]
        .into_iter()
        .map(Value::Object)
        .collect();
    if has_same_as(list) {
        let mut same_as = column("Same As", SAME_AS_COLUMN, skos::EXACT_MATCH);
        same_as.insert("valueUrl".into(), json!(variable(SAME_AS_COLUMN, true)));
        columns.push(Value::Object(same_as));
    }
    columns.push(json!({
        "name": "virt_in_scheme",
        "virtual": true,
        "propertyUrl": skos::IN_SCHEME,
        "valueUrl": scheme,
    }));
    columns.push(json!({
        "name": "virt_type",
        "virtual": true,
        "propertyUrl": rdf::TYPE,
        "valueUrl": skos::CONCEPT,
    }));

    json!({
        "columns": columns,
        "primaryKey": CODE_LIST_KEY_COLUMN,
        "aboutUrl": concept_about_url(list),
    })
}

/// `aboutUrl` of every concept row.
pub fn concept_about_url(list: &NewCodeList) -> String {
    UriHelper::for_code_list(list).concept(&variable(CODE_LIST_KEY_COLUMN, true))
}

fn metadata(list: &NewCodeList) -> Result<Value, WriteError> {
    let uris = UriHelper::for_code_list(list);
    let scheme = uris.code_list_scheme();
    let record = uris.catalog_record();

    let mut graph = Graph::new();
    graph.add_type(&scheme, skos::CONCEPT_SCHEME);
    describe_catalog(&mut graph, &scheme, &record, &list.metadata);
    for concept in list.concepts.iter().filter(|c| c.parent_code.is_none()) {
        graph.add_uri(&scheme, skos::HAS_TOP_CONCEPT, &uris.concept(&concept.code()));
    }
    HintTargets::new()
        .with(SerialisationHint::Default, scheme.as_str())
        .with(SerialisationHint::ConceptScheme, scheme.as_str())
        .with(SerialisationHint::CatalogRecord, record)
        .attach(
            &mut graph,
            &list.metadata.arbitrary_rdf,
            ComponentKind::CodeList,
            &list.metadata.title,
        )?;

    let mut metadata = serde_json::Map::new();
    metadata.insert("@context".into(), json!(vocab::CSVW_CONTEXT));
    metadata.insert("@id".into(), json!(scheme));
    metadata.insert(
        "tables".into(),
        json!([{
            "url": list.csv_file_name(),
            "tableSchema": table_file_name(list),
        }]),
    );
    metadata.insert(rdfs::SEE_ALSO_KEY.into(), Value::Array(graph.into_nodes()));
    Ok(Value::Object(metadata))
}
