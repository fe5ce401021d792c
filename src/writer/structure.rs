//! JSON-LD structure graph embedded under `rdfs:seeAlso`.
//!
//! Nodes are emitted in first-touch order:
//!
//! ```text
//! dataset            qb:DataSet, dcat:Dataset
//! catalog-record     dcat:CatalogRecord
//! structure          qb:DataStructureDefinition
//! component/<id>     one qb:ComponentSpecification per component, qb:order 1..
//! dimension/<id> ..  properties, attribute values and units minted locally
//! ```
//!
//! Arbitrary RDF is routed through [`HintTargets`]: every resource generated
//! for a component registers the hint it answers to, and a fragment whose
//! hint found no resource fails the build.

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{Map, Value, json};

use super::{WriteContext, WriteError};
use crate::cube::{QbColumn, StructuralDefinition};
use crate::model::{
    Attribute, CarriesArbitraryRdf, CatalogMetadata, CodeList, ComponentKind, Dimension,
    Identifiable, Measure, NewAttributeValue, ObservationValue, SerialisationHint,
    TripleFragment, Unit,
};
use crate::uri::UriHelper;
use crate::vocab::{dcat, dcterms, foaf, qb, qudt, rdf, rdfs, sdmx, skos, xsd};

// ============================================================================
// Graph
// ============================================================================

/// Ordered set of JSON-LD nodes, keyed by `@id`.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Map<String, Value>>,
    by_id: FxHashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, id: &str) -> &mut Map<String, Value> {
        let index = match self.by_id.get(id) {
            Some(&index) => index,
            None => {
                let mut node = Map::new();
                node.insert("@id".into(), json!(id));
                self.nodes.push(node);
                self.by_id.insert(id.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[index]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Append `value` to `key` of node `id`, skipping exact duplicates.
    fn push(&mut self, id: &str, key: &str, value: Value) {
        let node = self.node(id);
        let Value::Array(values) = node.entry(key).or_insert_with(|| Value::Array(Vec::new()))
        else {
            return;
        };
        if !values.contains(&value) {
            values.push(value);
        }
    }

    pub fn add_type(&mut self, id: &str, class: &str) {
        self.push(id, "@type", json!(class));
    }

    pub fn add_uri(&mut self, id: &str, predicate: &str, uri: &str) {
        self.push(id, predicate, json!({ "@id": uri }));
    }

    pub fn add_literal(&mut self, id: &str, predicate: &str, value: impl Into<Value>) {
        self.push(id, predicate, json!({ "@value": value.into() }));
    }

    pub fn add_typed(&mut self, id: &str, predicate: &str, value: &str, datatype: &str) {
        self.push(id, predicate, json!({ "@value": value, "@type": datatype }));
    }

    pub fn add_optional_uri(&mut self, id: &str, predicate: &str, uri: Option<&str>) {
        if let Some(uri) = uri {
            self.add_uri(id, predicate, uri);
        }
    }

    pub fn add_optional_literal(&mut self, id: &str, predicate: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.add_literal(id, predicate, value);
        }
    }

    pub fn into_nodes(self) -> Vec<Value> {
        self.nodes.into_iter().map(Value::Object).collect()
    }
}

// ============================================================================
// Arbitrary RDF
// ============================================================================

/// Node generated for each hint of one component.
#[derive(Debug, Default)]
pub struct HintTargets(FxHashMap<SerialisationHint, String>);

impl HintTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hint: SerialisationHint, id: impl Into<String>) -> Self {
        self.0.insert(hint, id.into());
        self
    }

    /// Copy each fragment onto the node registered for its hint.
    pub fn attach(
        &self,
        graph: &mut Graph,
        fragments: &[TripleFragment],
        component: ComponentKind,
        location: &str,
    ) -> Result<(), WriteError> {
        for fragment in fragments {
            let Some(target) = self.0.get(&fragment.hint) else {
                return Err(WriteError::UnmappedHint {
                    component,
                    location: location.to_string(),
                    hint: fragment.hint,
                });
            };
            graph.push(target, &fragment.predicate, fragment.object.to_json_ld());
        }
        Ok(())
    }
}

/// Catalog description of a dataset or code list plus its catalog record.
pub fn describe_catalog(
    graph: &mut Graph,
    subject: &str,
    record: &str,
    metadata: &CatalogMetadata,
) {
    graph.add_type(subject, dcat::DATASET);
    graph.add_literal(subject, rdfs::LABEL, metadata.title.as_str());
    graph.add_literal(subject, dcterms::TITLE, metadata.title.as_str());
    graph.add_literal(subject, dcterms::IDENTIFIER, metadata.uri_safe_identifier());
    graph.add_optional_literal(subject, dcterms::ABSTRACT, metadata.summary.as_deref());
    graph.add_optional_literal(subject, dcterms::DESCRIPTION, metadata.description.as_deref());
    graph.add_optional_uri(subject, dcterms::CREATOR, metadata.creator_uri.as_deref());
    graph.add_optional_uri(subject, dcterms::PUBLISHER, metadata.publisher_uri.as_deref());
    graph.add_optional_uri(subject, dcterms::LICENSE, metadata.license_uri.as_deref());
    graph.add_optional_uri(
        subject,
        dcat::CONTACT_POINT,
        metadata.public_contact_point_uri.as_deref(),
    );
    graph.add_optional_uri(subject, dcterms::SPATIAL, metadata.spatial_bound_uri.as_deref());
    graph.add_optional_uri(subject, dcterms::TEMPORAL, metadata.temporal_bound_uri.as_deref());
    for uri in &metadata.landing_page_uris {
        graph.add_uri(subject, dcat::LANDING_PAGE, uri);
    }
    for uri in &metadata.theme_uris {
        graph.add_uri(subject, dcat::THEME, uri);
    }
    for keyword in &metadata.keywords {
        graph.add_literal(subject, dcat::KEYWORD, keyword.as_str());
    }
    let date_time = format!("{}dateTime", xsd::NS);
    for (predicate, value) in [
        (dcterms::ISSUED, &metadata.dataset_issued),
        (dcterms::MODIFIED, &metadata.dataset_modified),
    ] {
        if let Some(value) = value {
            graph.add_typed(subject, predicate, value, &date_time);
            graph.add_typed(record, predicate, value, &date_time);
        }
    }

    graph.add_type(record, dcat::CATALOG_RECORD);
    graph.add_literal(record, rdfs::LABEL, metadata.title.as_str());
    graph.add_uri(record, foaf::PRIMARY_TOPIC, subject);
}

// ============================================================================
// Cube structure
// ============================================================================

pub fn build_graph(context: &WriteContext<'_>) -> Result<Vec<Value>, WriteError> {
    let mut builder = StructureBuilder::new(context);
    builder.dataset()?;
    for column in context.cube.qb_columns() {
        builder.column(column)?;
    }
    Ok(builder.graph.into_nodes())
}

struct StructureBuilder<'c, 'a> {
    context: &'c WriteContext<'a>,
    graph: Graph,
    structure: String,
    spec_ids: FxHashSet<String>,
    order: u32,
    /// Identity keys of measures that already have a component specification.
    measures: FxHashSet<String>,
    unit_spec: bool,
}

impl<'c, 'a> StructureBuilder<'c, 'a> {
    fn new(context: &'c WriteContext<'a>) -> Self {
        Self {
            context,
            graph: Graph::new(),
            structure: context.uris.structure(),
            spec_ids: FxHashSet::default(),
            order: 0,
            measures: FxHashSet::default(),
            unit_spec: false,
        }
    }

    fn uris(&self) -> &'c UriHelper {
        &self.context.uris
    }

    fn dataset(&mut self) -> Result<(), WriteError> {
        let metadata = &self.context.cube.metadata;
        let dataset = self.uris().dataset();
        let record = self.uris().catalog_record();

        self.graph.add_type(&dataset, qb::DATA_SET);
        describe_catalog(&mut self.graph, &dataset, &record, metadata);
        self.graph.add_uri(&dataset, qb::STRUCTURE, &self.structure);
        self.graph.add_type(&self.structure, qb::DATA_STRUCTURE_DEFINITION);

        HintTargets::new()
            .with(SerialisationHint::Default, dataset.as_str())
            .with(SerialisationHint::Dataset, dataset.as_str())
            .with(SerialisationHint::CatalogRecord, record)
            .attach(
                &mut self.graph,
                &metadata.arbitrary_rdf,
                ComponentKind::Catalog,
                &metadata.title,
            )
    }

    /// New component specification linked from the DSD; ids are deduplicated.
    fn spec(&mut self, identifier: &str) -> String {
        let mut id = self.uris().component(identifier);
        let mut n = 2;
        while !self.spec_ids.insert(id.clone()) {
            id = self.uris().component(&format!("{identifier}-{n}"));
            n += 1;
        }

        self.order += 1;
        self.graph.add_type(&id, qb::COMPONENT_SPECIFICATION);
        self.graph.add_literal(&id, qb::ORDER, self.order);
        self.graph.add_uri(&self.structure, qb::COMPONENT, &id);
        id
    }

    fn column(&mut self, column: &QbColumn) -> Result<(), WriteError> {
        match &column.component {
            StructuralDefinition::Dimension(dimension) => self.dimension(column, dimension),
            StructuralDefinition::Attribute(attribute) => self.attribute(column, attribute),
            StructuralDefinition::MeasureDimension(measures) => {
                let spec = self.spec("measure-type");
                self.graph.add_uri(&spec, qb::DIMENSION, qb::MEASURE_TYPE);
                for measure in &measures.measures {
                    self.measure(measure)?;
                }
                Ok(())
            }
            StructuralDefinition::Units(units) => {
                self.unit_spec();
                for unit in &units.units {
                    self.unit(unit)?;
                }
                Ok(())
            }
            StructuralDefinition::Observation(observation) => {
                if let ObservationValue::Single(single) = observation {
                    self.measure(&single.measure)?;
                }
                if let Some(unit) = observation.unit() {
                    self.unit_spec();
                    self.unit(unit)?;
                }
                Ok(())
            }
        }
    }

    fn dimension(&mut self, column: &QbColumn, dimension: &Dimension) -> Result<(), WriteError> {
        let identifier = column.component_identifier();
        let property = self.context.dimension_uri(column, dimension);
        let spec = self.spec(&identifier);
        self.graph.add_uri(&spec, qb::DIMENSION, &property);

        let mut targets = HintTargets::new().with(SerialisationHint::Component, spec);
        if let Dimension::Existing(existing) = dimension {
            self.graph
                .add_optional_uri(&property, rdfs::RANGE, existing.range_uri.as_deref());
        }
        if let Dimension::New(new) = dimension {
            self.graph.add_type(&property, rdf::PROPERTY);
            self.graph.add_type(&property, qb::DIMENSION_PROPERTY);
            self.graph.add_literal(&property, rdfs::LABEL, new.label.as_str());
            self.graph
                .add_optional_literal(&property, rdfs::COMMENT, new.description.as_deref());
            self.graph.add_optional_uri(
                &property,
                rdfs::SUB_PROPERTY_OF,
                new.parent_dimension_uri.as_deref(),
            );
            self.graph
                .add_optional_uri(&property, rdfs::IS_DEFINED_BY, new.source_uri.as_deref());

            if let Some(code_list) = &new.code_list
                && let Some(scheme) = self.context.scheme_uri(column, code_list)
            {
                self.graph.add_type(&property, qb::CODED_PROPERTY);
                self.graph.add_uri(&property, qb::CODE_LIST, &scheme);
                if matches!(code_list, CodeList::New(_)) {
                    let class = self.uris().class(&identifier);
                    self.graph.add_type(&class, rdfs::CLASS);
                    self.graph.add_literal(&class, rdfs::LABEL, new.label.as_str());
                    self.graph.add_uri(&property, rdfs::RANGE, &class);
                }
            }
            targets = targets.with(SerialisationHint::Property, property);
        }

        targets.attach(
            &mut self.graph,
            dimension.arbitrary_rdf(),
            ComponentKind::Dimension,
            &column.title,
        )
    }

    fn attribute(&mut self, column: &QbColumn, attribute: &Attribute) -> Result<(), WriteError> {
        let identifier = column.component_identifier();
        let property = self.context.attribute_uri(column, attribute);
        let spec = self.spec(&identifier);
        self.graph.add_uri(&spec, qb::ATTRIBUTE, &property);
        self.graph
            .add_literal(&spec, qb::COMPONENT_REQUIRED, attribute.is_required());

        let mut targets = HintTargets::new().with(SerialisationHint::Component, spec);
        if let Attribute::New(new) = attribute {
            self.graph.add_type(&property, rdf::PROPERTY);
            self.graph.add_type(&property, qb::ATTRIBUTE_PROPERTY);
            self.graph.add_literal(&property, rdfs::LABEL, new.label.as_str());
            self.graph
                .add_optional_literal(&property, rdfs::COMMENT, new.description.as_deref());
            self.graph.add_optional_uri(
                &property,
                rdfs::SUB_PROPERTY_OF,
                new.parent_attribute_uri.as_deref(),
            );
            self.graph
                .add_optional_uri(&property, rdfs::IS_DEFINED_BY, new.source_uri.as_deref());
            if let Some(data_type) = &new.literal {
                self.graph.add_uri(&property, rdfs::RANGE, &data_type.xsd_uri());
            }
            targets = targets.with(SerialisationHint::Property, property);
        }
        targets.attach(
            &mut self.graph,
            attribute.arbitrary_rdf(),
            ComponentKind::Attribute,
            &column.title,
        )?;

        for value in attribute.new_values() {
            self.attribute_value(&identifier, value)?;
        }
        Ok(())
    }

    fn attribute_value(
        &mut self,
        attribute: &str,
        value: &NewAttributeValue,
    ) -> Result<(), WriteError> {
        let id = self
            .uris()
            .attribute_value(attribute, &value.uri_safe_identifier());
        self.graph.add_literal(&id, rdfs::LABEL, value.label.as_str());
        self.graph
            .add_optional_literal(&id, rdfs::COMMENT, value.description.as_deref());
        self.graph
            .add_optional_uri(&id, rdfs::IS_DEFINED_BY, value.source_uri.as_deref());
        self.graph
            .add_optional_uri(&id, skos::BROADER, value.parent_value_uri.as_deref());

        HintTargets::new()
            .with(SerialisationHint::Default, id)
            .attach(
                &mut self.graph,
                &value.arbitrary_rdf,
                ComponentKind::AttributeValue,
                &value.label,
            )
    }

    /// One specification per distinct measure.
    fn measure(&mut self, measure: &Measure) -> Result<(), WriteError> {
        if !self.measures.insert(measure.identity_key()) {
            return Ok(());
        }
        let property = self.context.measure_uri(measure);
        let spec = self.spec(&measure.identifier());
        self.graph.add_uri(&spec, qb::MEASURE, &property);

        let mut targets = HintTargets::new().with(SerialisationHint::Component, spec);
        if let Measure::New(new) = measure {
            self.graph.add_type(&property, rdf::PROPERTY);
            self.graph.add_type(&property, qb::MEASURE_PROPERTY);
            self.graph.add_literal(&property, rdfs::LABEL, new.label.as_str());
            self.graph
                .add_optional_literal(&property, rdfs::COMMENT, new.description.as_deref());
            self.graph.add_optional_uri(
                &property,
                rdfs::SUB_PROPERTY_OF,
                new.parent_measure_uri.as_deref(),
            );
            self.graph
                .add_optional_uri(&property, rdfs::IS_DEFINED_BY, new.source_uri.as_deref());
            targets = targets.with(SerialisationHint::Property, property);
        }
        targets.attach(
            &mut self.graph,
            measure.arbitrary_rdf(),
            ComponentKind::Measure,
            measure.display_name(),
        )
    }

    /// The `sdmx-attribute:unitMeasure` specification, once per cube.
    fn unit_spec(&mut self) {
        if self.unit_spec {
            return;
        }
        self.unit_spec = true;
        let spec = self.spec("unit");
        self.graph.add_uri(&spec, qb::ATTRIBUTE, sdmx::UNIT_MEASURE);
        self.graph.add_literal(&spec, qb::COMPONENT_REQUIRED, true);
    }

    fn unit(&mut self, unit: &Unit) -> Result<(), WriteError> {
        let Unit::New(new) = unit else {
            return Ok(());
        };
        let id = self.context.unit_uri(unit);
        if self.graph.contains(&id) {
            return Ok(());
        }
        self.graph.add_type(&id, qudt::UNIT);
        self.graph.add_literal(&id, rdfs::LABEL, new.label.as_str());
        self.graph
            .add_optional_literal(&id, rdfs::COMMENT, new.description.as_deref());
        self.graph
            .add_optional_uri(&id, rdfs::IS_DEFINED_BY, new.source_uri.as_deref());
        if let Some(base) = &new.base_unit {
            self.graph
                .add_uri(&id, qudt::IS_SCALING_OF, &self.context.unit_uri(base));
            self.unit(base)?;
        }
        if let Some(factor) = new.base_unit_scaling_factor {
            self.graph.add_literal(&id, qudt::SCALING_FACTOR, factor);
        }
        self.graph
            .add_optional_uri(&id, qudt::HAS_QUANTITY_KIND, new.qudt_quantity_kind_uri.as_deref());
        if let Some(multiplier) = new.si_base_unit_conversion_multiplier {
            self.graph
                .add_literal(&id, qudt::CONVERSION_MULTIPLIER, multiplier);
        }

        HintTargets::new()
            .with(SerialisationHint::Default, id)
            .attach(&mut self.graph, &new.arbitrary_rdf, ComponentKind::Unit, &new.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Column, Cube};
    use crate::model::{
        ExistingDimension, MultiMeasureDimension, MultiUnits, NewDimension, NewUnit, RdfObject,
    };
    use crate::writer::tests::minimal_cube;

    fn graph(cube: &Cube) -> Result<Vec<Value>, WriteError> {
        let context = WriteContext::new(cube, None).unwrap();
        build_graph(&context)
    }

    fn node<'v>(nodes: &'v [Value], id: &str) -> &'v Value {
        nodes
            .iter()
            .find(|n| n["@id"] == id)
            .unwrap_or_else(|| panic!("no node `{id}`"))
    }

    fn orders(nodes: &[Value], structure: &str) -> Vec<u64> {
        node(nodes, structure)[qb::COMPONENT]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| {
                let id = c["@id"].as_str().unwrap();
                node(nodes, id)[qb::ORDER][0]["@value"].as_u64().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_minimal_structure() {
        let nodes = graph(&minimal_cube()).unwrap();

        let dataset = node(&nodes, "minimal-cube.csv#dataset");
        let types = dataset["@type"].as_array().unwrap();
        assert!(types.contains(&json!(qb::DATA_SET)));
        assert!(types.contains(&json!(dcat::DATASET)));
        assert_eq!(dataset[qb::STRUCTURE][0]["@id"], "minimal-cube.csv#structure");

        let record = node(&nodes, "minimal-cube.csv#catalog-record");
        assert_eq!(record[foaf::PRIMARY_TOPIC][0]["@id"], "minimal-cube.csv#dataset");

        assert_eq!(orders(&nodes, "minimal-cube.csv#structure"), vec![1, 2, 3]);

        let dimension = node(&nodes, "minimal-cube.csv#component/area");
        assert_eq!(dimension[qb::DIMENSION][0]["@id"], "minimal-cube.csv#dimension/area");
        let property = node(&nodes, "minimal-cube.csv#dimension/area");
        assert_eq!(property[qb::CODE_LIST][0]["@id"], "area.csv#code-list");

        let measure = node(&nodes, "minimal-cube.csv#component/count");
        assert_eq!(measure[qb::MEASURE][0]["@id"], "minimal-cube.csv#measure/count");
        let unit = node(&nodes, "minimal-cube.csv#component/unit");
        assert_eq!(unit[qb::ATTRIBUTE][0]["@id"], sdmx::UNIT_MEASURE);
        assert_eq!(
            node(&nodes, "minimal-cube.csv#unit/people")["@type"][0],
            qudt::UNIT
        );
    }

    #[test]
    fn test_measure_dimension_specs() {
        let cube = Cube::new(
            CatalogMetadata::new("Trade"),
            vec![
                Column::qb("Area", Dimension::New(NewDimension::new("Area")).into()),
                Column::qb(
                    "Measure",
                    MultiMeasureDimension::new(vec![
                        Measure::new_measure("Imports"),
                        Measure::existing("http://example.com/measure/exports"),
                    ])
                    .into(),
                ),
                Column::qb(
                    "Unit",
                    MultiUnits::new(vec![
                        Unit::New(
                            NewUnit::new("Thousand Pounds")
                                .scaled_from(Unit::new_unit("Pounds"), 1000.0),
                        ),
                    ])
                    .into(),
                ),
                Column::qb("Value", ObservationValue::multi(None).into()),
            ],
        );
        let nodes = graph(&cube).unwrap();

        // area, measure-type, imports, exports, unit
        assert_eq!(orders(&nodes, "trade.csv#structure"), vec![1, 2, 3, 4, 5]);
        let measure_type = node(&nodes, "trade.csv#component/measure-type");
        assert_eq!(measure_type[qb::DIMENSION][0]["@id"], qb::MEASURE_TYPE);
        let exports = node(&nodes, "trade.csv#component/exports");
        assert_eq!(exports[qb::MEASURE][0]["@id"], "http://example.com/measure/exports");
        assert!(!nodes.iter().any(|n| n["@id"] == "http://example.com/measure/exports"));

        let scaled = node(&nodes, "trade.csv#unit/thousand-pounds");
        assert_eq!(scaled[qudt::IS_SCALING_OF][0]["@id"], "trade.csv#unit/pounds");
        assert_eq!(scaled[qudt::SCALING_FACTOR][0]["@value"], 1000.0);
        assert!(nodes.iter().any(|n| n["@id"] == "trade.csv#unit/pounds"));
    }

    #[test]
    fn test_arbitrary_rdf_routed_by_hint() {
        let mut cube = minimal_cube();
        let mut dimension = NewDimension::new("Area");
        dimension.arbitrary_rdf = vec![
            TripleFragment::new(rdfs::COMMENT, RdfObject::literal("on property"))
                .with_hint(SerialisationHint::Property),
            TripleFragment::new(rdfs::COMMENT, RdfObject::literal("on spec"))
                .with_hint(SerialisationHint::Component),
        ];
        cube.columns[0] = Column::qb("Area", Dimension::New(dimension).into());
        cube.metadata.arbitrary_rdf = vec![
            TripleFragment::new(dcterms::CREATOR, RdfObject::uri("http://example.com/me"))
                .with_hint(SerialisationHint::CatalogRecord),
        ];

        let nodes = graph(&cube).unwrap();
        let property = node(&nodes, "minimal-cube.csv#dimension/area");
        assert_eq!(property[rdfs::COMMENT][0]["@value"], "on property");
        let spec = node(&nodes, "minimal-cube.csv#component/area");
        assert_eq!(spec[rdfs::COMMENT][0]["@value"], "on spec");
        let record = node(&nodes, "minimal-cube.csv#catalog-record");
        assert_eq!(record[dcterms::CREATOR][0]["@id"], "http://example.com/me");
    }

    #[test]
    fn test_unmapped_hint_fails() {
        let mut cube = minimal_cube();
        let mut dimension = ExistingDimension {
            uri: "http://example.com/dimension/area".into(),
            range_uri: None,
            arbitrary_rdf: Vec::new(),
        };
        dimension.arbitrary_rdf = vec![
            TripleFragment::new(rdfs::COMMENT, RdfObject::literal("nowhere"))
                .with_hint(SerialisationHint::Property),
        ];
        cube.columns[0] = Column::qb("Area", Dimension::Existing(dimension).into());

        let err = graph(&cube).unwrap_err();
        assert!(matches!(
            err,
            WriteError::UnmappedHint {
                component: ComponentKind::Dimension,
                hint: SerialisationHint::Property,
                ..
            }
        ));
    }

    #[test]
    fn test_existing_dimension_range() {
        let mut cube = minimal_cube();
        let period = |range_uri: Option<&str>| {
            Column::qb(
                "Area",
                Dimension::Existing(ExistingDimension {
                    uri: "http://example.com/dimension/period".into(),
                    range_uri: range_uri.map(String::from),
                    arbitrary_rdf: Vec::new(),
                })
                .into(),
            )
        };

        cube.columns[0] = period(Some("http://example.com/class/period"));
        let nodes = graph(&cube).unwrap();
        let property = node(&nodes, "http://example.com/dimension/period");
        assert_eq!(property[rdfs::RANGE][0]["@id"], "http://example.com/class/period");

        cube.columns[0] = period(None);
        let nodes = graph(&cube).unwrap();
        assert!(!nodes.iter().any(|n| n["@id"] == "http://example.com/dimension/period"));
    }

    #[test]
    fn test_spec_ids_deduplicated() {
        let cube = Cube::new(
            CatalogMetadata::new("Units"),
            vec![
                Column::qb("Unit", Dimension::New(NewDimension::new("Unit")).into()),
                Column::qb(
                    "Value",
                    ObservationValue::single(
                        Measure::new_measure("Count"),
                        Some(Unit::new_unit("People")),
                    )
                    .into(),
                ),
            ],
        );
        let nodes = graph(&cube).unwrap();
        assert!(nodes.iter().any(|n| n["@id"] == "units.csv#component/unit"));
        let spec = node(&nodes, "units.csv#component/unit-2");
        assert_eq!(spec[qb::ATTRIBUTE][0]["@id"], sdmx::UNIT_MEASURE);
    }
}
