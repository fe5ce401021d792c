//! Predicate and class URIs used in generated packages.
//!
//! The vocabularies themselves are external; only the URIs this crate emits
//! are listed here.

/// JSON-LD context of every CSV-W metadata document.
pub const CSVW_CONTEXT: &str = "http://www.w3.org/ns/csvw";

pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
}

pub mod rdfs {
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
    /// Key under which the structure graph is embedded in CSV-W metadata.
    pub const SEE_ALSO_KEY: &str = "rdfs:seeAlso";
}

pub mod qb {
    pub const DATA_SET: &str = "http://purl.org/linked-data/cube#DataSet";
    pub const DATA_SET_PROPERTY: &str = "http://purl.org/linked-data/cube#dataSet";
    pub const OBSERVATION: &str = "http://purl.org/linked-data/cube#Observation";
    pub const STRUCTURE: &str = "http://purl.org/linked-data/cube#structure";
    pub const DATA_STRUCTURE_DEFINITION: &str =
        "http://purl.org/linked-data/cube#DataStructureDefinition";
    pub const COMPONENT: &str = "http://purl.org/linked-data/cube#component";
    pub const COMPONENT_SPECIFICATION: &str =
        "http://purl.org/linked-data/cube#ComponentSpecification";
    pub const COMPONENT_REQUIRED: &str = "http://purl.org/linked-data/cube#componentRequired";
    pub const ORDER: &str = "http://purl.org/linked-data/cube#order";
    pub const DIMENSION: &str = "http://purl.org/linked-data/cube#dimension";
    pub const ATTRIBUTE: &str = "http://purl.org/linked-data/cube#attribute";
    pub const MEASURE: &str = "http://purl.org/linked-data/cube#measure";
    pub const DIMENSION_PROPERTY: &str = "http://purl.org/linked-data/cube#DimensionProperty";
    pub const ATTRIBUTE_PROPERTY: &str = "http://purl.org/linked-data/cube#AttributeProperty";
    pub const MEASURE_PROPERTY: &str = "http://purl.org/linked-data/cube#MeasureProperty";
    pub const CODED_PROPERTY: &str = "http://purl.org/linked-data/cube#CodedProperty";
    pub const CODE_LIST: &str = "http://purl.org/linked-data/cube#codeList";
    pub const MEASURE_TYPE: &str = "http://purl.org/linked-data/cube#measureType";
}

pub mod sdmx {
    pub const UNIT_MEASURE: &str = "http://purl.org/linked-data/sdmx/2009/attribute#unitMeasure";
    pub const OBS_STATUS: &str = "http://purl.org/linked-data/sdmx/2009/attribute#obsStatus";
}

pub mod skos {
    pub const CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
    pub const IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";
    pub const BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
    pub const HAS_TOP_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#hasTopConcept";
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
}

pub mod qudt {
    pub const UNIT: &str = "http://qudt.org/schema/qudt/Unit";
    pub const IS_SCALING_OF: &str = "http://qudt.org/schema/qudt/isScalingOf";
    pub const SCALING_FACTOR: &str = "http://qudt.org/schema/qudt/scalingFactor";
    pub const HAS_QUANTITY_KIND: &str = "http://qudt.org/schema/qudt/hasQuantityKind";
    pub const CONVERSION_MULTIPLIER: &str = "http://qudt.org/schema/qudt/conversionMultiplier";
}

pub mod dcterms {
    pub const TITLE: &str = "http://purl.org/dc/terms/title";
    pub const ABSTRACT: &str = "http://purl.org/dc/terms/abstract";
    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
    pub const PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
    pub const LICENSE: &str = "http://purl.org/dc/terms/license";
    pub const ISSUED: &str = "http://purl.org/dc/terms/issued";
    pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
    pub const SPATIAL: &str = "http://purl.org/dc/terms/spatial";
    pub const TEMPORAL: &str = "http://purl.org/dc/terms/temporal";
}

pub mod dcat {
    pub const DATASET: &str = "http://www.w3.org/ns/dcat#Dataset";
    pub const CATALOG_RECORD: &str = "http://www.w3.org/ns/dcat#CatalogRecord";
    pub const KEYWORD: &str = "http://www.w3.org/ns/dcat#keyword";
    pub const THEME: &str = "http://www.w3.org/ns/dcat#theme";
    pub const LANDING_PAGE: &str = "http://www.w3.org/ns/dcat#landingPage";
    pub const CONTACT_POINT: &str = "http://www.w3.org/ns/dcat#contactPoint";
}

pub mod foaf {
    pub const PRIMARY_TOPIC: &str = "http://xmlns.com/foaf/0.1/primaryTopic";
}

pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
}

pub mod ui {
    pub const SORT_PRIORITY: &str = "http://www.w3.org/ns/ui#sortPriority";
}
