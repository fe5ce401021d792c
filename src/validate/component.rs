//! Local checks of a single component's own fields.
//!
//! Nothing here looks at other columns or at data; see `shape`, `collision`
//! and `data` for cross-component rules.

use crate::cube::{QbColumn, StructuralDefinition};
use crate::model::{
    Attribute, CarriesArbitraryRdf, CatalogMetadata, CodeList, ComponentKind, Concept, DataType,
    Dimension, Measure, NewAttributeValue, NewCodeList, ObservationValue, PackageReference, Unit,
};
use crate::uri::UriTemplate;
use crate::utils::looks_like_uri;

use super::ValidationError;

/// Collects errors for one component, labelled with where it lives.
struct Checks<'a> {
    location: &'a str,
    errors: &'a mut Vec<ValidationError>,
}

impl Checks<'_> {
    fn uri(&mut self, component: ComponentKind, field: &'static str, value: Option<&str>) {
        if let Some(value) = value
            && !looks_like_uri(value)
        {
            self.errors.push(ValidationError::InvalidUri {
                component,
                location: self.location.to_string(),
                field,
                value: value.to_string(),
            });
        }
    }

    fn label(&mut self, component: ComponentKind, label: &str) {
        if label.trim().is_empty() {
            self.errors.push(ValidationError::EmptyLabel {
                component,
                location: self.location.to_string(),
            });
        }
    }

    /// `field` and `requires` must be given together.
    fn codependent(
        &mut self,
        component: ComponentKind,
        (field, has_field): (&'static str, bool),
        (requires, has_required): (&'static str, bool),
    ) {
        let missing = match (has_field, has_required) {
            (true, false) => Some((field, requires)),
            (false, true) => Some((requires, field)),
            _ => None,
        };
        if let Some((field, requires)) = missing {
            self.errors.push(ValidationError::MissingCodependentField {
                component,
                location: self.location.to_string(),
                field,
                requires,
            });
        }
    }

    fn data_type(&mut self, component: ComponentKind, data_type: &DataType) {
        if !data_type.is_valid() {
            self.errors.push(ValidationError::InvalidDataType {
                component,
                location: self.location.to_string(),
                data_type: data_type.name().to_string(),
            });
        }
    }

    fn hints(&mut self, component: ComponentKind, carrier: &dyn CarriesArbitraryRdf) {
        for fragment in carrier.unsupported_fragments() {
            self.errors.push(ValidationError::InvalidRdfHint {
                component,
                location: self.location.to_string(),
                predicate: fragment.predicate.clone(),
                hint: fragment.hint,
            });
        }
        for fragment in carrier.arbitrary_rdf() {
            self.uri(component, "predicate", Some(&fragment.predicate));
        }
    }
}

/// Check every local field of a column's component.
pub fn check_column(column: &QbColumn, errors: &mut Vec<ValidationError>) {
    let mut checks = Checks {
        location: &column.title,
        errors,
    };

    match &column.component {
        StructuralDefinition::Dimension(dimension) => check_dimension(&mut checks, dimension),
        StructuralDefinition::Attribute(attribute) => {
            check_attribute(&mut checks, &column.title, attribute)
        }
        StructuralDefinition::MeasureDimension(measures) => {
            for measure in &measures.measures {
                check_measure(&mut checks, measure);
            }
        }
        StructuralDefinition::Units(units) => {
            for unit in &units.units {
                check_unit(&mut checks, unit);
            }
        }
        StructuralDefinition::Observation(observation) => {
            check_observation(&mut checks, observation)
        }
    }

    if let Some(template) = &column.cell_uri_template {
        check_cell_template(column, template, checks.errors);
    }
}

/// Check dataset-level (or code-list) catalog metadata.
pub fn check_catalog(
    metadata: &CatalogMetadata,
    location: &str,
    errors: &mut Vec<ValidationError>,
) {
    let mut checks = Checks { location, errors };
    check_metadata(&mut checks, metadata);
}

fn check_metadata(checks: &mut Checks<'_>, metadata: &CatalogMetadata) {
    check_metadata_fields(checks, metadata);
    checks.hints(ComponentKind::Catalog, metadata);
}

fn check_metadata_fields(checks: &mut Checks<'_>, metadata: &CatalogMetadata) {
    checks.label(ComponentKind::Catalog, &metadata.title);
    for (field, value) in metadata.uri_fields() {
        checks.uri(ComponentKind::Catalog, field, Some(value));
    }
}

fn check_dimension(checks: &mut Checks<'_>, dimension: &Dimension) {
    let kind = ComponentKind::Dimension;
    match dimension {
        Dimension::Existing(d) => {
            checks.uri(kind, "uri", Some(&d.uri));
            checks.uri(kind, "range_uri", d.range_uri.as_deref());
        }
        Dimension::New(d) => {
            checks.label(kind, &d.label);
            checks.uri(kind, "parent_dimension_uri", d.parent_dimension_uri.as_deref());
            checks.uri(kind, "source_uri", d.source_uri.as_deref());
        }
    }
    checks.hints(kind, dimension);

    match dimension.code_list() {
        Some(CodeList::Existing(list)) => {
            checks.uri(
                ComponentKind::CodeList,
                "concept_scheme_uri",
                Some(&list.concept_scheme_uri),
            );
        }
        Some(CodeList::New(list)) => check_code_list(checks, list),
        Some(CodeList::InExistingPackage(PackageReference::Explicit(fields))) => {
            if let Err(err) = UriTemplate::parse(&fields.concept_uri_template) {
                checks.errors.push(ValidationError::InvalidUriTemplate {
                    column: checks.location.to_string(),
                    template: fields.concept_uri_template.clone(),
                    reason: err.to_string(),
                });
            }
        }
        // resolved when the package is read
        Some(CodeList::InExistingPackage(PackageReference::Inspect(_))) | None => {}
    }
}

/// The list's metadata carries its hints, checked against the scheme's set.
fn check_code_list(checks: &mut Checks<'_>, list: &NewCodeList) {
    check_metadata_fields(checks, &list.metadata);
    checks.hints(ComponentKind::CodeList, list);
    for concept in &list.concepts {
        check_concept(checks, concept);
    }
}

fn check_concept(checks: &mut Checks<'_>, concept: &Concept) {
    checks.label(ComponentKind::Concept, &concept.label);
    checks.uri(ComponentKind::Concept, "same_as", concept.same_as.as_deref());
}

fn check_attribute(checks: &mut Checks<'_>, column: &str, attribute: &Attribute) {
    let kind = ComponentKind::Attribute;
    match attribute {
        Attribute::Existing(a) => checks.uri(kind, "uri", Some(&a.uri)),
        Attribute::New(a) => {
            checks.label(kind, &a.label);
            checks.uri(kind, "parent_attribute_uri", a.parent_attribute_uri.as_deref());
            checks.uri(kind, "source_uri", a.source_uri.as_deref());
        }
    }
    checks.hints(kind, attribute);

    if let Some(data_type) = attribute.literal() {
        checks.data_type(kind, data_type);
        if !attribute.new_values().is_empty() {
            checks
                .errors
                .push(ValidationError::LiteralAttributeWithValues {
                    column: column.to_string(),
                });
        }
    }

    for value in attribute.new_values() {
        check_attribute_value(checks, value);
    }
}

fn check_attribute_value(checks: &mut Checks<'_>, value: &NewAttributeValue) {
    let kind = ComponentKind::AttributeValue;
    checks.label(kind, &value.label);
    checks.uri(kind, "source_uri", value.source_uri.as_deref());
    checks.uri(kind, "parent_value_uri", value.parent_value_uri.as_deref());
    checks.hints(kind, value);
}

fn check_measure(checks: &mut Checks<'_>, measure: &Measure) {
    let kind = ComponentKind::Measure;
    match measure {
        Measure::Existing(m) => checks.uri(kind, "uri", Some(&m.uri)),
        Measure::New(m) => {
            checks.label(kind, &m.label);
            checks.uri(kind, "parent_measure_uri", m.parent_measure_uri.as_deref());
            checks.uri(kind, "source_uri", m.source_uri.as_deref());
        }
    }
    checks.hints(kind, measure);
}

fn check_unit(checks: &mut Checks<'_>, unit: &Unit) {
    let kind = ComponentKind::Unit;
    match unit {
        Unit::Existing(u) => checks.uri(kind, "uri", Some(&u.uri)),
        Unit::New(u) => {
            checks.label(kind, &u.label);
            checks.uri(kind, "source_uri", u.source_uri.as_deref());
            checks.uri(kind, "qudt_quantity_kind_uri", u.qudt_quantity_kind_uri.as_deref());
            checks.codependent(
                kind,
                ("base_unit_scaling_factor", u.base_unit_scaling_factor.is_some()),
                ("base_unit", u.base_unit.is_some()),
            );
            checks.codependent(
                kind,
                (
                    "si_base_unit_conversion_multiplier",
                    u.si_base_unit_conversion_multiplier.is_some(),
                ),
                ("qudt_quantity_kind_uri", u.qudt_quantity_kind_uri.is_some()),
            );
            if let Some(base) = &u.base_unit {
                check_unit(checks, base);
            }
        }
    }
    checks.hints(kind, unit);
}

fn check_observation(checks: &mut Checks<'_>, observation: &ObservationValue) {
    checks.data_type(ComponentKind::ObservationValue, observation.data_type());
    if let Some(measure) = observation.measure() {
        check_measure(checks, measure);
    }
    if let Some(unit) = observation.unit() {
        check_unit(checks, unit);
    }
}

/// A cell template must parse and bind the column's own value.
fn check_cell_template(column: &QbColumn, template: &str, errors: &mut Vec<ValidationError>) {
    let name = column.csvw_name();
    let reason = match UriTemplate::parse(template) {
        Err(err) => Some(err.to_string()),
        Ok(parsed) if !parsed.variables().any(|v| v == name) => {
            Some(format!("template does not reference `{{+{name}}}`"))
        }
        Ok(_) => None,
    };
    if let Some(reason) = reason {
        errors.push(ValidationError::InvalidUriTemplate {
            column: column.title.clone(),
            template: template.to_string(),
            reason,
        });
    }
}
