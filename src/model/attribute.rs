//! Attributes and their values.

use std::collections::BTreeSet;

use super::{CarriesArbitraryRdf, DataType, Identifiable, SerialisationHint, TripleFragment};
use crate::vocab::sdmx;

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Existing(ExistingAttribute),
    New(NewAttribute),
}

impl Attribute {
    pub fn is_required(&self) -> bool {
        match self {
            Self::Existing(a) => a.is_required,
            Self::New(a) => a.is_required,
        }
    }

    /// New values declared for this attribute.
    pub fn new_values(&self) -> &[NewAttributeValue] {
        match self {
            Self::Existing(a) => &a.new_values,
            Self::New(a) => &a.new_values,
        }
    }

    /// Declared datatype when values are literals rather than resources.
    pub fn literal(&self) -> Option<&DataType> {
        match self {
            Self::Existing(a) => a.literal.as_ref(),
            Self::New(a) => a.literal.as_ref(),
        }
    }

    /// Title of the observation column this attribute qualifies (pivoted shape).
    pub fn describes_observations(&self) -> Option<&str> {
        match self {
            Self::Existing(a) => a.describes_observations.as_deref(),
            Self::New(a) => a.describes_observations.as_deref(),
        }
    }

    /// Whether this attribute records observation status (`sdmx-attribute:obsStatus`).
    pub fn is_observation_status(&self) -> bool {
        match self {
            Self::Existing(a) => a.uri == sdmx::OBS_STATUS,
            Self::New(a) => a.parent_attribute_uri.as_deref() == Some(sdmx::OBS_STATUS),
        }
    }
}

impl CarriesArbitraryRdf for Attribute {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        match self {
            Self::Existing(a) => &a.arbitrary_rdf,
            Self::New(a) => &a.arbitrary_rdf,
        }
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        match self {
            Self::Existing(_) => &[SerialisationHint::Component],
            Self::New(_) => &[SerialisationHint::Component, SerialisationHint::Property],
        }
    }
}

/// An attribute property defined elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingAttribute {
    pub uri: String,
    pub is_required: bool,
    pub new_values: Vec<NewAttributeValue>,
    pub literal: Option<DataType>,
    pub describes_observations: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl ExistingAttribute {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            is_required: false,
            new_values: Vec::new(),
            literal: None,
            describes_observations: None,
            arbitrary_rdf: Vec::new(),
        }
    }

    /// Attach new values synthesised from the distinct values of a column.
    pub fn with_values_from_data(mut self, values: &BTreeSet<String>) -> Self {
        self.new_values = values.iter().map(NewAttributeValue::new).collect();
        self
    }

    pub fn describing(mut self, observation_column: impl Into<String>) -> Self {
        self.describes_observations = Some(observation_column.into());
        self
    }
}

/// An attribute property minted in this package.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttribute {
    pub label: String,
    pub description: Option<String>,
    pub parent_attribute_uri: Option<String>,
    pub source_uri: Option<String>,
    pub is_required: bool,
    pub new_values: Vec<NewAttributeValue>,
    pub literal: Option<DataType>,
    pub describes_observations: Option<String>,
    pub uri_safe_identifier_override: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl NewAttribute {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            parent_attribute_uri: None,
            source_uri: None,
            is_required: false,
            new_values: Vec::new(),
            literal: None,
            describes_observations: None,
            uri_safe_identifier_override: None,
            arbitrary_rdf: Vec::new(),
        }
    }

    /// Synthesise an attribute whose new values are the distinct values of its column.
    pub fn from_data(label: impl Into<String>, values: &BTreeSet<String>) -> Self {
        Self {
            new_values: values.iter().map(NewAttributeValue::new).collect(),
            ..Self::new(label)
        }
    }

    /// An attribute whose values are literals of `data_type`.
    pub fn literal(label: impl Into<String>, data_type: DataType) -> Self {
        Self {
            literal: Some(data_type),
            ..Self::new(label)
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_parent(mut self, uri: impl Into<String>) -> Self {
        self.parent_attribute_uri = Some(uri.into());
        self
    }

    pub fn with_values(mut self, values: Vec<NewAttributeValue>) -> Self {
        self.new_values = values;
        self
    }

    pub fn describing(mut self, observation_column: impl Into<String>) -> Self {
        self.describes_observations = Some(observation_column.into());
        self
    }
}

impl Identifiable for NewAttribute {
    fn label(&self) -> &str {
        &self.label
    }

    fn identifier_override(&self) -> Option<&str> {
        self.uri_safe_identifier_override.as_deref()
    }
}

/// A value resource minted for an attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttributeValue {
    pub label: String,
    pub description: Option<String>,
    pub source_uri: Option<String>,
    pub parent_value_uri: Option<String>,
    pub uri_safe_identifier_override: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl NewAttributeValue {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            source_uri: None,
            parent_value_uri: None,
            uri_safe_identifier_override: None,
            arbitrary_rdf: Vec::new(),
        }
    }

    pub fn with_parent(mut self, uri: impl Into<String>) -> Self {
        self.parent_value_uri = Some(uri.into());
        self
    }
}

impl Identifiable for NewAttributeValue {
    fn label(&self) -> &str {
        &self.label
    }

    fn identifier_override(&self) -> Option<&str> {
        self.uri_safe_identifier_override.as_deref()
    }
}

impl CarriesArbitraryRdf for NewAttributeValue {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        &self.arbitrary_rdf
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        &[SerialisationHint::Default]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_status_detection() {
        let existing = Attribute::Existing(ExistingAttribute::new(sdmx::OBS_STATUS));
        assert!(existing.is_observation_status());

        let new = Attribute::New(NewAttribute::new("Marker").with_parent(sdmx::OBS_STATUS));
        assert!(new.is_observation_status());

        let other = Attribute::New(NewAttribute::new("Marker"));
        assert!(!other.is_observation_status());
    }

    #[test]
    fn test_from_data_values() {
        let values: BTreeSet<String> = ["Provisional", "Final"]
            .into_iter()
            .map(String::from)
            .collect();
        let attr = NewAttribute::from_data("Status", &values);
        assert_eq!(attr.new_values.len(), 2);
        assert_eq!(attr.new_values[0].uri_safe_identifier(), "final");
        assert!(!attr.is_required);
    }
}
