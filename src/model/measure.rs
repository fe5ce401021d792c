//! Measures and the measure-type dimension.

use std::collections::BTreeSet;

use super::{CarriesArbitraryRdf, Identifiable, SerialisationHint, TripleFragment};
use crate::utils::uri_tail_identifier;

#[derive(Debug, Clone, PartialEq)]
pub enum Measure {
    Existing(ExistingMeasure),
    New(NewMeasure),
}

impl Measure {
    pub fn existing(uri: impl Into<String>) -> Self {
        Self::Existing(ExistingMeasure {
            uri: uri.into(),
            arbitrary_rdf: Vec::new(),
        })
    }

    pub fn new_measure(label: impl Into<String>) -> Self {
        Self::New(NewMeasure::new(label))
    }

    /// Identifier used for generated resources (component specifications).
    pub fn identifier(&self) -> String {
        match self {
            Self::Existing(m) => uri_tail_identifier(&m.uri),
            Self::New(m) => m.uri_safe_identifier(),
        }
    }

    /// Key under which two measures are considered the same measure.
    pub fn identity_key(&self) -> String {
        match self {
            Self::Existing(m) => m.uri.clone(),
            Self::New(m) => format!("new:{}", m.uri_safe_identifier()),
        }
    }

    /// Human readable name for diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Existing(m) => &m.uri,
            Self::New(m) => &m.label,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

impl CarriesArbitraryRdf for Measure {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        match self {
            Self::Existing(m) => &m.arbitrary_rdf,
            Self::New(m) => &m.arbitrary_rdf,
        }
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        match self {
            Self::Existing(_) => &[SerialisationHint::Component],
            Self::New(_) => &[SerialisationHint::Component, SerialisationHint::Property],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExistingMeasure {
    pub uri: String,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasure {
    pub label: String,
    pub description: Option<String>,
    pub parent_measure_uri: Option<String>,
    pub source_uri: Option<String>,
    pub uri_safe_identifier_override: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl NewMeasure {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            parent_measure_uri: None,
            source_uri: None,
            uri_safe_identifier_override: None,
            arbitrary_rdf: Vec::new(),
        }
    }
}

impl Identifiable for NewMeasure {
    fn label(&self) -> &str {
        &self.label
    }

    fn identifier_override(&self) -> Option<&str> {
        self.uri_safe_identifier_override.as_deref()
    }
}

/// A "measure type" column: each row names the measure of its observation.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMeasureDimension {
    pub measures: Vec<Measure>,
}

impl MultiMeasureDimension {
    pub fn new(measures: Vec<Measure>) -> Self {
        Self { measures }
    }

    /// One new measure per distinct value of the column.
    pub fn from_data(values: &BTreeSet<String>) -> Self {
        Self {
            measures: values.iter().map(Measure::new_measure).collect(),
        }
    }

    pub fn new_measures(&self) -> impl Iterator<Item = &NewMeasure> {
        self.measures.iter().filter_map(|m| match m {
            Measure::New(m) => Some(m),
            Measure::Existing(_) => None,
        })
    }

    pub fn existing_measures(&self) -> impl Iterator<Item = &ExistingMeasure> {
        self.measures.iter().filter_map(|m| match m {
            Measure::Existing(m) => Some(m),
            Measure::New(_) => None,
        })
    }

    /// Whether every member is new (`Some(true)`), every member is existing
    /// (`Some(false)`), or membership is mixed (`None`). Empty counts as new.
    pub fn all_new(&self) -> Option<bool> {
        let new = self.measures.iter().filter(|m| m.is_new()).count();
        if new == self.measures.len() {
            Some(true)
        } else if new == 0 {
            Some(false)
        } else {
            None
        }
    }
}
