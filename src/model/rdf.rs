//! Arbitrary RDF attached to components.
//!
//! A [`TripleFragment`] is a predicate/object pair whose subject is decided
//! at serialisation time: its [`SerialisationHint`] names one of the
//! resources generated for the producing component, and the writer supplies
//! the URI for each hint it generates.

use std::fmt;

use serde_json::{Map, Value, json};

/// Attachment point for a triple fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SerialisationHint {
    /// The component's primary resource (unit, attribute value, dataset, scheme).
    Default,
    /// The `qb:ComponentSpecification` generated for the component.
    Component,
    /// The `rdf:Property` minted for a new dimension, attribute or measure.
    Property,
    /// The `skos:ConceptScheme` of a new code list.
    ConceptScheme,
    /// The `qb:DataSet` of the cube.
    Dataset,
    /// The `dcat:CatalogRecord` describing a dataset or code list.
    CatalogRecord,
}

impl SerialisationHint {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Component => "component",
            Self::Property => "property",
            Self::ConceptScheme => "concept-scheme",
            Self::Dataset => "dataset",
            Self::CatalogRecord => "catalog-record",
        }
    }
}

impl fmt::Display for SerialisationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object position of a triple fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdfObject {
    Uri(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl RdfObject {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    /// JSON-LD object form (`{"@id": ..}` or `{"@value": ..}`).
    pub fn to_json_ld(&self) -> Value {
        match self {
            Self::Uri(uri) => json!({ "@id": uri }),
            Self::Literal {
                value,
                datatype,
                language,
            } => {
                let mut obj = Map::new();
                obj.insert("@value".into(), Value::String(value.clone()));
                if let Some(dt) = datatype {
                    obj.insert("@type".into(), Value::String(dt.clone()));
                }
                if let Some(lang) = language {
                    obj.insert("@language".into(), Value::String(lang.clone()));
                }
                Value::Object(obj)
            }
        }
    }
}

/// A predicate/object pair whose subject is chosen by its hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleFragment {
    pub predicate: String,
    pub object: RdfObject,
    pub hint: SerialisationHint,
}

impl TripleFragment {
    pub fn new(predicate: impl Into<String>, object: RdfObject) -> Self {
        Self {
            predicate: predicate.into(),
            object,
            hint: SerialisationHint::Default,
        }
    }

    pub fn with_hint(mut self, hint: SerialisationHint) -> Self {
        self.hint = hint;
        self
    }
}

/// A component that may carry extra triples.
pub trait CarriesArbitraryRdf {
    fn arbitrary_rdf(&self) -> &[TripleFragment];

    /// Hints this component generates resources for.
    fn permitted_hints(&self) -> &'static [SerialisationHint];

    /// Fragments whose hint is outside [`Self::permitted_hints`].
    fn unsupported_fragments(&self) -> Vec<&TripleFragment> {
        let permitted = self.permitted_hints();
        self.arbitrary_rdf()
            .iter()
            .filter(|f| !permitted.contains(&f.hint))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_json_ld() {
        let obj = RdfObject::lang_literal("Bonjour", "fr").to_json_ld();
        assert_eq!(obj["@value"], "Bonjour");
        assert_eq!(obj["@language"], "fr");
        assert!(obj.get("@type").is_none());

        let obj = RdfObject::uri("http://example.com/x").to_json_ld();
        assert_eq!(obj, json!({ "@id": "http://example.com/x" }));
    }

    #[test]
    fn test_fragment_default_hint() {
        let fragment = TripleFragment::new("http://example.com/p", RdfObject::literal("v"));
        assert_eq!(fragment.hint, SerialisationHint::Default);
        let fragment = fragment.with_hint(SerialisationHint::Property);
        assert_eq!(fragment.hint, SerialisationHint::Property);
    }
}
