//! Dimensions.

use std::collections::BTreeSet;

use super::{
    CarriesArbitraryRdf, CatalogMetadata, CodeList, Identifiable, NewCodeList, SerialisationHint,
    TripleFragment,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Existing(ExistingDimension),
    New(NewDimension),
}

impl Dimension {
    pub fn existing(uri: impl Into<String>) -> Self {
        Self::Existing(ExistingDimension {
            uri: uri.into(),
            range_uri: None,
            arbitrary_rdf: Vec::new(),
        })
    }

    /// The code list restricting this dimension's values, if any.
    pub fn code_list(&self) -> Option<&CodeList> {
        match self {
            Self::Existing(_) => None,
            Self::New(dimension) => dimension.code_list.as_ref(),
        }
    }
}

impl CarriesArbitraryRdf for Dimension {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        match self {
            Self::Existing(d) => &d.arbitrary_rdf,
            Self::New(d) => &d.arbitrary_rdf,
        }
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        match self {
            Self::Existing(_) => &[SerialisationHint::Component],
            Self::New(_) => &[SerialisationHint::Component, SerialisationHint::Property],
        }
    }
}

/// A dimension property defined elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingDimension {
    pub uri: String,
    pub range_uri: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

/// A dimension property minted in this package.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDimension {
    pub label: String,
    pub description: Option<String>,
    pub code_list: Option<CodeList>,
    pub parent_dimension_uri: Option<String>,
    pub source_uri: Option<String>,
    pub uri_safe_identifier_override: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl NewDimension {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            code_list: None,
            parent_dimension_uri: None,
            source_uri: None,
            uri_safe_identifier_override: None,
            arbitrary_rdf: Vec::new(),
        }
    }

    /// Synthesise a dimension whose new code list holds the distinct values
    /// of its column.
    pub fn from_data(label: impl Into<String>, values: &BTreeSet<String>) -> Self {
        let label = label.into();
        let code_list = NewCodeList::from_labels(
            CatalogMetadata::new(label.clone()),
            values.iter().map(String::as_str),
        );
        Self {
            code_list: Some(CodeList::New(code_list)),
            ..Self::new(label)
        }
    }

    pub fn with_code_list(mut self, code_list: CodeList) -> Self {
        self.code_list = Some(code_list);
        self
    }

    pub fn with_parent(mut self, uri: impl Into<String>) -> Self {
        self.parent_dimension_uri = Some(uri.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Identifiable for NewDimension {
    fn label(&self) -> &str {
        &self.label
    }

    fn identifier_override(&self) -> Option<&str> {
        self.uri_safe_identifier_override.as_deref()
    }
}
