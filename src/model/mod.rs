//! Structural definition model: the typed intermediate representation of a cube.
//!
//! # Module Structure
//!
//! ```text
//! model/
//! ├── rdf          # TripleFragment, SerialisationHint, capability traits
//! ├── datatype     # CSV-W literal datatypes
//! ├── catalog      # CatalogMetadata (dataset and code-list metadata)
//! ├── codelist     # CodeList, Concept, PackageReference
//! ├── dimension    # Dimension
//! ├── attribute    # Attribute, NewAttributeValue
//! ├── measure      # Measure, MultiMeasureDimension
//! ├── unit         # Unit, MultiUnits
//! └── observation  # ObservationValue
//! ```
//!
//! Every concept is a closed enum of `Existing` (external URI reference) and
//! `New` (minted inside the generated package) variants. Consumers match
//! exhaustively, so adding a variant is a compile error at every use site.

pub mod attribute;
pub mod catalog;
pub mod codelist;
pub mod datatype;
pub mod dimension;
pub mod measure;
pub mod observation;
pub mod rdf;
pub mod unit;

use std::fmt;

pub use attribute::{Attribute, ExistingAttribute, NewAttribute, NewAttributeValue};
pub use catalog::CatalogMetadata;
pub use codelist::{
    CodeList, CodeListResolver, Concept, ExistingCodeList, ExplicitPackageFields, NewCodeList,
    PackageReference,
};
pub use datatype::DataType;
pub use dimension::{Dimension, ExistingDimension, NewDimension};
pub use measure::{ExistingMeasure, Measure, MultiMeasureDimension, NewMeasure};
pub use observation::{MultiMeasureObservation, ObservationValue, SingleMeasureObservation};
pub use rdf::{CarriesArbitraryRdf, RdfObject, SerialisationHint, TripleFragment};
pub use unit::{ExistingUnit, MultiUnits, NewUnit, Unit};

use crate::utils::slug;

/// A component that derives its URI-safe identifier from a label.
pub trait Identifiable {
    fn label(&self) -> &str;

    fn identifier_override(&self) -> Option<&str>;

    /// The identifier used in every locally minted URI for this component.
    fn uri_safe_identifier(&self) -> String {
        match self.identifier_override() {
            Some(id) => id.to_string(),
            None => slug(self.label()),
        }
    }
}

/// Kind of component, used to label diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Dimension,
    Attribute,
    AttributeValue,
    Measure,
    MeasureDimension,
    Unit,
    UnitsColumn,
    ObservationValue,
    CodeList,
    Concept,
    Column,
    Catalog,
}

impl ComponentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::Attribute => "attribute",
            Self::AttributeValue => "attribute value",
            Self::Measure => "measure",
            Self::MeasureDimension => "measure dimension",
            Self::Unit => "unit",
            Self::UnitsColumn => "units column",
            Self::ObservationValue => "observation value",
            Self::CodeList => "code list",
            Self::Concept => "concept",
            Self::Column => "column",
            Self::Catalog => "catalog metadata",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
