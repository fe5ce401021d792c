//! Code lists (SKOS concept schemes) and their concepts.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use super::{CarriesArbitraryRdf, CatalogMetadata, Identifiable, SerialisationHint, TripleFragment};

/// The permitted values of a dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeList {
    /// An external concept scheme.
    Existing(ExistingCodeList),
    /// A code list written alongside the cube as its own package.
    New(NewCodeList),
    /// A code list that already lives in another package on disk.
    InExistingPackage(PackageReference),
}

impl CodeList {
    pub fn as_new(&self) -> Option<&NewCodeList> {
        match self {
            Self::New(code_list) => Some(code_list),
            Self::Existing(_) | Self::InExistingPackage(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingCodeList {
    pub concept_scheme_uri: String,
}

impl ExistingCodeList {
    pub fn new(concept_scheme_uri: impl Into<String>) -> Self {
        Self {
            concept_scheme_uri: concept_scheme_uri.into(),
        }
    }
}

/// A locally defined code list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCodeList {
    pub metadata: CatalogMetadata,
    pub concepts: Vec<Concept>,
}

impl NewCodeList {
    pub fn new(metadata: CatalogMetadata, concepts: Vec<Concept>) -> Self {
        Self { metadata, concepts }
    }

    /// Build a flat code list from labels, one concept per distinct label.
    pub fn from_labels<'a>(
        metadata: CatalogMetadata,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let concepts = labels
            .into_iter()
            .filter(|label| seen.insert(*label))
            .map(Concept::new)
            .collect();
        Self { metadata, concepts }
    }

    /// File name of the code list's CSV (`<identifier>.csv`).
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.uri_safe_identifier())
    }

    pub fn concept_by_code(&self, code: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.code() == code)
    }
}

impl Identifiable for NewCodeList {
    fn label(&self) -> &str {
        &self.metadata.title
    }

    fn identifier_override(&self) -> Option<&str> {
        self.metadata.uri_safe_identifier_override.as_deref()
    }
}

impl CarriesArbitraryRdf for NewCodeList {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        &self.metadata.arbitrary_rdf
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        &[
            SerialisationHint::Default,
            SerialisationHint::ConceptScheme,
            SerialisationHint::CatalogRecord,
        ]
    }
}

/// A member of a new code list.
///
/// Identity is the code: two concepts with the same code are the same entity.
/// A concept with `same_as` set duplicates an existing external concept and
/// declares the equivalence.
#[derive(Debug, Clone)]
pub struct Concept {
    pub label: String,
    pub code_override: Option<String>,
    pub parent_code: Option<String>,
    pub sort_order: Option<i64>,
    pub description: Option<String>,
    pub same_as: Option<String>,
}

impl Concept {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code_override: None,
            parent_code: None,
            sort_order: None,
            description: None,
            same_as: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code_override = Some(code.into());
        self
    }

    pub fn with_parent(mut self, parent_code: impl Into<String>) -> Self {
        self.parent_code = Some(parent_code.into());
        self
    }

    pub fn with_sort_order(mut self, order: i64) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Mark this concept as a duplicate of an existing external concept.
    pub fn duplicating(mut self, existing_concept_uri: impl Into<String>) -> Self {
        self.same_as = Some(existing_concept_uri.into());
        self
    }

    #[inline]
    pub fn code(&self) -> String {
        self.uri_safe_identifier()
    }

    pub fn is_duplicated(&self) -> bool {
        self.same_as.is_some()
    }
}

impl Identifiable for Concept {
    fn label(&self) -> &str {
        &self.label
    }

    fn identifier_override(&self) -> Option<&str> {
        self.code_override.as_deref()
    }
}

impl PartialEq for Concept {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Concept {}

impl Hash for Concept {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

// ============================================================================
// Code lists living in other packages
// ============================================================================

/// Fields describing a code list that was already published as a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitPackageFields {
    /// Path of the code list's CSV, relative to the output directory.
    pub csv_path: PathBuf,
    pub concept_scheme_uri: String,
    /// URI template of its concepts; its single variable is rebound to the
    /// referencing column when used as a `valueUrl`.
    pub concept_uri_template: String,
}

/// How the fields of an existing-package code list are obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageReference {
    /// Fields already known from configuration.
    Explicit(ExplicitPackageFields),
    /// Fields must be recovered by inspecting the package's metadata document.
    Inspect(PathBuf),
}

impl PackageReference {
    /// Resolve to explicit fields, inspecting the package when required.
    ///
    /// Inspection needs a resolver; without one the reference is unresolved.
    pub fn resolve(
        &self,
        resolver: Option<&dyn CodeListResolver>,
    ) -> Result<ExplicitPackageFields, String> {
        match self {
            Self::Explicit(fields) => Ok(fields.clone()),
            Self::Inspect(path) => match resolver {
                Some(resolver) => resolver.resolve(path),
                None => Err("no code-list resolver configured for package inspection".into()),
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(fields) => &fields.csv_path,
            Self::Inspect(path) => path,
        }
    }
}

/// Reads an existing code-list package and reports its scheme and URI template.
pub trait CodeListResolver: Send + Sync {
    fn resolve(&self, metadata_path: &Path) -> Result<ExplicitPackageFields, String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_concept_identity_by_code() {
        let a = Concept::new("Wales");
        let b = Concept::new("WALES!");
        let c = Concept::new("Cymru").with_code("wales");
        assert_eq!(a, b);
        assert_eq!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_labels_dedupes() {
        let cl = NewCodeList::from_labels(CatalogMetadata::new("Area"), ["x", "y", "x"]);
        assert_eq!(cl.concepts.len(), 2);
        assert_eq!(cl.csv_file_name(), "area.csv");
        assert!(cl.concept_by_code("y").is_some());
    }

    #[test]
    fn test_package_reference_without_resolver() {
        let reference = PackageReference::Inspect(PathBuf::from("cl.csv-metadata.json"));
        assert!(reference.resolve(None).is_err());

        let fields = ExplicitPackageFields {
            csv_path: PathBuf::from("cl.csv"),
            concept_scheme_uri: "cl.csv#code-list".into(),
            concept_uri_template: "cl.csv#{+notation}".into(),
        };
        let reference = PackageReference::Explicit(fields.clone());
        assert_eq!(reference.resolve(None), Ok(fields));
    }
}
