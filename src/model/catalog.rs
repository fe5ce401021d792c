//! Catalog metadata shared by cubes and new code lists.

use super::{CarriesArbitraryRdf, Identifiable, SerialisationHint, TripleFragment};

/// Descriptive metadata of a dataset or code list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogMetadata {
    pub title: String,
    pub uri_safe_identifier_override: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub creator_uri: Option<String>,
    pub publisher_uri: Option<String>,
    pub license_uri: Option<String>,
    pub public_contact_point_uri: Option<String>,
    pub landing_page_uris: Vec<String>,
    pub theme_uris: Vec<String>,
    pub keywords: Vec<String>,
    pub dataset_issued: Option<String>,
    pub dataset_modified: Option<String>,
    pub spatial_bound_uri: Option<String>,
    pub temporal_bound_uri: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl CatalogMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.uri_safe_identifier_override = Some(identifier.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_publisher(mut self, uri: impl Into<String>) -> Self {
        self.publisher_uri = Some(uri.into());
        self
    }

    pub fn with_license(mut self, uri: impl Into<String>) -> Self {
        self.license_uri = Some(uri.into());
        self
    }

    /// All single-valued URI fields, paired with their field names.
    pub fn uri_fields(&self) -> Vec<(&'static str, &str)> {
        let single = [
            ("creator_uri", &self.creator_uri),
            ("publisher_uri", &self.publisher_uri),
            ("license_uri", &self.license_uri),
            ("public_contact_point_uri", &self.public_contact_point_uri),
            ("spatial_bound_uri", &self.spatial_bound_uri),
            ("temporal_bound_uri", &self.temporal_bound_uri),
        ];
        let mut fields: Vec<(&'static str, &str)> = single
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
            .collect();
        fields.extend(self.landing_page_uris.iter().map(|v| ("landing_page_uris", v.as_str())));
        fields.extend(self.theme_uris.iter().map(|v| ("theme_uris", v.as_str())));
        fields
    }
}

impl Identifiable for CatalogMetadata {
    fn label(&self) -> &str {
        &self.title
    }

    fn identifier_override(&self) -> Option<&str> {
        self.uri_safe_identifier_override.as_deref()
    }
}

impl CarriesArbitraryRdf for CatalogMetadata {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        &self.arbitrary_rdf
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        &[
            SerialisationHint::Default,
            SerialisationHint::Dataset,
            SerialisationHint::CatalogRecord,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_from_title() {
        let meta = CatalogMetadata::new("Population Estimates 2021");
        assert_eq!(meta.uri_safe_identifier(), "population-estimates-2021");
        let meta = meta.with_identifier("pop");
        assert_eq!(meta.uri_safe_identifier(), "pop");
    }

    #[test]
    fn test_uri_fields_collects_lists() {
        let mut meta = CatalogMetadata::new("x").with_publisher("http://example.com/pub");
        meta.theme_uris = vec!["http://example.com/t1".into(), "http://example.com/t2".into()];
        let fields = meta.uri_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("publisher_uri", "http://example.com/pub"));
    }
}
