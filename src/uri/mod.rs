//! URI resolution for everything a package mints.
//!
//! ```text
//! uri/
//! ├── template   # RFC 6570 `{var}` / `{+var}` templates
//! └── codelist   # concept URI conventions of external code lists
//! ```
//!
//! All locally minted URIs are fragments of the document identity, the data
//! CSV's file name (`<cube>.csv`). They are relative so a package can be
//! published under any base URL.

pub mod codelist;
pub mod template;

pub use codelist::{ConceptUriStyle, concept_uri_template};
pub use template::{TemplateError, UriTemplate, variable};

use crate::model::NewCodeList;

/// Builds the fragment URIs of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriHelper {
    doc: String,
}

impl UriHelper {
    pub fn new(doc: impl Into<String>) -> Self {
        Self { doc: doc.into() }
    }

    pub fn for_code_list(code_list: &NewCodeList) -> Self {
        Self::new(code_list.csv_file_name())
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    #[inline]
    fn fragment(&self, fragment: &str) -> String {
        format!("{}#{}", self.doc, fragment)
    }

    pub fn dataset(&self) -> String {
        self.fragment("dataset")
    }

    pub fn structure(&self) -> String {
        self.fragment("structure")
    }

    pub fn catalog_record(&self) -> String {
        self.fragment("catalog-record")
    }

    pub fn code_list_scheme(&self) -> String {
        self.fragment("code-list")
    }

    pub fn concept(&self, code: &str) -> String {
        self.fragment(code)
    }

    pub fn dimension(&self, id: &str) -> String {
        self.fragment(&format!("dimension/{id}"))
    }

    pub fn measure(&self, id: &str) -> String {
        self.fragment(&format!("measure/{id}"))
    }

    pub fn unit(&self, id: &str) -> String {
        self.fragment(&format!("unit/{id}"))
    }

    pub fn attribute(&self, id: &str) -> String {
        self.fragment(&format!("attribute/{id}"))
    }

    pub fn attribute_value(&self, attribute_id: &str, value_id: &str) -> String {
        self.fragment(&format!("attribute/{attribute_id}/{value_id}"))
    }

    pub fn class(&self, id: &str) -> String {
        self.fragment(&format!("class/{id}"))
    }

    pub fn component(&self, id: &str) -> String {
        self.fragment(&format!("component/{id}"))
    }

    /// Observation `aboutUrl`: the key columns in order, plus the measure in
    /// pivoted cubes where one row carries several observations.
    pub fn observation(&self, key_columns: &[String], measure_id: Option<&str>) -> String {
        let key = key_columns
            .iter()
            .map(|name| variable(name, true))
            .collect::<Vec<_>>()
            .join(",");
        match measure_id {
            Some(measure) => self.fragment(&format!("obs/{key}@{measure}")),
            None => self.fragment(&format!("obs/{key}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogMetadata, Concept};

    #[test]
    fn test_fragments() {
        let uris = UriHelper::new("population.csv");
        assert_eq!(uris.dataset(), "population.csv#dataset");
        assert_eq!(uris.dimension("area"), "population.csv#dimension/area");
        assert_eq!(
            uris.attribute_value("marker", "provisional"),
            "population.csv#attribute/marker/provisional"
        );
    }

    #[test]
    fn test_observation_uri() {
        let uris = UriHelper::new("population.csv");
        let keys = vec!["area".to_string(), "year".to_string()];
        assert_eq!(
            uris.observation(&keys, None),
            "population.csv#obs/{+area},{+year}"
        );
        assert_eq!(
            uris.observation(&keys, Some("men")),
            "population.csv#obs/{+area},{+year}@men"
        );
    }

    #[test]
    fn test_minted_uri_matches_template_expansion() {
        let uris = UriHelper::new("population.csv");
        let template = UriTemplate::parse(&uris.measure("{+measure}")).unwrap();
        assert_eq!(template.expand_one("measure", "men"), uris.measure("men"));
    }

    #[test]
    fn test_code_list_helper() {
        let list = NewCodeList::new(CatalogMetadata::new("Areas"), vec![Concept::new("North")]);
        let uris = UriHelper::for_code_list(&list);
        assert_eq!(uris.code_list_scheme(), "areas.csv#code-list");
        assert_eq!(uris.concept("north"), "areas.csv#north");
    }
}
