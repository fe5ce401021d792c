//! The cube aggregate: metadata, ordered columns and optional source data.
//!
//! ```text
//! cube/
//! ├── column   # Column, QbColumn, StructuralDefinition
//! ├── data     # DataSource trait, DataTable
//! └── index    # ColumnIndex, CubeShape
//! ```

mod column;
mod data;
mod index;

pub use column::{Column, QbColumn, StructuralDefinition, SuppressedColumn};
pub use data::{DataSource, DataTable};
pub use index::{ColumnIndex, CubeShape, Indexed};

use crate::model::{CatalogMetadata, Identifiable};

/// A statistical data cube ready for validation and writing.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub metadata: CatalogMetadata,
    pub columns: Vec<Column>,
    pub data: Option<DataTable>,
}

impl Cube {
    pub fn new(metadata: CatalogMetadata, columns: Vec<Column>) -> Self {
        Self {
            metadata,
            columns,
            data: None,
        }
    }

    pub fn with_data(mut self, data: DataTable) -> Self {
        self.data = Some(data);
        self
    }

    pub fn uri_safe_identifier(&self) -> String {
        self.metadata.uri_safe_identifier()
    }

    /// Document identity every URI of the package is relative to.
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.uri_safe_identifier())
    }

    pub fn metadata_file_name(&self) -> String {
        format!("{}-metadata.json", self.csv_file_name())
    }

    pub fn column(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.title() == title)
    }

    pub fn qb_columns(&self) -> impl Iterator<Item = &QbColumn> {
        self.columns.iter().filter_map(Column::as_qb)
    }

    pub fn index(&self) -> ColumnIndex<'_> {
        ColumnIndex::build(&self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let cube = Cube::new(CatalogMetadata::new("Population Estimates"), Vec::new());
        assert_eq!(cube.csv_file_name(), "population-estimates.csv");
        assert_eq!(
            cube.metadata_file_name(),
            "population-estimates.csv-metadata.json"
        );
    }
}
