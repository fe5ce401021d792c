//! CSV-W package writer.
//!
//! # Module Structure
//!
//! ```text
//! writer/
//! ├── schema     # table schema: columns, virtual columns, keys
//! ├── structure  # JSON-LD graph: dataset, DSD, component specifications
//! ├── codelist   # one package per new code list
//! └── data       # data CSV with label -> identifier substitution
//! ```
//!
//! # Output
//!
//! ```text
//! <cube>.csv
//! <cube>.csv-metadata.json
//! <code-list>.csv                  # per new code list
//! <code-list>.csv-metadata.json
//! <code-list>.table.json
//! ```
//!
//! Building is pure. Only [`CsvwPackage::write_to_dir`] touches the disk.

mod codelist;
mod data;
mod schema;
mod structure;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::WriterConfig;
use crate::cube::{ColumnIndex, Cube, CubeShape, Indexed, QbColumn, StructuralDefinition};
use crate::model::{
    Attribute, CodeList, CodeListResolver, ComponentKind, Dimension, ExplicitPackageFields,
    Identifiable, Measure, NewCodeList, ObservationValue, SerialisationHint, Unit,
};
use crate::uri::{UriHelper, UriTemplate, concept_uri_template, variable};
use crate::utils::plural_count;
use crate::validate::{Diagnostics, Validator};
use crate::vocab::{self, rdfs};
use crate::{debug, log};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{0}")]
    Validation(Diagnostics),

    #[error("column `{column}`: code list could not be resolved: {reason}")]
    UnresolvedCodeList { column: String, reason: String },

    #[error("{component} `{location}`: nothing generated for hint `{hint}`")]
    UnmappedHint {
        component: ComponentKind,
        location: String,
        hint: SerialisationHint,
    },

    #[error("failed to write CSV")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to serialise JSON")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Package
// ============================================================================

/// One generated file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub path: PathBuf,
    pub contents: String,
}

impl PackageFile {
    fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Every artifact of a cube's package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvwPackage {
    pub files: Vec<PackageFile>,
}

impl CsvwPackage {
    pub fn file(&self, name: &str) -> Option<&PackageFile> {
        self.files.iter().find(|f| f.path == Path::new(name))
    }

    /// Emit all files under `dir`, creating directories as needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        self.files.par_iter().try_for_each(|file| {
            let path = dir.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(&path, &file.contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!("write"; "{}", file.path.display());
            Ok::<(), anyhow::Error>(())
        })?;

        log!("write"; "{} in {}", plural_count(self.files.len(), "file"), dir.display());
        Ok(())
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Validates a cube and builds its package.
pub struct PackageWriter<'a> {
    cube: &'a Cube,
    config: WriterConfig,
    resolver: Option<&'a dyn CodeListResolver>,
}

impl<'a> PackageWriter<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            config: WriterConfig::default(),
            resolver: None,
        }
    }

    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_resolver(mut self, resolver: &'a dyn CodeListResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Validate, then build every artifact.
    ///
    /// Fatal errors always stop; other errors stop unless
    /// `validate.proceed_with_warnings` is set.
    pub fn build(&self) -> Result<CsvwPackage, WriteError> {
        let mut validator = Validator::new(self.cube)
            .with_max_reported_values(self.config.validate.max_reported_values);
        if let Some(resolver) = self.resolver {
            validator = validator.with_resolver(resolver);
        }
        let diagnostics = validator.run();

        if diagnostics.has_fatal()
            || (diagnostics.has_errors() && !self.config.validate.proceed_with_warnings)
        {
            return Err(WriteError::Validation(diagnostics));
        }
        if diagnostics.has_errors() {
            log!(
                "warning";
                "writing despite {}",
                plural_count(diagnostics.len(), "validation error")
            );
        }

        let context = WriteContext::new(self.cube, self.resolver)?;
        let pretty = self.config.output.pretty;

        let mut package = CsvwPackage::default();
        package.files.push(PackageFile::new(
            self.cube.csv_file_name(),
            data::write_data(&context)?,
        ));
        package.files.push(PackageFile::new(
            self.cube.metadata_file_name(),
            to_json(&context.metadata()?, pretty)?,
        ));
        for list in context.new_code_lists() {
            package.files.extend(codelist::write_code_list(list, pretty)?);
        }

        debug!(
            "write";
            "built {} for `{}`",
            plural_count(package.files.len(), "file"),
            self.cube.metadata.title
        );
        Ok(package)
    }
}

pub(crate) fn to_json(value: &Value, pretty: bool) -> Result<String, WriteError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

// ============================================================================
// Shared context
// ============================================================================

/// Everything derived from the cube that the individual writers share.
pub(crate) struct WriteContext<'a> {
    pub cube: &'a Cube,
    pub index: ColumnIndex<'a>,
    pub uris: UriHelper,
    /// Resolved existing-package code lists, by column title.
    pub packages: FxHashMap<&'a str, ExplicitPackageFields>,
}

impl<'a> WriteContext<'a> {
    pub fn new(
        cube: &'a Cube,
        resolver: Option<&dyn CodeListResolver>,
    ) -> Result<Self, WriteError> {
        let mut packages = FxHashMap::default();
        for column in cube.qb_columns() {
            let StructuralDefinition::Dimension(dimension) = &column.component else {
                continue;
            };
            if let Some(CodeList::InExistingPackage(reference)) = dimension.code_list() {
                let fields = reference.resolve(resolver).map_err(|reason| {
                    WriteError::UnresolvedCodeList {
                        column: column.title.clone(),
                        reason,
                    }
                })?;
                packages.insert(column.title.as_str(), fields);
            }
        }

        Ok(Self {
            cube,
            index: cube.index(),
            uris: UriHelper::new(cube.csv_file_name()),
            packages,
        })
    }

    pub fn shape(&self) -> CubeShape {
        self.index.shape()
    }

    /// New code lists, once per file.
    pub fn new_code_lists(&self) -> Vec<&'a NewCodeList> {
        let mut seen = Vec::new();
        let mut lists = Vec::new();
        for dimension in &self.index.dimensions {
            if let Some(CodeList::New(list)) = dimension.component.code_list() {
                let file = list.csv_file_name();
                if !seen.contains(&file) {
                    seen.push(file);
                    lists.push(list);
                }
            }
        }
        lists
    }

    /// CSV-W names of the columns identifying an observation, in column order.
    pub fn key_columns(&self) -> Vec<String> {
        self.cube
            .qb_columns()
            .filter(|c| {
                matches!(
                    c.component,
                    StructuralDefinition::Dimension(_) | StructuralDefinition::MeasureDimension(_)
                )
            })
            .map(QbColumn::csvw_name)
            .collect()
    }

    /// `aboutUrl` of the observations in `observation`'s column.
    pub fn observation_uri(&self, observation: Indexed<'_, ObservationValue>) -> String {
        let keys = self.key_columns();
        match self.shape() {
            CubeShape::Pivoted => {
                let measure = self.pivoted_measure_id(observation.position);
                self.uris.observation(&keys, measure.as_deref())
            }
            CubeShape::Standard | CubeShape::Hybrid => self.uris.observation(&keys, None),
        }
    }

    /// `@<measure>` suffix of a pivoted observation column.
    ///
    /// Distinct measures sharing an identifier (`a/count`, `b/count`) get
    /// numbered in column order: `count`, `count-2`.
    fn pivoted_measure_id(&self, position: usize) -> Option<String> {
        // suffix -> identity key of the measure holding it
        let mut taken: FxHashMap<String, String> = FxHashMap::default();
        for observation in &self.index.observations {
            let Some(measure) = observation.component.measure() else {
                continue;
            };
            let base = measure.identifier();
            let key = measure.identity_key();
            let mut id = base.clone();
            let mut n = 1;
            while let Some(owner) = taken.get(&id) {
                if *owner == key {
                    break;
                }
                n += 1;
                id = format!("{base}-{n}");
            }
            if observation.position == position {
                return Some(id);
            }
            taken.insert(id, key);
        }
        None
    }

    pub fn dimension_uri(&self, column: &QbColumn, dimension: &Dimension) -> String {
        match dimension {
            Dimension::Existing(d) => d.uri.clone(),
            Dimension::New(_) => self.uris.dimension(&column.component_identifier()),
        }
    }

    pub fn attribute_uri(&self, column: &QbColumn, attribute: &Attribute) -> String {
        match attribute {
            Attribute::Existing(a) => a.uri.clone(),
            Attribute::New(_) => self.uris.attribute(&column.component_identifier()),
        }
    }

    pub fn measure_uri(&self, measure: &Measure) -> String {
        match measure {
            Measure::Existing(m) => m.uri.clone(),
            Measure::New(m) => self.uris.measure(&m.uri_safe_identifier()),
        }
    }

    pub fn unit_uri(&self, unit: &Unit) -> String {
        match unit {
            Unit::Existing(u) => u.uri.clone(),
            Unit::New(u) => self.uris.unit(&u.uri_safe_identifier()),
        }
    }

    /// Concept scheme of a dimension's code list.
    pub fn scheme_uri(&self, column: &QbColumn, code_list: &CodeList) -> Option<String> {
        match code_list {
            CodeList::Existing(list) => Some(list.concept_scheme_uri.clone()),
            CodeList::New(list) => Some(UriHelper::for_code_list(list).code_list_scheme()),
            CodeList::InExistingPackage(_) => self
                .packages
                .get(column.title.as_str())
                .map(|fields| fields.concept_scheme_uri.clone()),
        }
    }

    /// `valueUrl` of a column's cells; `None` for literal values.
    pub fn value_url(&self, column: &QbColumn) -> Option<String> {
        if let Some(template) = &column.cell_uri_template {
            return Some(template.clone());
        }
        let name = column.csvw_name();
        let cell = variable(&name, true);

        match &column.component {
            StructuralDefinition::Dimension(dimension) => match dimension.code_list()? {
                CodeList::New(list) => Some(UriHelper::for_code_list(list).concept(&cell)),
                CodeList::Existing(list) => {
                    Some(concept_uri_template(&list.concept_scheme_uri, &name))
                }
                CodeList::InExistingPackage(_) => {
                    let fields = self.packages.get(column.title.as_str())?;
                    Some(match UriTemplate::parse(&fields.concept_uri_template) {
                        Ok(template) => template.rebind(&name),
                        Err(_) => fields.concept_uri_template.clone(),
                    })
                }
            },
            StructuralDefinition::Attribute(attribute) => {
                if attribute.literal().is_some() {
                    None
                } else if attribute.new_values().is_empty() {
                    Some(cell)
                } else {
                    Some(
                        self.uris
                            .attribute_value(&column.component_identifier(), &cell),
                    )
                }
            }
            StructuralDefinition::MeasureDimension(measures) => match measures.all_new() {
                Some(true) => Some(self.uris.measure(&cell)),
                _ => Some(cell),
            },
            StructuralDefinition::Units(units) => match units.all_new() {
                Some(true) => Some(self.uris.unit(&cell)),
                _ => Some(cell),
            },
            StructuralDefinition::Observation(_) => None,
        }
    }

    /// Main metadata document: table group plus structure graph.
    pub fn metadata(&self) -> Result<Value, WriteError> {
        let mut tables = vec![json!({
            "url": self.cube.csv_file_name(),
            "tableSchema": schema::table_schema(self),
        })];
        for list in self.new_code_lists() {
            tables.push(json!({
                "url": list.csv_file_name(),
                "tableSchema": codelist::table_file_name(list),
                "suppressOutput": true,
            }));
        }

        let graph = structure::build_graph(self)?;

        let mut metadata = serde_json::Map::new();
        metadata.insert("@context".into(), json!(vocab::CSVW_CONTEXT));
        metadata.insert("@id".into(), json!(self.uris.dataset()));
        metadata.insert("tables".into(), Value::Array(tables));
        metadata.insert(rdfs::SEE_ALSO_KEY.into(), Value::Array(graph));
        Ok(Value::Object(metadata))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::cube::{Column, DataSource, DataTable};
    use crate::model::{CatalogMetadata, NewDimension, PackageReference};

    /// One new dimension from data, one observation column with a new
    /// measure and unit.
    pub(crate) fn minimal_cube() -> Cube {
        let data = DataTable::new()
            .with_column("Area", ["x", "y", "x"])
            .with_column("Value", ["1", "2", "3"]);
        let values: BTreeSet<String> = data.distinct_values("Area");
        Cube::new(
            CatalogMetadata::new("Minimal Cube"),
            vec![
                Column::qb("Area", Dimension::New(NewDimension::from_data("Area", &values)).into()),
                Column::qb(
                    "Value",
                    ObservationValue::single(
                        Measure::new_measure("Count"),
                        Some(Unit::new_unit("People")),
                    )
                    .into(),
                ),
            ],
        )
        .with_data(data)
    }

    pub(crate) fn metadata_json(package: &CsvwPackage, name: &str) -> Value {
        let file = package.file(name).unwrap();
        serde_json::from_str(&file.contents).unwrap()
    }

    #[test]
    fn test_minimal_package_files() {
        let cube = minimal_cube();
        let package = PackageWriter::new(&cube).build().unwrap();
        let names: Vec<_> = package
            .files
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "minimal-cube.csv",
                "minimal-cube.csv-metadata.json",
                "area.csv",
                "area.csv-metadata.json",
                "area.table.json",
            ]
        );

        let metadata = metadata_json(&package, "minimal-cube.csv-metadata.json");
        assert_eq!(metadata["@context"], "http://www.w3.org/ns/csvw");
        assert_eq!(metadata["@id"], "minimal-cube.csv#dataset");
        assert_eq!(metadata["tables"][1]["url"], "area.csv");
        assert_eq!(metadata["tables"][1]["suppressOutput"], true);

        let columns = metadata["tables"][0]["tableSchema"]["columns"]
            .as_array()
            .unwrap();
        assert_eq!(columns[0]["titles"], "Area");
        assert_eq!(columns[0]["required"], true);
        assert_eq!(columns[1]["titles"], "Value");
        assert_eq!(columns[1]["required"], true);
        assert_eq!(columns[1]["datatype"], "decimal");
    }

    #[test]
    fn test_invalid_cube_is_not_written() {
        let mut cube = minimal_cube();
        cube.columns[1] = Column::qb(
            "Value",
            ObservationValue::single(Measure::new_measure("Count"), None).into(),
        );
        let err = PackageWriter::new(&cube).build().unwrap_err();
        let WriteError::Validation(diagnostics) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(diagnostics.count_code("CUBE-E025"), 1);

        let mut config = WriterConfig::default();
        config.validate.proceed_with_warnings = true;
        assert!(PackageWriter::new(&cube).with_config(config).build().is_ok());
    }

    #[test]
    fn test_pivoted_observation_uris_unique_per_measure() {
        let observation = |title: &str, measure: &str| {
            Column::qb(
                title,
                ObservationValue::single(Measure::existing(measure), Some(Unit::new_unit("People")))
                    .into(),
            )
        };
        let cube = Cube::new(
            CatalogMetadata::new("P"),
            vec![
                Column::qb("Area", Dimension::New(NewDimension::new("Area")).into()),
                observation("A Count", "http://a.example/def/count"),
                observation("B Count", "http://b.example/def/count"),
                observation("Total", "http://a.example/def/total"),
            ],
        );
        let context = WriteContext::new(&cube, None).unwrap();
        let uris: Vec<_> = context
            .index
            .observations
            .iter()
            .map(|o| context.observation_uri(*o))
            .collect();
        assert_eq!(
            uris,
            vec![
                "p.csv#obs/{+area}@count",
                "p.csv#obs/{+area}@count-2",
                "p.csv#obs/{+area}@total",
            ]
        );
    }

    #[test]
    fn test_unresolved_code_list() {
        let mut cube = minimal_cube();
        cube.columns[0] = Column::qb(
            "Area",
            Dimension::New(NewDimension::new("Area").with_code_list(
                CodeList::InExistingPackage(PackageReference::Inspect(
                    "areas.csv-metadata.json".into(),
                )),
            ))
            .into(),
        );

        let Err(err) = WriteContext::new(&cube, None) else {
            panic!("expected the code list to stay unresolved");
        };
        let WriteError::UnresolvedCodeList { column, reason } = &err else {
            panic!("expected an unresolved code list, got {err:?}");
        };
        assert_eq!(column, "Area");
        assert!(reason.contains("no code-list resolver"));

        // the validator reports the same failure
        let err = PackageWriter::new(&cube).build().unwrap_err();
        let WriteError::Validation(diagnostics) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(diagnostics.count_code("CUBE-E060"), 1);
        assert!(!diagnostics.has_fatal());
    }

    #[test]
    fn test_label_without_identifier_is_not_written() {
        let data = DataTable::new()
            .with_column("Area", ["???", "x"])
            .with_column("Value", ["1", "2"]);
        let values = data.distinct_values("Area");
        let mut cube = minimal_cube().with_data(data);
        cube.columns[0] = Column::qb(
            "Area",
            Dimension::New(NewDimension::from_data("Area", &values)).into(),
        );

        let err = PackageWriter::new(&cube).build().unwrap_err();
        let WriteError::Validation(diagnostics) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(diagnostics.count_code("CUBE-E043"), 1);
    }

    #[test]
    fn test_write_to_dir() {
        let cube = minimal_cube();
        let package = PackageWriter::new(&cube).build().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        package.write_to_dir(&out).unwrap();

        for file in &package.files {
            let written = fs::read_to_string(out.join(&file.path)).unwrap();
            assert_eq!(written, file.contents);
        }
    }

    #[test]
    fn test_compact_json() {
        let cube = minimal_cube();
        let mut config = WriterConfig::default();
        config.output.pretty = false;
        let package = PackageWriter::new(&cube).with_config(config).build().unwrap();
        let metadata = package.file("minimal-cube.csv-metadata.json").unwrap();
        assert!(!metadata.contents.contains('\n'));
    }
}
