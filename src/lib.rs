//! csvcube - compile statistical data cubes into CSV-W packages.
//!
//! A [`Cube`] is an ordered list of columns, each mapped onto an RDF Data
//! Cube component, plus optional source data. [`validate_cube`] reports every
//! problem in one pass; [`PackageWriter`] turns a valid cube into the data
//! CSV, its CSV-W metadata and one package per new code list.
//!
//! ```ignore
//! let package = PackageWriter::new(&cube).with_config(config).build()?;
//! package.write_to_dir(Path::new("out"))?;
//! ```

pub mod logger;

pub mod config;
pub mod cube;
pub mod model;
pub mod uri;
pub mod utils;
pub mod validate;
pub mod vocab;
pub mod writer;

pub use config::{ConfigError, WriterConfig};
pub use cube::{Column, Cube, CubeShape, DataSource, DataTable, QbColumn, StructuralDefinition};
pub use validate::{Diagnostics, ValidationError, Validator, validate_cube};
pub use writer::{CsvwPackage, PackageFile, PackageWriter, WriteError};
