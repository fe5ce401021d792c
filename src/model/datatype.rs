//! CSV-W literal datatypes.

use std::fmt;

use crate::vocab::xsd;

/// Built-in datatype names accepted by CSV-W (`datatype` column property).
const CSVW_DATATYPES: &[&str] = &[
    "anyURI",
    "base64Binary",
    "boolean",
    "byte",
    "date",
    "dateTime",
    "dateTimeStamp",
    "dayTimeDuration",
    "decimal",
    "double",
    "duration",
    "float",
    "gDay",
    "gMonth",
    "gMonthDay",
    "gYear",
    "gYearMonth",
    "hexBinary",
    "int",
    "integer",
    "language",
    "long",
    "Name",
    "NMTOKEN",
    "negativeInteger",
    "nonNegativeInteger",
    "nonPositiveInteger",
    "normalizedString",
    "number",
    "positiveInteger",
    "short",
    "string",
    "time",
    "token",
    "unsignedByte",
    "unsignedInt",
    "unsignedLong",
    "unsignedShort",
    "yearMonthDuration",
];

/// A declared literal datatype name.
///
/// Held as written; [`DataType::is_valid`] is checked by the per-component
/// validator so an unknown name is reported rather than rejected at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType(String);

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn decimal() -> Self {
        Self::new("decimal")
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        CSVW_DATATYPES.contains(&self.0.as_str())
    }

    /// XSD URI of the datatype (`number` is an alias of `double`).
    pub fn xsd_uri(&self) -> String {
        match self.0.as_str() {
            "number" => format!("{}double", xsd::NS),
            name => format!("{}{}", xsd::NS, name),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
