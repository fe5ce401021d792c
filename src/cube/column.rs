//! Columns of a cube.

use crate::model::{
    Attribute, ComponentKind, Dimension, Identifiable, MultiMeasureDimension, MultiUnits,
    ObservationValue,
};
use crate::utils::{csvw_column_name, slug};

/// A column of the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Present in the data, excluded from the RDF output.
    Suppressed(SuppressedColumn),
    Qb(QbColumn),
}

impl Column {
    pub fn suppressed(title: impl Into<String>) -> Self {
        Self::Suppressed(SuppressedColumn {
            title: title.into(),
        })
    }

    pub fn qb(title: impl Into<String>, component: StructuralDefinition) -> Self {
        Self::Qb(QbColumn::new(title, component))
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Suppressed(c) => &c.title,
            Self::Qb(c) => &c.title,
        }
    }

    /// CSV-W `name` of the column (URI template variable).
    pub fn csvw_name(&self) -> String {
        csvw_column_name(self.title())
    }

    pub fn as_qb(&self) -> Option<&QbColumn> {
        match self {
            Self::Qb(c) => Some(c),
            Self::Suppressed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressedColumn {
    pub title: String,
}

/// A column mapped onto a cube component.
#[derive(Debug, Clone, PartialEq)]
pub struct QbColumn {
    pub title: String,
    pub component: StructuralDefinition,
    /// Explicit `valueUrl` template for the column's cells.
    pub cell_uri_template: Option<String>,
    pub uri_safe_identifier_override: Option<String>,
}

impl QbColumn {
    pub fn new(title: impl Into<String>, component: StructuralDefinition) -> Self {
        Self {
            title: title.into(),
            component,
            cell_uri_template: None,
            uri_safe_identifier_override: None,
        }
    }

    pub fn with_cell_uri_template(mut self, template: impl Into<String>) -> Self {
        self.cell_uri_template = Some(template.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.uri_safe_identifier_override = Some(identifier.into());
        self
    }

    pub fn csvw_name(&self) -> String {
        csvw_column_name(&self.title)
    }

    /// Identifier of the column itself: the override, else the slug of its title.
    pub fn uri_safe_identifier(&self) -> String {
        self.uri_safe_identifier_override
            .clone()
            .unwrap_or_else(|| slug(&self.title))
    }

    /// Identifier of the column's component.
    ///
    /// New components use their own identifier; external ones borrow the
    /// column's.
    pub fn component_identifier(&self) -> String {
        match &self.component {
            StructuralDefinition::Dimension(Dimension::New(d)) => d.uri_safe_identifier(),
            StructuralDefinition::Attribute(Attribute::New(a)) => a.uri_safe_identifier(),
            StructuralDefinition::Dimension(Dimension::Existing(_))
            | StructuralDefinition::Attribute(Attribute::Existing(_))
            | StructuralDefinition::MeasureDimension(_)
            | StructuralDefinition::Units(_)
            | StructuralDefinition::Observation(_) => self.uri_safe_identifier(),
        }
    }
}

impl From<QbColumn> for Column {
    fn from(column: QbColumn) -> Self {
        Self::Qb(column)
    }
}

/// What a column means in the cube.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralDefinition {
    Dimension(Dimension),
    Attribute(Attribute),
    MeasureDimension(MultiMeasureDimension),
    Units(MultiUnits),
    Observation(ObservationValue),
}

impl StructuralDefinition {
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Dimension(_) => ComponentKind::Dimension,
            Self::Attribute(_) => ComponentKind::Attribute,
            Self::MeasureDimension(_) => ComponentKind::MeasureDimension,
            Self::Units(_) => ComponentKind::UnitsColumn,
            Self::Observation(_) => ComponentKind::ObservationValue,
        }
    }

    /// Observation column this column qualifies, for attribute and units columns.
    pub fn describes_observations(&self) -> Option<&str> {
        match self {
            Self::Attribute(a) => a.describes_observations(),
            Self::Units(u) => u.describes_observations.as_deref(),
            Self::Dimension(_) | Self::MeasureDimension(_) | Self::Observation(_) => None,
        }
    }
}

impl From<Dimension> for StructuralDefinition {
    fn from(value: Dimension) -> Self {
        Self::Dimension(value)
    }
}

impl From<Attribute> for StructuralDefinition {
    fn from(value: Attribute) -> Self {
        Self::Attribute(value)
    }
}

impl From<MultiMeasureDimension> for StructuralDefinition {
    fn from(value: MultiMeasureDimension) -> Self {
        Self::MeasureDimension(value)
    }
}

impl From<MultiUnits> for StructuralDefinition {
    fn from(value: MultiUnits) -> Self {
        Self::Units(value)
    }
}

impl From<ObservationValue> for StructuralDefinition {
    fn from(value: ObservationValue) -> Self {
        Self::Observation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewAttribute, NewDimension};

    #[test]
    fn test_component_identifier() {
        let column = QbColumn::new(
            "Area Code",
            Dimension::New(NewDimension::new("Reference Area")).into(),
        );
        assert_eq!(column.uri_safe_identifier(), "area-code");
        assert_eq!(column.component_identifier(), "reference-area");
        assert_eq!(column.csvw_name(), "area_code");

        let column = QbColumn::new("Status", Dimension::existing("http://example.com/s").into())
            .with_identifier("obs-status");
        assert_eq!(column.component_identifier(), "obs-status");
    }

    #[test]
    fn test_describes_observations() {
        let def: StructuralDefinition =
            Attribute::New(NewAttribute::new("Marker").describing("Value")).into();
        assert_eq!(def.describes_observations(), Some("Value"));
        assert_eq!(def.kind(), ComponentKind::Attribute);
    }
}
