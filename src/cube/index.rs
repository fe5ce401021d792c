//! Derived per-kind indices over a cube's columns.
//!
//! Built once per validation or writing pass. Components never point back to
//! their cube; everything that needs "the units column" or "the observation
//! column titled X" asks the index instead.

use rustc_hash::FxHashMap;

use super::{Column, QbColumn, StructuralDefinition};
use crate::model::{Attribute, Dimension, MultiMeasureDimension, MultiUnits, ObservationValue};

/// A component together with the column that holds it.
#[derive(Debug)]
pub struct Indexed<'a, T> {
    /// Position of the column in the cube.
    pub position: usize,
    pub column: &'a QbColumn,
    pub component: &'a T,
}

impl<T> Clone for Indexed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Indexed<'_, T> {}

/// Mutually exclusive layouts of a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeShape {
    /// One observation column; the measure is fixed or given per row.
    Standard,
    /// Several single-measure observation columns per row.
    Pivoted,
    /// Several observation columns mixed with per-row measures. Invalid.
    Hybrid,
}

#[derive(Debug)]
pub struct ColumnIndex<'a> {
    pub dimensions: Vec<Indexed<'a, Dimension>>,
    pub attributes: Vec<Indexed<'a, Attribute>>,
    pub measure_dimensions: Vec<Indexed<'a, MultiMeasureDimension>>,
    pub units_columns: Vec<Indexed<'a, MultiUnits>>,
    pub observations: Vec<Indexed<'a, ObservationValue>>,
    columns: &'a [Column],
    by_title: FxHashMap<&'a str, usize>,
}

impl<'a> ColumnIndex<'a> {
    pub fn build(columns: &'a [Column]) -> Self {
        let mut index = Self {
            dimensions: Vec::new(),
            attributes: Vec::new(),
            measure_dimensions: Vec::new(),
            units_columns: Vec::new(),
            observations: Vec::new(),
            columns,
            by_title: FxHashMap::default(),
        };

        for (position, column) in columns.iter().enumerate() {
            index.by_title.entry(column.title()).or_insert(position);

            let Column::Qb(qb) = column else { continue };
            match &qb.component {
                StructuralDefinition::Dimension(d) => index.dimensions.push(Indexed {
                    position,
                    column: qb,
                    component: d,
                }),
                StructuralDefinition::Attribute(a) => index.attributes.push(Indexed {
                    position,
                    column: qb,
                    component: a,
                }),
                StructuralDefinition::MeasureDimension(m) => {
                    index.measure_dimensions.push(Indexed {
                        position,
                        column: qb,
                        component: m,
                    })
                }
                StructuralDefinition::Units(u) => index.units_columns.push(Indexed {
                    position,
                    column: qb,
                    component: u,
                }),
                StructuralDefinition::Observation(o) => index.observations.push(Indexed {
                    position,
                    column: qb,
                    component: o,
                }),
            }
        }

        index
    }

    /// Column by title (first occurrence).
    pub fn column(&self, title: &str) -> Option<&'a Column> {
        self.by_title.get(title).map(|&i| &self.columns[i])
    }

    pub fn observation(&self, title: &str) -> Option<Indexed<'a, ObservationValue>> {
        self.observations
            .iter()
            .find(|o| o.column.title == title)
            .copied()
    }

    /// The single measure-dimension column, when exactly one exists.
    pub fn measure_dimension(&self) -> Option<Indexed<'a, MultiMeasureDimension>> {
        match self.measure_dimensions.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The single units column, when exactly one exists.
    pub fn units_column(&self) -> Option<Indexed<'a, MultiUnits>> {
        match self.units_columns.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Units columns that qualify the observation column `title`.
    ///
    /// In standard shape every units column qualifies the single observation
    /// column; in pivoted shape only the explicitly linked ones do.
    pub fn units_columns_for(&self, title: &str) -> Vec<Indexed<'a, MultiUnits>> {
        let pivoted = self.shape() == CubeShape::Pivoted;
        self.units_columns
            .iter()
            .filter(|u| match u.component.describes_observations.as_deref() {
                Some(linked) => linked == title,
                None => !pivoted,
            })
            .copied()
            .collect()
    }

    /// Attribute columns that qualify the observation column `title`.
    pub fn attributes_for(&self, title: &str) -> Vec<Indexed<'a, Attribute>> {
        let pivoted = self.shape() == CubeShape::Pivoted;
        self.attributes
            .iter()
            .filter(|a| match a.component.describes_observations() {
                Some(linked) => linked == title,
                None => !pivoted,
            })
            .copied()
            .collect()
    }

    pub fn shape(&self) -> CubeShape {
        if self.observations.len() <= 1 {
            return CubeShape::Standard;
        }
        let has_multi_measure = self
            .observations
            .iter()
            .any(|o| o.component.is_multi_measure());
        if !self.measure_dimensions.is_empty() || has_multi_measure {
            CubeShape::Hybrid
        } else {
            CubeShape::Pivoted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measure, NewAttribute, NewDimension, Unit};

    fn obs(label: &str) -> StructuralDefinition {
        ObservationValue::single(Measure::new_measure(label), Some(Unit::new_unit("Count"))).into()
    }

    #[test]
    fn test_standard_shape() {
        let columns = vec![
            Column::qb("Area", Dimension::New(NewDimension::new("Area")).into()),
            Column::qb("Value", obs("Population")),
        ];
        let index = ColumnIndex::build(&columns);
        assert_eq!(index.shape(), CubeShape::Standard);
        assert_eq!(index.dimensions.len(), 1);
        assert_eq!(index.observations[0].position, 1);
        assert!(index.observation("Value").is_some());
        assert!(index.observation("Area").is_none());
    }

    #[test]
    fn test_pivoted_and_hybrid_shapes() {
        let mut columns = vec![
            Column::qb("Area", Dimension::New(NewDimension::new("Area")).into()),
            Column::qb("Men", obs("Men")),
            Column::qb("Women", obs("Women")),
        ];
        assert_eq!(ColumnIndex::build(&columns).shape(), CubeShape::Pivoted);

        columns.push(Column::qb(
            "Measure",
            MultiMeasureDimension::new(vec![Measure::new_measure("Men")]).into(),
        ));
        assert_eq!(ColumnIndex::build(&columns).shape(), CubeShape::Hybrid);
    }

    #[test]
    fn test_attributes_for_pivoted() {
        let columns = vec![
            Column::qb("Men", obs("Men")),
            Column::qb("Women", obs("Women")),
            Column::qb(
                "Men Marker",
                Attribute::New(NewAttribute::new("Marker").describing("Men")).into(),
            ),
        ];
        let index = ColumnIndex::build(&columns);
        assert_eq!(index.attributes_for("Men").len(), 1);
        assert!(index.attributes_for("Women").is_empty());
    }
}
