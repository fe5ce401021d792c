//! Observation value columns.

use super::{DataType, Measure, Unit};

#[derive(Debug, Clone, PartialEq)]
pub enum ObservationValue {
    /// Carries its own measure; one or more of these make a cube pivoted.
    Single(SingleMeasureObservation),
    /// Takes its measure from the cube's measure-dimension column.
    Multi(MultiMeasureObservation),
}

impl ObservationValue {
    pub fn single(measure: Measure, unit: Option<Unit>) -> Self {
        Self::Single(SingleMeasureObservation {
            measure,
            unit,
            data_type: DataType::decimal(),
        })
    }

    pub fn multi(unit: Option<Unit>) -> Self {
        Self::Multi(MultiMeasureObservation {
            unit,
            data_type: DataType::decimal(),
        })
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        match &mut self {
            Self::Single(obs) => obs.data_type = data_type,
            Self::Multi(obs) => obs.data_type = data_type,
        }
        self
    }

    pub fn unit(&self) -> Option<&Unit> {
        match self {
            Self::Single(obs) => obs.unit.as_ref(),
            Self::Multi(obs) => obs.unit.as_ref(),
        }
    }

    pub fn measure(&self) -> Option<&Measure> {
        match self {
            Self::Single(obs) => Some(&obs.measure),
            Self::Multi(_) => None,
        }
    }

    pub fn data_type(&self) -> &DataType {
        match self {
            Self::Single(obs) => &obs.data_type,
            Self::Multi(obs) => &obs.data_type,
        }
    }

    pub fn is_multi_measure(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleMeasureObservation {
    pub measure: Measure,
    pub unit: Option<Unit>,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiMeasureObservation {
    pub unit: Option<Unit>,
    pub data_type: DataType,
}
