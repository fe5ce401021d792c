//! Units of measure and the units column.

use std::collections::BTreeSet;

use super::{CarriesArbitraryRdf, Identifiable, SerialisationHint, TripleFragment};

#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Existing(ExistingUnit),
    New(NewUnit),
}

impl Unit {
    pub fn existing(uri: impl Into<String>) -> Self {
        Self::Existing(ExistingUnit { uri: uri.into() })
    }

    pub fn new_unit(label: impl Into<String>) -> Self {
        Self::New(NewUnit::new(label))
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Existing(u) => &u.uri,
            Self::New(u) => &u.label,
        }
    }
}

impl CarriesArbitraryRdf for Unit {
    fn arbitrary_rdf(&self) -> &[TripleFragment] {
        match self {
            Self::Existing(_) => &[],
            Self::New(u) => &u.arbitrary_rdf,
        }
    }

    fn permitted_hints(&self) -> &'static [SerialisationHint] {
        match self {
            Self::Existing(_) => &[],
            Self::New(_) => &[SerialisationHint::Default],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingUnit {
    pub uri: String,
}

/// A unit minted in this package.
///
/// `base_unit` and `base_unit_scaling_factor` are codependent, as are
/// `qudt_quantity_kind_uri` and `si_base_unit_conversion_multiplier`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUnit {
    pub label: String,
    pub description: Option<String>,
    pub source_uri: Option<String>,
    pub base_unit: Option<Box<Unit>>,
    pub base_unit_scaling_factor: Option<f64>,
    pub qudt_quantity_kind_uri: Option<String>,
    pub si_base_unit_conversion_multiplier: Option<f64>,
    pub uri_safe_identifier_override: Option<String>,
    pub arbitrary_rdf: Vec<TripleFragment>,
}

impl NewUnit {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            source_uri: None,
            base_unit: None,
            base_unit_scaling_factor: None,
            qudt_quantity_kind_uri: None,
            si_base_unit_conversion_multiplier: None,
            uri_safe_identifier_override: None,
            arbitrary_rdf: Vec::new(),
        }
    }

    pub fn scaled_from(mut self, base_unit: Unit, factor: f64) -> Self {
        self.base_unit = Some(Box::new(base_unit));
        self.base_unit_scaling_factor = Some(factor);
        self
    }

    pub fn with_quantity_kind(
        mut self,
        quantity_kind_uri: impl Into<String>,
        multiplier: f64,
    ) -> Self {
        self.qudt_quantity_kind_uri = Some(quantity_kind_uri.into());
        self.si_base_unit_conversion_multiplier = Some(multiplier);
        self
    }
}

impl Identifiable for NewUnit {
    fn label(&self) -> &str {
        &self.label
    }

    fn identifier_override(&self) -> Option<&str> {
        self.uri_safe_identifier_override.as_deref()
    }
}

/// A units column: each row names the unit of its observation.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiUnits {
    pub units: Vec<Unit>,
    pub describes_observations: Option<String>,
}

impl MultiUnits {
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units,
            describes_observations: None,
        }
    }

    /// One new unit per distinct value of the column.
    pub fn from_data(values: &BTreeSet<String>) -> Self {
        Self::new(values.iter().map(Unit::new_unit).collect())
    }

    pub fn describing(mut self, observation_column: impl Into<String>) -> Self {
        self.describes_observations = Some(observation_column.into());
        self
    }

    pub fn new_units(&self) -> impl Iterator<Item = &NewUnit> {
        self.units.iter().filter_map(|u| match u {
            Unit::New(u) => Some(u),
            Unit::Existing(_) => None,
        })
    }

    pub fn existing_units(&self) -> impl Iterator<Item = &ExistingUnit> {
        self.units.iter().filter_map(|u| match u {
            Unit::Existing(u) => Some(u),
            Unit::New(_) => None,
        })
    }

    /// See `MultiMeasureDimension::all_new`.
    pub fn all_new(&self) -> Option<bool> {
        let new = self.units.iter().filter(|u| u.is_new()).count();
        if new == self.units.len() {
            Some(true)
        } else if new == 0 {
            Some(false)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_unit_sets_both_fields() {
        let unit = NewUnit::new("Thousand Pounds").scaled_from(Unit::new_unit("Pounds"), 1000.0);
        assert!(unit.base_unit.is_some());
        assert_eq!(unit.base_unit_scaling_factor, Some(1000.0));
        assert_eq!(unit.uri_safe_identifier(), "thousand-pounds");
    }

    #[test]
    fn test_existing_unit_carries_no_rdf() {
        let unit = Unit::existing("http://qudt.org/vocab/unit/GBP");
        assert!(unit.arbitrary_rdf().is_empty());
        assert!(unit.permitted_hints().is_empty());
    }
}
