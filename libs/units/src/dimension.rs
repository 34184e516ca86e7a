//! Dimensional fingerprints of unit expressions.

use std::collections::BTreeMap;
use std::fmt;

use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::expr::{self, Exponent, ExponentMap};
use crate::registry::Registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Abstract physical dimension, each represented by one base unit symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dimension {
    Dimensionless,
    Length,
    Time,
    Mass,
    Temperature,
    Information,
    Angle,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Dimensionless,
        Dimension::Length,
        Dimension::Time,
        Dimension::Mass,
        Dimension::Temperature,
        Dimension::Information,
        Dimension::Angle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Dimensionless => "dimensionless",
            Dimension::Length => "length",
            Dimension::Time => "time",
            Dimension::Mass => "mass",
            Dimension::Temperature => "temperature",
            Dimension::Information => "information",
            Dimension::Angle => "angle",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dimension → exponent mapping of a unit. Two quantities may be added,
/// compared or converted into one another iff their base types are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseType(BTreeMap<Dimension, Exponent>);

impl BaseType {
    pub fn dimensionless() -> Self {
        Self(BTreeMap::from([(Dimension::Dimensionless, Exponent::zero())]))
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0
            .iter()
            .all(|(d, e)| *d == Dimension::Dimensionless || e.is_zero())
    }

    pub fn get(&self, dimension: Dimension) -> Option<Exponent> {
        self.0.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Exponent)> + '_ {
        self.0.iter().map(|(d, e)| (*d, *e))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("dimensionless");
        }
        let mut first = true;
        for (dimension, exponent) in self.iter() {
            if dimension == Dimension::Dimensionless || exponent.is_zero() {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if exponent.is_one() {
                write!(f, "{dimension}")?;
            } else {
                write!(f, "{dimension}^{exponent}")?;
            }
        }
        Ok(())
    }
}

impl Registry {
    /// Base type of a unit expression string.
    pub fn base_type(&self, unit: &str) -> Result<BaseType> {
        self.base_type_of(&expr::parse(unit)?.exponents)
    }

    /// Base type of an already parsed exponent map.
    pub fn base_type_of(&self, exponents: &ExponentMap) -> Result<BaseType> {
        let reduced = self.reduce_exponents(exponents)?;
        self.classify(&reduced.exponents)
    }

    /// Maps a reduced (base symbols only) exponent map onto dimensions.
    pub(crate) fn classify(&self, reduced: &ExponentMap) -> Result<BaseType> {
        let mut dimensions = BTreeMap::new();
        for (symbol, exponent) in reduced.iter() {
            if let Some(dimension) = self.dimension_of(symbol) {
                dimensions.insert(dimension, exponent);
            }
        }

        if dimensions.len() != reduced.len() {
            return Err(Error::Registry(format!(
                "base units '{reduced}' do not map one-to-one onto dimensions"
            )));
        }

        if dimensions.is_empty() {
            return Ok(BaseType::dimensionless());
        }
        if dimensions.len() > 1 {
            dimensions.remove(&Dimension::Dimensionless);
        }
        Ok(BaseType(dimensions))
    }

    /// Unit expression made of the cgs symbols of `base_type`.
    pub fn cgs_exponents(&self, base_type: &BaseType) -> Result<ExponentMap> {
        let mut exponents = ExponentMap::new();
        for (dimension, exponent) in base_type.iter() {
            let symbol = self.cgs_symbol(dimension).ok_or_else(|| {
                Error::Registry(format!("no cgs unit registered for {dimension}"))
            })?;
            if !symbol.is_empty() {
                exponents.add(symbol, exponent)?;
            }
        }
        Ok(exponents)
    }
}
