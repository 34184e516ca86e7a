//! Read-only unit catalog consumed by the reducer, the classifier and the
//! assumption rules.

use std::collections::{BTreeMap, HashMap};

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::expr;
use crate::quantity::Quantity;
use crate::tables;

/// A named unit defined as `coefficient × definition`.
#[derive(Clone, Debug, PartialEq)]
pub struct Equivalency {
    pub coefficient: f64,
    pub definition: String,
}

/// A named physical constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub value: f64,
    pub unit: String,
}

#[derive(Clone, Debug)]
pub struct Registry {
    base_units: Vec<(Dimension, String)>,
    cgs_units: HashMap<Dimension, String>,
    prefixes: Vec<(char, f64)>,
    equivalencies: BTreeMap<String, Equivalency>,
    constants: Vec<(String, Constant)>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry built from the embedded catalog.
    pub fn standard() -> Result<Self> {
        let mut builder = Registry::builder();
        for &(dimension, symbol) in tables::BASE_UNITS {
            builder = builder.base_unit(dimension, symbol);
        }
        for &(dimension, symbol) in tables::CGS_UNITS {
            builder = builder.cgs_unit(dimension, symbol);
        }
        for &(prefix, factor) in tables::PREFIXES {
            builder = builder.prefix(prefix, factor);
        }
        for &(symbol, coefficient, definition) in tables::EQUIVALENCIES {
            builder = builder.equivalency(symbol, coefficient, definition);
        }
        for &(name, value, unit) in tables::CONSTANTS {
            builder = builder.constant(name, value, unit);
        }
        builder.build()
    }

    pub fn is_base_symbol(&self, symbol: &str) -> bool {
        self.base_units.iter().any(|(_, s)| s == symbol)
    }

    pub fn base_symbol(&self, dimension: Dimension) -> Option<&str> {
        self.base_units
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, s)| s.as_str())
    }

    pub fn dimension_of(&self, symbol: &str) -> Option<Dimension> {
        self.base_units
            .iter()
            .find(|(_, s)| s == symbol)
            .map(|(d, _)| *d)
    }

    pub fn cgs_symbol(&self, dimension: Dimension) -> Option<&str> {
        self.cgs_units.get(&dimension).map(String::as_str)
    }

    pub fn prefix(&self, prefix: char) -> Option<f64> {
        self.prefixes
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, f)| *f)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.prefixes.iter().copied()
    }

    pub fn equivalency(&self, symbol: &str) -> Option<&Equivalency> {
        self.equivalencies.get(symbol)
    }

    /// Base and equivalency symbols (without prefixes).
    pub fn unit_symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.base_units
            .iter()
            .map(|(_, s)| s.as_str())
            .filter(|s| !s.is_empty())
            .chain(self.equivalencies.keys().map(String::as_str))
    }

    /// A quantity of one `unit`, after checking that the unit resolves.
    pub fn unit(&self, unit: &str) -> Result<Quantity> {
        self.reduce(unit)?;
        Quantity::new(1.0, unit)
    }

    pub fn constant(&self, name: &str) -> Result<Quantity> {
        let constant = self
            .constants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| Error::UnknownConstant(name.to_string()))?;
        Quantity::new(constant.value, &constant.unit)
    }

    /// Every constant in declaration order.
    pub fn constants(&self) -> Result<Vec<(&str, Quantity)>> {
        let mut out = Vec::with_capacity(self.constants.len());
        for (name, constant) in &self.constants {
            out.push((name.as_str(), Quantity::new(constant.value, &constant.unit)?));
        }
        Ok(out)
    }

    /// Every constant projected onto cgs units.
    pub fn constants_cgs(&self) -> Result<Vec<(&str, Quantity)>> {
        let mut out = Vec::with_capacity(self.constants.len());
        for (name, quantity) in self.constants()? {
            out.push((name, self.to_cgs(&quantity)?));
        }
        Ok(out)
    }
}

/// Collects registry tables; [`RegistryBuilder::build`] checks that every
/// definition parses.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    base_units: Vec<(Dimension, String)>,
    cgs_units: HashMap<Dimension, String>,
    prefixes: Vec<(char, f64)>,
    equivalencies: BTreeMap<String, Equivalency>,
    constants: Vec<(String, Constant)>,
}

impl RegistryBuilder {
    pub fn base_unit(mut self, dimension: Dimension, symbol: &str) -> Self {
        self.base_units.push((dimension, symbol.to_string()));
        self
    }

    pub fn cgs_unit(mut self, dimension: Dimension, symbol: &str) -> Self {
        self.cgs_units.insert(dimension, symbol.to_string());
        self
    }

    pub fn prefix(mut self, prefix: char, factor: f64) -> Self {
        self.prefixes.push((prefix, factor));
        self
    }

    pub fn equivalency(mut self, symbol: &str, coefficient: f64, definition: &str) -> Self {
        self.equivalencies.insert(
            symbol.to_string(),
            Equivalency {
                coefficient,
                definition: definition.to_string(),
            },
        );
        self
    }

    pub fn constant(mut self, name: &str, value: f64, unit: &str) -> Self {
        self.constants.push((
            name.to_string(),
            Constant {
                value,
                unit: unit.to_string(),
            },
        ));
        self
    }

    pub fn build(self) -> Result<Registry> {
        for (symbol, equivalency) in &self.equivalencies {
            if symbol.is_empty() || symbol.contains(char::is_whitespace) {
                return Err(Error::Registry(format!(
                    "invalid equivalency symbol '{symbol}'"
                )));
            }
            expr::parse(&equivalency.definition)?;
        }
        for (_, constant) in &self.constants {
            expr::parse(&constant.unit)?;
        }
        Ok(Registry {
            base_units: self.base_units,
            cgs_units: self.cgs_units,
            prefixes: self.prefixes,
            equivalencies: self.equivalencies,
            constants: self.constants,
        })
    }
}
