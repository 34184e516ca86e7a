//! Conversion, addition and comparison of quantities against a registry.

use std::borrow::Cow;
use std::cmp::Ordering;

use approx::relative_eq;
use tracing::debug;

use crate::error::{Error, Result};
use crate::expr::{self, UnitExpr};
use crate::quantity::{Operand, Quantity};
use crate::registry::Registry;

/// Relative tolerance under which two cgs magnitudes are considered equal.
pub const RELATIVE_TOLERANCE: f64 = 1e-10;

impl Registry {
    pub fn convert(&self, quantity: &Quantity, target: &str) -> Result<Quantity> {
        self.convert_expr(quantity, &expr::parse(target)?)
    }

    /// A coefficient on `target` scales the result (`1 km` in `"1e3 m"` is 1).
    pub fn convert_expr(&self, quantity: &Quantity, target: &UnitExpr) -> Result<Quantity> {
        if target.coefficient == 1.0 && quantity.unit == target.exponents {
            return Ok(Quantity::from_parts(
                quantity.value,
                target.exponents.clone(),
            ));
        }

        let source = self.reduce_exponents(&quantity.unit)?;
        let destination = self.reduce_expr(target)?;
        let from = self.classify(&source.exponents)?;
        let to = self.classify(&destination.exponents)?;

        if from == to {
            let value = quantity.value * source.coefficient / destination.coefficient;
            debug!(
                from = %quantity.unit,
                to = %target.exponents,
                factor = source.coefficient / destination.coefficient,
                "converted quantity"
            );
            return Ok(Quantity::from_parts(value, target.exponents.clone()));
        }

        match quantity.assumption {
            Some(assumption) => self.convert_assuming(quantity, assumption, &from, target, &to),
            None => Err(Error::IncompatibleDimensions {
                from,
                to,
                assumption: None,
            }),
        }
    }

    /// Converts into the cgs unit of the quantity's base type.
    pub fn to_cgs(&self, quantity: &Quantity) -> Result<Quantity> {
        let base_type = self.base_type_of(&quantity.unit)?;
        let target = UnitExpr::from_exponents(self.cgs_exponents(&base_type)?);
        self.convert_expr(quantity, &target)
    }

    /// Sum in the unit of `lhs`.
    pub fn add(&self, lhs: &Quantity, rhs: Operand<'_>) -> Result<Quantity> {
        let rhs = self.addend(lhs, rhs)?;
        self.add_quantities(lhs, &rhs)
    }

    pub fn sub(&self, lhs: &Quantity, rhs: Operand<'_>) -> Result<Quantity> {
        let rhs = self.addend(lhs, rhs)?;
        self.add_quantities(lhs, &rhs.negate())
    }

    fn addend<'a>(&self, lhs: &Quantity, rhs: Operand<'a>) -> Result<Cow<'a, Quantity>> {
        match rhs {
            Operand::Scalar(value) => {
                if !self.base_type_of(&lhs.unit)?.is_dimensionless() {
                    return Err(Error::InvalidOperand(format!(
                        "cannot add the bare number {value} to '{lhs}'"
                    )));
                }
                Ok(Cow::Owned(Quantity::dimensionless(value)))
            }
            Operand::Pair(value, unit) => Ok(Cow::Owned(Quantity::new(value, unit)?)),
            Operand::Quantity(quantity) => Ok(Cow::Borrowed(quantity)),
        }
    }

    fn add_quantities(&self, lhs: &Quantity, rhs: &Quantity) -> Result<Quantity> {
        if lhs.unit == rhs.unit {
            return Ok(Quantity::from_parts(lhs.value + rhs.value, lhs.unit.clone()));
        }
        let converted = self.convert_expr(rhs, &UnitExpr::from_exponents(lhs.unit.clone()))?;
        Ok(Quantity::from_parts(
            lhs.value + converted.value,
            lhs.unit.clone(),
        ))
    }

    /// Orders cgs magnitudes. Magnitudes within [`RELATIVE_TOLERANCE`] are
    /// `Equal`, consistent with `==`.
    pub fn compare(&self, lhs: &Quantity, rhs: Operand<'_>) -> Result<Ordering> {
        let rhs = match rhs {
            Operand::Scalar(value) => Cow::Owned(Quantity::dimensionless(value)),
            Operand::Pair(value, unit) => Cow::Owned(Quantity::new(value, unit)?),
            Operand::Quantity(quantity) => Cow::Borrowed(quantity),
        };
        let (a, b) = self.cgs_magnitudes(lhs, &rhs)?;
        if nearly_equal(a, b) {
            return Ok(Ordering::Equal);
        }
        a.partial_cmp(&b)
            .ok_or_else(|| Error::InvalidOperand(format!("cannot order '{lhs}' and '{rhs}'")))
    }

    pub fn equals(&self, lhs: &Quantity, rhs: &Quantity) -> bool {
        self.cgs_magnitudes(lhs, rhs)
            .map_or(false, |(a, b)| nearly_equal(a, b))
    }

    /// cgs magnitudes of two quantities sharing a base type.
    pub fn cgs_magnitudes(&self, lhs: &Quantity, rhs: &Quantity) -> Result<(f64, f64)> {
        let from = self.base_type_of(&lhs.unit)?;
        let to = self.base_type_of(&rhs.unit)?;
        if from != to {
            return Err(Error::IncompatibleDimensions {
                from,
                to,
                assumption: None,
            });
        }
        Ok((self.to_cgs(lhs)?.value, self.to_cgs(rhs)?.value))
    }

    pub fn pow(&self, base: &Quantity, exponent: Operand<'_>) -> Result<Quantity> {
        let exponent = match exponent {
            Operand::Scalar(exponent) => exponent,
            Operand::Pair(value, unit) => self.scalar(&Quantity::new(value, unit)?)?,
            Operand::Quantity(quantity) => self.scalar(quantity)?,
        };
        base.powf(exponent)
    }

    /// Plain number of a dimensionless quantity.
    pub fn scalar(&self, quantity: &Quantity) -> Result<f64> {
        if !self.base_type_of(&quantity.unit)?.is_dimensionless() {
            return Err(Error::InvalidOperand(format!(
                "'{quantity}' is not dimensionless"
            )));
        }
        Ok(self.convert_expr(quantity, &UnitExpr::one())?.value)
    }
}

fn nearly_equal(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = 0.0, max_relative = RELATIVE_TOLERANCE)
}
