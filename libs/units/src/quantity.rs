//! Dimensioned quantities: a magnitude paired with a parsed unit expression.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use approx::{AbsDiffEq, RelativeEq};
use num_rational::Ratio;
use num_traits::One;

use crate::assume::Assumption;
use crate::dimension::BaseType;
use crate::error::{Error, Result};
use crate::expr::{self, write_number, ExponentMap, UnitExpr};
use crate::rational::rationalize;
use crate::registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A magnitude in some unit, optionally tagged with a physical assumption
/// that allows conversions across otherwise incompatible dimensions.
///
/// Quantities are values: every operation returns a new quantity, and
/// results never inherit the assumption of their operands.
///
/// ```
/// use oom_units::Quantity;
///
/// let distance: Quantity = "15 km".parse().unwrap();
/// assert_eq!(distance.to("m").unwrap().value(), 15000.0);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "QuantityRepr", try_from = "QuantityRepr")
)]
pub struct Quantity {
    pub(crate) value: f64,
    pub(crate) unit: ExponentMap,
    pub(crate) assumption: Option<Assumption>,
}

/// Right-hand operand of the fallible quantity operations.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    /// A bare, dimensionless number.
    Scalar(f64),
    /// `(value, unit expression)`.
    Pair(f64, &'a str),
    Quantity(&'a Quantity),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Scalar(f64::from(value))
    }
}

impl<'a> From<(f64, &'a str)> for Operand<'a> {
    fn from((value, unit): (f64, &'a str)) -> Self {
        Operand::Pair(value, unit)
    }
}

impl<'a> From<&'a Quantity> for Operand<'a> {
    fn from(quantity: &'a Quantity) -> Self {
        Operand::Quantity(quantity)
    }
}

impl Quantity {
    /// `value` in `unit`; a coefficient embedded in `unit` is folded into the
    /// value (`Quantity::new(2.0, "1e3 m")` is `2000 m`).
    pub fn new(value: f64, unit: &str) -> Result<Self> {
        let parsed = expr::parse(unit)?;
        Ok(Self::from_parts(value * parsed.coefficient, parsed.exponents))
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::from_parts(value, ExponentMap::new())
    }

    pub fn from_parts(value: f64, unit: ExponentMap) -> Self {
        Self {
            value,
            unit,
            assumption: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> String {
        self.unit.to_string()
    }

    pub fn exponents(&self) -> &ExponentMap {
        &self.unit
    }

    pub fn assumption(&self) -> Option<Assumption> {
        self.assumption
    }

    /// The same quantity tagged with `assumption` for subsequent conversions.
    pub fn with_assumption(mut self, assumption: Assumption) -> Self {
        self.assumption = Some(assumption);
        self
    }

    pub fn without_assumption(mut self) -> Self {
        self.assumption = None;
        self
    }

    pub fn base_type(&self) -> Result<BaseType> {
        registry().base_type_of(&self.unit)
    }

    /// Converts into `target`, crossing dimensions only through the attached
    /// assumption.
    pub fn to(&self, target: &str) -> Result<Quantity> {
        registry().convert(self, target)
    }

    pub fn to_unit_of(&self, other: &Quantity) -> Result<Quantity> {
        registry().convert_expr(self, &UnitExpr::from_exponents(other.unit.clone()))
    }

    pub fn to_cgs(&self) -> Result<Quantity> {
        registry().to_cgs(self)
    }

    pub fn try_add<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        registry().add(self, rhs.into())
    }

    pub fn try_sub<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        registry().sub(self, rhs.into())
    }

    /// Ordering of cgs magnitudes; mismatched base types are an error.
    pub fn compare<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Ordering> {
        registry().compare(self, rhs.into())
    }

    /// Raises to an integer, float or dimensionless-quantity exponent.
    pub fn pow<'a>(&self, exponent: impl Into<Operand<'a>>) -> Result<Quantity> {
        registry().pow(self, exponent.into())
    }

    pub fn powi(&self, exponent: i32) -> Result<Quantity> {
        Ok(Quantity::from_parts(
            self.value.powi(exponent),
            self.unit.scaled(Ratio::from_integer(i64::from(exponent)))?,
        ))
    }

    /// Unit exponents are multiplied by `exponent` rationalized with a
    /// bounded denominator, and each product is bounded again so repeated
    /// fractional powers stay small.
    pub fn powf(&self, exponent: f64) -> Result<Quantity> {
        let rational = rationalize(exponent)?;
        Ok(Quantity::from_parts(
            self.value.powf(exponent),
            self.unit.scaled_bounded(rational)?,
        ))
    }

    pub fn recip(&self) -> Result<Quantity> {
        self.powi(-1)
    }

    pub fn abs(&self) -> Quantity {
        Quantity::from_parts(self.value.abs(), self.unit.clone())
    }

    /// Product with exponents summed; fails only when an exponent overflows.
    /// The `*` operator panics in that case.
    pub fn try_mul(&self, rhs: &Quantity) -> Result<Quantity> {
        let mut unit = self.unit.clone();
        unit.merge(&rhs.unit, Ratio::one())?;
        Ok(Quantity::from_parts(self.value * rhs.value, unit))
    }

    pub fn try_div(&self, rhs: &Quantity) -> Result<Quantity> {
        self.try_mul(&rhs.recip()?)
    }

    pub(crate) fn negate(&self) -> Quantity {
        Quantity::from_parts(-self.value, self.unit.clone())
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::dimensionless(value)
    }
}

impl From<&Quantity> for f64 {
    fn from(quantity: &Quantity) -> Self {
        quantity.value
    }
}

impl FromStr for Quantity {
    type Err = Error;

    /// `"5 GHz"`, `"GHz"` or `"5"`.
    fn from_str(s: &str) -> Result<Self> {
        let parsed = expr::parse(s)?;
        Ok(Quantity::from_parts(parsed.coefficient, parsed.exponents))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_number(f, self.value)?;
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

impl PartialEq for Quantity {
    /// Equal base types and cgs magnitudes within a relative tolerance.
    /// Never fails: incompatible quantities are simply unequal.
    fn eq(&self, other: &Self) -> bool {
        registry().equals(self, other)
    }
}

impl PartialEq<f64> for Quantity {
    fn eq(&self, other: &f64) -> bool {
        registry().equals(self, &Quantity::dimensionless(*other))
    }
}

impl PartialEq<Quantity> for f64 {
    fn eq(&self, other: &Quantity) -> bool {
        other == self
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialOrd<f64> for Quantity {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.compare(*other).ok()
    }
}

impl AbsDiffEq for Quantity {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        registry()
            .cgs_magnitudes(self, other)
            .map_or(false, |(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}

impl RelativeEq for Quantity {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        registry()
            .cgs_magnitudes(self, other)
            .map_or(false, |(a, b)| a.relative_eq(&b, epsilon, max_relative))
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct QuantityRepr {
    value: f64,
    unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assumption: Option<Assumption>,
}

#[cfg(feature = "serde")]
impl From<Quantity> for QuantityRepr {
    fn from(quantity: Quantity) -> Self {
        QuantityRepr {
            value: quantity.value,
            unit: quantity.unit.to_string(),
            assumption: quantity.assumption,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<QuantityRepr> for Quantity {
    type Error = Error;

    fn try_from(repr: QuantityRepr) -> Result<Self> {
        let quantity = Quantity::new(repr.value, &repr.unit)?;
        Ok(match repr.assumption {
            Some(assumption) => quantity.with_assumption(assumption),
            None => quantity,
        })
    }
}
