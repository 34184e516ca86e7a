//! Reduction of unit expressions to base symbols.

use tracing::trace;

use crate::error::{Error, Result};
use crate::expr::{self, exponent_to_f64, ExponentMap, UnitExpr};
use crate::registry::{Equivalency, Registry};

impl Registry {
    /// Reduces `expr` to base symbols with an aggregated coefficient.
    pub fn reduce(&self, expr: &str) -> Result<UnitExpr> {
        self.reduce_expr(&expr::parse(expr)?)
    }

    /// Reduced form of `expr` rendered back to a unit expression string.
    pub fn reduce_to_base(&self, expr: &str) -> Result<String> {
        Ok(self.reduce(expr)?.to_string())
    }

    pub fn reduce_expr(&self, expr: &UnitExpr) -> Result<UnitExpr> {
        let mut reduced = self.reduce_exponents(&expr.exponents)?;
        reduced.coefficient *= expr.coefficient;
        Ok(reduced)
    }

    pub fn reduce_exponents(&self, exponents: &ExponentMap) -> Result<UnitExpr> {
        let mut path = Vec::new();
        self.reduce_along(exponents, &mut path)
    }

    /// `path` holds the equivalencies currently being expanded.
    fn reduce_along(&self, exponents: &ExponentMap, path: &mut Vec<String>) -> Result<UnitExpr> {
        let mut coefficient = 1.0;
        let mut base = ExponentMap::new();

        for (symbol, exponent) in exponents.entries() {
            let power = exponent_to_f64(exponent);

            if self.is_base_symbol(symbol) {
                base.add(symbol, exponent)?;
            } else if let Some(equivalency) = self.equivalency(symbol) {
                let expanded = self.expand(symbol, equivalency, path)?;
                coefficient *= expanded.coefficient.powf(power);
                base.merge(&expanded.exponents, exponent)?;
            } else if let Some((factor, rest)) = self.split_prefix(symbol) {
                if self.is_base_symbol(rest) {
                    base.add(rest, exponent)?;
                    coefficient *= factor.powf(power);
                } else if let Some(equivalency) = self.equivalency(rest) {
                    let expanded = self.expand(rest, equivalency, path)?;
                    coefficient *= expanded.coefficient.powf(power) * factor.powf(power);
                    base.merge(&expanded.exponents, exponent)?;
                } else {
                    return Err(Error::InvalidUnit(symbol.to_string()));
                }
            } else {
                return Err(Error::InvalidUnit(symbol.to_string()));
            }
        }

        Ok(UnitExpr {
            coefficient,
            exponents: base,
        })
    }

    fn expand(
        &self,
        symbol: &str,
        equivalency: &Equivalency,
        path: &mut Vec<String>,
    ) -> Result<UnitExpr> {
        if path.iter().any(|s| s == symbol) {
            return Err(Error::EquivalencyCycle(symbol.to_string()));
        }

        let definition = expr::parse(&equivalency.definition)?;
        path.push(symbol.to_string());
        let reduced = self.reduce_along(&definition.exponents, path);
        path.pop();

        let mut reduced = reduced?;
        reduced.coefficient *= equivalency.coefficient * definition.coefficient;
        trace!(
            symbol,
            coefficient = reduced.coefficient,
            base = %reduced.exponents,
            "expanded equivalency"
        );
        Ok(reduced)
    }

    /// Splits a one-character SI prefix off `symbol`; the remainder must be
    /// non-empty.
    fn split_prefix<'s>(&self, symbol: &'s str) -> Option<(f64, &'s str)> {
        let mut chars = symbol.chars();
        let prefix = chars.next()?;
        let rest = chars.as_str();
        if rest.is_empty() {
            return None;
        }
        self.prefix(prefix).map(|factor| (factor, rest))
    }
}
