//! Unit expression parsing and serialization.
//!
//! Grammar: `[<coefficient> ]<term>( <term>)*` where `term := symbol(^exponent)?`
//! and `exponent := int | int/int`. Terms are whitespace separated; there is
//! no grouping.

use std::fmt;
use std::str::FromStr;

use num_rational::Ratio;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::rational;

/// Exact rational exponent of a unit symbol.
pub type Exponent = Ratio<i64>;

/// Symbol → exponent map that remembers first-seen order.
///
/// Repeated symbols accumulate. Entries whose exponent sums to zero are kept
/// internally but are invisible to iteration, equality and serialization.
#[derive(Clone, Debug, Default)]
pub struct ExponentMap {
    entries: Vec<(String, Exponent)>,
}

impl ExponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built from `(symbol, exponent)` terms, accumulating repeats.
    pub fn from_terms<'a>(terms: impl IntoIterator<Item = (&'a str, Exponent)>) -> Result<Self> {
        let mut map = ExponentMap::new();
        for (symbol, exponent) in terms {
            map.add(symbol, exponent)?;
        }
        Ok(map)
    }

    /// Adds `exponent` to `symbol`, inserting it at the end if unseen.
    pub fn add(&mut self, symbol: &str, exponent: Exponent) -> Result<()> {
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, e)) => {
                *e = rational::checked_sum(*e, exponent)
                    .ok_or_else(|| Error::Overflow(symbol.to_string()))?;
            }
            None => self.entries.push((symbol.to_string(), exponent)),
        }
        Ok(())
    }

    /// Exponent of `symbol`, zero when absent.
    pub fn get(&self, symbol: &str) -> Exponent {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, e)| *e)
            .unwrap_or_else(Exponent::zero)
    }

    /// Non-zero entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Exponent)> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| !e.is_zero())
            .map(|(s, e)| (s.as_str(), *e))
    }

    /// All entries, including symbols whose exponents cancelled out.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, Exponent)> + '_ {
        self.entries.iter().map(|(s, e)| (s.as_str(), *e))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Accumulates every entry of `other` multiplied by `scale`.
    pub fn merge(&mut self, other: &ExponentMap, scale: Exponent) -> Result<()> {
        for (symbol, exponent) in other.iter() {
            let scaled = rational::checked_product(exponent, scale)
                .ok_or_else(|| Error::Overflow(symbol.to_string()))?;
            self.add(symbol, scaled)?;
        }
        Ok(())
    }

    /// Copy with every exponent multiplied by `factor`.
    pub fn scaled(&self, factor: Exponent) -> Result<ExponentMap> {
        let mut out = ExponentMap::new();
        out.merge(self, factor)?;
        Ok(out)
    }

    /// Like [`scaled`](Self::scaled), but every product is rounded to the
    /// nearest exponent whose denominator is at most
    /// [`MAX_DENOMINATOR`](crate::MAX_DENOMINATOR).
    pub(crate) fn scaled_bounded(&self, factor: Exponent) -> Result<ExponentMap> {
        let mut out = ExponentMap::new();
        for (symbol, exponent) in self.iter() {
            let scaled = rational::bounded_product(exponent, factor)
                .ok_or_else(|| Error::Overflow(symbol.to_string()))?;
            out.add(symbol, scaled)?;
        }
        Ok(out)
    }
}

impl PartialEq for ExponentMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(s, e)| other.get(s) == e)
    }
}

impl Eq for ExponentMap {}

impl fmt::Display for ExponentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, exponent)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if exponent.is_one() {
                f.write_str(symbol)?;
            } else {
                write!(f, "{symbol}^{exponent}")?;
            }
        }
        Ok(())
    }
}

/// A parsed unit expression: leading coefficient plus exponent map.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitExpr {
    pub coefficient: f64,
    pub exponents: ExponentMap,
}

impl UnitExpr {
    /// The empty (dimensionless, unit coefficient) expression.
    pub fn one() -> Self {
        Self {
            coefficient: 1.0,
            exponents: ExponentMap::new(),
        }
    }

    pub fn from_exponents(exponents: ExponentMap) -> Self {
        Self {
            coefficient: 1.0,
            exponents,
        }
    }
}

impl fmt::Display for UnitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient == 1.0 {
            return write!(f, "{}", self.exponents);
        }
        write_number(f, self.coefficient)?;
        if !self.exponents.is_empty() {
            write!(f, " {}", self.exponents)?;
        }
        Ok(())
    }
}

impl FromStr for UnitExpr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parses a unit expression such as `"2.5 m^2 sec^-1"` or `"erg^1/2 cm^-3/2"`.
pub fn parse(expr: &str) -> Result<UnitExpr> {
    let mut tokens = expr.split_whitespace().peekable();

    let mut coefficient = 1.0;
    if let Some(first) = tokens.peek() {
        if looks_numeric(first) {
            coefficient = parse_coefficient(first)?;
            tokens.next();
        }
    }

    let mut exponents = ExponentMap::new();
    for token in tokens {
        let (symbol, exponent) = parse_term(token)?;
        exponents.add(symbol, exponent).map_err(|_| syntax(token, "exponent overflows"))?;
    }

    Ok(UnitExpr {
        coefficient,
        exponents,
    })
}

fn looks_numeric(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
}

fn parse_coefficient(token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(syntax(token, "coefficient is not finite")),
        Err(_) => Err(syntax(token, "malformed coefficient")),
    }
}

fn parse_term(token: &str) -> Result<(&str, Exponent)> {
    let (symbol, exponent) = match token.split_once('^') {
        Some((symbol, text)) => (symbol, parse_exponent(token, text)?),
        None => (token, Exponent::one()),
    };
    if symbol.is_empty() {
        return Err(syntax(token, "missing unit symbol"));
    }
    Ok((symbol, exponent))
}

fn parse_exponent(token: &str, text: &str) -> Result<Exponent> {
    let integer = |part: &str| {
        part.parse::<i64>()
            .map_err(|_| syntax(token, "exponent must be an integer or a ratio of integers"))
    };
    match text.split_once('/') {
        Some((numer, denom)) => {
            let numer = integer(numer)?;
            let denom = integer(denom)?;
            if denom == 0 {
                return Err(syntax(token, "exponent has a zero denominator"));
            }
            rational::ratio(numer, denom).ok_or_else(|| syntax(token, "exponent overflows"))
        }
        None => Ok(Ratio::from_integer(integer(text)?)),
    }
}

fn syntax(token: &str, message: &'static str) -> Error {
    Error::Parse {
        token: token.to_string(),
        message,
    }
}

/// Float value of an exact exponent.
pub(crate) fn exponent_to_f64(exponent: Exponent) -> f64 {
    let numer = exponent.numer().to_f64().unwrap_or(f64::NAN);
    let denom = exponent.denom().to_f64().unwrap_or(f64::NAN);
    numer / denom
}

/// Shortest round-trip form, switching to scientific notation for very large
/// or very small magnitudes.
pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    match f.precision() {
        Some(precision) => write!(f, "{value:.precision$}"),
        None => write!(f, "{value:?}"),
    }
}
