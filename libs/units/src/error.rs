use thiserror::Error;

use crate::assume::Assumption;
use crate::dimension::BaseType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid unit expression at '{token}': {message}")]
    Parse {
        token: String,
        message: &'static str,
    },

    #[error("unknown unit symbol '{0}'")]
    InvalidUnit(String),

    #[error("incompatible dimensions: {from} vs {to}{}", assumption_suffix(.assumption))]
    IncompatibleDimensions {
        from: BaseType,
        to: BaseType,
        assumption: Option<Assumption>,
    },

    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    #[error("unknown constant '{0}'")]
    UnknownConstant(String),

    #[error("unit equivalency '{0}' is defined in terms of itself")]
    EquivalencyCycle(String),

    #[error("unit registry error: {0}")]
    Registry(String),

    #[error("exponent of '{0}' is out of range")]
    Overflow(String),

    #[error("numeric error: {0}")]
    Numeric(String),
}

fn assumption_suffix(assumption: &Option<Assumption>) -> String {
    match assumption {
        Some(assumption) => format!(" (assuming {assumption})"),
        None => String::new(),
    }
}
