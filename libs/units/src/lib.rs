//! Dimensional algebra over a registry of units, prefixes and physical
//! constants.
//!
//! ```
//! use oom_units::{Assumption, Quantity};
//!
//! let photon: Quantity = "5 GHz".parse().unwrap();
//! let wavelength = (photon >> Assumption::Light).to("cm").unwrap();
//! assert!((wavelength.value() - 5.99584916).abs() < 1e-6);
//! ```
#![forbid(unsafe_code)]

mod algebra;
mod assume;
mod dimension;
mod error;
mod expr;
mod numeric;
mod ops;
mod quantity;
mod rational;
mod reduce;
mod registry;
mod tables;

use once_cell::sync::Lazy;

pub use algebra::RELATIVE_TOLERANCE;
pub use assume::Assumption;
pub use dimension::{BaseType, Dimension};
pub use error::{Error, Result};
pub use expr::{parse, Exponent, ExponentMap, UnitExpr};
pub use quantity::{Operand, Quantity};
pub use rational::{rationalize, MAX_DENOMINATOR};
pub use registry::{Constant, Equivalency, Registry, RegistryBuilder};

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    Registry::standard().expect("embedded unit catalog is invalid")
});

/// The process-wide standard registry backing [`Quantity`]'s methods and
/// operators.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Reduces `expr` to base symbols in the standard registry.
pub fn reduce_to_base(expr: &str) -> Result<String> {
    registry().reduce_to_base(expr)
}

/// Dimensional fingerprint of `unit` in the standard registry.
pub fn base_type(unit: &str) -> Result<BaseType> {
    registry().base_type(unit)
}

/// A named constant from the standard registry.
pub fn constant(name: &str) -> Result<Quantity> {
    registry().constant(name)
}
