//! Conversions between dimensionally incompatible quantities under a declared
//! physical assumption.
//!
//! Each assumption is a table of `(source kind, target kind) → relation`.
//! A relation computes an intermediate quantity from registry constants,
//! which is then converted into the requested unit along the ordinary
//! same-dimension path. Relations are never chained: a conversion that
//! needs two relations is two explicit conversions.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::dimension::BaseType;
use crate::error::{Error, Result};
use crate::expr::UnitExpr;
use crate::numeric;
use crate::quantity::Quantity;
use crate::registry::Registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Assumption {
    /// Photons: `E = hν`, `E = hc/λ`, `E = ħω`.
    Light,
    /// `E = k_B T`.
    Thermal,
    /// Redshift ↔ comoving distance in a flat ΛCDM cosmology.
    Redshift,
}

impl Assumption {
    pub const ALL: [Assumption; 3] = [Assumption::Light, Assumption::Thermal, Assumption::Redshift];

    pub fn name(self) -> &'static str {
        match self {
            Assumption::Light => "light",
            Assumption::Thermal => "thermal",
            Assumption::Redshift => "redshift",
        }
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Assumption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Assumption::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Parse {
                token: s.to_string(),
                message: "expected one of light, thermal, redshift",
            })
    }
}

/// Quantity kinds the relation tables are keyed by, each identified by the
/// base type of its reference unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Energy,
    Frequency,
    AngularFrequency,
    Length,
    Temperature,
    Dimensionless,
}

impl Kind {
    const ALL: [Kind; 6] = [
        Kind::Energy,
        Kind::Frequency,
        Kind::AngularFrequency,
        Kind::Length,
        Kind::Temperature,
        Kind::Dimensionless,
    ];

    fn reference_unit(self) -> &'static str {
        match self {
            Kind::Energy => "erg",
            Kind::Frequency => "Hz",
            Kind::AngularFrequency => "Hz rad",
            Kind::Length => "cm",
            Kind::Temperature => "K",
            Kind::Dimensionless => "",
        }
    }
}

impl Registry {
    fn kind_of(&self, base_type: &BaseType) -> Result<Option<Kind>> {
        for kind in Kind::ALL {
            if self.base_type(kind.reference_unit())? == *base_type {
                return Ok(Some(kind));
            }
        }
        Ok(None)
    }

    pub(crate) fn convert_assuming(
        &self,
        source: &Quantity,
        assumption: Assumption,
        from: &BaseType,
        target: &UnitExpr,
        to: &BaseType,
    ) -> Result<Quantity> {
        let incompatible = || Error::IncompatibleDimensions {
            from: from.clone(),
            to: to.clone(),
            assumption: Some(assumption),
        };

        let (Some(source_kind), Some(target_kind)) = (self.kind_of(from)?, self.kind_of(to)?)
        else {
            return Err(incompatible());
        };

        debug!(%assumption, %from, %to, "converting under assumption");

        let source = source.clone().without_assumption();
        let derived = match assumption {
            Assumption::Light => self.light(&source, source_kind, target_kind)?,
            Assumption::Thermal => self.thermal(&source, source_kind, target_kind)?,
            Assumption::Redshift => self.redshift(&source, source_kind, target_kind)?,
        }
        .ok_or_else(incompatible)?;

        self.convert_expr(&derived, target)
    }

    fn light(&self, source: &Quantity, from: Kind, to: Kind) -> Result<Option<Quantity>> {
        let h = self.constant("h")?;
        let hbar = self.constant("hbar")?;
        let c = self.constant("c")?;
        let rad = self.unit("rad")?;

        let derived = match (from, to) {
            (Kind::Frequency, Kind::Energy) => &h * source,
            (Kind::Length, Kind::Energy) => &h * &c / source,
            (Kind::AngularFrequency, Kind::Energy) => &hbar * source / &rad,

            (Kind::Energy, Kind::Frequency) => source / &h,
            (Kind::Length, Kind::Frequency) => &c / source,
            (Kind::AngularFrequency, Kind::Frequency) => source / (TAU * &rad),

            (Kind::Energy, Kind::Length) => &h * &c / source,
            (Kind::Frequency, Kind::Length) => &c / source,
            (Kind::AngularFrequency, Kind::Length) => TAU * &c * &rad / source,

            (Kind::Energy, Kind::AngularFrequency) => source * &rad / &hbar,
            (Kind::Frequency, Kind::AngularFrequency) => TAU * source * &rad,
            (Kind::Length, Kind::AngularFrequency) => TAU * &c * &rad / source,

            _ => return Ok(None),
        };
        Ok(Some(derived))
    }

    fn thermal(&self, source: &Quantity, from: Kind, to: Kind) -> Result<Option<Quantity>> {
        let k_b = self.constant("k_B")?;

        let derived = match (from, to) {
            (Kind::Temperature, Kind::Energy) => &k_b * source,
            (Kind::Energy, Kind::Temperature) => source / &k_b,
            _ => return Ok(None),
        };
        Ok(Some(derived))
    }

    /// `D_C(z) = (c / H_0) ∫₀ᶻ dx / √(Ω_m (1 + x)³ + Ω_Λ)`.
    fn redshift(&self, source: &Quantity, from: Kind, to: Kind) -> Result<Option<Quantity>> {
        let hubble_distance = &self.constant("c")? / &self.constant("H_0")?;
        let omega_matter = self.scalar(&self.constant("omega_Matter")?)?;
        let omega_lambda = self.scalar(&self.constant("omega_Lambda")?)?;
        let inverse_hubble =
            move |x: f64| 1.0 / (omega_matter * (1.0 + x).powi(3) + omega_lambda).sqrt();

        match (from, to) {
            (Kind::Dimensionless, Kind::Length) => {
                let z = self.scalar(source)?;
                let comoving = numeric::integrate(inverse_hubble, 0.0, z)?;
                Ok(Some(hubble_distance * comoving))
            }
            (Kind::Length, Kind::Dimensionless) => {
                // Solved in units of the Hubble distance.
                let distance = self.to_cgs(source)?.value() / self.to_cgs(&hubble_distance)?.value();
                let z = numeric::find_root(
                    |z| {
                        let comoving = numeric::integrate(inverse_hubble, 0.0, z)?;
                        Ok((comoving - distance, inverse_hubble(z)))
                    },
                    1.0,
                )?;
                Ok(Some(Quantity::dimensionless(z)))
            }
            _ => Ok(None),
        }
    }
}
