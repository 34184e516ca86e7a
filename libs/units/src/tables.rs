//! The standard unit catalog. Base units are cgs flavoured (`g`, `sec`) with
//! the meter as the length symbol; cgs projection uses `cm`.

use crate::dimension::Dimension;

pub(crate) const BASE_UNITS: &[(Dimension, &str)] = &[
    (Dimension::Dimensionless, ""),
    (Dimension::Length, "m"),
    (Dimension::Time, "sec"),
    (Dimension::Mass, "g"),
    (Dimension::Temperature, "K"),
    (Dimension::Information, "bit"),
    (Dimension::Angle, "rad"),
];

pub(crate) const CGS_UNITS: &[(Dimension, &str)] = &[
    (Dimension::Dimensionless, ""),
    (Dimension::Length, "cm"),
    (Dimension::Time, "sec"),
    (Dimension::Mass, "g"),
    (Dimension::Temperature, "K"),
    (Dimension::Information, "bit"),
    (Dimension::Angle, "rad"),
];

pub(crate) const PREFIXES: &[(char, f64)] = &[
    ('y', 1e-24),
    ('z', 1e-21),
    ('a', 1e-18),
    ('f', 1e-15),
    ('p', 1e-12),
    ('n', 1e-9),
    ('u', 1e-6),
    ('m', 1e-3),
    ('c', 1e-2),
    ('d', 1e-1),
    ('k', 1e3),
    ('M', 1e6),
    ('G', 1e9),
    ('T', 1e12),
    ('P', 1e15),
    ('E', 1e18),
    ('Z', 1e21),
    ('Y', 1e24),
];

/// `symbol → (coefficient, definition)`.
pub(crate) const EQUIVALENCIES: &[(&str, f64, &str)] = &[
    // length
    ("ft", 0.3048, "m"),
    ("in", 0.0254, "m"),
    ("yd", 0.9144, "m"),
    ("mi", 1609.344, "m"),
    ("au", 149597870700.0, "m"),
    ("ly", 9460730472580800.0, "m"),
    ("pc", 3.085677581491362e16, "m"),
    // time
    ("day", 86400.0, "sec"),
    ("yr", 31557600.0, "sec"),
    ("month", 30.436875 * 24.0 * 60.0 * 60.0, "sec"),
    ("min", 60.0, "sec"),
    ("hr", 3600.0, "sec"),
    // mass
    ("me", 9.109383701528e-28, "g"),
    ("Msun", 1.98847e33, "g"),
    ("lb", 453.5924, "g"),
    // velocity
    ("knot", 1.852, "km hr^-1"),
    // force
    ("N", 1.0, "kg m sec^-2"),
    ("dyn", 1e-5, "N"),
    // energy
    ("erg", 1.0, "g cm^2 sec^-2"),
    ("eV", 1.602177e-12, "erg"),
    ("J", 1.0, "kg m^2 sec^-2"),
    ("cal", 4.184e7, "erg"),
    // power
    ("hp", 7456998715.8, "erg sec^-1"),
    ("W", 1e7, "erg sec^-1"),
    // magnetic field
    ("G", 1.0, "erg^1/2 cm^-3/2"),
    // charge
    ("statC", 1.0, "cm^3/2 g^1/2 sec^-1"),
    // information
    ("B", 8.0, "bit"),
    // frequency
    ("Hz", 1.0, "sec^-1"),
    // angle
    ("deg", 0.017453292519943295, "rad"),
];

/// `name → (value, unit)`.
pub(crate) const CONSTANTS: &[(&str, f64, &str)] = &[
    // fundamental
    ("G", 6.6743015e-11, "m^3 kg^-1 sec^-2"),
    ("c", 299792458.0, "m sec^-1"),
    ("hbar", 1.054571817e-34, "J sec"),
    ("h", 6.62607015e-34, "J sec"),
    // secondary
    ("sigma_SB", 5.670367e-8, "W m^-2 K^-4"),
    ("k_B", 1.3806503e-23, "m^2 kg sec^-2 K^-1"),
    // astronomical
    ("M_sun", 1.98847e33, "g"),
    ("R_sun", 695700.0, "km"),
    ("L_sun", 3.828e26, "W"),
    ("L_edd", 1.257104e38, "erg sec^-1"),
    ("M_earth", 5.9722e24, "kg"),
    ("R_earth", 6371.0, "km"),
    // particle physics
    ("m_e", 9.109383701528e-28, "g"),
    ("q_e", 4.80320427e-10, "statC"),
    ("r_e", 2.817940322719e-15, "m"),
    ("m_p", 1.672623099e-24, "g"),
    ("sigma_T", 6.6524587158e-29, "m^2"),
    ("alpha_F", 1.0 / 137.035999873, ""),
    // algebraic
    ("pi", std::f64::consts::PI, ""),
    ("e", std::f64::consts::E, ""),
    // cosmology
    ("H_0", 67.5, "km sec^-1 Mpc^-1"),
    ("omega_Matter", 0.315, ""),
    ("omega_Lambda", 0.685, ""),
];
