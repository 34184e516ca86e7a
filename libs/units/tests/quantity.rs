use std::cmp::Ordering;
use std::f64::consts::PI;

use approx::assert_relative_eq;
use oom_units::{constant, parse, Error, Operand, Quantity, MAX_DENOMINATOR};
use quickcheck::{QuickCheck, TestResult};

fn q(text: &str) -> Quantity {
    text.parse().unwrap()
}

#[test]
fn construction_and_accessors() {
    let speed = Quantity::new(4.0, "km hr^-1").unwrap();
    assert_eq!(speed.value(), 4.0);
    assert_eq!(speed.unit(), "km hr^-1");
    assert_eq!(speed.assumption(), None);
    assert_eq!(speed.to_string(), "4.0 km hr^-1");

    let folded = Quantity::new(2.0, "1e3 m").unwrap();
    assert_eq!(folded.value(), 2000.0);
    assert_eq!(folded.unit(), "m");

    assert_eq!(Quantity::dimensionless(3.5).to_string(), "3.5");
    assert_eq!(q("GHz").value(), 1.0);
    assert_eq!(f64::from(&q("7 m")), 7.0);
}

#[test]
fn display_honours_precision() {
    assert_eq!(format!("{:.3}", q("2.5 m sec^-1")), "2.500 m sec^-1");
    assert_eq!(q("1e-30 g").to_string(), "1e-30 g");
}

#[test]
fn converts_within_a_dimension() {
    assert_eq!(q("15 km").to("m").unwrap().value(), 15000.0);
    assert_relative_eq!(q("1 hr").to("min").unwrap().value(), 60.0);
    assert_relative_eq!(
        q("1 knot").to("m sec^-1").unwrap().value(),
        0.5144444444444445,
        max_relative = 1e-12
    );
    assert_eq!(q("1 N").to("N").unwrap().unit(), "N");
}

#[test]
fn conversion_target_coefficient_scales_the_result() {
    assert_relative_eq!(q("1 km").to("1e3 m").unwrap().value(), 1.0);
}

#[test]
fn incompatible_conversion_fails() {
    let err = q("1 m").to("sec").unwrap_err();
    assert!(matches!(
        err,
        Error::IncompatibleDimensions {
            assumption: None,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "incompatible dimensions: length vs time"
    );
}

#[test]
fn unknown_units_fail_on_use() {
    let furlongs = q("3 furlong");
    assert!(matches!(
        furlongs.to("m").unwrap_err(),
        Error::InvalidUnit(ref s) if s == "furlong"
    ));
    assert!(!(furlongs == q("3 m")));
}

#[test]
fn addition_uses_the_left_unit() {
    let sum = q("2 m").try_add(&q("0.75 ft")).unwrap();
    assert_eq!(sum.to_string(), "2.2286 m");

    let sum = q("2 m").try_add((75.0, "cm")).unwrap();
    assert_relative_eq!(sum.value(), 2.75, max_relative = 1e-12);
    assert_eq!(sum.unit(), "m");

    let difference = q("1 km").try_sub(&q("1 m")).unwrap();
    assert_relative_eq!(difference.value(), 0.999, max_relative = 1e-12);
    assert_eq!(difference.unit(), "km");
}

#[test]
fn addition_across_dimensions_fails() {
    let err = q("1 m").try_add(&q("1 sec")).unwrap_err();
    assert!(matches!(err, Error::IncompatibleDimensions { .. }));
}

#[test]
fn bare_numbers_only_add_to_dimensionless_quantities() {
    let err = q("1 m").try_add(1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidOperand(_)));

    let sum = Quantity::dimensionless(1.5).try_add(2).unwrap();
    assert_eq!(sum.value(), 3.5);
    assert!(sum.exponents().is_empty());

    // Dimensionless ratios of like units accept bare numbers too.
    let ratio = &q("1 km") / &q("1 m");
    assert_relative_eq!(
        ratio.try_add(1.0).unwrap().to("").unwrap().value(),
        1001.0,
        max_relative = 1e-12
    );
}

#[test]
fn mixed_rate_sum() {
    let sum = q("15 kpc Mhr^-1").try_add(&q("25e6 mi sec^-1")).unwrap();
    assert_relative_eq!(
        sum.to("m sec^-1").unwrap().value(),
        168803499228.80676,
        max_relative = 1e-9
    );
}

#[test]
fn multiplication_merges_exponents() {
    let area = &q("2 m") * &q("3 m");
    assert_eq!(area.value(), 6.0);
    assert_eq!(area.unit(), "m^2");

    let speed = q("10 m") / q("2 sec");
    assert_eq!(speed.to_string(), "5.0 m sec^-1");

    let scaled = 2.0 * &q("3 g");
    assert_eq!(scaled.to_string(), "6.0 g");

    let inverse = 1.0 / q("4 sec");
    assert_eq!(inverse.to_string(), "0.25 sec^-1");

    let cancelled = &q("3 m") / &q("1 m");
    assert!(cancelled.exponents().is_empty());
    assert_eq!(cancelled, 3.0);
}

#[test]
fn multiplicative_identity() {
    let x = q("42 erg sec^-1");
    assert_eq!((&x * 1.0).to_string(), x.to_string());
    assert_eq!((&x / &Quantity::dimensionless(1.0)).to_string(), x.to_string());
}

#[test]
fn negation() {
    let x = q("5 K");
    assert_eq!((-&x).value(), -5.0);
    assert_eq!((-x).unit(), "K");
}

#[test]
fn powers_and_roots() {
    let x = q("9 m^2");
    let root = x.pow(0.5).unwrap();
    assert_eq!(root.value(), 3.0);
    assert_eq!(root.unit(), "m");

    let back = root.pow(2).unwrap();
    assert_eq!(back.to_string(), x.to_string());

    let cube = q("2 cm").powi(3).unwrap();
    assert_eq!(cube.to_string(), "8.0 cm^3");

    let third = q("8 m^3").pow(1.0 / 3.0).unwrap();
    assert_relative_eq!(third.value(), 2.0, max_relative = 1e-12);
    assert_eq!(third.unit(), "m");

    assert_eq!(q("4 sec").recip().unwrap().to_string(), "0.25 sec^-1");

    let speed = q("3 km hr^-1");
    let round_trip = speed.pow(2).unwrap().pow(0.5).unwrap();
    assert_eq!(round_trip.base_type().unwrap(), speed.base_type().unwrap());
    assert_eq!(round_trip, speed);
}

#[test]
fn repeated_fractional_powers_stay_bounded() {
    let mut x = q("2 m");
    let mut expected = 2.0_f64;
    for _ in 0..8 {
        x = x.powf(0.123457).unwrap();
        expected = expected.powf(0.123457);
        assert!(*x.exponents().get("m").denom() <= MAX_DENOMINATOR);
    }
    assert_relative_eq!(x.value(), expected, max_relative = 1e-12);
}

#[test]
fn exponent_overflow_is_an_error() {
    let huge = Quantity::from_parts(1.0, parse("m^-9223372036854775808").unwrap().exponents);
    assert!(matches!(
        huge.recip().unwrap_err(),
        Error::Overflow(ref symbol) if symbol == "m"
    ));
    assert!(matches!(q("2 m").try_div(&huge), Err(Error::Overflow(_))));
    assert!(matches!(huge.try_mul(&huge), Err(Error::Overflow(_))));
    assert!(matches!(huge.powi(2), Err(Error::Overflow(_))));

    let nudged = huge.powi(1).unwrap().try_mul(&q("1 m")).unwrap();
    assert_eq!(nudged.exponents().get("m"), num_rational::Ratio::from_integer(i64::MIN + 1));
}

#[test]
#[should_panic(expected = "overflowed")]
fn operators_panic_on_exponent_overflow() {
    let huge = Quantity::from_parts(1.0, parse("m^9223372036854775807").unwrap().exponents);
    let _ = &huge * &huge;
}

#[test]
fn dimensionless_quantity_exponents() {
    let two = Quantity::dimensionless(2.0);
    assert_eq!(q("3 m").pow(&two).unwrap().unit(), "m^2");

    let err = q("3 m").pow(&q("2 sec")).unwrap_err();
    assert!(matches!(err, Error::InvalidOperand(_)));
}

#[test]
fn fractional_exponents_are_rationalized() {
    let x = q("1 m").pow(0.1 + 0.2).unwrap();
    assert_eq!(x.unit(), "m^3/10");
}

#[test]
fn prefix_equalities() {
    assert_eq!(q("1000 m"), q("1 km"));
    assert_eq!(q("1 kg"), q("1000 g"));
    assert_eq!(q("1 N"), q("100000 dyn"));
    assert_eq!(q("1 hp"), q("7456998715.8 erg sec^-1"));
    assert_ne!(q("1 m"), q("1 sec"));
}

#[test]
fn ordering_compares_cgs_magnitudes() {
    assert!(q("1 km") > q("999 m"));
    assert!(q("1 mi") < q("2 km"));
    assert!(q("1 min") >= q("60 sec"));
    assert_eq!(q("1 m").partial_cmp(&q("1 sec")), None);

    assert_eq!(q("1 day").compare(&q("24 hr")).unwrap(), Ordering::Equal);
    assert_eq!(q("1 m").compare((1.0, "ft")).unwrap(), Ordering::Greater);
    assert!(matches!(
        q("1 m").compare(&q("1 g")).unwrap_err(),
        Error::IncompatibleDimensions { .. }
    ));
    assert!(Quantity::dimensionless(2.0) > 1.0);
}

#[test]
fn quantities_compare_with_plain_numbers() {
    let x = q("5 MHz") * q("0.25 sec");
    assert_eq!(x, 1250000.0);
    assert_eq!(1250000.0, x);
}

#[test]
fn operand_conversions() {
    let x = q("1 m");
    assert!(matches!(Operand::from(2.0), Operand::Scalar(v) if v == 2.0));
    assert!(matches!(Operand::from(3), Operand::Scalar(v) if v == 3.0));
    assert!(matches!(Operand::from((1.0, "m")), Operand::Pair(_, "m")));
    assert!(matches!(Operand::from(&x), Operand::Quantity(_)));
}

#[test]
fn cgs_projection() {
    let x = q("1 J").to_cgs().unwrap();
    assert_relative_eq!(x.value(), 1e7, max_relative = 1e-12);
    assert_eq!(x.unit(), "cm^2 sec^-2 g");

    let y = q("3 km").to_cgs().unwrap();
    assert_relative_eq!(y.value(), 3e5, max_relative = 1e-12);
    assert_eq!(y.unit(), "cm");

    assert_eq!(Quantity::dimensionless(4.0).to_cgs().unwrap().to_string(), "4.0");

    let power = q("1 hp").to_cgs().unwrap();
    assert_relative_eq!(power.value(), 7456998715.8, max_relative = 1e-12);
    assert_eq!(power.unit(), "cm^2 sec^-3 g");
}

#[test]
fn to_unit_of_another_quantity() {
    let x = q("1 mi").to_unit_of(&q("3 ft")).unwrap();
    assert_relative_eq!(x.value(), 5280.0, max_relative = 1e-12);
    assert_eq!(x.unit(), "ft");
}

#[test]
fn approx_traits_compare_cgs_magnitudes() {
    assert_relative_eq!(q("1 km"), q("1000 m"), max_relative = 1e-12);
    assert_relative_eq!(q("1 m"), q("1.0000001 m"), max_relative = 1e-6);
    assert!(!approx::relative_eq!(q("1 m"), q("1 sec")));
}

#[test]
fn constant_identities() {
    let q_e = constant("q_e").unwrap();
    let hbar = constant("hbar").unwrap();
    let c = constant("c").unwrap();
    let g = constant("G").unwrap();
    let m_e = constant("m_e").unwrap();
    let m_p = constant("m_p").unwrap();
    let m_sun = constant("M_sun").unwrap();
    let l_sun = constant("L_sun").unwrap();
    let sigma_t = constant("sigma_T").unwrap();

    let inverse_fine_structure = (&q_e.powi(2).unwrap() / &hbar / &c).powi(-1).unwrap();
    assert_relative_eq!(
        inverse_fine_structure.to("").unwrap().value(),
        137.0360243279163,
        max_relative = 1e-9
    );

    let planck_mass = (&c * &hbar / &g).pow(0.5).unwrap();
    assert_relative_eq!(
        (&planck_mass / &m_sun).to("").unwrap().value(),
        1.0945269968781705e-38,
        max_relative = 1e-9
    );

    let critical_field = &(&m_e.powi(2).unwrap() * &c.powi(3).unwrap()) / &(&q_e * &hbar);
    assert_relative_eq!(
        critical_field.to("G").unwrap().value(),
        44140056281357.734,
        max_relative = 1e-9
    );

    let eddington_ratio = 4.0 * PI * &g * &m_sun * &m_p * &c / &sigma_t / &l_sun;
    assert_relative_eq!(
        eddington_ratio.to("").unwrap().value(),
        32839.71688359069,
        max_relative = 1e-9
    );

    assert_eq!(&m_sun / &q("1 Msun"), 1.0);
}

#[test]
fn horsepower_ratio() {
    let ratio = q("2e6 hp") / q("15000 erg sec^-1");
    assert_relative_eq!(
        ratio.to("").unwrap().value(),
        994266495440.0001,
        max_relative = 1e-9
    );
}

#[test]
fn gyrofrequency_and_rest_energy() {
    let q_e = constant("q_e").unwrap();
    let m_e = constant("m_e").unwrap();
    let c = constant("c").unwrap();

    let gyro = &q("1 sec") * &q_e * &q("1 G") / (&m_e * &c * (2.0 * PI));
    assert_relative_eq!(
        (gyro >> "").unwrap().value(),
        2799248.72930016,
        max_relative = 1e-9
    );

    let rest_energy = &m_e * &c.powi(2).unwrap();
    assert_relative_eq!(
        (rest_energy >> "lb knot^2").unwrap().value(),
        6.820051733957203e-13,
        max_relative = 1e-9
    );
}

#[test]
fn unknown_constants() {
    assert!(matches!(
        constant("planck").unwrap_err(),
        Error::UnknownConstant(ref s) if s == "planck"
    ));
}

const SAME_DIMENSION: &[&[&str]] = &[
    &["m", "km", "cm", "nm", "ft", "mi", "au", "ly", "pc", "kpc", "Mpc"],
    &["sec", "msec", "min", "hr", "day", "yr", "Gyr"],
    &["g", "kg", "mg", "lb", "Msun", "me"],
    &["erg", "J", "kJ", "eV", "keV", "cal"],
    &["m sec^-1", "km hr^-1", "knot", "cm sec^-1", "pc Myr^-1"],
    &["Hz", "GHz", "sec^-1", "min^-1"],
];

#[test]
fn prop_same_dimension_conversions_close() {
    fn prop(pool: u8, from: u8, to: u8) -> TestResult {
        let pool = SAME_DIMENSION[pool as usize % SAME_DIMENSION.len()];
        let from = pool[from as usize % pool.len()];
        let to = pool[to as usize % pool.len()];

        let one = Quantity::new(1.0, from).unwrap();
        let converted = match one.to(to) {
            Ok(converted) => converted,
            Err(_) => return TestResult::failed(),
        };
        let restated = Quantity::new(converted.value(), to).unwrap();
        TestResult::from_bool(one == restated && one.base_type() == restated.base_type())
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(u8, u8, u8) -> TestResult);
}
