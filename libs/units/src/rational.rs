//! Float to exact-exponent conversion and overflow-free exponent arithmetic.
//!
//! Exponent sums and products are computed over big integers and brought
//! back into `Ratio<i64>` only when they fit, so no operation on exponents
//! can overflow.

use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::expr::Exponent;

/// Largest denominator kept when a float power is turned into an exponent.
pub const MAX_DENOMINATOR: i64 = 1_000_000;

/// Closest rational to `value` whose denominator does not exceed
/// [`MAX_DENOMINATOR`].
pub fn rationalize(value: f64) -> Result<Exponent> {
    let exact = BigRational::from_float(value)
        .ok_or_else(|| Error::InvalidOperand(format!("exponent {value} is not finite")))?;
    to_exponent(&bounded(&exact))
        .ok_or_else(|| Error::InvalidOperand(format!("exponent {value} is out of range")))
}

/// `numer / denom` in lowest terms, `None` when it cannot be an exponent.
pub(crate) fn ratio(numer: i64, denom: i64) -> Option<Exponent> {
    if denom == 0 {
        return None;
    }
    to_exponent(&BigRational::new(numer.into(), denom.into()))
}

/// Exact sum; when that does not fit, the sum with a bounded denominator.
pub(crate) fn checked_sum(a: Exponent, b: Exponent) -> Option<Exponent> {
    fit(&(big(a) + big(b)))
}

/// Exact product; when that does not fit, the product with a bounded
/// denominator.
pub(crate) fn checked_product(a: Exponent, b: Exponent) -> Option<Exponent> {
    fit(&(big(a) * big(b)))
}

/// Product with its denominator always bounded by [`MAX_DENOMINATOR`].
pub(crate) fn bounded_product(a: Exponent, b: Exponent) -> Option<Exponent> {
    to_exponent(&bounded(&(big(a) * big(b))))
}

fn fit(exact: &BigRational) -> Option<Exponent> {
    to_exponent(exact).or_else(|| to_exponent(&bounded(exact)))
}

fn bounded(exact: &BigRational) -> BigRational {
    limit_denominator(exact, &BigInt::from(MAX_DENOMINATOR))
}

fn big(exponent: Exponent) -> BigRational {
    BigRational::new_raw(BigInt::from(*exponent.numer()), BigInt::from(*exponent.denom()))
}

/// Inputs are already in lowest terms with a positive denominator.
fn to_exponent(value: &BigRational) -> Option<Exponent> {
    Some(Ratio::new_raw(value.numer().to_i64()?, value.denom().to_i64()?))
}

/// Best rational approximation with a bounded denominator, walking the
/// continued fraction of `value` and picking the closer of the last
/// convergent and the best semiconvergent.
fn limit_denominator(value: &BigRational, max_denominator: &BigInt) -> BigRational {
    if value.denom() <= max_denominator {
        return value.clone();
    }

    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let mut n = value.numer().clone();
    let mut d = value.denom().clone();

    loop {
        let a = floor_div(&n, &d);
        let q2 = &q0 + &a * &q1;
        if &q2 > max_denominator {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }

    let k = floor_div(&(max_denominator - &q0), &q1);
    let semiconvergent = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let convergent = BigRational::new(p1, q1);

    if (&convergent - value).abs() <= (&semiconvergent - value).abs() {
        convergent
    } else {
        semiconvergent
    }
}

fn floor_div(n: &BigInt, d: &BigInt) -> BigInt {
    BigRational::new(n.clone(), d.clone()).floor().to_integer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_values_are_kept() {
        assert_eq!(rationalize(2.0).unwrap(), Ratio::from_integer(2));
        assert_eq!(rationalize(-0.5).unwrap(), Ratio::new(-1, 2));
        assert_eq!(rationalize(0.0).unwrap(), Ratio::from_integer(0));
    }

    #[test]
    fn float_noise_is_removed() {
        assert_eq!(rationalize(1.0 / 3.0).unwrap(), Ratio::new(1, 3));
        assert_eq!(rationalize(2.0 / 7.0).unwrap(), Ratio::new(2, 7));
        assert_eq!(rationalize(0.1 + 0.2).unwrap(), Ratio::new(3, 10));
    }

    #[test]
    fn denominator_is_bounded() {
        let r = rationalize(std::f64::consts::PI).unwrap();
        assert!(*r.denom() <= MAX_DENOMINATOR);
        assert_eq!(r, Ratio::new(3_126_535, 995_207));
    }

    #[test]
    fn non_finite_exponents_are_rejected() {
        assert!(matches!(
            rationalize(f64::NAN),
            Err(Error::InvalidOperand(_))
        ));
        assert!(rationalize(f64::INFINITY).is_err());
    }

    #[test]
    fn ratios_are_reduced_and_sign_normalized() {
        assert_eq!(ratio(2, -4), Some(Ratio::new(-1, 2)));
        assert_eq!(ratio(i64::MIN, i64::MIN), Some(Ratio::from_integer(1)));
        assert_eq!(ratio(i64::MIN, -1), None);
        assert_eq!(ratio(1, 0), None);
    }

    #[test]
    fn sums_and_products_do_not_overflow() {
        let max = Ratio::from_integer(i64::MAX);
        assert_eq!(checked_sum(max, Ratio::from_integer(1)), None);
        assert_eq!(checked_sum(max, Ratio::from_integer(-1)), Some(Ratio::from_integer(i64::MAX - 1)));
        assert_eq!(checked_product(Ratio::from_integer(i64::MIN), Ratio::from_integer(-1)), None);
        assert_eq!(checked_product(Ratio::new(2, 3), Ratio::new(3, 4)), Some(Ratio::new(1, 2)));
    }

    #[test]
    fn oversized_denominators_fall_back_to_the_bound() {
        let a = Ratio::new(1, 4_294_967_311);
        let b = Ratio::new(1, 4_294_967_357);
        let product = checked_product(a, b).unwrap();
        assert!(*product.denom() <= MAX_DENOMINATOR);

        let sum = checked_sum(a, b).unwrap();
        assert_eq!(sum, Ratio::from_integer(0));
    }

    #[test]
    fn bounded_products_keep_small_denominators() {
        let p = Ratio::new(123_457, 1_000_000);
        let squared = bounded_product(p, p).unwrap();
        assert!(*squared.denom() <= MAX_DENOMINATOR);
        assert_eq!(bounded_product(Ratio::new(1, 2), Ratio::from_integer(4)), Some(Ratio::from_integer(2)));
    }
}
