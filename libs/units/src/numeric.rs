//! General-purpose quadrature and root finding.

use crate::error::{Error, Result};

const INTEGRATION_TOLERANCE: f64 = 1e-12;
const MAX_BISECTIONS: u32 = 40;

const ROOT_TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 100;

/// `∫ₐᵇ f(x) dx` by adaptive Simpson quadrature.
pub(crate) fn integrate<F>(f: F, a: f64, b: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return Ok(0.0);
    }

    let (fa, fb) = (f(a), f(b));
    let m = 0.5 * (a + b);
    let fm = f(m);
    let whole = simpson(a, b, fa, fm, fb);
    let tolerance = INTEGRATION_TOLERANCE * whole.abs().max(1.0);
    let value = adaptive_simpson(&f, a, b, fa, fm, fb, whole, tolerance, MAX_BISECTIONS);

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Numeric(format!(
            "integral over [{a}, {b}] does not converge"
        )))
    }
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn adaptive_simpson<F>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tolerance: f64,
    depth: u32,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let (lm, rm) = (0.5 * (a + m), 0.5 * (m + b));
    let (flm, frm) = (f(lm), f(rm));
    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;

    if depth == 0 || delta.abs() <= 15.0 * tolerance || !delta.is_finite() {
        return left + right + delta / 15.0;
    }
    adaptive_simpson(f, a, m, fa, flm, fm, left, tolerance / 2.0, depth - 1)
        + adaptive_simpson(f, m, b, fm, frm, fb, right, tolerance / 2.0, depth - 1)
}

/// Newton iteration from `x0`; `f` returns the function value and its
/// derivative at a point.
pub(crate) fn find_root<F>(mut f: F, x0: f64) -> Result<f64>
where
    F: FnMut(f64) -> Result<(f64, f64)>,
{
    let mut x = x0;
    for _ in 0..MAX_ITERATIONS {
        let (value, slope) = f(x)?;
        if !value.is_finite() || !slope.is_finite() || slope == 0.0 {
            return Err(Error::Numeric(format!("root finding stalled at {x}")));
        }
        let step = value / slope;
        x -= step;
        if step.abs() <= ROOT_TOLERANCE * x.abs().max(1.0) {
            return Ok(x);
        }
    }
    Err(Error::Numeric(format!(
        "root finding did not converge from {x0}"
    )))
}
