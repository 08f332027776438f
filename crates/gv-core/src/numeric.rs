use crate::GvError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GvError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GvError::NonFinite { what, value: v })
    }
}

/// `n + 1` evenly spaced values from `min` to `max` inclusive.
pub fn linspace(min: Real, max: Real, n: usize) -> Vec<Real> {
    if n == 0 {
        return vec![min];
    }
    let step = (max - min) / n as Real;
    let mut out: Vec<Real> = (0..n).map(|i| min + step * i as Real).collect();
    // land exactly on the upper bound
    out.push(max);
    out
}
