use crate::LtError;

/// Floating point type used throughout the twin.
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
            abs: 1e-9,
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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, LtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LtError::NonFinite { what, value: v })
    }
}

/// Floor physically meaningless negative values to zero.
///
/// Also maps NaN to zero, so a degenerate intermediate can never leak
/// into a rendered curve.
#[inline]
pub fn non_negative(v: Real) -> Real {
    if v > 0.0 { v } else { 0.0 }
}
