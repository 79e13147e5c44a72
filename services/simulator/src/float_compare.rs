//! Relative-epsilon floating point comparisons
//!
//! Every tolerance here is scaled by the magnitude of the operands. When both
//! operands are zero the tolerance is zero and the predicates reduce to exact
//! comparisons.

#[inline]
fn larger_magnitude(a: f64, b: f64) -> f64 {
    a.abs().max(b.abs())
}

#[inline]
fn smaller_magnitude(a: f64, b: f64) -> f64 {
    a.abs().min(b.abs())
}

/// `|a - b|` is within `epsilon` of the larger magnitude
pub fn approximately_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= larger_magnitude(a, b) * epsilon
}

/// `|a - b|` is within `epsilon` of the smaller magnitude
///
/// Stricter than [`approximately_equal`].
pub fn essentially_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= smaller_magnitude(a, b) * epsilon
}

pub fn definitely_greater_than(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b) > larger_magnitude(a, b) * epsilon
}

pub fn definitely_less_than(a: f64, b: f64, epsilon: f64) -> bool {
    (b - a) > larger_magnitude(a, b) * epsilon
}

/// Linear interpolation from `a` toward `b` by `t`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
