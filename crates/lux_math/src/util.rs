//! Floating point helpers shared by every geometric comparison.

/// Magnitudes below this are treated as exactly zero.
pub const EPSILON: f64 = 1e-10;

/// Snap `x` to zero when it is within [`EPSILON`] of it.
///
/// All sign tests against zero (dot products, parametric distances)
/// go through this so grazing angles do not flicker between hit and miss.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if x.abs() < EPSILON {
        0.0
    } else {
        x
    }
}

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}
