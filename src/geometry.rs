//! Tolerance comparison and coordinate rounding.

use glam::DVec2;

/// Relative tolerance for approximate float comparison.
pub const RELATIVE_TOLERANCE: f64 = 1e-5;

/// Absolute tolerance for approximate float comparison.
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Number of decimal digits kept in emitted path coordinates.
pub const COORDINATE_DIGITS: i32 = 4;

/// Approximate equality: `|a - b| <= atol + rtol * |b|`.
pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * b.abs()
}

/// Component-wise [`close`] for 2D vectors.
pub fn all_close(a: DVec2, b: DVec2) -> bool {
    close(a.x, b.x) && close(a.y, b.y)
}

/// Rounds to [`COORDINATE_DIGITS`] decimal digits.
///
/// Negative zero is normalized to zero so serialized output never contains
/// `-0`.
pub fn round4(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DIGITS);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}
