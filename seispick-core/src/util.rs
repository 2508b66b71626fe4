//! Numeric conversion utilities.
//!
//! Conversions between index and coordinate types, with explicit bounds
//! checks.

/// Convert usize to i64, saturating at `i64::MAX`.
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert i64 to usize if it lies in `[0, max_exclusive)`.
pub fn i64_to_index(value: i64, max_exclusive: usize) -> Option<usize> {
    usize::try_from(value).ok().filter(|&v| v < max_exclusive)
}

/// Round to a fixed number of decimal digits. Halves round away from zero.
#[must_use]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}
