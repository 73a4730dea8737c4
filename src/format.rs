//! Display helpers for percentages.
//!
//! Rounding happens here and only here; threshold comparisons always use the
//! unrounded values.

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `66.666..` becomes `"66.67%"`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", round2(value))
}
