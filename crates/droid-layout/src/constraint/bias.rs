//! Bias between a view and the two ends of its constraint.

use droid_common::truncate;

/// `start / (start + end)`, truncated to `precision` decimals and clamped to
/// `[0, 1]`.
///
/// Negative and non-finite distances count as zero. With no space on either
/// side the view is centered.
///
/// ```
/// use droid_layout::constraint::calculate_bias;
///
/// assert_eq!(calculate_bias(10.0, 30.0, 3), 0.25);
/// assert_eq!(calculate_bias(0.0, 30.0, 3), 0.0);
/// assert_eq!(calculate_bias(10.0, 0.0, 3), 1.0);
/// assert_eq!(calculate_bias(0.0, 0.0, 3), 0.5);
/// ```
#[must_use]
pub fn calculate_bias(start: f64, end: f64, precision: u8) -> f64 {
    let clean = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
    let (start, end) = (clean(start), clean(end));
    match (start > 0.0, end > 0.0) {
        (false, false) => 0.5,
        (false, true) => 0.0,
        (true, false) => 1.0,
        (true, true) => truncate(start / (start + end), precision).clamp(0.0, 1.0),
    }
}
