//! Numeric helpers shared by the layout engine and the serializer.

/// Slack applied before truncation so values such as `0.57 * 100.0`
/// (`56.999...`) land on the intended digit.
const TRUNCATE_EPSILON: f64 = 1e-9;

/// Truncate `value` to `precision` decimal places (rounding toward zero).
///
/// ```
/// assert_eq!(droid_common::truncate(0.33333, 3), 0.333);
/// assert_eq!(droid_common::truncate(-1.257, 2), -1.25);
/// ```
#[must_use]
pub fn truncate(value: f64, precision: u8) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(i32::from(precision));
    let scaled = value * factor + TRUNCATE_EPSILON.copysign(value);
    scaled.trunc() / factor
}

/// Whether `a` and `b` differ by at most `tolerance`.
#[must_use]
pub fn within_range(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Format `value` for an XML attribute: truncated to `precision` places with
/// trailing zeros removed (`0.5`, `1`, `0.333`).
#[must_use]
pub fn format_float(value: f64, precision: u8) -> String {
    let value = truncate(value, precision);
    let mut text = format!("{value:.prec$}", prec = usize::from(precision));
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Format a pixel quantity as an Android `px` dimension (`12px`).
#[must_use]
pub fn format_px(value: f64) -> String {
    format!("{}px", format_float(value.round(), 0))
}
