//! Display formatting for converted values.
//!
//! Every number shown to a user goes through [`format_value`]. The output
//! depends only on the value: the decimal separator is always `.` and no
//! locale state is consulted.

/// Shown in place of a number when the value is NaN or infinite
pub const SENTINEL: &str = "—";

/// Fractional digits kept in fixed-point output and in the exponential mantissa
pub const FRACTION_DIGITS: usize = 6;

/// Smallest magnitude rendered in fixed-point notation
pub const FIXED_MIN: f64 = 1e-4;

/// Magnitudes at or above this render in exponential notation
pub const FIXED_MAX: f64 = 1e7;

/// Format a value for display
///
/// - NaN and infinities render as [`SENTINEL`]
/// - zero (of either sign) renders as `"0"`
/// - magnitudes below [`FIXED_MIN`] or at/above [`FIXED_MAX`] render as
///   `d.dddddde±x`
/// - everything else is rounded to [`FRACTION_DIGITS`] places with trailing
///   zeros stripped, so `2.0` renders as `"2"`
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < FIXED_MIN || magnitude >= FIXED_MAX {
        format_exponential(value)
    } else {
        format_fixed(value)
    }
}

/// True when `display` is the sentinel rather than a number
pub fn is_sentinel(display: &str) -> bool {
    display == SENTINEL
}

fn format_fixed(value: f64) -> String {
    let fixed = format!("{:.*}", FRACTION_DIGITS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

fn format_exponential(value: f64) -> String {
    let raw = format!("{:.*e}", FRACTION_DIGITS, value);
    // Rust omits the sign on positive exponents
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => raw,
    }
}
