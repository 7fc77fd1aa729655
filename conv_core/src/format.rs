//! # Input Parsing and Result Formatting
//!
//! Display rules are fixed so every front end renders the same text for the
//! same result:
//!
//! - non-zero magnitudes below 1e-6 use exponential notation with six
//!   fractional digits (`1.234500e-7`)
//! - everything else is rounded to six decimal places with trailing zeros
//!   and a dangling decimal point removed (`18.52`, `1000`)

use crate::errors::{CalcResult, ConvError};

/// Decimal places kept in formatted output
pub const DISPLAY_DECIMALS: usize = 6;

/// Magnitudes below this switch to exponential notation
pub const EXPONENTIAL_THRESHOLD: f64 = 1e-6;

/// Parse user-entered text as a finite number.
///
/// Surrounding whitespace is ignored. Empty text, text that is not a number,
/// and values such as "inf" or "NaN" are rejected.
pub fn parse_input(text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConvError::invalid_input("value", text, "Value is empty"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ConvError::invalid_input("value", text, "Value is not a number"))?;

    if !value.is_finite() {
        return Err(ConvError::invalid_input("value", text, "Value must be finite"));
    }

    Ok(value)
}

/// Render a result for display.
///
/// Non-zero magnitudes below 1e-6 use exponential notation. Everything else
/// is fixed notation, including values of 1e21 and above, which print their
/// full integer expansion (`1e22` renders as `10000000000000000000000`).
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    if value != 0.0 && value.abs() < EXPONENTIAL_THRESHOLD {
        return format!("{:.*e}", DISPLAY_DECIMALS, value);
    }

    let fixed = format!("{:.*}", DISPLAY_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    // Rounding can leave "-0" for tiny negatives
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
