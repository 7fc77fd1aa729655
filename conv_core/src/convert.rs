//! # Converter
//!
//! Pure conversion between two units of the same category. Three strategies
//! are selected by unit kind, never by comparing unit codes:
//!
//! - **Linear**: `value * from.factor / to.factor`, always through the
//!   category base unit, so the registry only stores one factor per unit
//! - **Temperature**: source scale to Celsius, then Celsius to target scale
//! - **Beaufort**: through km/h; a force number maps to its minimum knots,
//!   and a speed maps to the highest force whose threshold it reaches
//!
//! Expected bad input (unparseable text, unknown unit codes) comes back as
//! `Err`, never as a panic. Beaufort values outside 0..=12 are clamped.
//!
//! Before the threshold scan, speeds are rounded to the nearest 1e-9 knot.
//! A speed within that distance below a threshold counts as reaching it, so
//! `10.9999999997` kt is force 4 while `10.9999` kt stays force 3.
//!
//! ## Example
//!
//! ```rust
//! use conv_core::convert::convert;
//! use conv_core::units::Category;
//!
//! let metres = convert(Category::Length, "km", "m", 1.0)?;
//! assert_eq!(metres, 1000.0);
//!
//! let force = convert(Category::Wind, "kt", "bf", 11.0)?;
//! assert_eq!(force, 4.0);
//! # Ok::<(), conv_core::errors::ConvError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::beaufort::{clamp_level, entry_for_level, level_for_knots, BeaufortSummary, KMH_PER_KNOT};
use crate::errors::{CalcResult, ConvError};
use crate::format::{format_result, parse_input};
use crate::units::{Category, Unit, UnitKind};

/// Knot values are rounded to this many steps per knot before the
/// threshold scan, so a km/h round trip of an exact threshold still hits it.
const KNOT_ROUNDING: f64 = 1e9;

/// Output of a single conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Converted magnitude in the target unit
    pub value: f64,
    /// Beaufort force involved, if either side was the Beaufort unit:
    /// the clamped input force, or the looked-up output force.
    pub beaufort_level: Option<u8>,
}

/// Convert `value` from one unit code to another within `category`.
///
/// # Errors
///
/// * `ConvError::InvalidInput` - `value` is NaN or infinite
/// * `ConvError::UnknownUnit` - either code is not registered for `category`
pub fn convert(category: Category, from_code: &str, to_code: &str, value: f64) -> CalcResult<f64> {
    convert_detailed(category, from_code, to_code, value).map(|c| c.value)
}

/// Parse `text` and convert it. Unparseable text is `ConvError::InvalidInput`.
pub fn convert_str(category: Category, from_code: &str, to_code: &str, text: &str) -> CalcResult<f64> {
    let value = parse_input(text)?;
    convert(category, from_code, to_code, value)
}

/// Like [`convert`], also reporting the Beaufort force used.
pub fn convert_detailed(category: Category, from_code: &str, to_code: &str, value: f64) -> CalcResult<Conversion> {
    if !value.is_finite() {
        return Err(ConvError::invalid_input("value", value.to_string(), "Value must be finite"));
    }

    let from = resolve_unit(category, from_code)?;
    let to = resolve_unit(category, to_code)?;
    let conversion = convert_units(from, to, value)?;

    debug!(
        category = %category,
        from = from.code,
        to = to.code,
        input = value,
        output = conversion.value,
        "converted"
    );
    Ok(conversion)
}

fn resolve_unit(category: Category, code: &str) -> CalcResult<&'static Unit> {
    category
        .find_unit(code)
        .ok_or_else(|| ConvError::unknown_unit(category.as_str(), code))
}

/// Convert between two resolved units of the same category.
fn convert_units(from: &Unit, to: &Unit, value: f64) -> CalcResult<Conversion> {
    // Same non-Beaufort unit: exact passthrough, no factor round trip
    if from.code == to.code && !from.is_beaufort() {
        return Ok(Conversion {
            value,
            beaufort_level: None,
        });
    }

    let (base, input_level) = match from.kind {
        UnitKind::Linear { factor } => (value * factor, None),
        UnitKind::Beaufort => {
            let level = clamp_level(value);
            (entry_for_level(level).min_kmh(), Some(level))
        }
        UnitKind::Temperature { scale: source } => {
            let UnitKind::Temperature { scale: target } = to.kind else {
                return Err(kind_mismatch(from, to));
            };
            return Ok(Conversion {
                value: target.from_celsius(source.to_celsius(value)),
                beaufort_level: None,
            });
        }
    };

    let (value, output_level) = match to.kind {
        UnitKind::Linear { factor } => (base / factor, None),
        UnitKind::Beaufort => {
            let level = level_for_knots(kmh_to_knots(base));
            (f64::from(level), Some(level))
        }
        UnitKind::Temperature { .. } => return Err(kind_mismatch(from, to)),
    };

    Ok(Conversion {
        value,
        beaufort_level: output_level.or(input_level),
    })
}

fn kind_mismatch(from: &Unit, to: &Unit) -> ConvError {
    ConvError::Internal {
        message: format!("cannot convert between '{}' and '{}'", from.code, to.code),
    }
}

fn kmh_to_knots(kmh: f64) -> f64 {
    (kmh / KMH_PER_KNOT * KNOT_ROUNDING).round() / KNOT_ROUNDING
}

// ============================================================================
// Request / Result
// ============================================================================

/// A conversion request as entered in a front end.
///
/// ## JSON Example
///
/// ```json
/// {
///   "category": "wind",
///   "from_unit": "kt",
///   "to_unit": "bf",
///   "value": "23"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    /// Raw text, parsed with [`parse_input`]
    pub value: String,
}

impl ConversionInput {
    pub fn new(
        category: Category,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ConversionInput {
            category,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            value: value.into(),
        }
    }

    /// Input with the category's default unit pair
    pub fn with_defaults(category: Category, value: impl Into<String>) -> Self {
        let (from, to) = category.default_pair();
        ConversionInput::new(category, from.code, to.code, value)
    }

    /// Same request with source and target swapped
    pub fn swapped(&self) -> Self {
        ConversionInput {
            category: self.category,
            from_unit: self.to_unit.clone(),
            to_unit: self.from_unit.clone(),
            value: self.value.clone(),
        }
    }
}

/// A successful conversion, ready for display or recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: f64,
    pub output_value: f64,
    /// Display text per [`format_result`]
    pub formatted: String,
    /// Beaufort force row when either side is the Beaufort unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beaufort: Option<BeaufortSummary>,
}

/// Parse, convert and format a request.
pub fn calculate(input: &ConversionInput) -> CalcResult<ConversionResult> {
    let input_value = parse_input(&input.value).inspect_err(|_| {
        debug!(category = %input.category, value = %input.value, "rejected conversion input");
    })?;

    let conversion = convert_detailed(input.category, &input.from_unit, &input.to_unit, input_value)
        .inspect_err(|e| {
            if let ConvError::UnknownUnit { code, .. } = e {
                warn!(category = %input.category, code = %code, "unit is not registered");
            }
        })?;

    Ok(ConversionResult {
        category: input.category,
        from_unit: input.from_unit.clone(),
        to_unit: input.to_unit.clone(),
        input_value,
        output_value: conversion.value,
        formatted: format_result(conversion.value),
        beaufort: conversion.beaufort_level.map(|level| entry_for_level(level).summary()),
    })
}
