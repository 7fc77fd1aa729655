//! # Unit Registry
//!
//! Static reference data: the closed set of conversion categories and, for
//! each, the ordered list of units it knows about.
//!
//! ## Unit Kinds
//!
//! Units are a tagged union rather than a record with optional fields:
//! - **Linear**: a positive factor converting one of this unit into the
//!   category base unit (the single unit with factor 1)
//! - **Temperature**: one of three scales with fixed affine formulas
//! - **Beaufort**: the discrete wind-force scale (wind category only)
//!
//! ## Base Units
//!
//! | Category    | Base |
//! |-------------|------|
//! | length      | m    |
//! | weight      | kg   |
//! | speed       | km/h |
//! | pressure    | hPa  |
//! | wind        | km/h |
//! | temperature | °C (via formulas) |
//!
//! ## Example
//!
//! ```rust
//! use conv_core::units::{find_unit, units_for, Category, UnitKind};
//!
//! let km = find_unit(Category::Length, "km").unwrap();
//! assert_eq!(km.kind, UnitKind::Linear { factor: 1000.0 });
//!
//! // Order drives the default from/to selection
//! assert_eq!(units_for(Category::Wind)[0].code, "kmh");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConvError;

// ============================================================================
// Categories
// ============================================================================

/// Closed set of conversion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Length,
    Weight,
    Speed,
    Pressure,
    Temperature,
    Wind,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Weight,
        Category::Speed,
        Category::Pressure,
        Category::Temperature,
        Category::Wind,
    ];

    /// Stable lower-case identifier (also the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Speed => "speed",
            Category::Pressure => "pressure",
            Category::Temperature => "temperature",
            Category::Wind => "wind",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Speed => "Speed",
            Category::Pressure => "Pressure",
            Category::Temperature => "Temperature",
            Category::Wind => "Wind",
        }
    }

    /// Ordered units for this category
    pub fn units(&self) -> &'static [Unit] {
        match self {
            Category::Length => LENGTH_UNITS,
            Category::Weight => WEIGHT_UNITS,
            Category::Speed => SPEED_UNITS,
            Category::Pressure => PRESSURE_UNITS,
            Category::Temperature => TEMPERATURE_UNITS,
            Category::Wind => WIND_UNITS,
        }
    }

    /// Look up a unit by exact (case-sensitive) code
    pub fn find_unit(&self, code: &str) -> Option<&'static Unit> {
        self.units().iter().find(|unit| unit.code == code)
    }

    /// Default (from, to) selection: the first two units in registry order
    pub fn default_pair(&self) -> (&'static Unit, &'static Unit) {
        let units = self.units();
        (&units[0], &units[1])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConvError::unknown_category(name))
    }
}

// ============================================================================
// Units
// ============================================================================

/// Temperature scales. Each has its own formula to and from Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Convert a reading on this scale to degrees Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    /// Convert degrees Celsius to a reading on this scale
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }
}

/// How a unit relates to its category's base
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitKind {
    /// One of this unit equals `factor` base units
    Linear { factor: f64 },
    /// Affine temperature scale
    Temperature { scale: TemperatureScale },
    /// Beaufort force number (wind only)
    Beaufort,
}

/// A registered unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    /// Stable identifier, unique within the category (e.g. "kg", "bf")
    pub code: &'static str,
    /// Display label (e.g. "Kilogram (kg)")
    pub label: &'static str,
    pub kind: UnitKind,
}

impl Unit {
    const fn linear(code: &'static str, label: &'static str, factor: f64) -> Self {
        Unit {
            code,
            label,
            kind: UnitKind::Linear { factor },
        }
    }

    const fn temperature(code: &'static str, label: &'static str, scale: TemperatureScale) -> Self {
        Unit {
            code,
            label,
            kind: UnitKind::Temperature { scale },
        }
    }

    /// Linear factor, if this is a linear unit
    pub fn factor(&self) -> Option<f64> {
        match self.kind {
            UnitKind::Linear { factor } => Some(factor),
            _ => None,
        }
    }

    pub fn is_beaufort(&self) -> bool {
        matches!(self.kind, UnitKind::Beaufort)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

// ============================================================================
// Registry Tables
// ============================================================================

/// Base: metre
const LENGTH_UNITS: &[Unit] = &[
    Unit::linear("m", "Meter (m)", 1.0),
    Unit::linear("km", "Kilometer (km)", 1000.0),
    Unit::linear("cm", "Centimeter (cm)", 0.01),
    Unit::linear("mm", "Millimeter (mm)", 0.001),
    Unit::linear("mi", "Mile (mi)", 1609.344),
    Unit::linear("yd", "Yard (yd)", 0.9144),
    Unit::linear("ft", "Foot (ft)", 0.3048),
    Unit::linear("in", "Inch (in)", 0.0254),
    Unit::linear("nmi", "Nautical mile (nmi)", 1852.0),
];

/// Base: kilogram
const WEIGHT_UNITS: &[Unit] = &[
    Unit::linear("kg", "Kilogram (kg)", 1.0),
    Unit::linear("g", "Gram (g)", 0.001),
    Unit::linear("mg", "Milligram (mg)", 0.000001),
    Unit::linear("t", "Metric ton (t)", 1000.0),
    Unit::linear("lb", "Pound (lb)", 0.45359237),
    Unit::linear("oz", "Ounce (oz)", 0.028349523125),
    Unit::linear("st", "Stone (st)", 6.35029318),
];

/// Base: kilometre per hour
const SPEED_UNITS: &[Unit] = &[
    Unit::linear("kmh", "Kilometers per hour (km/h)", 1.0),
    Unit::linear("ms", "Meters per second (m/s)", 3.6),
    Unit::linear("mph", "Miles per hour (mph)", 1.609344),
    Unit::linear("kt", "Knot (kt)", 1.852),
    Unit::linear("fts", "Feet per second (ft/s)", 1.09728),
];

/// Base: hectopascal
const PRESSURE_UNITS: &[Unit] = &[
    Unit::linear("hpa", "Hectopascal (hPa)", 1.0),
    Unit::linear("pa", "Pascal (Pa)", 0.01),
    Unit::linear("kpa", "Kilopascal (kPa)", 10.0),
    Unit::linear("bar", "Bar (bar)", 1000.0),
    Unit::linear("atm", "Atmosphere (atm)", 1013.25),
    Unit::linear("psi", "Pounds per square inch (psi)", 68.94757293168),
    Unit::linear("mmhg", "Millimeters of mercury (mmHg)", 1.33322387415),
    Unit::linear("inhg", "Inches of mercury (inHg)", 33.8638864),
];

const TEMPERATURE_UNITS: &[Unit] = &[
    Unit::temperature("c", "Celsius (°C)", TemperatureScale::Celsius),
    Unit::temperature("f", "Fahrenheit (°F)", TemperatureScale::Fahrenheit),
    Unit::temperature("k", "Kelvin (K)", TemperatureScale::Kelvin),
];

/// Base: kilometre per hour. Beaufort converts through knots.
const WIND_UNITS: &[Unit] = &[
    Unit::linear("kmh", "Kilometers per hour (km/h)", 1.0),
    Unit::linear("ms", "Meters per second (m/s)", 3.6),
    Unit::linear("mph", "Miles per hour (mph)", 1.609344),
    Unit::linear("kt", "Knot (kt)", 1.852),
    Unit {
        code: "bf",
        label: "Beaufort (Bft)",
        kind: UnitKind::Beaufort,
    },
];

/// Ordered units for a category
pub fn units_for(category: Category) -> &'static [Unit] {
    category.units()
}

/// Find a unit by exact code within a category
pub fn find_unit(category: Category, code: &str) -> Option<&'static Unit> {
    category.find_unit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_linear_category(category: Category) -> bool {
        !matches!(category, Category::Temperature | Category::Wind)
    }

    #[test]
    fn test_each_linear_category_has_one_base_unit() {
        for category in Category::ALL.into_iter().filter(|c| is_linear_category(*c)) {
            let base_count = units_for(category)
                .iter()
                .filter(|u| u.factor() == Some(1.0))
                .count();
            assert_eq!(base_count, 1, "{category} should have exactly one base unit");
        }
    }

    #[test]
    fn test_linear_factors_are_positive() {
        for category in Category::ALL {
            for unit in units_for(category) {
                if let Some(factor) = unit.factor() {
                    assert!(factor > 0.0, "{}/{} has non-positive factor", category, unit.code);
                }
            }
        }
    }

    #[test]
    fn test_codes_unique_within_category() {
        for category in Category::ALL {
            let units = units_for(category);
            for (i, a) in units.iter().enumerate() {
                for b in &units[i + 1..] {
                    assert_ne!(a.code, b.code, "duplicate code in {category}");
                }
            }
        }
    }

    #[test]
    fn test_temperature_scales_are_exactly_c_f_k() {
        let codes: Vec<_> = units_for(Category::Temperature).iter().map(|u| u.code).collect();
        assert_eq!(codes, vec!["c", "f", "k"]);
        assert!(units_for(Category::Temperature)
            .iter()
            .all(|u| matches!(u.kind, UnitKind::Temperature { .. })));
    }

    #[test]
    fn test_beaufort_only_in_wind() {
        for category in Category::ALL {
            let has_bf = units_for(category).iter().any(Unit::is_beaufort);
            assert_eq!(has_bf, category == Category::Wind);
        }
    }

    #[test]
    fn test_find_unit_is_case_sensitive() {
        assert!(find_unit(Category::Weight, "kg").is_some());
        assert!(find_unit(Category::Weight, "KG").is_none());
        assert!(find_unit(Category::Length, "furlong").is_none());
    }

    #[test]
    fn test_default_pair_follows_registry_order() {
        let (from, to) = Category::Pressure.default_pair();
        assert_eq!(from.code, "hpa");
        assert_eq!(to.code, "pa");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("wind".parse::<Category>().unwrap(), Category::Wind);
        assert_eq!(" Temperature ".parse::<Category>().unwrap(), Category::Temperature);
        let err = "volume".parse::<Category>().unwrap_err();
        assert_eq!(err, ConvError::unknown_category("volume"));
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Pressure).unwrap();
        assert_eq!(json, "\"pressure\"");
        let roundtrip: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Category::Pressure);
    }

    #[test]
    fn test_temperature_formulas() {
        assert_eq!(TemperatureScale::Fahrenheit.to_celsius(212.0), 100.0);
        assert_eq!(TemperatureScale::Kelvin.from_celsius(0.0), 273.15);
        assert_eq!(TemperatureScale::Fahrenheit.from_celsius(-40.0), -40.0);
    }

    #[test]
    fn test_unit_kind_serialization() {
        let unit = find_unit(Category::Wind, "bf").unwrap();
        let json = serde_json::to_string(unit).unwrap();
        assert!(json.contains("\"kind\":\"beaufort\""));
    }
}
