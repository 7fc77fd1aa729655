//! # Beaufort Wind Scale
//!
//! The 13 force levels (0 through 12) of the Beaufort scale, keyed by the
//! minimum sustained wind speed in knots. The table is ordered by level and
//! thresholds never decrease, so a descending scan finds the highest level a
//! wind speed reaches.
//!
//! ## Example
//!
//! ```rust
//! use conv_core::beaufort::{entry_for_level, level_for_knots};
//!
//! assert_eq!(level_for_knots(12.0), 4);
//! assert_eq!(entry_for_level(4).description, "Moderate breeze");
//! ```

use serde::{Deserialize, Serialize};

/// km/h in one knot (exact)
pub const KMH_PER_KNOT: f64 = 1.852;

/// Highest force on the scale
pub const MAX_LEVEL: u8 = 12;

/// One row of the Beaufort table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeaufortEntry {
    /// Force number (0-12)
    pub level: u8,
    /// Lowest sustained wind speed for this force, in knots
    pub min_kt: f64,
    /// Short name, e.g. "Fresh breeze"
    pub description: &'static str,
    /// Observed sea state
    pub sea_effect: &'static str,
}

impl BeaufortEntry {
    /// Lower threshold in km/h
    pub fn min_kmh(&self) -> f64 {
        self.min_kt * KMH_PER_KNOT
    }

    /// Owned copy suitable for embedding in results
    pub fn summary(&self) -> BeaufortSummary {
        BeaufortSummary {
            level: self.level,
            min_kt: self.min_kt,
            description: self.description.to_string(),
            sea_effect: self.sea_effect.to_string(),
        }
    }
}

/// Serializable, owned form of a [`BeaufortEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaufortSummary {
    pub level: u8,
    pub min_kt: f64,
    pub description: String,
    pub sea_effect: String,
}

/// The full scale, level 0 first.
pub const BEAUFORT_SCALE: [BeaufortEntry; 13] = [
    BeaufortEntry {
        level: 0,
        min_kt: 0.0,
        description: "Calm",
        sea_effect: "Sea like a mirror",
    },
    BeaufortEntry {
        level: 1,
        min_kt: 1.0,
        description: "Light air",
        sea_effect: "Ripples with appearance of scales, no foam crests",
    },
    BeaufortEntry {
        level: 2,
        min_kt: 4.0,
        description: "Light breeze",
        sea_effect: "Small wavelets, crests of glassy appearance, not breaking",
    },
    BeaufortEntry {
        level: 3,
        min_kt: 7.0,
        description: "Gentle breeze",
        sea_effect: "Large wavelets, crests begin to break, scattered whitecaps",
    },
    BeaufortEntry {
        level: 4,
        min_kt: 11.0,
        description: "Moderate breeze",
        sea_effect: "Small waves becoming longer, numerous whitecaps",
    },
    BeaufortEntry {
        level: 5,
        min_kt: 17.0,
        description: "Fresh breeze",
        sea_effect: "Moderate waves taking longer form, many whitecaps, some spray",
    },
    BeaufortEntry {
        level: 6,
        min_kt: 22.0,
        description: "Strong breeze",
        sea_effect: "Larger waves forming, whitecaps everywhere, more spray",
    },
    BeaufortEntry {
        level: 7,
        min_kt: 28.0,
        description: "Near gale",
        sea_effect: "Sea heaps up, white foam from breaking waves blown in streaks",
    },
    BeaufortEntry {
        level: 8,
        min_kt: 34.0,
        description: "Gale",
        sea_effect: "Moderately high waves, crests break into spindrift, foam in well-marked streaks",
    },
    BeaufortEntry {
        level: 9,
        min_kt: 41.0,
        description: "Strong gale",
        sea_effect: "High waves, dense foam streaks, crests topple and roll over, spray reduces visibility",
    },
    BeaufortEntry {
        level: 10,
        min_kt: 48.0,
        description: "Storm",
        sea_effect: "Very high waves with overhanging crests, sea surface white with foam, heavy tumbling",
    },
    BeaufortEntry {
        level: 11,
        min_kt: 56.0,
        description: "Violent storm",
        sea_effect: "Exceptionally high waves, sea covered in white foam patches, visibility seriously reduced",
    },
    BeaufortEntry {
        level: 12,
        min_kt: 64.0,
        description: "Hurricane force",
        sea_effect: "Air filled with foam and spray, sea completely white, visibility very seriously reduced",
    },
];

/// Highest Beaufort level whose threshold is at or below `knots`.
///
/// Speeds below the level 1 threshold (including negative or NaN input) fall
/// back to level 0; anything from 64 kt up is level 12.
pub fn level_for_knots(knots: f64) -> u8 {
    BEAUFORT_SCALE
        .iter()
        .rev()
        .find(|entry| entry.min_kt <= knots)
        .map(|entry| entry.level)
        .unwrap_or(0)
}

/// Table row for a level.
///
/// Callers clamp first (see [`clamp_level`]); levels above 12 are a contract
/// violation and resolve to level 12 in release builds.
pub fn entry_for_level(level: u8) -> &'static BeaufortEntry {
    debug_assert!(level <= MAX_LEVEL, "Beaufort level {level} out of range");
    &BEAUFORT_SCALE[usize::from(level.min(MAX_LEVEL))]
}

/// Clamp a raw force value to a valid level: fractions are floored and the
/// result limited to 0..=12. NaN maps to 0.
pub fn clamp_level(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.floor().clamp(0.0, f64::from(MAX_LEVEL)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered() {
        for (i, entry) in BEAUFORT_SCALE.iter().enumerate() {
            assert_eq!(usize::from(entry.level), i);
        }
        for pair in BEAUFORT_SCALE.windows(2) {
            assert!(pair[0].min_kt <= pair[1].min_kt);
        }
    }

    #[test]
    fn test_level_for_knots_boundaries() {
        assert_eq!(level_for_knots(0.0), 0);
        assert_eq!(level_for_knots(0.99), 0);
        assert_eq!(level_for_knots(1.0), 1);
        assert_eq!(level_for_knots(10.99), 3);
        assert_eq!(level_for_knots(11.0), 4);
        assert_eq!(level_for_knots(63.9), 11);
        assert_eq!(level_for_knots(64.0), 12);
        assert_eq!(level_for_knots(1000.0), 12);
    }

    #[test]
    fn test_level_for_knots_floor() {
        assert_eq!(level_for_knots(-5.0), 0);
        assert_eq!(level_for_knots(f64::NAN), 0);
    }

    #[test]
    fn test_level_for_knots_is_monotonic() {
        let mut previous = 0;
        let mut knots = 0.0;
        while knots <= 80.0 {
            let level = level_for_knots(knots);
            assert!(level >= previous, "level dropped at {knots} kt");
            previous = level;
            knots += 0.25;
        }
    }

    #[test]
    fn test_every_threshold_maps_to_its_own_level() {
        for entry in BEAUFORT_SCALE.iter() {
            assert_eq!(level_for_knots(entry.min_kt), entry.level);
        }
    }

    #[test]
    fn test_entry_for_level() {
        let entry = entry_for_level(8);
        assert_eq!(entry.description, "Gale");
        assert_eq!(entry.min_kt, 34.0);
        assert!((entry.min_kmh() - 62.968).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_level() {
        assert_eq!(clamp_level(4.7), 4);
        assert_eq!(clamp_level(-3.0), 0);
        assert_eq!(clamp_level(13.0), 12);
        assert_eq!(clamp_level(250.5), 12);
        assert_eq!(clamp_level(f64::INFINITY), 12);
        assert_eq!(clamp_level(f64::NAN), 0);
    }

    #[test]
    fn test_summary_serialization() {
        let summary = entry_for_level(0).summary();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"description\":\"Calm\""));
        let roundtrip: BeaufortSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, roundtrip);
    }
}
