//! # Settings
//!
//! Runtime configuration for front ends: where history lives, how much of it
//! to show, and whether conversions are recorded at all.
//!
//! Values come from defaults, then environment variables:
//!
//! | Variable                   | Field            |
//! |----------------------------|------------------|
//! | `WINDVANE_HISTORY_PATH`    | `history_path`   |
//! | `WINDVANE_HISTORY_LIMIT`   | `history_limit`  |
//! | `WINDVANE_RECORD_HISTORY`  | `record_history` |
//!
//! Front ends apply their own overrides (e.g. CLI flags) on top.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, ConvError};

pub const ENV_HISTORY_PATH: &str = "WINDVANE_HISTORY_PATH";
pub const ENV_HISTORY_LIMIT: &str = "WINDVANE_HISTORY_LIMIT";
pub const ENV_RECORD_HISTORY: &str = "WINDVANE_RECORD_HISTORY";

/// Records listed when no limit is given
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

const APP_DIR: &str = "windvane";
const HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// JSON history file
    pub history_path: PathBuf,

    /// Number of records shown by "recent" listings
    pub history_limit: usize,

    /// Record successful conversions
    pub record_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            history_path: default_history_path(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            record_history: true,
        }
    }
}

impl Settings {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> CalcResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup` (keyed by variable name).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CalcResult<Self> {
        let mut settings = Settings::default();

        if let Some(path) = lookup(ENV_HISTORY_PATH).filter(|p| !p.trim().is_empty()) {
            settings.history_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_HISTORY_LIMIT) {
            settings.history_limit = parse_limit(ENV_HISTORY_LIMIT, &raw)?;
        }

        if let Some(raw) = lookup(ENV_RECORD_HISTORY) {
            settings.record_history = parse_flag(ENV_RECORD_HISTORY, &raw)?;
        }

        Ok(settings)
    }
}

/// `<data dir>/windvane/history.json`, or the working directory if the
/// platform has no data directory.
pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(HISTORY_FILE))
        .unwrap_or_else(|| PathBuf::from(HISTORY_FILE))
}

fn parse_limit(field: &str, raw: &str) -> CalcResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ConvError::invalid_input(field, raw, "Limit must be a positive integer")),
    }
}

fn parse_flag(field: &str, raw: &str) -> CalcResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConvError::invalid_input(field, raw, "Expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings.history_limit, DEFAULT_HISTORY_LIMIT);
        assert!(settings.record_history);
        assert!(settings.history_path.ends_with(HISTORY_FILE));
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_HISTORY_PATH, "/tmp/custom.json"),
            (ENV_HISTORY_LIMIT, "25"),
            (ENV_RECORD_HISTORY, "off"),
        ]))
        .unwrap();

        assert_eq!(settings.history_path, PathBuf::from("/tmp/custom.json"));
        assert_eq!(settings.history_limit, 25);
        assert!(!settings.record_history);
    }

    #[test]
    fn test_invalid_limit() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_HISTORY_LIMIT, "0")])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(Settings::from_lookup(lookup_from(&[(ENV_HISTORY_LIMIT, "many")])).is_err());
    }

    #[test]
    fn test_invalid_flag() {
        assert!(Settings::from_lookup(lookup_from(&[(ENV_RECORD_HISTORY, "maybe")])).is_err());
    }

    #[test]
    fn test_blank_path_keeps_default() {
        let settings = Settings::from_lookup(lookup_from(&[(ENV_HISTORY_PATH, "  ")])).unwrap();
        assert_eq!(settings.history_path, default_history_path());
    }
}
