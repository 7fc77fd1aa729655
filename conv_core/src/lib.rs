//! # conv_core - Unit Conversion Engine
//!
//! `conv_core` is the computational heart of Windvane: conversions between
//! units of length, weight, speed, pressure, temperature and wind, including
//! the Beaufort wind-force scale. All inputs and outputs are
//! JSON-serializable, making it easy to put behind any front end.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Conversion is a pure function of its arguments
//! - **JSON-First**: Requests, results and history records implement Serialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Closed Registry**: Categories and units are static reference data
//!
//! ## Quick Start
//!
//! ```rust
//! use conv_core::convert::{calculate, ConversionInput};
//! use conv_core::units::Category;
//!
//! let result = calculate(&ConversionInput::new(Category::Speed, "kt", "kmh", "10")).unwrap();
//! assert_eq!(result.formatted, "18.52");
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Categories and the unit registry
//! - [`beaufort`] - Beaufort wind-force table and lookups
//! - [`convert`] - The converter and request/result types
//! - [`format`] - Input parsing and result display rules
//! - [`history`] - Conversion records and the history store trait
//! - [`file_io`] - JSON file history with atomic saves
//! - [`settings`] - Runtime configuration
//! - [`errors`] - Structured error types

pub mod beaufort;
pub mod convert;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod history;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use beaufort::{entry_for_level, level_for_knots, BeaufortEntry, BEAUFORT_SCALE};
pub use convert::{calculate, convert, ConversionInput, ConversionResult};
pub use errors::{CalcResult, ConvError};
pub use file_io::FileHistory;
pub use format::{format_result, parse_input};
pub use history::{ConversionRecord, HistoryStore, MemoryHistory};
pub use settings::Settings;
pub use units::{find_unit, units_for, Category, TemperatureScale, Unit, UnitKind};
