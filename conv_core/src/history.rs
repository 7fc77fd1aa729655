//! # Conversion History
//!
//! Recent successful conversions, kept as an audit/replay convenience for
//! front ends. The converter never reads or writes history: a caller that
//! received a [`ConversionResult`] records it explicitly.
//!
//! ## Structure
//!
//! ```text
//! HistoryStore (trait)
//! ├── MemoryHistory  (in-process, Vec-backed)
//! └── FileHistory    (JSON file, see file_io)
//! ```
//!
//! Records are immutable once created. The only removal is a bulk clear.
//!
//! ## Example
//!
//! ```rust
//! use conv_core::convert::{calculate, ConversionInput};
//! use conv_core::history::{HistoryStore, MemoryHistory};
//! use conv_core::units::Category;
//!
//! let mut history = MemoryHistory::new();
//! let result = calculate(&ConversionInput::new(Category::Length, "km", "m", "1"))?;
//! history.record(&result)?;
//!
//! let recent = history.recent(10)?;
//! assert_eq!(recent[0].output_value, 1000.0);
//! # Ok::<(), conv_core::errors::ConvError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::convert::ConversionResult;
use crate::errors::CalcResult;
use crate::units::Category;

/// One stored conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: Uuid,
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: f64,
    pub output_value: f64,
    /// Assigned by the store when the record is created
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    /// New record for a successful conversion, stamped now
    pub fn from_result(result: &ConversionResult) -> Self {
        ConversionRecord {
            id: Uuid::new_v4(),
            category: result.category,
            from_unit: result.from_unit.clone(),
            to_unit: result.to_unit.clone(),
            input_value: result.input_value,
            output_value: result.output_value,
            timestamp: Utc::now(),
        }
    }
}

/// Storage for recent conversions.
pub trait HistoryStore {
    /// Store a completed conversion and return the created record.
    fn record(&mut self, result: &ConversionResult) -> CalcResult<ConversionRecord>;

    /// Up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> CalcResult<Vec<ConversionRecord>>;

    /// Delete every record, returning how many were removed.
    fn clear(&mut self) -> CalcResult<usize>;
}

/// Newest-first slice of `records` (stored oldest first).
pub(crate) fn newest_first(records: &[ConversionRecord], limit: usize) -> Vec<ConversionRecord> {
    let mut sorted: Vec<ConversionRecord> = records.to_vec();
    // Stable sort keeps insertion order for identical timestamps
    sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    sorted.into_iter().rev().take(limit).collect()
}

/// History held in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    records: Vec<ConversionRecord>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistory {
    fn record(&mut self, result: &ConversionResult) -> CalcResult<ConversionRecord> {
        let record = ConversionRecord::from_result(result);
        debug!(id = %record.id, category = %record.category, "recorded conversion");
        self.records.push(record.clone());
        Ok(record)
    }

    fn recent(&self, limit: usize) -> CalcResult<Vec<ConversionRecord>> {
        Ok(newest_first(&self.records, limit))
    }

    fn clear(&mut self) -> CalcResult<usize> {
        let removed = self.records.len();
        self.records.clear();
        debug!(removed, "cleared history");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{calculate, ConversionInput};

    fn result(category: Category, from: &str, to: &str, value: &str) -> ConversionResult {
        calculate(&ConversionInput::new(category, from, to, value)).unwrap()
    }

    #[test]
    fn test_record_copies_result_fields() {
        let res = result(Category::Speed, "kt", "kmh", "10");
        let record = ConversionRecord::from_result(&res);
        assert_eq!(record.category, Category::Speed);
        assert_eq!(record.from_unit, "kt");
        assert_eq!(record.to_unit, "kmh");
        assert_eq!(record.input_value, 10.0);
        assert_eq!(record.output_value, res.output_value);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let mut history = MemoryHistory::new();
        for value in ["1", "2", "3"] {
            history.record(&result(Category::Length, "km", "m", value)).unwrap();
        }

        let recent = history.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].input_value, 3.0);
        assert_eq!(recent[1].input_value, 2.0);

        assert_eq!(history.recent(10).unwrap().len(), 3);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut history = MemoryHistory::new();
        history.record(&result(Category::Wind, "kt", "bf", "30")).unwrap();
        history.record(&result(Category::Wind, "bf", "kmh", "3")).unwrap();

        assert_eq!(history.clear().unwrap(), 2);
        assert!(history.is_empty());
        assert!(history.recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_record_serialization() {
        let record = ConversionRecord::from_result(&result(Category::Pressure, "hpa", "inhg", "1013.25"));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"category\":\"pressure\""));
        let roundtrip: ConversionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, record);
    }
}
