//! # File I/O Module
//!
//! File-backed conversion history with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! History is a JSON document:
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "records": [
//!     { "id": "…", "category": "length", "from_unit": "km", "to_unit": "m",
//!       "input_value": 1.0, "output_value": 1000.0,
//!       "timestamp": "2026-10-16T09:30:00Z" }
//!   ]
//! }
//! ```
//!
//! Each operation reads the file, applies the change and writes it back.
//! There is no locking; concurrent writers may lose records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use conv_core::convert::{calculate, ConversionInput};
//! use conv_core::file_io::FileHistory;
//! use conv_core::history::HistoryStore;
//! use conv_core::units::Category;
//!
//! let mut history = FileHistory::new("history.json");
//! let result = calculate(&ConversionInput::new(Category::Speed, "kt", "kmh", "10"))?;
//! history.record(&result)?;
//! # Ok::<(), conv_core::errors::ConvError>(())
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::ConversionResult;
use crate::errors::{CalcResult, ConvError};
use crate::history::{newest_first, ConversionRecord, HistoryStore};

/// Current schema version for history files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk history document. Records are kept oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    pub version: String,
    pub records: Vec<ConversionRecord>,
}

impl Default for HistoryFile {
    fn default() -> Self {
        HistoryFile {
            version: SCHEMA_VERSION.to_string(),
            records: Vec::new(),
        }
    }
}

/// Save a history document with atomic write semantics.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_history(history: &HistoryFile, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(history)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ConvError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        ConvError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        ConvError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        ConvError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ConvError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a history document. A missing file is an empty history.
///
/// # Returns
///
/// * `Err(ConvError::VersionMismatch)` - File version is incompatible
/// * `Err(ConvError::SerializationError)` - Invalid JSON
/// * `Err(ConvError::FileError)` - I/O error
pub fn load_history(path: &Path) -> CalcResult<HistoryFile> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HistoryFile::default()),
        Err(e) => return Err(ConvError::file_error("open", path.display().to_string(), e.to_string())),
    };

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| ConvError::file_error("read", path.display().to_string(), e.to_string()))?;

    let history: HistoryFile = serde_json::from_str(&contents)
        .map_err(|e| ConvError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&history.version)?;

    Ok(history)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || ConvError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version is not readable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

/// History persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHistory { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileHistory {
    fn record(&mut self, result: &ConversionResult) -> CalcResult<ConversionRecord> {
        let mut history = load_history(&self.path)?;
        let record = ConversionRecord::from_result(result);
        history.version = SCHEMA_VERSION.to_string();
        history.records.push(record.clone());
        save_history(&history, &self.path)?;
        debug!(id = %record.id, path = %self.path.display(), "recorded conversion");
        Ok(record)
    }

    fn recent(&self, limit: usize) -> CalcResult<Vec<ConversionRecord>> {
        let history = load_history(&self.path)?;
        Ok(newest_first(&history.records, limit))
    }

    fn clear(&mut self) -> CalcResult<usize> {
        let history = load_history(&self.path)?;
        let removed = history.records.len();
        save_history(&HistoryFile::default(), &self.path)?;
        debug!(removed, path = %self.path.display(), "cleared history");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{calculate, ConversionInput};
    use crate::units::Category;
    use std::env::temp_dir;

    fn temp_history_path(name: &str) -> PathBuf {
        temp_dir().join(format!("windvane_test_{}_{}.json", name, std::process::id()))
    }

    fn sample(value: &str) -> ConversionResult {
        calculate(&ConversionInput::new(Category::Temperature, "c", "f", value)).unwrap()
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/data/history.json"));
        assert_eq!(tmp, Path::new("/data/history.json.tmp"));
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let path = temp_history_path("missing");
        let _ = fs::remove_file(&path);
        let history = FileHistory::new(&path);
        assert!(history.recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_record_and_reload() {
        let path = temp_history_path("reload");
        let _ = fs::remove_file(&path);

        let mut history = FileHistory::new(&path);
        history.record(&sample("0")).unwrap();
        history.record(&sample("100")).unwrap();

        let reopened = FileHistory::new(&path);
        let recent = reopened.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].input_value, 100.0);
        assert_eq!(recent[0].output_value, 212.0);
        assert_eq!(recent[1].output_value, 32.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_history_path("atomic");
        save_history(&HistoryFile::default(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_clear() {
        let path = temp_history_path("clear");
        let _ = fs::remove_file(&path);

        let mut history = FileHistory::new(&path);
        history.record(&sample("20")).unwrap();
        assert_eq!(history.clear().unwrap(), 1);
        assert!(history.recent(10).unwrap().is_empty());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let path = temp_history_path("invalid");
        fs::write(&path, "not json").unwrap();

        let err = load_history(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
