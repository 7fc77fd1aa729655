//! # Error Types
//!
//! Structured error types for conv_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Input errors (bad text, stale unit codes) are expected during normal use
//! and are always returned through `Err`, never raised as panics. A
//! presentation layer typically shows a neutral placeholder for them.
//!
//! ## Example
//!
//! ```rust
//! use conv_core::errors::{ConvError, CalcResult};
//!
//! fn validate_limit(limit: usize) -> CalcResult<()> {
//!     if limit == 0 {
//!         return Err(ConvError::InvalidInput {
//!             field: "limit".to_string(),
//!             value: limit.to_string(),
//!             reason: "Limit must be at least 1".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for conv_core operations
pub type CalcResult<T> = Result<T, ConvError>;

/// Structured error type for conversion and history operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ConvError {
    /// An input value could not be used (empty, not a number, not finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Unit code is not registered for the category
    #[error("Unknown unit '{code}' for category {category}")]
    UnknownUnit { category: String, code: String },

    /// Category name is not one of the known categories
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ConvError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(category: impl Into<String>, code: impl Into<String>) -> Self {
        ConvError::UnknownUnit {
            category: category.into(),
            code: code.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(name: impl Into<String>) -> Self {
        ConvError::UnknownCategory { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        ConvError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for failures caused by what the caller typed or selected.
    ///
    /// These are the "no result" cases of a conversion: the UI shows a
    /// placeholder instead of an error message.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ConvError::InvalidInput { .. } | ConvError::UnknownUnit { .. } | ConvError::UnknownCategory { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ConvError::InvalidInput { .. } => "INVALID_INPUT",
            ConvError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            ConvError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            ConvError::FileError { .. } => "FILE_ERROR",
            ConvError::SerializationError { .. } => "SERIALIZATION_ERROR",
            ConvError::VersionMismatch { .. } => "VERSION_MISMATCH",
            ConvError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for ConvError {
    fn from(e: serde_json::Error) -> Self {
        ConvError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ConvError::unknown_unit("length", "furlong");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnknownUnit\""));
        let roundtrip: ConvError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ConvError::unknown_unit("wind", "x").error_code(), "UNKNOWN_UNIT");
        assert_eq!(ConvError::unknown_category("volume").error_code(), "UNKNOWN_CATEGORY");
        assert_eq!(ConvError::invalid_input("value", "abc", "not a number").error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_input_errors_are_distinguished_from_store_errors() {
        assert!(ConvError::invalid_input("value", "", "empty").is_input_error());
        assert!(ConvError::unknown_unit("length", "cubit").is_input_error());
        assert!(!ConvError::file_error("read", "/tmp/x", "denied").is_input_error());
        assert!(!ConvError::serialization("bad json").is_input_error());
    }

    #[test]
    fn test_error_display() {
        let error = ConvError::unknown_unit("pressure", "torr");
        assert_eq!(error.to_string(), "Unknown unit 'torr' for category pressure");
    }
}
