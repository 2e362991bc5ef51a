//! # Error Types
//!
//! Structured error types for dossier_core. Every failure is a local,
//! pure-computation failure: an operation either fully succeeds or returns
//! one of these variants. Nothing is retried and nothing is partially built.
//!
//! ## Example
//!
//! ```rust
//! use dossier_core::errors::{DossierError, DossierResult};
//!
//! fn validate_span(span: f64) -> DossierResult<()> {
//!     if span <= 0.0 {
//!         return Err(DossierError::invalid_dimension(
//!             "span",
//!             span.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Zero-length wall edges are deliberately absent from this taxonomy: they
//! are skipped and counted on the plan document instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dossier_core operations
pub type DossierResult<T> = Result<T, DossierError>;

/// Structured error type for geometry and structural operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DossierError {
    /// A length, width, thickness, span, surface or height is not strictly positive
    #[error("Invalid dimension for '{field}': {value} - {reason}")]
    InvalidDimension {
        field: String,
        value: String,
        reason: String,
    },

    /// A formula input would divide by zero or is otherwise out of its domain
    #[error("Invalid parameter '{field}': {value} - {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error while reading settings or parameters
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl DossierError {
    /// Create an InvalidDimension error
    pub fn invalid_dimension(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DossierError::InvalidDimension {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidParameter error
    pub fn invalid_parameter(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DossierError::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        DossierError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DossierError::InvalidDimension { .. } => "INVALID_DIMENSION",
            DossierError::InvalidParameter { .. } => "INVALID_PARAMETER",
            DossierError::FileError { .. } => "FILE_ERROR",
            DossierError::SerializationError { .. } => "SERIALIZATION_ERROR",
            DossierError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
///
/// NaN fails the `> 0.0` comparison, so it is rejected along with zero and
/// negatives.
pub(crate) fn require_positive_dimension(field: &str, value: f64) -> DossierResult<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(DossierError::invalid_dimension(
            field,
            value.to_string(),
            "Must be a finite value greater than zero",
        ));
    }
    Ok(())
}

/// Same check as [`require_positive_dimension`] for non-geometric inputs.
pub(crate) fn require_positive_parameter(field: &str, value: f64) -> DossierResult<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(DossierError::invalid_parameter(
            field,
            value.to_string(),
            "Must be a finite value greater than zero",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DossierError::invalid_dimension("length", "-5", "Must be a finite value greater than zero");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidDimension\""));
        let roundtrip: DossierError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DossierError::invalid_dimension("span", "0", "x").error_code(), "INVALID_DIMENSION");
        assert_eq!(
            DossierError::invalid_parameter("soil_bearing_capacity", "0", "x").error_code(),
            "INVALID_PARAMETER"
        );
        assert_eq!(DossierError::file_error("open", "a.json", "missing").error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_positive_checks() {
        assert!(require_positive_dimension("length", 1.0).is_ok());
        assert!(require_positive_dimension("length", 0.0).is_err());
        assert!(require_positive_dimension("length", -2.0).is_err());
        assert!(require_positive_dimension("length", f64::NAN).is_err());
        assert!(require_positive_dimension("length", f64::INFINITY).is_err());

        let err = require_positive_parameter("soil_bearing_capacity", 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }
}
