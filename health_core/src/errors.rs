//! # Error Types
//!
//! Structured error types for health_core. Every calculation either succeeds
//! with a complete result or fails with one of these errors describing exactly
//! which precondition was violated. Validation happens before any arithmetic,
//! so no partial results are ever produced.
//!
//! ## Example
//!
//! ```rust
//! use health_core::errors::{HealthError, HealthResult};
//!
//! fn validate_height(height_cm: f64) -> HealthResult<()> {
//!     if height_cm <= 0.0 {
//!         return Err(HealthError::invalid_measurement(
//!             "height",
//!             height_cm.to_string(),
//!             "Height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for health_core operations
pub type HealthResult<T> = Result<T, HealthError>;

/// Structured error type for health calculations.
///
/// The first four variants form the validation taxonomy: they are always
/// recoverable at the caller boundary and are meant to be shown to the user.
/// The remaining variants come from the storage and export collaborators.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum HealthError {
    /// A physical measurement is unusable (zero, negative, undefined log argument)
    #[error("Invalid measurement for '{field}': {value} - {reason}")]
    InvalidMeasurement {
        field: String,
        value: String,
        reason: String,
    },

    /// An input value could not be interpreted (non-numeric, unknown unit, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A value lies outside its accepted range
    #[error("Value out of range for '{field}': {value} (expected {min} to {max})")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

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

    /// Stored data was written by an incompatible schema version
    #[error("Version mismatch: stored version {stored_version}, expected {expected_version}")]
    VersionMismatch {
        stored_version: String,
        expected_version: String,
    },

    /// Document export failed
    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },
}

impl HealthError {
    /// Create an InvalidMeasurement error
    pub fn invalid_measurement(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        HealthError::InvalidMeasurement {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        HealthError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        HealthError::MissingField {
            field: field.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        HealthError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        HealthError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(reason: impl Into<String>) -> Self {
        HealthError::RenderFailed {
            reason: reason.into(),
        }
    }

    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HealthError::InvalidMeasurement { .. }
                | HealthError::InvalidInput { .. }
                | HealthError::MissingField { .. }
                | HealthError::OutOfRange { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            HealthError::InvalidMeasurement { .. } => "INVALID_MEASUREMENT",
            HealthError::InvalidInput { .. } => "INVALID_INPUT",
            HealthError::MissingField { .. } => "MISSING_FIELD",
            HealthError::OutOfRange { .. } => "OUT_OF_RANGE",
            HealthError::FileError { .. } => "FILE_ERROR",
            HealthError::SerializationError { .. } => "SERIALIZATION_ERROR",
            HealthError::VersionMismatch { .. } => "VERSION_MISMATCH",
            HealthError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}
