//! # Error Types
//!
//! Structured error types for fer_core. Validation failures carry the exact
//! message the front-end surfaces inline next to the offending field, so the
//! display layer never has to rebuild user-facing text from error internals.
//!
//! ## Example
//!
//! ```rust
//! use fer_core::errors::{FerError, FerResult};
//!
//! fn validate_mm(mm: u32) -> FerResult<()> {
//!     if mm == 0 {
//!         return Err(FerError::invalid_input(
//!             "mm",
//!             mm.to_string(),
//!             "Diameter must be at least 1 mm",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fer_core operations
pub type FerResult<T> = Result<T, FerError>;

/// Structured error type for domain operations.
///
/// Each variant provides specific context about what went wrong, enabling
/// programmatic handling by the UI layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FerError {
    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A form field failed validation; `message` is shown to the user as-is
    #[error("{message}")]
    Validation { field: String, message: String },

    /// A diameter is not part of the active grid
    #[error("Unknown diameter: {mm} mm")]
    UnknownDiameter { mm: u32 },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FerError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FerError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Validation error carrying a ready-to-display message
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an UnknownDiameter error
    pub fn unknown_diameter(mm: u32) -> Self {
        FerError::UnknownDiameter { mm }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FerError::InvalidInput { .. } => "INVALID_INPUT",
            FerError::Validation { .. } => "VALIDATION",
            FerError::UnknownDiameter { .. } => "UNKNOWN_DIAMETER",
            FerError::SerializationError { .. } => "SERIALIZATION_ERROR",
            FerError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FerError::invalid_input("mm", "0", "Diameter must be at least 1 mm");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: FerError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_validation_message_is_displayed_verbatim() {
        let error = FerError::validation("date", "Date obligatoire");
        assert_eq!(error.to_string(), "Date obligatoire");
        assert_eq!(error.error_code(), "VALIDATION");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FerError::unknown_diameter(99).error_code(),
            "UNKNOWN_DIAMETER"
        );
    }
}
