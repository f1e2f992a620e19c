//! Error types for the DOP engine.
//!
//! The analytics functions themselves never fail; errors only arise at the
//! edges (input validation, storage, configuration, serialization).

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for DOP engine operations.
#[derive(Error, Debug)]
pub enum DopError {
    /// A raw input value is outside its allowed range
    #[error("{field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A behavioral sub-rating is not one of 0, 1 or 2
    #[error("{field} rating must be 0, 1 or 2, got {value}")]
    InvalidRating { field: &'static str, value: u8 },

    /// Storage already holds an entry for this date
    #[error("Entry already exists for date {0}")]
    DuplicateDate(NaiveDate),

    /// Persisted data is readable JSON but not a valid record list
    #[error("Invalid entry in data file: {0}")]
    CorruptRecord(String),

    /// Underlying filesystem or terminal failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for DOP operations.
pub type Result<T> = std::result::Result<T, DopError>;

impl DopError {
    /// Check if this is a recoverable error (the user can simply retry input)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DopError::InvalidInput { .. } | DopError::InvalidRating { .. }
        )
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DopError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<DopError> for wasm_bindgen::JsValue {
    fn from(err: DopError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DopError::invalid("Coffee", "cannot be negative");
        assert_eq!(err.to_string(), "Coffee cannot be negative");

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            DopError::DuplicateDate(date).to_string(),
            "Entry already exists for date 2024-03-01"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(DopError::InvalidRating {
            field: "Deep work",
            value: 3
        }
        .is_recoverable());
        assert!(!DopError::ConfigError("bad".into()).is_recoverable());
    }
}
