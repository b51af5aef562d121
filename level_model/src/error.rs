//! Validation errors raised while building a level document.

use thiserror::Error;

use crate::catalog::Archetype;
use crate::reference::Alias;

/// Result alias used throughout the level crates.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Every way a level can be rejected.
///
/// Errors are raised by the call that introduced the bad state; nothing is
/// deferred until the document is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} may only contain ASCII letters, digits, space and `_.!?-`, got {value:?}")]
    InvalidName { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("alias `{0}` is already defined in this document")]
    DuplicateAlias(Alias),

    #[error("{archetype} levels cannot use {feature}")]
    IncompatibleFeature {
        archetype: Archetype,
        feature: &'static str,
    },

    #[error("{archetype} levels require {settings} settings")]
    MissingSettings {
        archetype: Archetype,
        settings: &'static str,
    },

    #[error("{field} has {actual} entries but {expected} were expected")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("no grid column is selected")]
    EmptySelection,

    #[error("vase contents add up to {actual} but the selection holds {expected} vases")]
    SlotCountMismatch { expected: u32, actual: u32 },
}

impl ValidationError {
    /// Shorthand for a range violation on an unsigned value.
    pub fn out_of_range(field: &'static str, value: u32, min: u32, max: u32) -> Self {
        ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InvalidName {
            field: "level name",
            value: "bad#name".to_string(),
        };
        assert!(err.to_string().contains("level name"));
        assert!(err.to_string().contains("bad#name"));

        let err = ValidationError::SlotCountMismatch {
            expected: 20,
            actual: 19,
        };
        assert_eq!(
            err.to_string(),
            "vase contents add up to 19 but the selection holds 20 vases"
        );
    }

    #[test]
    fn test_out_of_range_helper() {
        let err = ValidationError::out_of_range("starting plantfood", 7, 0, 5);
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "starting plantfood",
                value: 7,
                min: 0,
                max: 5,
            }
        );
    }
}
