//! # Error Types
//!
//! Domain-specific error types for delivery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  delivery-core errors (this file)                                      │
//! │  └── ValidationError  - Policy shape violations                        │
//! │                                                                         │
//! │  studio errors (apps/studio)                                           │
//! │  ├── PolicyError      - Policy file loading                            │
//! │  ├── SupportError     - Ticket board operations                        │
//! │  └── StudioError      - What the terminal sees (code + message)        │
//! │                                                                         │
//! │  NOTE: calculate_price never fails. These errors only exist at the     │
//! │        policy loading boundary.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Policy validation errors.
///
/// `field` is a path into the policy JSON, e.g. `distanceTiers[1].upToMeters`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field or collection is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Amount or count is below zero.
    #[error("{field} must not be negative (got {value})")]
    MustBeNonNegative { field: String, value: i64 },

    /// Amount is above the allowed maximum.
    #[error("{field} must be at most {max} (got {value})")]
    MustBeAtMost { field: String, value: i64, max: i64 },

    /// Sequence is not strictly increasing.
    #[error("{field} must be greater than {previous} (got {value})")]
    NotAscending {
        field: String,
        previous: i64,
        value: i64,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "distanceTiers".to_string(),
        };
        assert_eq!(err.to_string(), "distanceTiers is required");

        let err = ValidationError::NotAscending {
            field: "distanceTiers[1].upToMeters".to_string(),
            previous: 2000,
            value: 1000,
        };
        assert_eq!(
            err.to_string(),
            "distanceTiers[1].upToMeters must be greater than 2000 (got 1000)"
        );

        let err = ValidationError::MustBeAtMost {
            field: "items.perItemFeeCents".to_string(),
            value: 1_000_000_000_000_000,
            max: 100_000_000,
        };
        assert_eq!(
            err.to_string(),
            "items.perItemFeeCents must be at most 100000000 (got 1000000000000000)"
        );
    }
}
