//! # Error Types
//!
//! Domain-specific error types for deliverypro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  deliverypro-core errors (this file)                                │
//! │  ├── CoreError        - General domain errors                       │
//! │  ├── ValidationError  - Input validation failures                   │
//! │  └── SubmitError      - Order submission gateway failures           │
//! │                                                                     │
//! │  Server API errors (apps/server)                                    │
//! │  └── ApiError         - What the frontend sees (serialized)         │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, step number, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is flagged unavailable for sale.
    #[error("Product is not available for sale: {0}")]
    ProductUnavailable(String),

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was submitted with an empty cart.
    #[error("Cannot submit an order with an empty cart")]
    EmptyCart,

    /// A checkout step number outside 1..=3 was requested.
    #[error("Checkout step {0} does not exist")]
    InvalidStep(u8),

    /// A second submission was attempted while one is in flight.
    ///
    /// The flag is set by `CheckoutFlow::begin_submission` and cleared by
    /// `finish_submission`, so this covers the full suspend point of the
    /// gateway call.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// Order cannot be found on the board.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Order is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Accepting an order that is already preparing
    /// - Cancelling an order that was already delivered
    #[error("Order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Submission gateway error (wraps SubmitError).
    #[error("Submission error: {0}")]
    Submission(#[from] SubmitError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before a checkout step may advance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is below the required minimum (e.g. change for cash
    /// payments must cover the order total).
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Invalid format (e.g. malformed email or card expiry).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Submission Error
// =============================================================================

/// Failures reported by an order submission backend.
///
/// The core never produces these on its own; they come back through the
/// `OrderGateway` seam and are surfaced to the caller, which decides whether
/// to resubmit. There is no automatic retry.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The backend received the order and refused it.
    #[error("order rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidStatusTransition {
            from: "delivered".to_string(),
            to: "preparing".to_string(),
        };
        assert_eq!(err.to_string(), "Order cannot move from delivered to preparing");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_submit_converts_to_core_error() {
        let submit_err = SubmitError::Network("connection reset".to_string());
        let core_err: CoreError = submit_err.into();
        assert!(matches!(core_err, CoreError::Submission(_)));
    }
}
