//! # Error Types
//!
//! Domain-specific error types for toko-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  toko-core errors (this file)                                           │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  toko-api errors (separate crate)                                       │
//! │  └── ApiError         - Auth / Network / Server / Decode failures       │
//! │                                                                         │
//! │  toko-sync errors (separate crate)                                      │
//! │  └── SyncError        - What the caller ultimately sees                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SyncError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derives every Display and From impl
//! 2. Include context in error messages (order ID, field name, etc.)
//! 3. A refusal is a variant carrying its details, never a bare String
//! 4. Every message reads well when shown to the shopper verbatim

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are raised before any network call is made, so the caller can show
/// the message inline without a round trip.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted against an empty cart.
    ///
    /// ## When This Occurs
    /// - User navigates straight to checkout with nothing in the cart
    /// - A second place-order call races the first (cart already consumed)
    #[error("Cart is empty, nothing to order")]
    EmptyCart,

    /// A status change violates the lifecycle state machine.
    ///
    /// ## When This Occurs
    /// - Admin tries to move a delivered order back to pending
    /// - Admin tries to cancel an order that is already shipped
    ///
    /// ## User Workflow
    /// ```text
    /// Admin picks "cancelled" for a shipped order
    ///      │
    ///      ▼
    /// OrderStatus::Shipped.can_transition(Cancelled) → false
    ///      │
    ///      ▼
    /// InvalidTransition { from: "shipped", to: "cancelled" }
    ///      │
    ///      ▼
    /// UI shows the message, no request is sent
    /// ```
    #[error("Cannot change {axis} from {from} to {to}")]
    InvalidTransition {
        axis: &'static str,
        from: String,
        to: String,
    },

    /// The acting user is not allowed to perform this lifecycle change.
    ///
    /// ## When This Occurs
    /// - A customer tries to change the fulfillment status
    /// - A customer marks payment on an order that is not theirs to mark
    #[error("{actor} is not allowed to {action}")]
    ActorNotPermitted {
        actor: &'static str,
        action: &'static str,
    },

    /// Customer payment update attempted after payment left `pending`.
    #[error("Payment is already {current}, it can no longer be updated")]
    PaymentNotPending { current: String },

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any request is issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The field is empty or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// The value falls outside the allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, non-numeric postal code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InvalidTransition {
            axis: "order status",
            from: "delivered".to_string(),
            to: "pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot change order status from delivered to pending"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "full name".to_string(),
        };
        assert_eq!(err.to_string(), "full name is required");

        let err = ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "missing @".to_string(),
        };
        assert_eq!(err.to_string(), "email has invalid format: missing @");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "address".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
