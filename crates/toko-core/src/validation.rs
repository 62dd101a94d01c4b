//! # Validation Module
//!
//! Input validation for checkout and cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client side, before any request)                 │
//! │  ├── Required-field and format checks on shipping details               │
//! │  ├── Quantity bounds on cart mutations                                  │
//! │  └── Fails fast: the first broken rule blocks submission with no        │
//! │      network round trip                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Server                                                        │
//! │  ├── Re-validates everything (the client is never trusted)              │
//! │  └── Violations come back as success:false envelopes                    │
//! │                                                                         │
//! │  Defense in depth: both layers enforce the same rules                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::ShippingInfo;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Shipping Field Validators
// =============================================================================

/// Validates the recipient name.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 100 characters
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "full name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "full name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must have a local part, an `@`, and a dotted domain
///
/// This is a shape check, not RFC 5322; the server performs deliverability
/// checks on its side.
///
/// ## Example
/// ```rust
/// use toko_core::validation::validate_email;
///
/// assert!(validate_email("buyer@example.com").is_ok());
/// assert!(validate_email("buyer@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 100,
        });
    }

    let shape_ok = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !shape_ok {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - May contain digits, `+`, `-`, spaces, and parentheses
/// - Must contain 8 to 15 digits
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let chars_ok = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !chars_ok {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "may contain only digits, +, -, spaces, and parentheses".to_string(),
        });
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(8..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain 8 to 15 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates the delivery address.
///
/// ## Rules
/// - Must not be empty
/// - Minimum 10 characters (a bare street number is not deliverable)
/// - Maximum 500 characters
pub fn validate_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    if address.len() < 10 {
        return Err(ValidationError::TooShort {
            field: "address".to_string(),
            min: 10,
        });
    }

    if address.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 500,
        });
    }

    Ok(())
}

/// Validates the city name.
pub fn validate_city(city: &str) -> ValidationResult<()> {
    let city = city.trim();

    if city.is_empty() {
        return Err(ValidationError::Required {
            field: "city".to_string(),
        });
    }

    if city.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "city".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an Indonesian postal code (five digits).
///
/// ## Example
/// ```rust
/// use toko_core::validation::validate_postal_code;
///
/// assert!(validate_postal_code("40111").is_ok());
/// assert!(validate_postal_code("4011").is_err());
/// assert!(validate_postal_code("ABCDE").is_err());
/// ```
pub fn validate_postal_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "postal code".to_string(),
        });
    }

    if code.len() != 5 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "postal code".to_string(),
            reason: "must be exactly 5 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates the optional courier note.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<()> {
    if let Some(notes) = notes {
        if notes.len() > 500 {
            return Err(ValidationError::TooLong {
                field: "notes".to_string(),
                max: 500,
            });
        }
    }

    Ok(())
}

/// Validates a full shipping form, failing on the first broken rule.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: Place Order                                                  │
/// │                                                                         │
/// │  User submits the shipping form                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_shipping_info(&info) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── Broken rule? → inline error, NO request is sent               │
/// │       │                                                                 │
/// │       └── OK → POST /order/place                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_shipping_info(info: &ShippingInfo) -> ValidationResult<()> {
    validate_full_name(&info.full_name)?;
    validate_email(&info.email)?;
    validate_phone(&info.phone)?;
    validate_address(&info.address)?;
    validate_city(&info.city)?;
    validate_postal_code(&info.postal_code)?;
    validate_notes(info.notes.as_deref())?;
    Ok(())
}

// =============================================================================
// Quantity Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - At least 1 (zero and negatives are rejected, not clamped)
/// - At most [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Floors a requested quantity at 1.
///
/// The quantity stepper in the UI disables its decrement button at 1, but
/// the library guarantees the invariant regardless: no update request ever
/// carries a quantity below 1. Callers who mean "remove" must call remove.
///
/// ## Example
/// ```rust
/// use toko_core::validation::clamp_quantity;
///
/// assert_eq!(clamp_quantity(0), 1);
/// assert_eq!(clamp_quantity(-3), 1);
/// assert_eq!(clamp_quantity(7), 7);
/// ```
#[inline]
pub const fn clamp_quantity(qty: i64) -> i64 {
    if qty < 1 {
        1
    } else {
        qty
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_info() -> ShippingInfo {
        ShippingInfo {
            full_name: "Siti Rahayu".to_string(),
            email: "siti@example.com".to_string(),
            phone: "0812-3456-7890".to_string(),
            address: "Jl. Kenanga No. 12, RT 04/RW 02".to_string(),
            city: "Yogyakarta".to_string(),
            postal_code: "55281".to_string(),
            notes: Some("Leave with the neighbor".to_string()),
        }
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Siti Rahayu").is_ok());
        assert!(validate_full_name("").is_err());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"A".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("siti@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("siti@nodot").is_err());
        assert!(validate_email("siti@.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("081234567890").is_ok());
        assert!(validate_phone("+62 812-3456-7890").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err()); // too few digits
        assert!(validate_phone("08123456789012345678").is_err()); // too many
        assert!(validate_phone("call me maybe").is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("Jl. Kenanga No. 12").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("No. 5").is_err()); // too short
        assert!(validate_address(&"A".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_postal_code() {
        assert!(validate_postal_code("55281").is_ok());
        assert!(validate_postal_code("").is_err());
        assert!(validate_postal_code("4011").is_err());
        assert!(validate_postal_code("402111").is_err());
        assert!(validate_postal_code("4O111").is_err());
    }

    #[test]
    fn test_validate_shipping_info_passes_complete_form() {
        assert!(validate_shipping_info(&valid_info()).is_ok());
    }

    #[test]
    fn test_validate_shipping_info_fails_fast_on_first_error() {
        let mut info = valid_info();
        info.full_name = " ".to_string();
        info.email = "also-broken".to_string();

        // The name error surfaces first; email is never reached.
        let err = validate_shipping_info(&info).unwrap_err();
        assert_eq!(err.to_string(), "full name is required");
    }

    #[test]
    fn test_validate_shipping_info_rejects_missing_postal_code() {
        let mut info = valid_info();
        info.postal_code = String::new();
        assert!(validate_shipping_info(&info).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_clamp_quantity_floors_at_one() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-10), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(42), 42);
    }
}
