//! # Validation Module
//!
//! Field-level input validation for DeliveryPro.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Frontend (TypeScript)                                     │
//! │  ├── Input masks (card number, expiry, CEP)                         │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (Rust)                                        │
//! │  ├── Required-field checks per checkout step                        │
//! │  └── Format/range checks before an order can be built               │
//! │                                                                     │
//! │  Step gating itself lives in `checkout`; this module answers        │
//! │  "is this one field acceptable" with a typed error.                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names in errors use the wire (camelCase) spelling because the
//! messages are surfaced verbatim in the frontend forms.

use crate::error::ValidationError;
use crate::types::{Address, Customer, PaymentDetails};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a field is present and non-blank.
pub fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain a `@` with text on both sides
///
/// Deliberately loose: the address is only used for the order confirmation
/// message, so anything mailbox-shaped passes.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email)?;

    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number: required, with at least 8 digits.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    required("phone", phone)?;

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits < 8 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least 8 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name for menu edits.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name)?;

    if name.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates the customer block of checkout step 1.
///
/// Returns every failing field, not just the first, so the form can mark
/// all of them at once.
pub fn validate_customer(customer: &Customer) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(e) = required("name", &customer.name) {
        errors.push(e);
    }
    if let Err(e) = validate_email(&customer.email) {
        errors.push(e);
    }
    if let Err(e) = validate_phone(&customer.phone) {
        errors.push(e);
    }

    errors
}

/// Validates the address block of checkout step 1 (delivery only).
///
/// `complement` is the only optional field.
pub fn validate_address(address: &Address) -> Vec<ValidationError> {
    let fields = [
        ("street", address.street.as_str()),
        ("number", address.number.as_str()),
        ("neighborhood", address.neighborhood.as_str()),
        ("city", address.city.as_str()),
        ("state", address.state.as_str()),
        ("zipCode", address.zip_code.as_str()),
    ];

    fields
        .iter()
        .filter_map(|(field, value)| required(field, value).err())
        .collect()
}

/// Validates the card fields of a credit/debit payment.
///
/// All four fields are required; the card number must additionally carry a
/// plausible digit count (13-19, per card network PAN lengths).
pub fn validate_card_fields(payment: &PaymentDetails) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let fields = [
        ("cardNumber", payment.card_number.as_deref()),
        ("cardName", payment.card_name.as_deref()),
        ("cardExpiry", payment.card_expiry.as_deref()),
        ("cardCvv", payment.card_cvv.as_deref()),
    ];

    for (field, value) in fields {
        if let Err(e) = required(field, value.unwrap_or_default()) {
            errors.push(e);
        }
    }

    if let Some(number) = payment.card_number.as_deref() {
        let digits = number.chars().filter(char::is_ascii_digit).count();
        if digits > 0 && !(13..=19).contains(&digits) {
            errors.push(ValidationError::InvalidFormat {
                field: "cardNumber".to_string(),
                reason: "must contain 13 to 19 digits".to_string(),
            });
        }
    }

    errors
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
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

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the cash change amount against the order total.
///
/// `None` means "no change needed" and always passes; when present, the
/// banknote amount must cover the total.
pub fn validate_change_for(change_for_cents: Option<i64>, total_cents: i64) -> ValidationResult<()> {
    if let Some(change_for) = change_for_cents {
        if change_for < total_cents {
            return Err(ValidationError::TooSmall {
                field: "changeFor".to_string(),
                min: total_cents,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    #[test]
    fn test_required() {
        assert!(required("name", "João Silva").is_ok());
        assert!(required("name", "").is_err());
        assert!(required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("joao@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("joao").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("joao@nodot").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(11) 99999-9999").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("1234").is_err());
    }

    #[test]
    fn test_validate_customer_collects_all_errors() {
        let customer = Customer::default();
        let errors = validate_customer(&customer);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_address() {
        let mut address = Address {
            street: "Rua das Flores".to_string(),
            number: "123".to_string(),
            complement: None,
            neighborhood: "Vila Madalena".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zip_code: "05433-000".to_string(),
        };
        assert!(validate_address(&address).is_empty());

        // complement stays optional
        address.complement = Some("Apto 42".to_string());
        assert!(validate_address(&address).is_empty());

        address.zip_code = String::new();
        let errors = validate_address(&address);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::Required { field } if field == "zipCode"
        ));
    }

    #[test]
    fn test_validate_card_fields() {
        let mut payment = PaymentDetails {
            method: Some(PaymentMethod::Credit),
            card_number: Some("4111 1111 1111 1111".to_string()),
            card_name: Some("JOAO SILVA".to_string()),
            card_expiry: Some("12/27".to_string()),
            card_cvv: Some("123".to_string()),
            change_for_cents: None,
        };
        assert!(validate_card_fields(&payment).is_empty());

        payment.card_cvv = None;
        assert_eq!(validate_card_fields(&payment).len(), 1);

        payment.card_number = Some("1234".to_string());
        assert!(validate_card_fields(&payment)
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidFormat { field, .. } if field == "cardNumber")));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(4590).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_change_for() {
        assert!(validate_change_for(None, 5180).is_ok());
        assert!(validate_change_for(Some(10000), 5180).is_ok());
        assert!(validate_change_for(Some(5000), 5180).is_err());
    }
}
