//! # Validation Module
//!
//! Input validation for request data entering the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  ├── Type validation (JSON / query deserialization)                    │
//! │  └── THIS MODULE: format and business-rule checks                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Rule engine (pricing / tiering)                              │
//! │  └── Precondition checks → CoreError::InvalidArgument                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE(email), foreign keys                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::validation::{validate_email, validate_password};
//!
//! validate_email("alice@example.com").unwrap();
//! assert!(validate_password("password").is_err());
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum length of first/last names.
pub const MIN_NAME_LENGTH: usize = 2;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Passwords rejected regardless of length.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "1234567890",
    "qwertyui",
    "qwerty123",
    "iloveyou",
    "letmein1",
    "admin123",
];

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - `local@domain.tld` with a TLD of 2+ letters
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a new password.
///
/// ## Rules
/// - At least 8 characters, at most 128
/// - Not on the common-password list (case-insensitive)
///
/// ## Example
/// ```rust
/// use shop_core::validation::validate_password;
///
/// assert!(validate_password("securepass123").is_ok());
/// assert!(validate_password("short").is_err());
/// assert!(validate_password("Password").is_err());
/// ```
pub fn validate_password(password: &str) -> ValidationResult<()> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if length > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(ValidationError::TooCommon {
            field: "password".to_string(),
        });
    }

    Ok(())
}

/// Validates a first or last name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let length = name.trim().chars().count();

    if length == 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if length < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: MIN_NAME_LENGTH,
        });
    }

    if length > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an order quantity.
///
/// Any positive quantity is accepted; bulk orders are what the discount
/// tiers reward.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price or other amount.
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (free items)
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates a card number: 13-19 digits (spaces/dashes ignored) passing
/// the Luhn checksum.
///
/// ## Example
/// ```rust
/// use shop_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111 1111 1111 1111").is_ok());
/// assert!(validate_card_number("4111 1111 1111 1112").is_err());
/// ```
pub fn validate_card_number(card: &str) -> ValidationResult<()> {
    let digits = card_digits(card).ok_or_else(|| ValidationError::InvalidFormat {
        field: "card_number".to_string(),
        reason: "must contain only digits".to_string(),
    })?;

    if !(13..=19).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "card_number".to_string(),
            reason: "must be 13 to 19 digits".to_string(),
        });
    }

    if !luhn_valid(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "card_number".to_string(),
            reason: "checksum mismatch".to_string(),
        });
    }

    Ok(())
}

/// Masks a card number down to its last four digits, e.g. `**** 1111`.
pub fn mask_card_number(card: &str) -> String {
    let digits: Vec<u8> = card
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect();
    let tail: String = digits
        .iter()
        .skip(digits.len().saturating_sub(4))
        .map(|d| char::from(b'0' + d))
        .collect();
    format!("**** {}", tail)
}

fn card_digits(card: &str) -> Option<Vec<u8>> {
    card.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

fn luhn_valid(digits: &[u8]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("first.last+tag@shop.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("securepass123").is_ok());

        assert!(matches!(
            validate_password("short"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(matches!(
            validate_password("password"),
            Err(ValidationError::TooCommon { .. })
        ));
        assert!(validate_password("12345678").is_err());
        assert!(validate_password(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("first_name", "Alice").is_ok());
        assert!(validate_name("first_name", "A").is_err());
        assert!(validate_name("last_name", "   ").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("MacBook Pro 16").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("unit_price", 0.0).is_ok());
        assert!(validate_amount("unit_price", 10.99).is_ok());
        assert!(validate_amount("unit_price", -0.01).is_err());
        assert!(validate_amount("unit_price", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("4111111111111111").is_ok());
        assert!(validate_card_number("5500-0000-0000-0004").is_ok());

        assert!(validate_card_number("4111111111111112").is_err());
        assert!(validate_card_number("4111").is_err());
        assert!(validate_card_number("4111x11111111111").is_err());
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111 1111 1111 1111"), "**** 1111");
        assert_eq!(mask_card_number("12"), "**** 12");
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
