//! # Validation Module
//!
//! Input parsing and business rule checks for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompts (apps/console)                               │
//! │  ├── Not a number?  → re-prompt                                        │
//! │  └── Negative?      → abort the current operation                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_whole_number / parse_amount                                 │
//! │  └── validate_non_negative / validate_sale_quantity                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The only reply that confirms a destructive action.
pub const CONFIRMATION_WORD: &str = "yes";

// =============================================================================
// Parsers
// =============================================================================

/// Parses a whole number typed at a prompt. Negative numbers parse fine;
/// range checks are separate so callers can react to them differently.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::parse_whole_number;
///
/// assert_eq!(parse_whole_number("quantity", " 12 ").unwrap(), 12);
/// assert_eq!(parse_whole_number("quantity", "-4").unwrap(), -4);
/// assert!(parse_whole_number("quantity", "twelve").is_err());
/// ```
pub fn parse_whole_number(field: &str, input: &str) -> ValidationResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, "expected a whole number"))
}

/// Parses a decimal money amount typed at a prompt.
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    input.parse::<Money>().map_err(|err| match err {
        ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason,
        },
        other => other,
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a value is zero or greater (stock levels, prices, limits).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity to sell.
///
/// ## Rules
/// - Must be positive (> 0); selling zero units records nothing useful
///
/// Stock availability is checked separately by
/// [`Product::remaining_after_sale`](crate::Product::remaining_after_sale).
pub fn validate_sale_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Confirmation
// =============================================================================

/// Returns true when a reply confirms a destructive action.
///
/// Surrounding whitespace and letter case are ignored; anything other than
/// "yes" counts as a refusal.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::is_confirmation;
///
/// assert!(is_confirmation("  YES \n"));
/// assert!(!is_confirmation("y"));
/// ```
pub fn is_confirmation(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case(CONFIRMATION_WORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(parse_whole_number("id", "7").unwrap(), 7);
        assert_eq!(parse_whole_number("id", "0").unwrap(), 0);
        assert_eq!(parse_whole_number("id", "-1").unwrap(), -1);

        assert!(parse_whole_number("id", "").is_err());
        assert!(parse_whole_number("id", "1.5").is_err());
        assert!(parse_whole_number("id", "abc").is_err());
    }

    #[test]
    fn test_parse_amount_reports_field() {
        let err = parse_amount("price", "cheap").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "expected a number".to_string(),
            }
        );
        assert_eq!(parse_amount("price", "2.50").unwrap().cents(), 250);
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("quantity", 0).is_ok());
        assert!(validate_non_negative("quantity", 10).is_ok());
        assert!(validate_non_negative("quantity", -1).is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-3).is_err());
    }

    #[test]
    fn test_is_confirmation() {
        assert!(is_confirmation("yes"));
        assert!(is_confirmation("YES"));
        assert!(is_confirmation("  Yes  "));
        assert!(!is_confirmation("no"));
        assert!(!is_confirmation("yes please"));
        assert!(!is_confirmation(""));
    }
}
