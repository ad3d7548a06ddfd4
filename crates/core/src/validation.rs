//! Input validation errors shared by the domain modules.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation errors for user-supplied records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// A text field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// Email address is malformed.
    #[error("Email is invalid")]
    InvalidEmail,

    /// Password is shorter than the minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum length in characters.
        min: usize,
    },

    /// Amount is zero or negative.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Amount is above the ceiling or has too many decimal places.
    #[error("Amount must be at most {max} with at most {scale} decimal places")]
    AmountOutOfRange {
        /// Largest accepted amount.
        max: Decimal,
        /// Largest accepted number of decimal places.
        scale: u32,
    },

    /// Direction is neither income nor expense.
    #[error("Type must be 'income' or 'expense', got '{0}'")]
    InvalidDirection(String),

    /// Date is not `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[error("Date '{0}' is invalid, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Color is not a hex color.
    #[error("Color '{0}' is invalid, expected #RGB or #RRGGBB")]
    InvalidColor(String),
}

/// Trims a required text field and enforces its length.
pub(crate) fn required_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value.to_string())
}
