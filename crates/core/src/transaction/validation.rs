//! Validation of client-submitted transactions.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::types::Direction;
use crate::validation::{ValidationError, required_text};

/// Maximum description length.
pub const MAX_DESCRIPTION: usize = 200;

/// Largest accepted transaction amount.
///
/// Dashboard sums stay exact for tens of quadrillions of records at this size.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted number of decimal places.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Transaction fields as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInput {
    /// Free-text description.
    pub description: Option<String>,
    /// Positive amount.
    pub amount: Option<Decimal>,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub direction: Option<String>,
    /// Category object ID.
    pub category: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: Option<String>,
}

/// A validated transaction ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Description.
    pub description: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Income or expense.
    pub direction: Direction,
    /// Category object ID.
    pub category_id: Option<String>,
    /// Date of the transaction.
    pub occurred_on: NaiveDate,
}

/// Validated changes to an existing transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New direction.
    pub direction: Option<Direction>,
    /// Category change: `Some(None)` detaches the category.
    pub category_id: Option<Option<String>>,
    /// New date.
    pub occurred_on: Option<NaiveDate>,
}

impl TransactionPatch {
    /// Returns true when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.direction.is_none()
            && self.category_id.is_none()
            && self.occurred_on.is_none()
    }
}

impl TransactionInput {
    /// Validates a full transaction for creation.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let description =
            required_text(self.description.as_deref(), "Description", MAX_DESCRIPTION)?;
        let amount = positive_amount(self.amount.ok_or(ValidationError::Required("Amount"))?)?;
        let direction = self
            .direction
            .as_deref()
            .ok_or(ValidationError::Required("Type"))?
            .parse()?;
        let occurred_on = parse_date(self.date.as_deref().ok_or(ValidationError::Required("Date"))?)?;

        Ok(NewTransaction {
            description,
            amount,
            direction,
            category_id: non_blank(self.category.as_deref()),
            occurred_on,
        })
    }

    /// Validates only the fields present, for updates.
    ///
    /// # Errors
    ///
    /// Returns the first present field that fails validation.
    pub fn validate_patch(&self) -> Result<TransactionPatch, ValidationError> {
        Ok(TransactionPatch {
            description: self
                .description
                .as_deref()
                .map(|d| required_text(Some(d), "Description", MAX_DESCRIPTION))
                .transpose()?,
            amount: self.amount.map(positive_amount).transpose()?,
            direction: self.direction.as_deref().map(str::parse).transpose()?,
            // A blank category clears it; an absent one leaves it alone.
            category_id: self.category.as_deref().map(|c| non_blank(Some(c))),
            occurred_on: self.date.as_deref().map(parse_date).transpose()?,
        })
    }
}

/// Parses `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDate` for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required("Date"));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

fn positive_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT || amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(ValidationError::AmountOutOfRange {
            max: MAX_AMOUNT,
            scale: MAX_AMOUNT_SCALE,
        });
    }
    Ok(amount)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
