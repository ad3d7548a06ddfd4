//! Transaction data types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl Direction {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ValidationError::InvalidDirection(other.to_string())),
        }
    }
}

/// Category fields embedded in a transaction when the store resolved it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Store object ID, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Hex color.
    pub color: String,
}

/// A transaction's category: embedded inline or only referenced by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// The related category was resolved inline.
    Resolved(CategorySummary),
    /// Only the category's object ID is known.
    Reference(String),
}

impl CategoryRef {
    /// Returns the embedded category, if resolved.
    #[must_use]
    pub const fn resolved(&self) -> Option<&CategorySummary> {
        match self {
            Self::Resolved(summary) => Some(summary),
            Self::Reference(_) => None,
        }
    }

    /// Returns the category's object ID when one is known.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Resolved(summary) => summary.id.as_deref(),
            Self::Reference(id) => Some(id),
        }
    }
}

/// A transaction as fetched from the store.
///
/// Treated as immutable input by aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Store object ID.
    pub id: String,
    /// Free-text description.
    pub description: String,
    /// Amount as stored; may carry a sign.
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Category, if any.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Calendar date the transaction happened on.
    #[serde(rename = "date", default)]
    pub occurred_on: Option<NaiveDate>,
}

impl TransactionRecord {
    /// Returns the unsigned amount.
    #[must_use]
    pub fn absolute_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// Returns the embedded category, if the store resolved it.
    #[must_use]
    pub fn resolved_category(&self) -> Option<&CategorySummary> {
        self.category.as_ref().and_then(CategoryRef::resolved)
    }
}
