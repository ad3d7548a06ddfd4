//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionRecord;

/// Income and expense totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of absolute income amounts.
    pub total_income: Decimal,
    /// Sum of absolute expense amounts.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_balance: Decimal,
}

/// One category's share of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdownEntry {
    /// Category name.
    pub category_name: String,
    /// Sum of absolute amounts in this category.
    pub total_amount: Decimal,
    /// Category color.
    pub color: String,
    /// Rounded share of the grand total, 0-100.
    pub percentage_of_total: u8,
}

/// Cash flow for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// `YYYY-MM`.
    pub month: String,
    /// Absolute income in the month.
    pub income: Decimal,
    /// Absolute expenses in the month.
    pub expenses: Decimal,
    /// `income - expenses`.
    pub net: Decimal,
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Totals over all transactions.
    pub totals: Totals,
    /// Expense breakdown by category.
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
    /// Monthly cash flow, oldest first.
    pub monthly: Vec<MonthlyBucket>,
    /// Newest transactions first.
    pub recent_transactions: Vec<TransactionRecord>,
}
