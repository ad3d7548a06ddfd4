//! Dashboard aggregation service.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{CategoryBreakdownEntry, DashboardSummary, MonthlyBucket, Totals};
use crate::transaction::{Direction, TransactionRecord};

/// Number of transactions shown in the recent list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Service for computing dashboard summaries.
pub struct DashboardService;

impl DashboardService {
    /// Sums absolute income and expense amounts.
    #[must_use]
    pub fn compute_totals(transactions: &[TransactionRecord]) -> Totals {
        let (total_income, total_expenses) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), tx| match tx.direction {
                Direction::Income => (income.saturating_add(tx.absolute_amount()), expenses),
                Direction::Expense => (income, expenses.saturating_add(tx.absolute_amount())),
            },
        );

        Totals {
            total_income,
            total_expenses,
            net_balance: total_income.saturating_sub(total_expenses),
        }
    }

    /// Groups transactions by resolved category name.
    ///
    /// Transactions whose category is only a reference, or absent, are left
    /// out. Entries are ordered by descending amount; ties keep the order in
    /// which categories were first seen. Percentages are rounded half away
    /// from zero and need not sum to exactly 100.
    #[must_use]
    pub fn breakdown_by_category(
        transactions: &[TransactionRecord],
    ) -> Vec<CategoryBreakdownEntry> {
        let mut entries: Vec<CategoryBreakdownEntry> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for tx in transactions {
            let Some(category) = tx.resolved_category() else {
                continue;
            };
            if let Some(&i) = index.get(category.name.as_str()) {
                entries[i].total_amount =
                    entries[i].total_amount.saturating_add(tx.absolute_amount());
            } else {
                index.insert(category.name.as_str(), entries.len());
                entries.push(CategoryBreakdownEntry {
                    category_name: category.name.clone(),
                    total_amount: tx.absolute_amount(),
                    color: category.color.clone(),
                    percentage_of_total: 0,
                });
            }
        }

        let grand_total = entries
            .iter()
            .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.total_amount));
        for entry in &mut entries {
            entry.percentage_of_total = Self::percentage(entry.total_amount, grand_total);
        }

        entries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        entries
    }

    /// Buckets transactions by `YYYY-MM`, oldest month first.
    ///
    /// Undated transactions are skipped.
    #[must_use]
    pub fn monthly_series(transactions: &[TransactionRecord]) -> Vec<MonthlyBucket> {
        let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

        for tx in transactions {
            let Some(date) = tx.occurred_on else {
                continue;
            };
            let bucket = months
                .entry(date.format("%Y-%m").to_string())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            match tx.direction {
                Direction::Income => bucket.0 = bucket.0.saturating_add(tx.absolute_amount()),
                Direction::Expense => bucket.1 = bucket.1.saturating_add(tx.absolute_amount()),
            }
        }

        months
            .into_iter()
            .map(|(month, (income, expenses))| MonthlyBucket {
                month,
                income,
                expenses,
                net: income.saturating_sub(expenses),
            })
            .collect()
    }

    /// Returns the `limit` newest transactions, newest first.
    ///
    /// Same-day transactions keep their input order; undated ones sort last.
    #[must_use]
    pub fn recent_transactions(
        transactions: &[TransactionRecord],
        limit: usize,
    ) -> Vec<TransactionRecord> {
        let mut sorted = transactions.to_vec();
        // `None` < `Some`, so comparing b to a puts undated records last.
        sorted.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
        sorted.truncate(limit);
        sorted
    }

    /// Builds the full dashboard view.
    ///
    /// The category breakdown covers expenses only.
    #[must_use]
    pub fn summarize(transactions: &[TransactionRecord]) -> DashboardSummary {
        let expenses: Vec<TransactionRecord> = transactions
            .iter()
            .filter(|tx| tx.direction == Direction::Expense)
            .cloned()
            .collect();

        DashboardSummary {
            totals: Self::compute_totals(transactions),
            category_breakdown: Self::breakdown_by_category(&expenses),
            monthly: Self::monthly_series(transactions),
            recent_transactions: Self::recent_transactions(transactions, DEFAULT_RECENT_LIMIT),
        }
    }

    fn percentage(part: Decimal, total: Decimal) -> u8 {
        if total.is_zero() {
            return 0;
        }
        (part / total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u8()
            .unwrap_or(0)
    }
}
