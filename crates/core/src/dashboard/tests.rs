//! Tests for dashboard aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{DEFAULT_RECENT_LIMIT, DashboardService};
use super::types::{MonthlyBucket, Totals};
use crate::transaction::{CategoryRef, CategorySummary, Direction, TransactionRecord};

fn tx(id: &str, direction: Direction, amount: Decimal, date: &str) -> TransactionRecord {
    TransactionRecord {
        id: id.to_string(),
        description: format!("tx {id}"),
        amount,
        direction,
        category: None,
        occurred_on: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
    }
}

fn with_category(mut record: TransactionRecord, name: &str, color: &str) -> TransactionRecord {
    record.category = Some(CategoryRef::Resolved(CategorySummary {
        id: Some(format!("cat-{name}")),
        name: name.to_string(),
        color: color.to_string(),
    }));
    record
}

#[test]
fn test_totals_of_empty_input_are_zero() {
    assert_eq!(DashboardService::compute_totals(&[]), Totals::default());
}

#[test]
fn test_totals_income_and_expense() {
    let txs = vec![
        tx("1", Direction::Income, dec!(100), "2024-01-01"),
        tx("2", Direction::Expense, dec!(40), "2024-01-02"),
    ];

    assert_eq!(
        DashboardService::compute_totals(&txs),
        Totals {
            total_income: dec!(100),
            total_expenses: dec!(40),
            net_balance: dec!(60),
        }
    );
}

#[test]
fn test_totals_use_absolute_amounts() {
    let txs = vec![
        tx("1", Direction::Income, dec!(-10.50), "2024-01-01"),
        tx("2", Direction::Expense, dec!(-20.25), "2024-01-02"),
    ];

    let totals = DashboardService::compute_totals(&txs);
    assert_eq!(totals.total_income, dec!(10.50));
    assert_eq!(totals.total_expenses, dec!(20.25));
    assert_eq!(totals.net_balance, dec!(-9.75));
}

#[test]
fn test_breakdown_merges_same_category() {
    let txs = vec![
        with_category(tx("1", Direction::Expense, dec!(30), "2024-01-01"), "Food", "#f00"),
        with_category(tx("2", Direction::Expense, dec!(70), "2024-01-02"), "Food", "#f00"),
    ];

    let breakdown = DashboardService::breakdown_by_category(&txs);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].category_name, "Food");
    assert_eq!(breakdown[0].total_amount, dec!(100));
    assert_eq!(breakdown[0].color, "#f00");
    assert_eq!(breakdown[0].percentage_of_total, 100);
}

#[test]
fn test_breakdown_skips_unresolved_categories() {
    let mut referenced = tx("2", Direction::Expense, dec!(500), "2024-01-02");
    referenced.category = Some(CategoryRef::Reference("cat-rent".into()));
    let txs = vec![
        with_category(tx("1", Direction::Expense, dec!(50), "2024-01-01"), "Food", "#f00"),
        referenced,
        tx("3", Direction::Expense, dec!(25), "2024-01-03"),
    ];

    let breakdown = DashboardService::breakdown_by_category(&txs);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].total_amount, dec!(50));
    assert_eq!(breakdown[0].percentage_of_total, 100);
}

#[test]
fn test_breakdown_orders_by_amount_with_stable_ties() {
    let txs = vec![
        with_category(tx("1", Direction::Expense, dec!(10), "2024-01-01"), "Fun", "#111"),
        with_category(tx("2", Direction::Expense, dec!(60), "2024-01-01"), "Rent", "#222"),
        with_category(tx("3", Direction::Expense, dec!(10), "2024-01-01"), "Gym", "#333"),
        with_category(tx("4", Direction::Expense, dec!(20), "2024-01-01"), "Food", "#444"),
    ];

    let names: Vec<_> = DashboardService::breakdown_by_category(&txs)
        .into_iter()
        .map(|e| (e.category_name, e.percentage_of_total))
        .collect();

    assert_eq!(
        names,
        vec![
            ("Rent".to_string(), 60),
            ("Food".to_string(), 20),
            ("Fun".to_string(), 10),
            ("Gym".to_string(), 10),
        ]
    );
}

#[test]
fn test_breakdown_rounds_half_away_from_zero() {
    // 1/8 = 12.5% -> 13, 7/8 = 87.5% -> 88
    let txs = vec![
        with_category(tx("1", Direction::Expense, dec!(1), "2024-01-01"), "A", "#111"),
        with_category(tx("2", Direction::Expense, dec!(7), "2024-01-01"), "B", "#222"),
    ];

    let breakdown = DashboardService::breakdown_by_category(&txs);
    assert_eq!(breakdown[0].percentage_of_total, 88);
    assert_eq!(breakdown[1].percentage_of_total, 13);
}

#[test]
fn test_breakdown_of_zero_amounts_has_zero_percent() {
    let txs = vec![with_category(
        tx("1", Direction::Expense, Decimal::ZERO, "2024-01-01"),
        "Food",
        "#f00",
    )];

    let breakdown = DashboardService::breakdown_by_category(&txs);
    assert_eq!(breakdown[0].percentage_of_total, 0);
}

#[test]
fn test_monthly_series_groups_by_month() {
    let txs = vec![
        tx("2", Direction::Expense, dec!(20), "2024-02-01"),
        tx("1", Direction::Income, dec!(50), "2024-01-15"),
    ];

    assert_eq!(
        DashboardService::monthly_series(&txs),
        vec![
            MonthlyBucket {
                month: "2024-01".into(),
                income: dec!(50),
                expenses: dec!(0),
                net: dec!(50),
            },
            MonthlyBucket {
                month: "2024-02".into(),
                income: dec!(0),
                expenses: dec!(20),
                net: dec!(-20),
            },
        ]
    );
}

#[test]
fn test_monthly_series_orders_across_years_and_skips_undated() {
    let mut undated = tx("x", Direction::Income, dec!(999), "2024-01-01");
    undated.occurred_on = None;
    let txs = vec![
        tx("1", Direction::Income, dec!(5), "2024-01-31"),
        undated,
        tx("2", Direction::Expense, dec!(3), "2023-12-01"),
        tx("3", Direction::Expense, dec!(1), "2024-01-01"),
    ];

    let months: Vec<_> = DashboardService::monthly_series(&txs)
        .into_iter()
        .map(|b| (b.month, b.net))
        .collect();
    assert_eq!(
        months,
        vec![("2023-12".to_string(), dec!(-3)), ("2024-01".to_string(), dec!(4))]
    );
}

#[test]
fn test_recent_transactions_truncates_newest_first() {
    let txs: Vec<_> = (1..=7)
        .map(|day| {
            tx(
                &day.to_string(),
                Direction::Expense,
                dec!(1),
                &format!("2024-05-0{day}"),
            )
        })
        .collect();

    let recent = DashboardService::recent_transactions(&txs, DEFAULT_RECENT_LIMIT);
    let ids: Vec<_> = recent.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["7", "6", "5", "4", "3"]);
}

#[test]
fn test_recent_transactions_puts_undated_last() {
    let mut undated = tx("u", Direction::Expense, dec!(1), "2024-01-01");
    undated.occurred_on = None;
    let txs = vec![
        undated,
        tx("a", Direction::Expense, dec!(1), "2024-01-02"),
        tx("b", Direction::Expense, dec!(1), "2024-01-02"),
    ];

    let ids: Vec<_> = DashboardService::recent_transactions(&txs, 10)
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "u"]);
}

#[test]
fn test_summarize_breaks_down_expenses_only() {
    let txs = vec![
        with_category(tx("1", Direction::Income, dec!(1000), "2024-01-01"), "Salary", "#0f0"),
        with_category(tx("2", Direction::Expense, dec!(100), "2024-01-02"), "Food", "#f00"),
    ];

    let summary = DashboardService::summarize(&txs);
    assert_eq!(summary.totals.net_balance, dec!(900));
    assert_eq!(summary.category_breakdown.len(), 1);
    assert_eq!(summary.category_breakdown[0].category_name, "Food");
    assert_eq!(summary.monthly.len(), 1);
    assert_eq!(summary.recent_transactions[0].id, "2");
}

fn arb_transaction() -> impl Strategy<Value = TransactionRecord> {
    (
        any::<bool>(),
        -1_000_000i64..1_000_000,
        0usize..4,
        2020i32..2026,
        1u32..13,
        1u32..29,
    )
        .prop_map(|(income, cents, cat, year, month, day)| {
            let names = ["Food", "Rent", "Fun", "Travel"];
            TransactionRecord {
                id: format!("{year}-{month}-{day}-{cents}"),
                description: String::new(),
                amount: Decimal::new(cents, 2),
                direction: if income {
                    Direction::Income
                } else {
                    Direction::Expense
                },
                category: Some(CategoryRef::Resolved(CategorySummary {
                    id: None,
                    name: names[cat].to_string(),
                    color: "#000".to_string(),
                })),
                occurred_on: NaiveDate::from_ymd_opt(year, month, day),
            }
        })
}

#[test]
fn test_extreme_amounts_saturate_instead_of_overflowing() {
    let txs = vec![
        with_category(tx("1", Direction::Income, Decimal::MAX, "2024-01-01"), "Big", "#000"),
        with_category(tx("2", Direction::Income, Decimal::MAX, "2024-01-02"), "Big", "#000"),
        tx("3", Direction::Expense, Decimal::MAX, "2024-01-03"),
        tx("4", Direction::Expense, Decimal::MAX, "2024-01-04"),
    ];

    let summary = DashboardService::summarize(&txs);
    assert_eq!(summary.totals.total_income, Decimal::MAX);
    assert_eq!(summary.totals.total_expenses, Decimal::MAX);
    assert_eq!(summary.totals.net_balance, Decimal::ZERO);
    assert_eq!(summary.monthly[0].income, Decimal::MAX);
    assert_eq!(summary.monthly[0].net, Decimal::ZERO);

    let breakdown = DashboardService::breakdown_by_category(&txs);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].total_amount, Decimal::MAX);
    assert_eq!(breakdown[0].percentage_of_total, 100);
}

#[test]
fn test_net_reaches_negative_maximum() {
    let txs = vec![
        tx("1", Direction::Expense, Decimal::MAX, "2024-01-01"),
        tx("2", Direction::Income, dec!(0), "2024-01-01"),
    ];
    let totals = DashboardService::compute_totals(&txs);
    assert_eq!(totals.net_balance, -Decimal::MAX);
}

proptest! {
    /// Net balance is always income minus expenses, both non-negative.
    #[test]
    fn prop_totals_balance(txs in prop::collection::vec(arb_transaction(), 0..50)) {
        let totals = DashboardService::compute_totals(&txs);
        prop_assert!(totals.total_income >= Decimal::ZERO);
        prop_assert!(totals.total_expenses >= Decimal::ZERO);
        prop_assert_eq!(totals.net_balance, totals.total_income - totals.total_expenses);
    }

    /// Monthly buckets partition the totals and are strictly ascending.
    #[test]
    fn prop_monthly_matches_totals(txs in prop::collection::vec(arb_transaction(), 0..50)) {
        let totals = DashboardService::compute_totals(&txs);
        let months = DashboardService::monthly_series(&txs);

        let income: Decimal = months.iter().map(|m| m.income).sum();
        let expenses: Decimal = months.iter().map(|m| m.expenses).sum();
        prop_assert_eq!(income, totals.total_income);
        prop_assert_eq!(expenses, totals.total_expenses);
        prop_assert!(months.windows(2).all(|w| w[0].month < w[1].month));
        prop_assert!(months.iter().all(|m| m.net == m.income - m.expenses));
    }

    /// Breakdown amounts sum to the grand total and are sorted descending.
    #[test]
    fn prop_breakdown_sorted_and_complete(txs in prop::collection::vec(arb_transaction(), 0..50)) {
        let breakdown = DashboardService::breakdown_by_category(&txs);
        let total: Decimal = txs.iter().map(TransactionRecord::absolute_amount).sum();
        let summed: Decimal = breakdown.iter().map(|e| e.total_amount).sum();

        prop_assert_eq!(summed, total);
        prop_assert!(breakdown.windows(2).all(|w| w[0].total_amount >= w[1].total_amount));
        prop_assert!(breakdown.iter().all(|e| e.percentage_of_total <= 100));
    }

    /// Aggregation is deterministic and leaves its input untouched.
    #[test]
    fn prop_aggregation_is_pure(txs in prop::collection::vec(arb_transaction(), 0..30)) {
        let before = txs.clone();
        let first = DashboardService::summarize(&txs);
        let second = DashboardService::summarize(&txs);
        prop_assert_eq!(first, second);
        prop_assert_eq!(txs, before);
    }

    /// Recent list is bounded and newest first.
    #[test]
    fn prop_recent_bounded(
        txs in prop::collection::vec(arb_transaction(), 0..30),
        limit in 0usize..10,
    ) {
        let recent = DashboardService::recent_transactions(&txs, limit);
        prop_assert_eq!(recent.len(), txs.len().min(limit));
        prop_assert!(recent.windows(2).all(|w| w[0].occurred_on >= w[1].occurred_on));
    }
}
