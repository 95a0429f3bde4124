#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{BudgetCategory, FinancialData, Transaction, TransactionType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn expense(category: &str, amount: Decimal) -> Transaction {
    Transaction::expense(
        format!("t_{category}_{amount}"),
        "2024-06-15".into(),
        "Test".into(),
        amount,
        category.into(),
    )
}

fn income(category: &str, amount: Decimal) -> Transaction {
    Transaction {
        kind: TransactionType::Income,
        ..expense(category, amount)
    }
}

fn cat(name: &str, allocated: Decimal, spent: Decimal) -> BudgetCategory {
    BudgetCategory {
        name: name.into(),
        allocated,
        spent,
    }
}

fn spent_of(categories: &[BudgetCategory], name: &str) -> Decimal {
    BudgetCategory::find_by_name(categories, name).unwrap().spent
}

// ── recompute_spent ───────────────────────────────────────────

#[test]
fn test_recompute_sums_expenses_per_category() {
    let txns = vec![
        expense("Shopping", dec!(10.50)),
        expense("Shopping", dec!(4.50)),
        expense("Healthcare", dec!(34.21)),
    ];
    let mut cats = vec![
        cat("Shopping", dec!(400), Decimal::ZERO),
        cat("Healthcare", dec!(150), Decimal::ZERO),
        cat("Other", dec!(150), dec!(99)),
    ];
    recompute_spent(&txns, &mut cats);
    assert_eq!(spent_of(&cats, "Shopping"), dec!(15.00));
    assert_eq!(spent_of(&cats, "Healthcare"), dec!(34.21));
    assert_eq!(spent_of(&cats, "Other"), Decimal::ZERO);
}

#[test]
fn test_recompute_ignores_income() {
    let txns = vec![expense("Other", dec!(20)), income("Other", dec!(500))];
    let mut cats = vec![cat("Other", dec!(150), Decimal::ZERO)];
    recompute_spent(&txns, &mut cats);
    assert_eq!(spent_of(&cats, "Other"), dec!(20));
}

#[test]
fn test_recompute_does_not_create_categories() {
    let txns = vec![expense("Travel", dec!(300)), expense("Shopping", dec!(5))];
    let mut cats = vec![cat("Shopping", dec!(400), Decimal::ZERO)];
    recompute_spent(&txns, &mut cats);
    assert_eq!(cats.len(), 1);
    assert_eq!(spent_of(&cats, "Shopping"), dec!(5));
}

#[test]
fn test_recompute_is_case_sensitive() {
    let txns = vec![expense("shopping", dec!(5))];
    let mut cats = vec![cat("Shopping", dec!(400), Decimal::ZERO)];
    recompute_spent(&txns, &mut cats);
    assert_eq!(spent_of(&cats, "Shopping"), Decimal::ZERO);
}

#[test]
fn test_recompute_is_idempotent() {
    let txns = vec![expense("Shopping", dec!(12)), expense("Other", dec!(3))];
    let mut once = FinancialData::default().budget_categories().to_vec();
    recompute_spent(&txns, &mut once);
    let mut twice = once.clone();
    recompute_spent(&txns, &mut twice);
    assert_eq!(once, twice);
}

#[test]
fn test_recompute_consistency_over_many_sets() {
    let labels = ["Shopping", "Other", "Travel", "Food & Dining"];
    for n in 0..40u32 {
        let txns: Vec<Transaction> = (0..n)
            .map(|i| {
                let label = labels[(i as usize * 7 + n as usize) % labels.len()];
                let amount = Decimal::new(i64::from(i * 137 % 10_000), 2);
                if i % 5 == 0 {
                    income(label, amount)
                } else {
                    expense(label, amount)
                }
            })
            .collect();
        let mut cats = FinancialData::default().budget_categories().to_vec();
        recompute_spent(&txns, &mut cats);

        for c in &cats {
            let expected: Decimal = txns
                .iter()
                .filter(|t| t.category == c.name && t.kind == TransactionType::Expense)
                .map(|t| t.amount)
                .sum();
            assert_eq!(c.spent, expected, "mismatch for {} with n={n}", c.name);
        }
    }
}

#[test]
fn test_recompute_saturates_instead_of_overflowing() {
    let txns = vec![expense("Shopping", Decimal::MAX), expense("Shopping", dec!(1))];
    let mut cats = vec![cat("Shopping", dec!(400), Decimal::ZERO)];
    recompute_spent(&txns, &mut cats);
    assert_eq!(spent_of(&cats, "Shopping"), Decimal::MAX);
}

#[test]
fn test_saturating_total() {
    assert_eq!(saturating_total([dec!(1.5), dec!(2.25)]), dec!(3.75));
    assert_eq!(saturating_total(Vec::new()), Decimal::ZERO);
    assert_eq!(saturating_total([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
}

#[test]
fn test_append_scenario_shopping_150() {
    let mut data = FinancialData::new(
        vec![expense("Shopping", dec!(50))],
        FinancialData::default().budget_categories().to_vec(),
        dec!(3000),
    );
    let before = data.budget_categories().to_vec();
    assert_eq!(spent_of(&before, "Shopping"), dec!(50));

    data.append_transactions(vec![expense("Shopping", dec!(100))]);

    for c in data.budget_categories() {
        let old = BudgetCategory::find_by_name(&before, &c.name).unwrap();
        if c.name == "Shopping" {
            assert_eq!(c.spent, dec!(150));
        } else {
            assert_eq!(c.spent, old.spent);
        }
    }
}

// ── spending_by_category ──────────────────────────────────────

#[test]
fn test_spending_by_category_sorted_desc() {
    let txns = vec![
        expense("Shopping", dec!(10)),
        expense("Food & Dining", dec!(30)),
        expense("Shopping", dec!(25)),
        income("Income", dec!(1000)),
    ];
    let totals = spending_by_category(&txns);
    assert_eq!(
        totals,
        vec![
            ("Shopping".to_string(), dec!(35)),
            ("Food & Dining".to_string(), dec!(30)),
        ]
    );
}

#[test]
fn test_spending_by_category_ties_keep_first_seen() {
    let txns = vec![expense("B", dec!(5)), expense("A", dec!(5))];
    let totals = spending_by_category(&txns);
    assert_eq!(totals[0].0, "B");
    assert_eq!(totals[1].0, "A");
}

// ── DashboardSummary ──────────────────────────────────────────

#[test]
fn test_summary_of_default_data() {
    let summary = DashboardSummary::from_data(&FinancialData::default());
    assert_eq!(summary.total_spent, Decimal::ZERO);
    assert_eq!(summary.remaining, dec!(3000));
    assert!(summary.top_category.is_none());
    assert!(!summary.over_budget);
    assert_eq!(summary.transaction_count, 0);
}

#[test]
fn test_summary_includes_unbudgeted_spend() {
    let data = FinancialData::new(
        vec![
            expense("Travel", dec!(600)),
            expense("Shopping", dec!(300)),
            income("Income", dec!(5000)),
        ],
        FinancialData::default().budget_categories().to_vec(),
        dec!(3000),
    );
    let summary = DashboardSummary::from_data(&data);
    assert_eq!(summary.total_spent, dec!(900));
    assert_eq!(summary.remaining, dec!(2100));
    assert_eq!(summary.top_category, Some(("Travel".to_string(), dec!(600))));
    assert_eq!(summary.avg_daily, dec!(30));
    assert_eq!(summary.transaction_count, 3);
}

#[test]
fn test_summary_over_budget() {
    let data = FinancialData::new(
        vec![expense("Shopping", dec!(120))],
        Vec::new(),
        dec!(100),
    );
    let summary = DashboardSummary::from_data(&data);
    assert!(summary.over_budget);
    assert_eq!(summary.remaining, dec!(-20));
}

#[test]
fn test_summary_with_extreme_amounts() {
    let data = FinancialData::new(
        vec![expense("Shopping", Decimal::MAX), expense("Travel", dec!(1))],
        FinancialData::default().budget_categories().to_vec(),
        dec!(3000),
    );
    let summary = DashboardSummary::from_data(&data);
    assert_eq!(summary.total_spent, Decimal::MAX);
    assert_eq!(summary.remaining, dec!(3000) - Decimal::MAX);
    assert!(summary.over_budget);

    let totals = spending_by_category(&[
        expense("Shopping", Decimal::MAX),
        expense("Shopping", dec!(1)),
    ]);
    assert_eq!(totals, vec![("Shopping".to_string(), Decimal::MAX)]);
}

// ── CategoryStatus ────────────────────────────────────────────

#[test]
fn test_category_status_under_budget() {
    let status = CategoryStatus::of(&cat("Food & Dining", dec!(800), dec!(200)));
    assert_eq!(status.remaining, dec!(600));
    assert_eq!(status.percent_used, Some(dec!(25)));
    assert!(!status.is_over_budget);
}

#[test]
fn test_category_status_over_budget() {
    let status = CategoryStatus::of(&cat("Shopping", dec!(600), dec!(680)));
    assert_eq!(status.remaining, dec!(-80));
    assert!(status.is_over_budget);
}

#[test]
fn test_category_status_exactly_at_limit_is_not_over() {
    let status = CategoryStatus::of(&cat("Bills & Utilities", dec!(1200), dec!(1200)));
    assert_eq!(status.percent_used, Some(dec!(100)));
    assert!(!status.is_over_budget);
}

#[test]
fn test_category_status_zero_allocation() {
    let status = CategoryStatus::of(&cat("Other", Decimal::ZERO, dec!(5)));
    assert_eq!(status.percent_used, None);
    assert!(status.is_over_budget);
}

#[test]
fn test_category_status_all() {
    let statuses = CategoryStatus::all(&FinancialData::default());
    assert_eq!(statuses.len(), 7);
    assert!(statuses.iter().all(|s| s.percent_used == Some(Decimal::ZERO)));
}

#[test]
fn test_category_status_extreme_ratio() {
    let status = CategoryStatus::of(&cat("Shopping", dec!(0.01), Decimal::MAX));
    assert_eq!(status.percent_used, Some(Decimal::MAX));
    assert!(status.is_over_budget);

    let status = CategoryStatus::of(&cat("Shopping", Decimal::MAX, Decimal::MIN));
    assert_eq!(status.remaining, Decimal::MAX);
}
