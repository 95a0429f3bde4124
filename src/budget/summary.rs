use rust_decimal::Decimal;

use super::saturating_total;
use crate::models::{BudgetCategory, FinancialData, Transaction};

/// The dashboard spreads spending evenly over a 30-day month.
pub(crate) const DAYS_PER_MONTH: i64 = 30;

/// Expense totals per category label, largest first.
///
/// Labels appear once each; ties keep the order in which the label was
/// first seen in `transactions`.
pub(crate) fn spending_by_category(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, total)) => *total = total.saturating_add(txn.amount),
            None => totals.push((txn.category.clone(), txn.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Headline numbers for the overview screen.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DashboardSummary {
    /// All expenses, including categories without a configured budget.
    pub(crate) total_spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) top_category: Option<(String, Decimal)>,
    pub(crate) avg_daily: Decimal,
    pub(crate) over_budget: bool,
    pub(crate) transaction_count: usize,
}

impl DashboardSummary {
    pub(crate) fn from_data(data: &FinancialData) -> Self {
        let transactions = data.transactions();
        let total_spent =
            saturating_total(transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount));
        let top_category = spending_by_category(transactions).into_iter().next();

        Self {
            total_spent,
            remaining: data.monthly_budget().saturating_sub(total_spent),
            top_category,
            avg_daily: total_spent / Decimal::from(DAYS_PER_MONTH),
            over_budget: total_spent > data.monthly_budget(),
            transaction_count: transactions.len(),
        }
    }
}

/// Progress of one budget category against its allocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryStatus {
    pub(crate) name: String,
    pub(crate) allocated: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    /// `None` when nothing is allocated.
    pub(crate) percent_used: Option<Decimal>,
    pub(crate) is_over_budget: bool,
}

impl CategoryStatus {
    pub(crate) fn of(category: &BudgetCategory) -> Self {
        let percent_used = if category.allocated.is_zero() {
            None
        } else {
            // Ratios past the representable range read as fully over.
            let percent = category
                .spent
                .checked_div(category.allocated)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX);
            Some(percent)
        };
        Self {
            name: category.name.clone(),
            allocated: category.allocated,
            spent: category.spent,
            remaining: category.allocated.saturating_sub(category.spent),
            percent_used,
            is_over_budget: category.spent > category.allocated,
        }
    }

    pub(crate) fn all(data: &FinancialData) -> Vec<Self> {
        data.budget_categories().iter().map(Self::of).collect()
    }
}
