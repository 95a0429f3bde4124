mod summary;

pub(crate) use summary::{spending_by_category, CategoryStatus, DashboardSummary, DAYS_PER_MONTH};

use rust_decimal::Decimal;

use crate::models::{BudgetCategory, Transaction};

/// Set every category's `spent` to the total of the expense transactions
/// filed under its name.
///
/// Transactions whose category has no configured budget are ignored here;
/// no budget category is created for them.
/// Sum of `amounts`, pinned at `Decimal::MAX` rather than overflowing.
pub(crate) fn saturating_total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

pub(crate) fn recompute_spent(transactions: &[Transaction], categories: &mut [BudgetCategory]) {
    for cat in categories.iter_mut() {
        cat.spent = saturating_total(
            transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == cat.name)
                .map(|t| t.amount),
        );
    }
    tracing::trace!(
        transactions = transactions.len(),
        categories = categories.len(),
        "recomputed category spend"
    );
}

#[cfg(test)]
mod tests;
