use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BudgetCategory, Category, Transaction};

/// Everything the dashboard persists, stored as one JSON document.
///
/// Fields are private: the only mutations are appending transactions (which
/// recomputes every `spent`) and replacing the budget configuration, and both
/// are driven by [`crate::store::FinanceStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    transactions: Vec<Transaction>,
    budget_categories: Vec<BudgetCategory>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    monthly_budget: Decimal,
}

const DEFAULT_MONTHLY_BUDGET: i64 = 3000;

const DEFAULT_ALLOCATIONS: &[(Category, i64)] = &[
    (Category::BillsAndUtilities, 1200),
    (Category::FoodAndDining, 600),
    (Category::Shopping, 400),
    (Category::Transportation, 300),
    (Category::Entertainment, 200),
    (Category::Healthcare, 150),
    (Category::Other, 150),
];

impl Default for FinancialData {
    fn default() -> Self {
        let categories = DEFAULT_ALLOCATIONS
            .iter()
            .map(|(cat, allocated)| {
                BudgetCategory::new(cat.as_str().to_string(), Decimal::from(*allocated))
            })
            .collect();
        Self::new(
            Vec::new(),
            categories,
            Decimal::from(DEFAULT_MONTHLY_BUDGET),
        )
    }
}

impl FinancialData {
    /// Assemble an aggregate, deriving `spent` from `transactions`.
    pub fn new(
        transactions: Vec<Transaction>,
        budget_categories: Vec<BudgetCategory>,
        monthly_budget: Decimal,
    ) -> Self {
        let mut data = Self {
            transactions,
            budget_categories,
            monthly_budget,
        };
        crate::budget::recompute_spent(&data.transactions, &mut data.budget_categories);
        data
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budget_categories(&self) -> &[BudgetCategory] {
        &self.budget_categories
    }

    pub fn monthly_budget(&self) -> Decimal {
        self.monthly_budget
    }

    pub(crate) fn append_transactions(&mut self, batch: Vec<Transaction>) {
        self.transactions.extend(batch);
        crate::budget::recompute_spent(&self.transactions, &mut self.budget_categories);
    }

    /// Overwrite the budget configuration. The supplied `spent` values are
    /// taken as-is.
    pub(crate) fn replace_budget(
        &mut self,
        monthly_budget: Decimal,
        categories: Vec<BudgetCategory>,
    ) {
        self.monthly_budget = monthly_budget;
        self.budget_categories = categories;
    }
}
