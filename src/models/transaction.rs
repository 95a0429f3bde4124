use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub description: String,
    /// Always a non-negative magnitude; direction lives in `kind`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Build an expense, normalizing the amount to its magnitude.
    pub fn expense(
        id: String,
        date: String,
        description: String,
        amount: Decimal,
        category: String,
    ) -> Self {
        Self {
            id,
            date,
            description,
            amount: amount.abs(),
            category,
            kind: TransactionType::Expense,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Transaction-table filter: case-insensitive description search plus an
    /// exact category match. `None` for either criterion means "any".
    pub fn matches(&self, search: Option<&str>, category: Option<&str>) -> bool {
        let matches_search = search.map_or(true, |s| {
            self.description
                .to_lowercase()
                .contains(&s.to_lowercase())
        });
        let matches_category = category.map_or(true, |c| self.category == c);
        matches_search && matches_category
    }
}
