use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly allocation for one category.
///
/// `spent` is derived from the transaction list by
/// [`crate::budget::recompute_spent`]; it is stored only so the persisted
/// document can be rendered without recomputing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub allocated: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub spent: Decimal,
}

impl BudgetCategory {
    pub fn new(name: String, allocated: Decimal) -> Self {
        Self {
            name,
            allocated,
            spent: Decimal::ZERO,
        }
    }

    /// Find a budget category by exact name in a slice.
    pub fn find_by_name<'a>(
        categories: &'a [BudgetCategory],
        name: &str,
    ) -> Option<&'a BudgetCategory> {
        categories.iter().find(|c| c.name == name)
    }
}
