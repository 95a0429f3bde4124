mod budget;
mod category;
mod financial_data;
mod transaction;

pub use budget::BudgetCategory;
pub use category::Category;
pub use financial_data::FinancialData;
pub use transaction::{Transaction, TransactionType};
