/// Spending categories the categorizer can assign.
///
/// CSV files with their own category column may carry labels outside this
/// set; those are kept verbatim on the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FoodAndDining,
    Transportation,
    Shopping,
    BillsAndUtilities,
    Entertainment,
    Healthcare,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display name. Unknown labels map to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().to_lowercase() == lower)
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::FoodAndDining,
            Self::Transportation,
            Self::Shopping,
            Self::BillsAndUtilities,
            Self::Entertainment,
            Self::Healthcare,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
