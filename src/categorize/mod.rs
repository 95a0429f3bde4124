use crate::models::Category;

/// One rule: any keyword found in the description assigns `category`.
#[derive(Debug, Clone)]
pub(crate) struct KeywordRule {
    pub(crate) category: Category,
    keywords: Vec<String>,
}

impl KeywordRule {
    pub(crate) fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub(crate) fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// `desc_lower` must already be lower-cased.
    fn matches(&self, desc_lower: &str) -> bool {
        self.keywords.iter().any(|k| desc_lower.contains(k.as_str()))
    }
}

/// Ordered keyword rules. Rules are tested top to bottom and the first hit
/// wins, so a description like "uber eats coffee" lands in Food & Dining.
#[derive(Debug, Clone)]
pub(crate) struct RuleTable {
    rules: Vec<KeywordRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: vec![
                KeywordRule::new(
                    Category::FoodAndDining,
                    &["grocery", "supermarket", "whole foods", "trader joe"],
                ),
                KeywordRule::new(
                    Category::FoodAndDining,
                    &["restaurant", "cafe", "starbucks", "coffee"],
                ),
                KeywordRule::new(Category::Transportation, &["gas", "fuel", "uber", "lyft"]),
                KeywordRule::new(
                    Category::BillsAndUtilities,
                    &["electric", "water", "internet", "phone"],
                ),
                KeywordRule::new(Category::Shopping, &["amazon", "target", "walmart"]),
                KeywordRule::new(
                    Category::Entertainment,
                    &["netflix", "spotify", "movie", "theater"],
                ),
                KeywordRule::new(
                    Category::Healthcare,
                    &["doctor", "hospital", "pharmacy", "medical"],
                ),
            ],
        }
    }
}

impl RuleTable {
    /// Append a rule below every existing one.
    pub(crate) fn with_rule(mut self, rule: KeywordRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub(crate) fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Never fails: descriptions that hit no rule are `Other`.
    pub(crate) fn categorize(&self, description: &str) -> Category {
        let desc_lower = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&desc_lower))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }
}
