//! Fixed-rule financial assistant.
//!
//! Answers a question about the stored transactions by picking the first
//! keyword branch the question hits. No model is consulted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::budget::{saturating_total, spending_by_category, DAYS_PER_MONTH};
use crate::models::Transaction;

/// Monthly spend the "compare" branch measures against.
const TYPICAL_MONTHLY_SPEND: i64 = 3000;

const NO_DATA_REPLY: &str = "I don't see any transactions yet. Upload a CSV file with your \
transaction data, and I'll help you analyze your spending patterns!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub(crate) role: Role,
    pub(crate) content: String,
}

impl ChatMessage {
    pub(crate) fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AssistantRequest {
    pub(crate) messages: Vec<ChatMessage>,
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum AssistantResponse {
    Message { message: String },
    Error { error: String, details: String },
}

/// Answer the last message of `request`.
pub(crate) fn respond(request: &AssistantRequest) -> AssistantResponse {
    match request.messages.last() {
        Some(last) => AssistantResponse::Message {
            message: reply(&last.content, &request.transactions),
        },
        None => AssistantResponse::Error {
            error: "Failed to get response".into(),
            details: "request contains no messages".into(),
        },
    }
}

pub(crate) fn reply(question: &str, transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return NO_DATA_REPLY.to_string();
    }

    let msg = question.to_lowercase();
    let asks = |words: &[&str]| words.iter().any(|w| msg.contains(w));

    let count = transactions.len();
    let categories = spending_by_category(transactions);
    let total = saturating_total(categories.iter().map(|(_, amount)| *amount));
    let top = categories.first();
    let top_name = |fallback: &'static str| top.map_or(fallback, |(name, _)| name.as_str());
    let top_amount = top.map_or_else(|| "0".to_string(), |(_, amount)| money(*amount));

    if asks(&["spend", "spent"]) {
        return format!(
            "Based on your {count} transactions, you've spent a total of ${}. Your biggest \
             spending category is {} at ${top_amount}.",
            money(total),
            top_name("Other"),
        );
    }

    if asks(&["save", "saving"]) {
        return format!(
            "To save money, I recommend: 1) Track your {} more carefully - it's your largest \
             expense at ${top_amount}. 2) Set a monthly budget and stick to it. 3) Look for \
             recurring subscriptions you might not need.",
            top_name("spending"),
        );
    }

    if asks(&["budget"]) {
        let suggested = total.saturating_mul(Decimal::new(11, 1)).ceil();
        return format!(
            "With {count} transactions totaling ${}, a good monthly budget might be around \
             ${suggested:.0}. This gives you a 10% buffer while keeping spending in check.",
            money(total),
        );
    }

    if asks(&["category", "categories"]) {
        let list = categories
            .iter()
            .take(3)
            .map(|(name, amount)| format!("{name}: ${}", money(*amount)))
            .collect::<Vec<_>>()
            .join(", ");
        return format!(
            "Your top spending categories are: {list}. Would you like tips on reducing \
             spending in any of these areas?"
        );
    }

    if asks(&["pattern", "trend", "habit"]) {
        let average = total / Decimal::from(count);
        let share = match top {
            Some((_, amount)) if !amount.is_zero() => {
                let pct = (*amount / total * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                format!("{pct:.0}")
            }
            _ => "0".to_string(),
        };
        return format!(
            "Looking at your {count} transactions, your average transaction is ${}. Your \
             spending is concentrated in {} (${top_amount}), which accounts for {share}% of \
             your total spending.",
            money(average),
            top_name("various categories"),
        );
    }

    if asks(&["advice", "tip", "help", "recommend"]) {
        return format!(
            "Here are some personalized tips: 1) You're spending across {} categories - \
             consider consolidating to better track your money. 2) Your top expense is {} - \
             look for alternatives or compare prices. 3) Set up alerts when you exceed your \
             budget in any category.",
            categories.len(),
            top_name("Other"),
        );
    }

    if asks(&["compare", "average", "normal"]) {
        let daily = total / Decimal::from(DAYS_PER_MONTH);
        let relation = if total > Decimal::from(TYPICAL_MONTHLY_SPEND) {
            "above"
        } else {
            "below"
        };
        return format!(
            "Your spending averages ${} per day, or about ${} per month. The typical person \
             spends $2,000-3,000/month on essentials. You're {relation} the average.",
            money(daily),
            money(total),
        );
    }

    format!(
        "I see you have {count} transactions totaling ${}. Your largest expense category is {} \
         at ${top_amount}. Try asking me about your spending patterns, savings tips, or budget \
         recommendations!",
        money(total),
        top_name("Other"),
    )
}

/// Two decimal places, half away from zero, no separators.
fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
