use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use super::columns::ColumnMap;
use crate::categorize::RuleTable;
use crate::models::Transaction;

/// Leading number of an already-sanitized amount: sign, integer digits, fraction.
#[allow(clippy::expect_used)]
static AMOUNT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?([0-9]*)(?:\.([0-9]*))?").expect("amount pattern is valid")
});

const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// File-level import failures. Row-level problems never surface here; those
/// rows are dropped and counted in [`ImportBatch::skipped_rows`].
#[derive(Debug, Error)]
pub(crate) enum ImportError {
    #[error("CSV file is empty or invalid")]
    EmptyOrInvalidInput,
    #[error(
        "CSV must have date, description, and amount columns (missing: {})",
        .missing.join(", ")
    )]
    MissingRequiredColumn { missing: Vec<&'static str> },
    #[error("Failed to read file: {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Transactions produced from one file in one call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ImportBatch {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) skipped_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CsvImporter {
    rules: RuleTable,
}

impl CsvImporter {
    pub(crate) fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Read a file and parse it. Every call yields a fresh batch with new ids,
    /// even for a file that was imported before.
    pub(crate) fn parse_file(&self, path: &Path) -> Result<ImportBatch, ImportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_text(&text)
    }

    pub(crate) fn parse_text(&self, text: &str) -> Result<ImportBatch, ImportError> {
        self.parse_text_at(text, Utc::now())
    }

    /// Parse CSV text as if ingested at `now`. `now` seeds transaction ids and
    /// the date used for rows with an empty date cell.
    pub(crate) fn parse_text_at(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<ImportBatch, ImportError> {
        let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
        if lines.len() < 2 {
            return Err(ImportError::EmptyOrInvalidInput);
        }

        let columns = ColumnMap::infer(lines[0])
            .map_err(|missing| ImportError::MissingRequiredColumn { missing })?;

        let stamp = now.timestamp_millis();
        let today = now.date_naive().format("%Y-%m-%d").to_string();
        let mut transactions = Vec::with_capacity(lines.len() - 1);
        let mut skipped_rows = 0;

        for (i, line) in lines.iter().enumerate().skip(1) {
            let values = split_row(line);
            if values.len() < 3 {
                skipped_rows += 1;
                continue;
            }

            let Some(amount) = values.get(columns.amount).and_then(|raw| parse_amount(raw))
            else {
                skipped_rows += 1;
                continue;
            };

            let date = values
                .get(columns.date)
                .filter(|d| !d.is_empty())
                .cloned()
                .unwrap_or_else(|| today.clone());

            let raw_description = values
                .get(columns.description)
                .map(String::as_str)
                .unwrap_or("");
            let description = if raw_description.is_empty() {
                UNKNOWN_DESCRIPTION.to_string()
            } else {
                raw_description.to_string()
            };

            // A present category cell is taken as-is, even when blank.
            let category = match columns.category.and_then(|c| values.get(c)) {
                Some(given) => given.clone(),
                None => self.rules.categorize(raw_description).as_str().to_string(),
            };

            transactions.push(Transaction::expense(
                format!("{stamp}_{i}"),
                date,
                description,
                amount,
                category,
            ));
        }

        tracing::debug!(
            imported = transactions.len(),
            skipped = skipped_rows,
            "parsed CSV batch"
        );

        Ok(ImportBatch {
            transactions,
            skipped_rows,
        })
    }
}

/// Split a data line on commas. No quoting rules: each value is trimmed and
/// loses one leading and one trailing double quote.
fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|v| {
            let v = v.trim();
            let v = v.strip_prefix('"').unwrap_or(v);
            let v = v.strip_suffix('"').unwrap_or(v);
            v.to_string()
        })
        .collect()
}

/// Parse an amount cell into its magnitude.
///
/// Everything except digits, `.` and `-` is discarded, then the longest
/// leading number is read, so `"$1,234.56"` is 1234.56 and `"12.5.1"` is 12.5.
/// Returns `None` when no digits are left, or when the integer part has
/// more digits than `Decimal` can hold (above roughly 7.9e28). Callers
/// count such rows as skipped.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let caps = AMOUNT_PREFIX.captures(&cleaned)?;
    let sign = caps.get(1).map_or("", |m| m.as_str());
    let int_part = caps.get(2).map_or("", |m| m.as_str());
    let frac_part = caps.get(3).map_or("", |m| m.as_str());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let normalized = if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    };
    Decimal::from_str(&normalized).ok().map(|d| d.abs())
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
