/// Header keywords per column role, in the order they are listed for that role.
const DATE_KEYS: &[&str] = &["date"];
const DESCRIPTION_KEYS: &[&str] = &["description", "merchant", "name"];
const AMOUNT_KEYS: &[&str] = &["amount", "price", "total"];
const CATEGORY_KEYS: &[&str] = &["category"];

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) date: usize,
    pub(crate) description: usize,
    pub(crate) amount: usize,
    pub(crate) category: Option<usize>,
}

impl ColumnMap {
    /// Infer column roles from a raw header line.
    ///
    /// Returns the names of the required roles that could not be resolved
    /// when any of date, description or amount is missing.
    pub(crate) fn infer(header_line: &str) -> Result<Self, Vec<&'static str>> {
        let headers = split_header(header_line);

        let date = col_index(&headers, DATE_KEYS);
        let description = col_index(&headers, DESCRIPTION_KEYS);
        let amount = col_index(&headers, AMOUNT_KEYS);
        let category = col_index(&headers, CATEGORY_KEYS);

        match (date, description, amount) {
            (Some(date), Some(description), Some(amount)) => Ok(Self {
                date,
                description,
                amount,
                category,
            }),
            _ => {
                let mut missing = Vec::new();
                if date.is_none() {
                    missing.push("date");
                }
                if description.is_none() {
                    missing.push("description");
                }
                if amount.is_none() {
                    missing.push("amount");
                }
                Err(missing)
            }
        }
    }
}

fn split_header(line: &str) -> Vec<String> {
    line.split(',').map(|h| h.trim().to_lowercase()).collect()
}

/// First column (left to right) whose header contains any of `keys`.
fn col_index(headers: &[String], keys: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| keys.iter().any(|k| h.contains(k)))
}

#[cfg(test)]
#[path = "columns_tests.rs"]
mod tests;
