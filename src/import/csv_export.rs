use anyhow::{Context, Result};
use std::io::Write;

use crate::models::Transaction;

const EXPORT_HEADER: [&str; 5] = ["date", "description", "amount", "category", "type"];

/// Write `transactions` as CSV with a header row the importer recognizes.
/// Returns the number of data rows written.
///
/// Fields containing commas are quoted per RFC 4180. The importer splits on
/// every comma, so such rows do not survive a re-import: they come back as
/// skipped rows or with shifted columns.
pub(crate) fn export_transactions<W: Write>(transactions: &[Transaction], out: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(EXPORT_HEADER)
        .context("Failed to write CSV header")?;

    for txn in transactions {
        let amount = format!("{:.2}", txn.amount);
        wtr.write_record([
            txn.date.as_str(),
            txn.description.as_str(),
            amount.as_str(),
            txn.category.as_str(),
            txn.kind.as_str(),
        ])
        .with_context(|| format!("Failed to write transaction {}", txn.id))?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(transactions.len())
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
