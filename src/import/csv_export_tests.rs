#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::import::CsvImporter;
use crate::models::TransactionType;

fn sample() -> Vec<Transaction> {
    let mut refund = Transaction::expense(
        "2".into(),
        "2024-01-16".into(),
        "Refund".into(),
        dec!(20),
        "Shopping".into(),
    );
    refund.kind = TransactionType::Income;
    vec![
        Transaction::expense(
            "1".into(),
            "2024-01-15".into(),
            "Starbucks".into(),
            dec!(4.5),
            "Food & Dining".into(),
        ),
        refund,
    ]
}

fn export_to_string(txns: &[Transaction]) -> (usize, String) {
    let mut buf = Vec::new();
    let count = export_transactions(txns, &mut buf).unwrap();
    (count, String::from_utf8(buf).unwrap())
}

#[test]
fn test_export_layout() {
    let (count, text) = export_to_string(&sample());
    assert_eq!(count, 2);
    assert_eq!(
        text,
        "date,description,amount,category,type\n\
         2024-01-15,Starbucks,4.50,Food & Dining,expense\n\
         2024-01-16,Refund,20.00,Shopping,income\n"
    );
}

#[test]
fn test_export_empty_writes_header_only() {
    let (count, text) = export_to_string(&[]);
    assert_eq!(count, 0);
    assert_eq!(text, "date,description,amount,category,type\n");
}

#[test]
fn test_export_quotes_commas() {
    let txns = vec![Transaction::expense(
        "1".into(),
        "2024-01-15".into(),
        "Dinner, tip included".into(),
        dec!(60),
        "Food & Dining".into(),
    )];
    let (_, text) = export_to_string(&txns);
    assert!(text.contains("\"Dinner, tip included\""));
}

#[test]
fn test_export_is_importable() {
    let (_, text) = export_to_string(&sample());
    let batch = CsvImporter::default().parse_text(&text).unwrap();
    assert_eq!(batch.skipped_rows, 0);
    assert_eq!(batch.transactions.len(), 2);
    assert_eq!(batch.transactions[0].description, "Starbucks");
    assert_eq!(batch.transactions[0].amount, dec!(4.50));
    assert_eq!(batch.transactions[0].category, "Food & Dining");
    // imported rows are always expenses
    assert!(batch.transactions[1].is_expense());
}

#[test]
fn test_quoted_comma_row_does_not_reimport() {
    let txns = vec![Transaction::expense(
        "1".into(),
        "2024-01-15".into(),
        "Dinner, tip included".into(),
        dec!(60),
        "Food & Dining".into(),
    )];
    let (_, text) = export_to_string(&txns);
    let batch = CsvImporter::default().parse_text(&text).unwrap();
    assert!(batch.transactions.is_empty());
    assert_eq!(batch.skipped_rows, 1);
}
