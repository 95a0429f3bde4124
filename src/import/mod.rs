mod columns;
mod csv_export;
mod csv_import;

pub(crate) use csv_export::export_transactions;
pub(crate) use csv_import::{CsvImporter, ImportBatch, ImportError};
