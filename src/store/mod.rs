//! Owner of the persisted [`FinancialData`] document.
//!
//! Every write to stored state goes through [`FinanceStore`]. Storage
//! failures never reach the caller: reads fall back to the default data and
//! writes become no-ops. Each swallowed failure is logged and recorded as a
//! [`StoreEvent`] that callers can inspect afterwards.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{BudgetCategory, FinancialData, Transaction};

pub(crate) const DEFAULT_STORAGE_KEY: &str = "pennywise_data";

/// Minimal string key-value backend.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// A persistence failure that was absorbed instead of returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreEvent {
    /// The backend could not be read; default data was used.
    ReadFailed { key: String, reason: String },
    /// A stored document existed but did not match the schema; default data
    /// was used.
    Corrupt { key: String, reason: String },
    /// The document could not be serialized; nothing was written.
    SerializeFailed { key: String, reason: String },
    /// The backend rejected the write.
    WriteFailed { key: String, reason: String },
    /// The backend rejected the removal.
    ClearFailed { key: String, reason: String },
}

impl std::fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailed { key, reason } => write!(f, "read of '{key}' failed: {reason}"),
            Self::Corrupt { key, reason } => write!(f, "stored '{key}' is invalid: {reason}"),
            Self::SerializeFailed { key, reason } => {
                write!(f, "could not serialize '{key}': {reason}")
            }
            Self::WriteFailed { key, reason } => write!(f, "write of '{key}' failed: {reason}"),
            Self::ClearFailed { key, reason } => write!(f, "clear of '{key}' failed: {reason}"),
        }
    }
}

pub(crate) struct FinanceStore<S: KeyValueStore> {
    backend: S,
    key: String,
    events: Vec<StoreEvent>,
}

impl<S: KeyValueStore> FinanceStore<S> {
    pub(crate) fn with_key(backend: S, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
            events: Vec::new(),
        }
    }

    /// Stored data, or the default when nothing usable is stored.
    pub(crate) fn load(&mut self) -> FinancialData {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return FinancialData::default(),
            Err(e) => {
                self.record(StoreEvent::ReadFailed {
                    key: self.key.clone(),
                    reason: format!("{e:#}"),
                });
                return FinancialData::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                self.record(StoreEvent::Corrupt {
                    key: self.key.clone(),
                    reason: e.to_string(),
                });
                FinancialData::default()
            }
        }
    }

    /// Write `data`. Failures are recorded, never returned.
    pub(crate) fn save(&mut self, data: &FinancialData) {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                self.record(StoreEvent::SerializeFailed {
                    key: self.key.clone(),
                    reason: e.to_string(),
                });
                return;
            }
        };
        if let Err(e) = self.backend.set(&self.key, &json) {
            self.record(StoreEvent::WriteFailed {
                key: self.key.clone(),
                reason: format!("{e:#}"),
            });
        }
    }

    /// Load, append `batch`, recompute category spend, save. Returns the
    /// merged data.
    pub(crate) fn append_transactions(&mut self, batch: Vec<Transaction>) -> FinancialData {
        let mut data = self.load();
        let added = batch.len();
        data.append_transactions(batch);
        self.save(&data);
        tracing::debug!(
            added,
            total = data.transactions().len(),
            "appended transactions"
        );
        data
    }

    /// Load, overwrite the budget configuration wholesale, save.
    ///
    /// The `spent` values in `categories` are stored as given; they are not
    /// recomputed from the transaction list.
    pub(crate) fn replace_budget(
        &mut self,
        monthly_budget: Decimal,
        categories: Vec<BudgetCategory>,
    ) -> FinancialData {
        let mut data = self.load();
        data.replace_budget(monthly_budget, categories);
        self.save(&data);
        data
    }

    /// Drop the stored document so the next `load` returns the default.
    pub(crate) fn clear(&mut self) {
        if let Err(e) = self.backend.remove(&self.key) {
            self.record(StoreEvent::ClearFailed {
                key: self.key.clone(),
                reason: format!("{e:#}"),
            });
        }
    }

    /// Drain the failures recorded since the last call.
    pub(crate) fn take_diagnostics(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, event: StoreEvent) {
        tracing::warn!(%event, "storage failure absorbed");
        self.events.push(event);
    }
}
