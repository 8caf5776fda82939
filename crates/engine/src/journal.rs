//! Journal queries, reports and audit trails.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use kontor_core::ledger::{LedgerEntry, LedgerError};
use kontor_core::reports::{AuditTrail, JournalReport, ReportService};

use crate::store::{EntryFilter, EntryRecord, LedgerStore};

/// Sort key for journal queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalSort {
    /// Sort by the owning transaction's date.
    #[default]
    TransactionDate,
    /// Sort by the assigned entry number.
    EntryNumber,
}

/// Options for querying journal entries.
#[derive(Debug, Clone, Default)]
pub struct JournalQueryOptions {
    /// Restrict to one account code.
    pub account_code: Option<String>,
    /// Inclusive lower bound on the transaction date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the transaction date.
    pub date_to: Option<NaiveDate>,
    /// Only entries of currently-posted transactions.
    pub posted_only: bool,
    /// Restrict to one transaction number.
    pub transaction_number: Option<String>,
    /// Sort key.
    pub sort: JournalSort,
    /// Sort descending instead of ascending.
    pub descending: bool,
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}

/// Read-side aggregation over the ledger store.
///
/// All operations are pure reads; nothing here mutates the store.
pub struct JournalService {
    store: Arc<dyn LedgerStore>,
}

impl JournalService {
    /// Creates a journal service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Returns the entries matching the options, sorted and limited.
    #[must_use]
    pub fn query_entries(&self, options: &JournalQueryOptions) -> Vec<LedgerEntry> {
        let mut records = self.store.entries_matching(&EntryFilter {
            account_code: options.account_code.clone(),
            date_from: options.date_from,
            date_to: options.date_to,
            posted_only: options.posted_only,
            transaction_number: options.transaction_number.clone(),
        });

        records.sort_by(|a, b| {
            let ordering = match options.sort {
                JournalSort::TransactionDate => a.transaction_date.cmp(&b.transaction_date),
                JournalSort::EntryNumber => compare_entry_numbers(a, b),
            };
            if options.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let mut entries: Vec<LedgerEntry> = records.into_iter().map(|r| r.entry).collect();
        if let Some(limit) = options.limit {
            entries.truncate(limit);
        }
        entries
    }

    /// Wraps a query with aggregate debit/credit totals.
    #[must_use]
    pub fn generate_report(&self, options: &JournalQueryOptions) -> JournalReport {
        ReportService::journal_report(self.query_entries(options))
    }

    /// Reconstructs the audit trail for a transaction number.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` for an unknown number.
    pub fn audit_trail(&self, transaction_number: &str) -> Result<AuditTrail, LedgerError> {
        let transaction = self
            .store
            .find_by_number(transaction_number)
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_number.to_string()))?;

        Ok(ReportService::audit_trail(&transaction, transaction_number))
    }
}

/// Orders entry numbers so that numeric suffixes sort naturally: shorter
/// numbers come first, equal lengths fall back to the string ordering.
fn compare_entry_numbers(a: &EntryRecord, b: &EntryRecord) -> Ordering {
    let a_number = a.entry.entry_number.as_deref().unwrap_or("");
    let b_number = b.entry.entry_number.as_deref().unwrap_or("");
    a_number
        .len()
        .cmp(&b_number.len())
        .then_with(|| a_number.cmp(b_number))
}
