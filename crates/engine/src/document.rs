//! Business document to transaction translation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kontor_core::ledger::{EntryType, Transaction};

/// One total line of a business document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLine {
    /// Account the line posts to.
    pub account_code: String,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Optional label carried onto the ledger entry.
    pub label: Option<String>,
    /// Lines not flagged for inclusion are ignored by the translation.
    pub include_in_transaction: bool,
}

/// A business document (invoice, receipt, ...) reduced to the facts the
/// ledger cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document number carried as the transaction's source reference.
    pub document_number: Option<String>,
    /// Document date; becomes the transaction date.
    pub document_date: NaiveDate,
    /// Default description for the transaction.
    pub description: String,
    /// Total lines to translate into ledger entries.
    pub totals: Vec<DocumentLine>,
}

/// Builds an unposted transaction from a document's flagged total lines.
///
/// No validation happens here; the posting engine validates on post, so an
/// unbalanced document still translates and can be inspected first.
#[must_use]
pub fn transaction_from_document(
    document: &SourceDocument,
    description: Option<&str>,
) -> Transaction {
    let mut transaction = Transaction::new(
        document.document_date,
        description.unwrap_or(&document.description),
    );
    transaction.document_number = document.document_number.clone();

    for line in document.totals.iter().filter(|l| l.include_in_transaction) {
        match &line.label {
            Some(label) => transaction.add_described_entry(
                &line.account_code,
                line.entry_type,
                line.amount,
                label,
            ),
            None => transaction.add_entry(&line.account_code, line.entry_type, line.amount),
        }
    }

    transaction
}
